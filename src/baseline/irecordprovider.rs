// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::record::BaselineRecord;
use crate::digest::Digest;

/// Interface to wherever the records of one baseline are kept.
///
/// Lookups may return more candidates than strictly match; the matching
/// code filters them again.  Errors are returned to the caller of
/// `contains` unchanged.
pub trait IRecordProvider {
    /// Lookup the records reachable from `path`, including by file name
    /// when `partial_path_enabled` is set
    fn find_by_path(
        &self,
        path: &str,
        partial_path_enabled: bool,
    ) -> Result<Vec<BaselineRecord>, Error>;

    /// Lookup the records carrying the given digest
    fn find_by_hash(&self, hash: &Digest) -> Result<Vec<BaselineRecord>, Error>;
}
