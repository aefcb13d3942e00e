// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::package::{Package, PackageId};

/// Interface to the package repositories repository-derived baselines are
/// built from.  Calls may go over the network and block.
pub trait IRepositoryAccess {
    /// List every package currently published in `repository`
    fn list_packages(&self, repository: &str) -> Result<Vec<Package>, Error>;

    /// List the builds of `package` in `repository` that are at least as new
    /// as the given one, including that build if it is still published
    fn get_updated_packages(
        &self,
        repository: &str,
        package: &PackageId,
    ) -> Result<Vec<Package>, Error>;
}
