// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Summaries of appraisal results as AR4SI trust vectors.

use crate::baseline::{BaselineKind, BatchMatchStatus, MatchKind};
use ear::claim::*;
use ear::TrustVector;

/// Map the outcome of an IMA appraisal onto the file-system claim.
///
/// For acceptable-value baselines any mismatch is contraindicated, and
/// measurements nobody knows about make the file system unrecognized.  For
/// blacklists a single hit is contraindicated.  Ignore-set results say
/// nothing about trustworthiness and leave the vector without claims.
pub fn ima_trust_vector(kind: &BaselineKind, batch: &BatchMatchStatus) -> TrustVector {
    let mut tv = TrustVector::default();
    tv.set_all(NO_CLAIM);

    let any = |k| !batch.records_with(k).is_empty();

    match kind {
        BaselineKind::Simple
        | BaselineKind::TargetedRepository(_)
        | BaselineKind::BroadRepository(_) => {
            if any(MatchKind::Mismatch) {
                tv.file_system.set(CONTRAINDICATED_FILES);
            } else if any(MatchKind::Unknown) {
                tv.file_system.set(UNRECOGNIZED_FILES);
            } else {
                tv.file_system.set(APPROVED_FILES);
            }
        }
        BaselineKind::Blacklist => {
            if any(MatchKind::Match) {
                tv.file_system.set(CONTRAINDICATED_FILES);
            } else {
                tv.file_system.set(APPROVED_FILES);
            }
        }
        BaselineKind::IgnoreSet => {}
    }

    tv
}

/// Map a PCR validation diagnostic onto the executables claim
pub fn pcr_trust_vector(diagnostic: &str) -> TrustVector {
    let mut tv = TrustVector::default();
    tv.set_all(NO_CLAIM);

    if diagnostic.is_empty() {
        tv.executables.set(APPROVED_BOOT);
    } else {
        tv.executables.set(UNRECOGNIZED_RUNTIME);
    }

    tv
}
