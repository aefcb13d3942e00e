// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::irecordprovider::IRecordProvider;
use super::matchstatus::MatchStatus;
use super::measurement::MeasurementRecord;
use super::pathmatch::record_matches_path;
use super::policy::ImaPolicy;
use super::record::BaselineRecord;
use crate::digest::DigestComparison;

fn path_candidates(
    record: &MeasurementRecord,
    rp: &impl IRecordProvider,
    policy: &ImaPolicy,
) -> Result<Vec<BaselineRecord>, Error> {
    Ok(rp
        .find_by_path(record.path(), policy.partial_path_enable)?
        .into_iter()
        .filter(|c| record_matches_path(c, record.path(), policy))
        .collect())
}

fn hash_candidates(
    record: &MeasurementRecord,
    rp: &impl IRecordProvider,
) -> Result<Vec<BaselineRecord>, Error> {
    Ok(rp
        .find_by_hash(record.hash())?
        .into_iter()
        .filter(|c| record.hash().compare(c.hash()) == DigestComparison::Match)
        .collect())
}

// Candidates have already matched on path.  Those without a digest match
// outright, the others must agree on the digest too.  If nothing agrees the
// path-matched candidates become the evidence for a mismatch.
fn judge(
    baseline: &str,
    record: &MeasurementRecord,
    candidates: Vec<BaselineRecord>,
) -> Result<MatchStatus, Error> {
    if candidates.is_empty() {
        return Ok(MatchStatus::unknown(record.clone(), baseline));
    }

    let (matching, mismatching): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|c| {
        c.hash().is_none() || record.hash().compare(c.hash()) == DigestComparison::Match
    });

    if !matching.is_empty() {
        return MatchStatus::matched(record.clone(), baseline, matching);
    }

    MatchStatus::mismatched(record.clone(), baseline, mismatching)
}

/// Appraise a measurement against acceptable values (simple and
/// repository-derived baselines)
pub(crate) fn contains_acceptable(
    baseline: &str,
    record: &MeasurementRecord,
    rp: &impl IRecordProvider,
    policy: &ImaPolicy,
) -> Result<MatchStatus, Error> {
    let candidates = path_candidates(record, rp, policy)?;

    judge(baseline, record, candidates)
}

/// Appraise a measurement against known-bad values.  Digest-only entries
/// are reached through the digest rather than the path.
pub(crate) fn contains_blacklisted(
    baseline: &str,
    record: &MeasurementRecord,
    rp: &impl IRecordProvider,
    policy: &ImaPolicy,
) -> Result<MatchStatus, Error> {
    let mut candidates = path_candidates(record, rp, policy)?;

    for c in hash_candidates(record, rp)? {
        if c.path().is_none() && !candidates.contains(&c) {
            candidates.push(c);
        }
    }

    judge(baseline, record, candidates)
}

/// Any pattern covering the path is a match; digests play no part
pub(crate) fn contains_ignored(
    baseline: &str,
    record: &MeasurementRecord,
    rp: &impl IRecordProvider,
    policy: &ImaPolicy,
) -> Result<MatchStatus, Error> {
    let patterns: Vec<BaselineRecord> = path_candidates(record, rp, policy)?
        .into_iter()
        .filter(|c| matches!(c, BaselineRecord::IgnoreSet(_)))
        .collect();

    if patterns.is_empty() {
        return Ok(MatchStatus::unknown(record.clone(), baseline));
    }

    MatchStatus::matched(record.clone(), baseline, patterns)
}

/// Digest-only appraisal: every record sharing the digest is evidence,
/// whatever its path
pub(crate) fn contains_hash(
    baseline: &str,
    record: &MeasurementRecord,
    rp: &impl IRecordProvider,
) -> Result<MatchStatus, Error> {
    let candidates = hash_candidates(record, rp)?;

    if candidates.is_empty() {
        return Ok(MatchStatus::unknown(record.clone(), baseline));
    }

    MatchStatus::matched(record.clone(), baseline, candidates)
}
