// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::measurement::MeasurementRecord;
use super::record::BaselineRecord;
use std::collections::BTreeSet;

/// Verdict for one measurement against one baseline, together with the
/// baseline records that support it.  `Match` and `Mismatch` always carry at
/// least one record; `Unknown` carries none.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchOutcome {
    Match(BTreeSet<BaselineRecord>),
    Mismatch(BTreeSet<BaselineRecord>),
    Unknown,
}

/// The three verdicts, without their evidence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Match,
    Mismatch,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchStatus {
    record: MeasurementRecord,
    baseline: String,
    outcome: MatchOutcome,
}

fn non_empty<I>(records: I, what: &str) -> Result<BTreeSet<BaselineRecord>, Error>
where
    I: IntoIterator<Item = BaselineRecord>,
{
    let set: BTreeSet<BaselineRecord> = records.into_iter().collect();

    if set.is_empty() {
        return Err(Error::Sema(format!(
            "a {what} status needs at least one baseline record"
        )));
    }

    Ok(set)
}

impl MatchStatus {
    pub fn matched<I>(record: MeasurementRecord, baseline: &str, records: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = BaselineRecord>,
    {
        Ok(Self {
            record,
            baseline: baseline.to_string(),
            outcome: MatchOutcome::Match(non_empty(records, "match")?),
        })
    }

    pub fn mismatched<I>(
        record: MeasurementRecord,
        baseline: &str,
        records: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = BaselineRecord>,
    {
        Ok(Self {
            record,
            baseline: baseline.to_string(),
            outcome: MatchOutcome::Mismatch(non_empty(records, "mismatch")?),
        })
    }

    pub fn unknown(record: MeasurementRecord, baseline: &str) -> Self {
        Self {
            record,
            baseline: baseline.to_string(),
            outcome: MatchOutcome::Unknown,
        }
    }

    pub fn record(&self) -> &MeasurementRecord {
        &self.record
    }

    /// Name of the baseline that produced this verdict
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn outcome(&self) -> &MatchOutcome {
        &self.outcome
    }

    pub fn kind(&self) -> MatchKind {
        match self.outcome {
            MatchOutcome::Match(_) => MatchKind::Match,
            MatchOutcome::Mismatch(_) => MatchKind::Mismatch,
            MatchOutcome::Unknown => MatchKind::Unknown,
        }
    }

    pub fn baseline_records(&self) -> impl Iterator<Item = &BaselineRecord> {
        match &self.outcome {
            MatchOutcome::Match(r) | MatchOutcome::Mismatch(r) => Some(r.iter()),
            MatchOutcome::Unknown => None,
        }
        .into_iter()
        .flatten()
    }
}
