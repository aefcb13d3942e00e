// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::matchstatus::{MatchKind, MatchStatus};
use super::measurement::MeasurementRecord;
use super::record::BaselineRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Match statuses for a batch of measurements, grouped by measurement.
///
/// A measurement may collect several statuses, e.g. when the batch is the
/// union of evaluations against more than one baseline.  Equality does not
/// depend on insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BatchMatchStatus {
    statuses: BTreeMap<MeasurementRecord, BTreeSet<MatchStatus>>,
}

impl BatchMatchStatus {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, status: MatchStatus) {
        self.statuses
            .entry(status.record().clone())
            .or_default()
            .insert(status);
    }

    /// Fold another batch into this one
    pub fn merge(&mut self, other: BatchMatchStatus) {
        for (record, statuses) in other.statuses {
            self.statuses.entry(record).or_default().extend(statuses);
        }
    }

    pub fn contains(&self, record: &MeasurementRecord) -> bool {
        self.statuses.contains_key(record)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// All the measurement records the batch has a verdict for
    pub fn records(&self) -> BTreeSet<&MeasurementRecord> {
        self.statuses.keys().collect()
    }

    pub fn ima_match_statuses(
        &self,
        record: &MeasurementRecord,
    ) -> Result<&BTreeSet<MatchStatus>, Error> {
        self.statuses
            .get(record)
            .ok_or_else(|| Error::UnknownRecord(format!("{record:?}")))
    }

    fn any_of(&self, record: &MeasurementRecord, kind: MatchKind) -> Result<bool, Error> {
        Ok(self
            .ima_match_statuses(record)?
            .iter()
            .any(|s| s.kind() == kind))
    }

    pub fn found_match(&self, record: &MeasurementRecord) -> Result<bool, Error> {
        self.any_of(record, MatchKind::Match)
    }

    pub fn found_mismatch(&self, record: &MeasurementRecord) -> Result<bool, Error> {
        self.any_of(record, MatchKind::Mismatch)
    }

    pub fn found_only_unknown(&self, record: &MeasurementRecord) -> Result<bool, Error> {
        Ok(self
            .ima_match_statuses(record)?
            .iter()
            .all(|s| s.kind() == MatchKind::Unknown))
    }

    fn records_of(
        &self,
        record: &MeasurementRecord,
        kind: Option<MatchKind>,
    ) -> Result<BTreeSet<BaselineRecord>, Error> {
        Ok(self
            .ima_match_statuses(record)?
            .iter()
            .filter(|s| kind.map_or(true, |k| s.kind() == k))
            .flat_map(|s| s.baseline_records().cloned())
            .collect())
    }

    /// Every baseline record cited as evidence for `record`
    pub fn baseline_records(
        &self,
        record: &MeasurementRecord,
    ) -> Result<BTreeSet<BaselineRecord>, Error> {
        self.records_of(record, None)
    }

    pub fn matching_baseline_records(
        &self,
        record: &MeasurementRecord,
    ) -> Result<BTreeSet<BaselineRecord>, Error> {
        self.records_of(record, Some(MatchKind::Match))
    }

    pub fn mismatching_baseline_records(
        &self,
        record: &MeasurementRecord,
    ) -> Result<BTreeSet<BaselineRecord>, Error> {
        self.records_of(record, Some(MatchKind::Mismatch))
    }

    /// Measurement records with at least one status of the given kind
    pub fn records_with(&self, kind: MatchKind) -> Vec<&MeasurementRecord> {
        self.statuses
            .iter()
            .filter(|(_, v)| v.iter().any(|s| s.kind() == kind))
            .map(|(k, _)| k)
            .collect()
    }
}
