// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::batchmatchstatus::BatchMatchStatus;
use super::errors::Error;
use super::irecordprovider::IRecordProvider;
use super::matching::{contains_acceptable, contains_blacklisted, contains_hash, contains_ignored};
use super::measurement::{check_path, MeasurementRecord};
use super::memo_recordstore::{MemoRecordStore, RecordId};
use super::policy::ImaPolicy;
use super::record::BaselineRecord;
use super::repo::{derive_records, BroadRepoBaseline, TargetedRepoBaseline, UpdateSummary};
use crate::repository::IRepositoryAccess;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a baseline's records mean and where they come from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineKind {
    /// Hand-curated acceptable measurements
    Simple,
    /// Known-bad measurements: a match is bad news
    Blacklist,
    /// Paths that are not appraised
    IgnoreSet,
    /// Acceptable measurements derived from selected packages
    TargetedRepository(TargetedRepoBaseline),
    /// Acceptable measurements derived from whole repositories
    BroadRepository(BroadRepoBaseline),
}

impl BaselineKind {
    /// True if records of this shape can belong to a baseline of this kind
    pub fn accepts(&self, record: &BaselineRecord) -> bool {
        matches!(
            (self, record),
            (
                BaselineKind::Simple
                    | BaselineKind::TargetedRepository(_)
                    | BaselineKind::BroadRepository(_),
                BaselineRecord::Whitelist(_)
            ) | (BaselineKind::Blacklist, BaselineRecord::Blacklist(_))
                | (BaselineKind::IgnoreSet, BaselineRecord::IgnoreSet(_))
        )
    }
}

/// A named collection of reference records.
///
/// The records themselves live in a [`MemoRecordStore`] (or whatever backs
/// the [`IRecordProvider`] used for appraisal); the baseline carries the
/// name, the kind and the lifecycle state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Baseline {
    name: String,
    description: Option<String>,
    kind: BaselineKind,
    archived_time: Option<DateTime<Utc>>,
    archived_description: Option<String>,
}

impl Baseline {
    pub fn new(name: &str, kind: BaselineKind) -> Result<Self, Error> {
        if name.trim().is_empty() {
            return Err(Error::Sema("baseline name MUST NOT be blank".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            description: None,
            kind,
            archived_time: None,
            archived_description: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = Some(description.to_string());
    }

    pub fn kind(&self) -> &BaselineKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut BaselineKind {
        &mut self.kind
    }

    pub fn is_archived(&self) -> bool {
        self.archived_time.is_some()
    }

    pub fn archived_time(&self) -> Option<DateTime<Utc>> {
        self.archived_time
    }

    pub fn archived_description(&self) -> Option<&str> {
        self.archived_description.as_deref()
    }

    /// Mark the baseline as archived.  Returns false if it already was.
    pub fn archive(&mut self) -> bool {
        self.archive_inner(None)
    }

    pub fn archive_with(&mut self, description: &str) -> bool {
        self.archive_inner(Some(description))
    }

    fn archive_inner(&mut self, description: Option<&str>) -> bool {
        if self.is_archived() {
            return false;
        }

        self.archived_time = Some(Utc::now());
        self.archived_description = description.map(str::to_string);

        info!(baseline = self.name.as_str(), "archived");

        true
    }

    /// Clear the archived state.  Returns false if the baseline was not
    /// archived.
    pub fn restore(&mut self) -> bool {
        if !self.is_archived() {
            return false;
        }

        self.archived_time = None;
        self.archived_description = None;

        info!(baseline = self.name.as_str(), "restored");

        true
    }

    /// Appraise every measurement against this baseline.  The result holds
    /// exactly one status per input record.
    pub fn contains(
        &self,
        records: &[MeasurementRecord],
        rp: &impl IRecordProvider,
        policy: &ImaPolicy,
    ) -> Result<BatchMatchStatus, Error> {
        let mut batch = BatchMatchStatus::new();

        for record in records {
            check_path(record.path())?;

            let status = match &self.kind {
                BaselineKind::Simple
                | BaselineKind::TargetedRepository(_)
                | BaselineKind::BroadRepository(_) => {
                    contains_acceptable(&self.name, record, rp, policy)?
                }
                BaselineKind::Blacklist => contains_blacklisted(&self.name, record, rp, policy)?,
                BaselineKind::IgnoreSet => contains_ignored(&self.name, record, rp, policy)?,
            };

            debug!(
                baseline = self.name.as_str(),
                path = record.path(),
                verdict = ?status.kind(),
                "appraised measurement"
            );

            batch.add(status);
        }

        Ok(batch)
    }

    /// Like [`Baseline::contains`], but measurements are looked up by digest
    /// only and paths play no part
    pub fn contains_hashes(
        &self,
        records: &[MeasurementRecord],
        rp: &impl IRecordProvider,
    ) -> Result<BatchMatchStatus, Error> {
        let mut batch = BatchMatchStatus::new();

        for record in records {
            check_path(record.path())?;

            let status = contains_hash(&self.name, record, rp)?;

            debug!(
                baseline = self.name.as_str(),
                hash = %record.hash(),
                verdict = ?status.kind(),
                "appraised measurement digest"
            );

            batch.add(status);
        }

        Ok(batch)
    }

    fn check_accepts(&self, record: &BaselineRecord) -> Result<(), Error> {
        if !self.kind.accepts(record) {
            return Err(Error::Sema(format!(
                "record {record:?} cannot belong to baseline {}",
                self.name
            )));
        }

        Ok(())
    }

    /// Create a record owned by this baseline
    pub fn add_record(
        &self,
        store: &MemoRecordStore,
        record: BaselineRecord,
    ) -> Result<RecordId, Error> {
        self.check_accepts(&record)?;

        store.insert(&self.name, record)
    }

    /// Take ownership of an existing record away from its current baseline
    pub fn adopt_record(&self, store: &MemoRecordStore, id: RecordId) -> Result<(), Error> {
        store.assign(id, self)
    }

    /// Delete a record owned by this baseline.  Returns false if the record
    /// is not ours.
    pub fn remove_record(&self, store: &MemoRecordStore, id: RecordId) -> Result<bool, Error> {
        store.remove(&self.name, id)
    }

    pub fn records(&self, store: &MemoRecordStore) -> Result<Vec<BaselineRecord>, Error> {
        Ok(store
            .records_of(&self.name)?
            .into_iter()
            .map(|(_, r)| r)
            .collect())
    }

    /// Re-derive the records of a repository baseline from upstream.  On
    /// failure neither the baseline nor the store is modified.
    pub fn update(
        &mut self,
        access: &impl IRepositoryAccess,
        store: &MemoRecordStore,
    ) -> Result<UpdateSummary, Error> {
        let (packages, tracked) = match &self.kind {
            BaselineKind::TargetedRepository(t) => {
                let (packages, next) = t.collect(access)?;
                (packages, Some(next))
            }
            BaselineKind::BroadRepository(b) => (b.collect(access)?, None),
            _ => {
                return Err(Error::Sema(format!(
                    "baseline {} is not derived from a repository",
                    self.name
                )))
            }
        };

        let (records, contributing) = derive_records(&packages)?;
        let summary = UpdateSummary {
            packages: contributing,
            records: records.len(),
        };

        store.replace(&self.name, records)?;

        if let (Some(next), BaselineKind::TargetedRepository(t)) = (tracked, &mut self.kind) {
            t.adopt(next);
        }

        info!(
            baseline = self.name.as_str(),
            packages = summary.packages,
            records = summary.records,
            "repository baseline updated"
        );

        Ok(summary)
    }
}
