// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::baseline::Baseline;
use super::document::BaselineDocument;
use super::errors::Error;
use super::irecordprovider::IRecordProvider;
use super::pathmatch::{is_partial_path, partial_path};
use super::record::BaselineRecord;
use crate::digest::Digest;
use multimap::MultiMap;
use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Handle to a record held in a [`MemoRecordStore`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

#[derive(Debug, Default)]
struct Arena {
    next_id: u64,

    /// every record, with the name of the baseline owning it
    records: HashMap<RecordId, (BaselineRecord, String)>,

    /// record ids, indexed by owning baseline
    owners: MultiMap<String, RecordId>,

    /// names of the registered baselines
    baselines: BTreeSet<String>,
}

impl Arena {
    fn check_registered(&self, baseline: &str) -> Result<(), Error> {
        if !self.baselines.contains(baseline) {
            return Err(Error::Sema(format!("baseline {baseline} is not registered")));
        }

        Ok(())
    }

    fn detach(&mut self, id: RecordId) {
        if let Some((_, owner)) = self.records.get(&id) {
            if let Some(ids) = self.owners.get_vec_mut(owner) {
                ids.retain(|x| *x != id);
            }
        }
    }

    fn owned(&self, baseline: &str) -> impl Iterator<Item = (RecordId, &BaselineRecord)> {
        self.owners
            .get_vec(baseline)
            .into_iter()
            .flatten()
            .filter_map(|id| self.records.get(id).map(|(r, _)| (*id, r)))
    }

    fn insert(&mut self, baseline: &str, record: BaselineRecord) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;

        self.records.insert(id, (record, baseline.to_string()));
        self.owners.insert(baseline.to_string(), id);

        id
    }
}

/// In-memory home for baseline records.
///
/// Records live in an arena and each one is owned by exactly one registered
/// baseline.  Moving a record to another baseline is a single operation
/// under the write lock, so a record is never visible from two baselines.
#[derive(Debug, Default)]
pub struct MemoRecordStore {
    a: RwLock<Arena>,
}

impl MemoRecordStore {
    pub fn new() -> Self {
        Self {
            a: Default::default(),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Arena>, Error> {
        self.a.read().map_err(|e| Error::Provider(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Arena>, Error> {
        self.a.write().map_err(|e| Error::Provider(e.to_string()))
    }

    /// Reserve the baseline's name.  Names are unique within a store.
    pub fn register(&self, baseline: &Baseline) -> Result<(), Error> {
        let mut a = self.write()?;

        if !a.baselines.insert(baseline.name().to_string()) {
            return Err(Error::Duplicate(baseline.name().to_string()));
        }

        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> Result<bool, Error> {
        Ok(self.read()?.baselines.contains(name))
    }

    /// Name of the baseline currently owning the record, if the record exists
    pub fn owner(&self, id: RecordId) -> Result<Option<String>, Error> {
        Ok(self.read()?.records.get(&id).map(|(_, o)| o.clone()))
    }

    pub fn record(&self, id: RecordId) -> Result<Option<BaselineRecord>, Error> {
        Ok(self.read()?.records.get(&id).map(|(r, _)| r.clone()))
    }

    pub(crate) fn insert(&self, baseline: &str, record: BaselineRecord) -> Result<RecordId, Error> {
        let mut a = self.write()?;

        a.check_registered(baseline)?;

        Ok(a.insert(baseline, record))
    }

    /// Detach the record from its current owner and attach it to `baseline`.
    /// The record must fit the baseline's kind.
    pub fn assign(&self, id: RecordId, baseline: &Baseline) -> Result<(), Error> {
        let kind = baseline.kind();

        self.assign_if(id, baseline.name(), |r| kind.accepts(r))
    }

    fn assign_if<F>(&self, id: RecordId, baseline: &str, accepts: F) -> Result<(), Error>
    where
        F: Fn(&BaselineRecord) -> bool,
    {
        let mut a = self.write()?;

        a.check_registered(baseline)?;

        let record = match a.records.get(&id) {
            Some((r, _)) => r,
            None => return Err(Error::Sema(format!("no such record {id:?}"))),
        };

        if !accepts(record) {
            return Err(Error::Sema(format!(
                "record {id:?} cannot belong to baseline {baseline}"
            )));
        }

        a.detach(id);
        a.owners.insert(baseline.to_string(), id);

        if let Some((_, owner)) = a.records.get_mut(&id) {
            *owner = baseline.to_string();
        }

        Ok(())
    }

    /// Delete a record owned by `baseline`.  Returns false if the baseline
    /// does not own such a record.
    pub(crate) fn remove(&self, baseline: &str, id: RecordId) -> Result<bool, Error> {
        let mut a = self.write()?;

        match a.records.get(&id) {
            Some((_, owner)) if owner == baseline => {
                a.detach(id);
                a.records.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub(crate) fn records_of(&self, baseline: &str) -> Result<Vec<(RecordId, BaselineRecord)>, Error> {
        let a = self.read()?;

        Ok(a.owned(baseline).map(|(id, r)| (id, r.clone())).collect())
    }

    /// Swap the whole record set of `baseline` for `records`
    pub(crate) fn replace<I>(&self, baseline: &str, records: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = BaselineRecord>,
    {
        let mut a = self.write()?;

        a.check_registered(baseline)?;

        let old: Vec<RecordId> = a.owned(baseline).map(|(id, _)| id).collect();

        for id in old {
            a.detach(id);
            a.records.remove(&id);
        }

        for r in records {
            a.insert(baseline, r);
        }

        Ok(())
    }

    /// A record provider restricted to the records of `baseline`
    pub fn provider(&self, baseline: &Baseline) -> MemoRecordProvider<'_> {
        MemoRecordProvider {
            store: self,
            baseline: baseline.name().to_string(),
        }
    }

    /// Create, register and populate a baseline from the given JSON document
    pub fn load_json(&self, j: &str) -> Result<Baseline, Error> {
        let doc = BaselineDocument::parse(j)?;

        let mut baseline = Baseline::new(&doc.name, doc.kind)?;
        if let Some(d) = doc.description.as_deref() {
            baseline.set_description(d);
        }

        self.register(&baseline)?;

        for r in doc.records {
            baseline.add_record(self, r)?;
        }

        Ok(baseline)
    }

    /// The document describing `baseline` and its current records
    pub fn export(&self, baseline: &Baseline) -> Result<BaselineDocument, Error> {
        let records: BTreeSet<BaselineRecord> = self
            .records_of(baseline.name())?
            .into_iter()
            .map(|(_, r)| r)
            .collect();

        Ok(BaselineDocument {
            name: baseline.name().to_string(),
            description: baseline.description().map(str::to_string),
            kind: baseline.kind().clone(),
            records: records.into_iter().collect(),
        })
    }
}

/// [`IRecordProvider`] view over the records of one baseline
#[derive(Debug)]
pub struct MemoRecordProvider<'a> {
    store: &'a MemoRecordStore,
    baseline: String,
}

impl IRecordProvider for MemoRecordProvider<'_> {
    // Candidates are the records with the same file name as `path`:
    // equivalent prefixes and partial paths both preserve the file name.
    // Ignore-set patterns cannot be indexed and are always returned.
    fn find_by_path(
        &self,
        path: &str,
        partial_path_enabled: bool,
    ) -> Result<Vec<BaselineRecord>, Error> {
        let a = self.store.read()?;
        let name = partial_path(path);

        Ok(a.owned(&self.baseline)
            .filter(|(_, r)| match r {
                BaselineRecord::IgnoreSet(_) => true,
                other => other.path().is_some_and(|p| {
                    partial_path(p) == name
                        && (partial_path_enabled || is_partial_path(p) == is_partial_path(path))
                }),
            })
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn find_by_hash(&self, hash: &Digest) -> Result<Vec<BaselineRecord>, Error> {
        let a = self.store.read()?;

        Ok(a.owned(&self.baseline)
            .filter(|(_, r)| r.hash() == Some(hash))
            .map(|(_, r)| r.clone())
            .collect())
    }
}
