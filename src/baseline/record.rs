// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::blacklistrecord::ImaBlacklistRecord;
use super::errors::Error;
use super::ignoresetrecord::ImaIgnoreSetRecord;
use crate::digest::Digest;
use serde::{Deserialize, Serialize};

/// An acceptable (whitelist) or required measurement: both path and digest
/// are mandatory.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawImaBaselineRecord")]
pub struct ImaBaselineRecord {
    path: String,
    hash: Digest,
}

#[derive(Deserialize)]
struct RawImaBaselineRecord {
    path: String,
    hash: Digest,
}

impl TryFrom<RawImaBaselineRecord> for ImaBaselineRecord {
    type Error = Error;

    fn try_from(v: RawImaBaselineRecord) -> Result<Self, Error> {
        Self::new(&v.path, v.hash)
    }
}

impl ImaBaselineRecord {
    pub fn new(path: &str, hash: Digest) -> Result<Self, Error> {
        if path.trim().is_empty() {
            return Err(Error::Sema("baseline record path MUST NOT be blank".to_string()));
        }

        Ok(Self {
            path: path.to_string(),
            hash,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hash(&self) -> &Digest {
        &self.hash
    }
}

/// Any entry a baseline can hold.  Which variants a given baseline accepts
/// depends on its kind.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BaselineRecord {
    Whitelist(ImaBaselineRecord),
    Blacklist(ImaBlacklistRecord),
    IgnoreSet(ImaIgnoreSetRecord),
}

impl BaselineRecord {
    /// The literal path this record is bound to, if any.  Ignore-set
    /// patterns are not literal paths and report `None`.
    pub fn path(&self) -> Option<&str> {
        match self {
            BaselineRecord::Whitelist(r) => Some(r.path()),
            BaselineRecord::Blacklist(r) => r.path(),
            BaselineRecord::IgnoreSet(_) => None,
        }
    }

    pub fn hash(&self) -> Option<&Digest> {
        match self {
            BaselineRecord::Whitelist(r) => Some(r.hash()),
            BaselineRecord::Blacklist(r) => r.hash(),
            BaselineRecord::IgnoreSet(_) => None,
        }
    }
}

impl From<ImaBaselineRecord> for BaselineRecord {
    fn from(v: ImaBaselineRecord) -> Self {
        BaselineRecord::Whitelist(v)
    }
}

impl From<ImaBlacklistRecord> for BaselineRecord {
    fn from(v: ImaBlacklistRecord) -> Self {
        BaselineRecord::Blacklist(v)
    }
}

impl From<ImaIgnoreSetRecord> for BaselineRecord {
    fn from(v: ImaIgnoreSetRecord) -> Self {
        BaselineRecord::IgnoreSet(v)
    }
}
