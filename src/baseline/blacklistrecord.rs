// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use crate::digest::Digest;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A known-bad entry.  It may name a path, a digest, or both; at least one
/// is required.  A path-only entry flags the path whatever its content, a
/// digest-only entry flags the content wherever it lives.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawImaBlacklistRecord")]
pub struct ImaBlacklistRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawImaBlacklistRecord {
    path: Option<String>,
    hash: Option<Digest>,
    description: Option<String>,
}

impl TryFrom<RawImaBlacklistRecord> for ImaBlacklistRecord {
    type Error = Error;

    fn try_from(v: RawImaBlacklistRecord) -> Result<Self, Error> {
        Self::new(v.path.as_deref(), v.hash, v.description.as_deref())
    }
}

impl ImaBlacklistRecord {
    pub fn new(
        path: Option<&str>,
        hash: Option<Digest>,
        description: Option<&str>,
    ) -> Result<Self, Error> {
        if let Some(p) = path {
            if p.trim().is_empty() {
                return Err(Error::Sema(
                    "blacklist record path, if given, MUST NOT be blank".to_string(),
                ));
            }
        }

        if path.is_none() && hash.is_none() {
            return Err(Error::Sema(
                "blacklist record needs a path, a hash, or both".to_string(),
            ));
        }

        Ok(Self {
            path: path.map(str::to_string),
            hash,
            description: description.map(str::to_string),
        })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn hash(&self) -> Option<&Digest> {
        self.hash.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn key(&self) -> (Option<&str>, Option<&Digest>) {
        (self.path.as_deref(), self.hash.as_ref())
    }
}

// description is informational and does not take part in identity
impl PartialEq for ImaBlacklistRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ImaBlacklistRecord {}

impl Hash for ImaBlacklistRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for ImaBlacklistRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImaBlacklistRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestAlgorithm;

    fn sha1(b: u8) -> Digest {
        Digest::new(DigestAlgorithm::Sha1, &[b; 20]).unwrap()
    }

    #[test]
    fn needs_path_or_hash() {
        assert!(ImaBlacklistRecord::new(None, None, Some("nothing")).is_err());
        assert!(ImaBlacklistRecord::new(Some("/tmp/evil"), None, None).is_ok());
        assert!(ImaBlacklistRecord::new(None, Some(sha1(1)), None).is_ok());
        assert!(ImaBlacklistRecord::new(Some("/tmp/evil"), Some(sha1(1)), None).is_ok());
    }

    #[test]
    fn blank_path() {
        assert!(ImaBlacklistRecord::new(Some(" "), Some(sha1(1)), None).is_err());
    }

    #[test]
    fn equality_ignores_description() {
        let a = ImaBlacklistRecord::new(Some("/tmp/evil"), None, Some("one")).unwrap();
        let b = ImaBlacklistRecord::new(Some("/tmp/evil"), None, Some("two")).unwrap();
        let c = ImaBlacklistRecord::new(Some("/tmp/evil"), Some(sha1(1)), Some("one")).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
