// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use crate::digest::Digest;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A single (path, digest) observation reported by the IMA agent.
///
/// Records are observations rather than values: each carries its own
/// provenance identifier, and equality, ordering and hashing follow that
/// identifier only.  Two records with the same path and digest are distinct
/// unless one is a clone of the other.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "RawMeasurementRecord")]
pub struct MeasurementRecord {
    id: Uuid,
    path: String,
    hash: Digest,
}

#[derive(Deserialize)]
struct RawMeasurementRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    path: String,
    hash: Digest,
}

impl TryFrom<RawMeasurementRecord> for MeasurementRecord {
    type Error = Error;

    fn try_from(v: RawMeasurementRecord) -> Result<Self, Error> {
        check_path(&v.path)?;

        Ok(Self {
            id: v.id,
            path: v.path,
            hash: v.hash,
        })
    }
}

pub(crate) fn check_path(path: &str) -> Result<(), Error> {
    if path.trim().is_empty() {
        return Err(Error::Sema("measurement path MUST NOT be blank".to_string()));
    }

    Ok(())
}

impl MeasurementRecord {
    pub fn new(path: &str, hash: Digest) -> Result<Self, Error> {
        check_path(path)?;

        Ok(Self {
            id: Uuid::new_v4(),
            path: path.to_string(),
            hash,
        })
    }

    /// Parse a list of measurement records from JSON
    pub fn parse_list(j: &str) -> Result<Vec<Self>, Error> {
        serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hash(&self) -> &Digest {
        &self.hash
    }
}

impl PartialEq for MeasurementRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MeasurementRecord {}

impl Hash for MeasurementRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for MeasurementRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MeasurementRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Debug for MeasurementRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path, self.hash)
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
    fn identity_is_per_observation() {
        let a = MeasurementRecord::new("/usr/bin/ls", sha1(1)).unwrap();
        let b = MeasurementRecord::new("/usr/bin/ls", sha1(1)).unwrap();

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn blank_path() {
        assert!(MeasurementRecord::new("", sha1(1)).is_err());
        assert!(MeasurementRecord::new("  \t", sha1(1)).is_err());
    }

    #[test]
    fn parse_list_ok() {
        let j = r#"[
            { "path": "/usr/bin/ls", "hash": "SHA1 0101010101010101010101010101010101010101" },
            { "path": "ld-2.28.so", "hash": "SHA1 0202020202020202020202020202020202020202" }
        ]"#;

        let v = MeasurementRecord::parse_list(j).unwrap();

        assert_eq!(v.len(), 2);
        assert_eq!(v[0].path(), "/usr/bin/ls");
        assert_eq!(v[0].hash(), &sha1(1));
        assert_ne!(v[0].id(), v[1].id());
    }

    #[test]
    fn parse_list_blank_path() {
        let j = r#"[
            { "path": " ", "hash": "SHA1 0101010101010101010101010101010101010101" }
        ]"#;

        assert!(matches!(
            MeasurementRecord::parse_list(j),
            Err(Error::Syntax(_))
        ));
    }
}
