// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A path, or regular expression over paths, whose measurements are not
/// appraised at all.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawImaIgnoreSetRecord")]
pub struct ImaIgnoreSetRecord {
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// `pattern` anchored at both ends
    #[serde(skip)]
    regex: Regex,
}

#[derive(Deserialize)]
struct RawImaIgnoreSetRecord {
    pattern: String,
    description: Option<String>,
}

impl TryFrom<RawImaIgnoreSetRecord> for ImaIgnoreSetRecord {
    type Error = Error;

    fn try_from(v: RawImaIgnoreSetRecord) -> Result<Self, Error> {
        Self::new(&v.pattern, v.description.as_deref())
    }
}

impl ImaIgnoreSetRecord {
    pub fn new(pattern: &str, description: Option<&str>) -> Result<Self, Error> {
        if pattern.trim().is_empty() {
            return Err(Error::Sema("ignore-set pattern MUST NOT be blank".to_string()));
        }

        // the raw pattern must be valid on its own before it is anchored
        Regex::new(pattern).map_err(|e| Error::Pattern(format!("{pattern}: {e}")))?;

        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| Error::Pattern(format!("{pattern}: {e}")))?;

        Ok(Self {
            pattern: pattern.to_string(),
            description: description.map(str::to_string),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// True if the whole of `candidate` is matched by the pattern
    pub fn is_full_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Patterns with no regex syntax and no directory separator name a
    /// single file
    pub fn is_literal_filename(&self) -> bool {
        !self.pattern.contains('/') && regex::escape(&self.pattern) == self.pattern
    }
}

impl PartialEq for ImaIgnoreSetRecord {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for ImaIgnoreSetRecord {}

impl Hash for ImaIgnoreSetRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
    }
}

impl PartialOrd for ImaIgnoreSetRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImaIgnoreSetRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pattern.cmp(&other.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyc_pattern() {
        let r = ImaIgnoreSetRecord::new(r".*\/bin\/.*\.pyc", None).unwrap();

        assert!(r.is_full_match("/usr/bin/scripts/runner.pyc"));
        assert!(!r.is_full_match("/usr/bin/scripts/runner.py"));
        assert!(!r.is_literal_filename());
    }

    #[test]
    fn literal_filename() {
        assert!(ImaIgnoreSetRecord::new("gradlew", None).unwrap().is_literal_filename());
        assert!(!ImaIgnoreSetRecord::new("/usr/bin/gradlew", None)
            .unwrap()
            .is_literal_filename());
        assert!(!ImaIgnoreSetRecord::new(r"lib.*\.so", None)
            .unwrap()
            .is_literal_filename());
    }

    #[test]
    fn anchored_at_both_ends() {
        let r = ImaIgnoreSetRecord::new("/tmp/.*", None).unwrap();

        assert!(r.is_full_match("/tmp/x"));
        assert!(!r.is_full_match("/var/tmp/x"));
    }

    #[test]
    fn alternation_stays_anchored() {
        let r = ImaIgnoreSetRecord::new("/a|/b", None).unwrap();

        assert!(r.is_full_match("/a"));
        assert!(r.is_full_match("/b"));
        assert!(!r.is_full_match("/a/c"));
        assert!(!r.is_full_match("/c/b"));
    }

    #[test]
    fn invalid_patterns() {
        assert!(matches!(
            ImaIgnoreSetRecord::new("(", None),
            Err(Error::Pattern(_))
        ));
        assert!(matches!(
            ImaIgnoreSetRecord::new("a)|(b", None),
            Err(Error::Pattern(_))
        ));
        assert!(matches!(
            ImaIgnoreSetRecord::new("   ", None),
            Err(Error::Sema(_))
        ));
    }

    #[test]
    fn equality_by_pattern() {
        let a = ImaIgnoreSetRecord::new("/tmp/.*", Some("scratch")).unwrap();
        let b = ImaIgnoreSetRecord::new("/tmp/.*", None).unwrap();

        assert_eq!(a, b);
    }
}
