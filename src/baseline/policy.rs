// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Groups of directory prefixes that are interchangeable, e.g. `/bin/` and
/// `/usr/bin/` on a merged-usr system.
///
/// The textual form has one group per line, prefixes separated by
/// whitespace.  Blank lines and `#` comments are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathEquivalences {
    groups: Vec<Vec<String>>,
}

pub const DEFAULT_PATH_EQUIVALENCES: &str = "\
/bin/ /usr/bin/
/lib/ /usr/lib/
/lib64/ /usr/lib64/
/usr/lib/ /usr/lib64/
/sbin/ /usr/sbin/
";

impl Default for PathEquivalences {
    fn default() -> Self {
        Self::new()
    }
}

impl PathEquivalences {
    pub fn new() -> Self {
        // the built-in table is known to be well-formed
        Self {
            groups: DEFAULT_PATH_EQUIVALENCES
                .lines()
                .map(|l| l.split_whitespace().map(str::to_string).collect())
                .collect(),
        }
    }

    /// A table with no groups: only exact and partial path matching apply
    pub fn empty() -> Self {
        Self { groups: vec![] }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut groups = vec![];

        for (n, line) in s.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let group: Vec<String> = line.split_whitespace().map(str::to_string).collect();

            if group.len() < 2 {
                return Err(Error::Syntax(format!(
                    "path equivalences, line {}: expecting at least two prefixes",
                    n + 1
                )));
            }

            if let Some(p) = group.iter().find(|p| !p.starts_with('/')) {
                return Err(Error::Syntax(format!(
                    "path equivalences, line {}: prefix {p} is not absolute",
                    n + 1
                )));
            }

            groups.push(group);
        }

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// All spellings of `path` under this table: the path itself, then the
    /// path re-rooted under every prefix equivalent to one it starts with.
    pub fn equivalent_paths(&self, path: &str) -> Vec<String> {
        let mut paths = vec![path.to_string()];

        for group in self.groups.iter() {
            for prefix in group.iter() {
                if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                    for other in group.iter().filter(|o| *o != prefix) {
                        let p = format!("{other}{rest}");

                        if !paths.contains(&p) {
                            paths.push(p);
                        }
                    }
                }
            }
        }

        paths
    }

    fn to_text(&self) -> String {
        self.groups
            .iter()
            .map(|g| g.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for PathEquivalences {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for PathEquivalences {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        PathEquivalences::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// IMA appraisal settings that influence how measurements are matched
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImaPolicy {
    /// Allow a bare file name on either side to match by file name alone
    pub partial_path_enable: bool,

    /// Treat measurements no baseline knows about as an appraisal failure
    pub fail_on_unknowns: bool,

    pub path_equivalences: PathEquivalences,
}

impl Default for ImaPolicy {
    fn default() -> Self {
        Self {
            partial_path_enable: true,
            fail_on_unknowns: false,
            path_equivalences: PathEquivalences::new(),
        }
    }
}

impl ImaPolicy {
    /// Load a policy from its JSON configuration
    pub fn from_json(j: &str) -> Result<Self, Error> {
        serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))
    }
}
