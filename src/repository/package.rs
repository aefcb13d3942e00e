// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use crate::digest::Digest;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Identifies one build of a package
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageId {
    pub name: String,
    pub version: String,
    pub release: String,
    pub architecture: String,
}

impl PackageId {
    /// Same package, possibly at a different version
    pub fn is_same_package(&self, other: &PackageId) -> bool {
        self.name == other.name && self.architecture == other.architecture
    }

    /// Order builds of the same package by version, then release
    pub fn compare_version(&self, other: &PackageId) -> Ordering {
        compare_versions(&self.version, &other.version)
            .then_with(|| compare_versions(&self.release, &other.release))
    }
}

/// A file shipped by a package together with its expected digest
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMeasurement {
    pub path: String,
    pub hash: Digest,
}

/// A package as published in a repository, with the measurements of the
/// files it installs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Package {
    #[serde(flatten)]
    pub id: PackageId,

    /// Digest of the package archive itself
    pub content_digest: Digest,

    #[serde(default)]
    pub measurements: Vec<PackageMeasurement>,
}

enum Segment<'a> {
    Numeric(&'a str),
    Alpha(&'a str),
}

fn segments(v: &str) -> Vec<Segment<'_>> {
    let mut out = vec![];
    let bytes = v.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_alphanumeric() {
            i += 1;
            continue;
        }

        let start = i;
        let numeric = bytes[i].is_ascii_digit();

        while i < bytes.len()
            && bytes[i].is_ascii_alphanumeric()
            && bytes[i].is_ascii_digit() == numeric
        {
            i += 1;
        }

        if numeric {
            out.push(Segment::Numeric(&v[start..i]));
        } else {
            out.push(Segment::Alpha(&v[start..i]));
        }
    }

    out
}

/// rpm-style version comparison: versions are split into runs of digits
/// and runs of letters, digits compare numerically and sort after letters,
/// and when one version is a prefix of the other the longer one is newer.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let sa = segments(a);
    let sb = segments(b);

    for (x, y) in sa.iter().zip(sb.iter()) {
        let o = match (x, y) {
            (Segment::Numeric(x), Segment::Numeric(y)) => {
                let x = x.trim_start_matches('0');
                let y = y.trim_start_matches('0');
                x.len().cmp(&y.len()).then_with(|| x.cmp(y))
            }
            (Segment::Alpha(x), Segment::Alpha(y)) => x.cmp(y),
            (Segment::Numeric(_), Segment::Alpha(_)) => Ordering::Greater,
            (Segment::Alpha(_), Segment::Numeric(_)) => Ordering::Less,
        };

        if o != Ordering::Equal {
            return o;
        }
    }

    sa.len().cmp(&sb.len())
}
