// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::record::{BaselineRecord, ImaBaselineRecord};
use crate::digest::Digest;
use crate::repository::{IRepositoryAccess, Package, PackageId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// A package followed by a targeted repository baseline
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackedPackage {
    pub repository: String,
    pub package: PackageId,
}

/// Follows selected packages.  On update each one is advanced to its newest
/// build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetedRepoBaseline {
    #[serde(default)]
    packages: BTreeSet<TrackedPackage>,
}

impl TargetedRepoBaseline {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns false if the package build was already tracked
    pub fn track_package(&mut self, repository: &str, package: PackageId) -> bool {
        self.packages.insert(TrackedPackage {
            repository: repository.to_string(),
            package,
        })
    }

    /// Stop tracking every build of the package in `repository`
    pub fn untrack_package(&mut self, repository: &str, package: &PackageId) -> bool {
        let before = self.packages.len();

        self.packages
            .retain(|t| !(t.repository == repository && t.package.is_same_package(package)));

        self.packages.len() != before
    }

    pub fn packages(&self) -> impl Iterator<Item = &TrackedPackage> {
        self.packages.iter()
    }

    /// Fetch the newest build of every tracked package, together with the
    /// tracked set as it should look once these builds are adopted
    pub(crate) fn collect(
        &self,
        access: &impl IRepositoryAccess,
    ) -> Result<(Vec<Package>, BTreeSet<TrackedPackage>), Error> {
        let mut packages = vec![];
        let mut next = BTreeSet::new();

        for t in &self.packages {
            let latest = access
                .get_updated_packages(&t.repository, &t.package)?
                .into_iter()
                .filter(|p| p.id.is_same_package(&t.package))
                .max_by(|a, b| a.id.compare_version(&b.id));

            match latest {
                Some(p) => {
                    next.insert(TrackedPackage {
                        repository: t.repository.clone(),
                        package: p.id.clone(),
                    });
                    packages.push(p);
                }
                None => {
                    warn!(
                        repository = t.repository.as_str(),
                        package = t.package.name.as_str(),
                        "tracked package is no longer published"
                    );
                    next.insert(t.clone());
                }
            }
        }

        Ok((packages, next))
    }

    pub(crate) fn adopt(&mut self, packages: BTreeSet<TrackedPackage>) {
        self.packages = packages;
    }
}

/// Follows whole repositories
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadRepoBaseline {
    #[serde(default)]
    repositories: BTreeSet<String>,
}

impl BroadRepoBaseline {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn track_repository(&mut self, repository: &str) -> bool {
        self.repositories.insert(repository.to_string())
    }

    pub fn untrack_repository(&mut self, repository: &str) -> bool {
        self.repositories.remove(repository)
    }

    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.repositories.iter().map(String::as_str)
    }

    pub(crate) fn collect(&self, access: &impl IRepositoryAccess) -> Result<Vec<Package>, Error> {
        let mut packages = vec![];

        for r in &self.repositories {
            packages.extend(access.list_packages(r)?);
        }

        Ok(packages)
    }
}

/// Outcome of a repository baseline update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// packages contributing records
    pub packages: usize,
    /// records now held by the baseline
    pub records: usize,
}

/// Turn package measurements into whitelist records.  A package archive
/// published more than once (e.g. in two repositories) contributes once.
pub(crate) fn derive_records(
    packages: &[Package],
) -> Result<(BTreeSet<BaselineRecord>, usize), Error> {
    let mut seen: HashSet<&Digest> = HashSet::new();
    let mut records = BTreeSet::new();

    for p in packages {
        if !seen.insert(&p.content_digest) {
            debug!(package = p.id.name.as_str(), "skipping duplicate package content");
            continue;
        }

        for m in &p.measurements {
            records.insert(ImaBaselineRecord::new(&m.path, m.hash.clone())?.into());
        }
    }

    Ok((records, seen.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestAlgorithm;
    use crate::repository::{MemoRepositoryAccess, PackageMeasurement};

    fn sha1(b: u8) -> Digest {
        Digest::new(DigestAlgorithm::Sha1, &[b; 20]).unwrap()
    }

    fn bash(version: &str) -> PackageId {
        PackageId {
            name: "bash".to_string(),
            version: version.to_string(),
            release: "1.el9".to_string(),
            architecture: "x86_64".to_string(),
        }
    }

    fn package(id: PackageId, content: u8, file: u8) -> Package {
        Package {
            id,
            content_digest: sha1(content),
            measurements: vec![PackageMeasurement {
                path: "/usr/bin/bash".to_string(),
                hash: sha1(file),
            }],
        }
    }

    #[test]
    fn track_untrack() {
        let mut t = TargetedRepoBaseline::new();

        assert!(t.track_package("baseos", bash("5.1")));
        assert!(!t.track_package("baseos", bash("5.1")));
        assert!(t.untrack_package("baseos", &bash("5.2")));
        assert!(!t.untrack_package("baseos", &bash("5.1")));
        assert_eq!(t.packages().count(), 0);

        let mut b = BroadRepoBaseline::new();
        assert!(b.track_repository("baseos"));
        assert!(!b.track_repository("baseos"));
        assert!(b.untrack_repository("baseos"));
        assert!(!b.untrack_repository("baseos"));
    }

    #[test]
    fn targeted_collect_picks_newest() {
        let access = MemoRepositoryAccess::new();
        access.publish("baseos", package(bash("5.1"), 1, 11)).unwrap();
        access.publish("baseos", package(bash("5.2"), 2, 12)).unwrap();

        let mut t = TargetedRepoBaseline::new();
        t.track_package("baseos", bash("5.1"));

        let (packages, next) = t.collect(&access).unwrap();

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].id, bash("5.2"));
        assert_eq!(next.iter().next().map(|t| &t.package), Some(&bash("5.2")));
    }

    #[test]
    fn targeted_collect_keeps_withdrawn() {
        let access = MemoRepositoryAccess::new();
        access.publish("baseos", package(bash("5.0"), 1, 11)).unwrap();

        let mut t = TargetedRepoBaseline::new();
        t.track_package("baseos", bash("5.1"));

        let (packages, next) = t.collect(&access).unwrap();

        assert!(packages.is_empty());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn broad_collect_unknown_repository() {
        let access = MemoRepositoryAccess::new();

        let mut b = BroadRepoBaseline::new();
        b.track_repository("nowhere");

        assert!(matches!(b.collect(&access), Err(Error::Repository(_))));
    }

    #[test]
    fn duplicate_content_contributes_once() {
        let mut twin = package(bash("5.1"), 1, 11);
        twin.measurements[0].path = "/bin/bash".to_string();

        let (records, n) = derive_records(&[package(bash("5.1"), 1, 11), twin]).unwrap();

        assert_eq!(n, 1);
        assert_eq!(records.len(), 1);
    }
}
