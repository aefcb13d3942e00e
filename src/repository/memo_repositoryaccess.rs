// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::package::{Package, PackageId};
use super::IRepositoryAccess;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory package repositories, indexed by repository name
#[derive(Debug, Default)]
pub struct MemoRepositoryAccess {
    r: RwLock<HashMap<String, Vec<Package>>>,
}

impl MemoRepositoryAccess {
    pub fn new() -> Self {
        Self {
            r: Default::default(),
        }
    }

    /// Add to the (possibly empty) set of repositories the ones described by
    /// the given JSON document, a map from repository name to packages
    pub fn load_json(&mut self, j: &str) -> Result<(), Error> {
        let v: HashMap<String, Vec<Package>> =
            serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))?;

        for (repository, packages) in v {
            for p in packages {
                self.publish(&repository, p)?;
            }
        }

        Ok(())
    }

    /// Publish a package, replacing an identical build if present
    pub fn publish(&self, repository: &str, package: Package) -> Result<(), Error> {
        let mut r = self
            .r
            .write()
            .map_err(|e| Error::Access(e.to_string()))?;

        let packages = r.entry(repository.to_string()).or_default();
        packages.retain(|p| p.id != package.id);
        packages.push(package);

        Ok(())
    }

    pub fn withdraw(&self, repository: &str, package: &PackageId) -> Result<(), Error> {
        let mut r = self
            .r
            .write()
            .map_err(|e| Error::Access(e.to_string()))?;

        if let Some(packages) = r.get_mut(repository) {
            packages.retain(|p| &p.id != package);
        }

        Ok(())
    }
}

impl IRepositoryAccess for MemoRepositoryAccess {
    fn list_packages(&self, repository: &str) -> Result<Vec<Package>, Error> {
        let r = self.r.read().map_err(|e| Error::Access(e.to_string()))?;

        r.get(repository)
            .cloned()
            .ok_or_else(|| Error::Access(format!("unknown repository {repository}")))
    }

    fn get_updated_packages(
        &self,
        repository: &str,
        package: &PackageId,
    ) -> Result<Vec<Package>, Error> {
        Ok(self
            .list_packages(repository)?
            .into_iter()
            .filter(|p| {
                p.id.is_same_package(package) && p.id.compare_version(package) != Ordering::Less
            })
            .collect())
    }
}
