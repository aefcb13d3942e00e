// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Package repositories as seen by repository-derived baselines.

pub use self::errors::Error;
pub use self::irepositoryaccess::IRepositoryAccess;
pub use self::memo_repositoryaccess::MemoRepositoryAccess;
pub use self::package::compare_versions;
pub use self::package::Package;
pub use self::package::PackageId;
pub use self::package::PackageMeasurement;

mod errors;
mod irepositoryaccess;
mod memo_repositoryaccess;
mod package;
