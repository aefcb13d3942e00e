// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Algorithm-tagged, fixed-length hash values and their three-valued
//! comparison.
//!
//! ```
//! use imabaseline::digest::{Digest, DigestAlgorithm, DigestComparison};
//!
//! let d: Digest = "SHA1 0123456789abcdef0123456789abcdef01234567"
//!     .parse()
//!     .expect("parsing digest");
//!
//! assert_eq!(d.algorithm(), DigestAlgorithm::Sha1);
//! assert_eq!(d.compare(Some(&d)), DigestComparison::Match);
//! assert_eq!(d.compare(None), DigestComparison::Unknown);
//! ```

pub use self::algorithm::DigestAlgorithm;
pub use self::digest::Digest;
pub use self::digest::DigestComparison;
pub use self::errors::Error;

mod algorithm;
#[allow(clippy::module_inception)]
mod digest;
mod errors;
