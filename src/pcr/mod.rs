// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Comparison of quoted TPM PCR values against a baseline PCR set.

pub use self::errors::Error;
pub use self::policy::parse_quote;
pub use self::policy::PcrExclusion;
pub use self::policy::PcrExclusions;
pub use self::policy::PcrPolicy;
pub use self::policy::GPT_PCR;
pub use self::policy::IMA_PCR;
pub use self::policy::PCR_COUNT;
pub use self::policy::TBOOT_PCRS;

mod errors;
mod policy;
