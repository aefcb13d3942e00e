// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Appraisal of Linux IMA measurements and TPM PCR values against reference
//! baselines.
//!
//! The API allows:
//! * Matching IMA measurement records (path and digest) against simple,
//!   blacklist, ignore-set and repository-derived baselines
//! * Aggregating per-measurement verdicts into a batch result
//! * Comparing the PCR values of a TPM quote against a baseline PCR set
//! * Summarising the results as AR4SI trust vectors

pub mod appraisal;
pub mod baseline;
pub mod digest;
pub mod pcr;
pub mod repository;
