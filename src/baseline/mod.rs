// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Reference baselines and the appraisal of IMA measurements against them.
//!
//! A [`Baseline`] names a set of [`BaselineRecord`]s kept in a record store.
//! [`Baseline::contains`] resolves every [`MeasurementRecord`] through an
//! [`IRecordProvider`] and returns one [`MatchStatus`] per measurement,
//! collected in a [`BatchMatchStatus`].
//!
//! ```
//! use imabaseline::baseline::{ImaPolicy, MeasurementRecord, MemoRecordStore};
//!
//! let store = MemoRecordStore::new();
//! let baseline = store
//!     .load_json(
//!         r#"{
//!             "name": "golden",
//!             "kind": "simple",
//!             "records": [
//!                 { "type": "whitelist", "path": "/usr/bin/gradle",
//!                   "hash": "SHA1 0123456789abcdef0123456789abcdef01234567" }
//!             ]
//!         }"#,
//!     )
//!     .expect("loading baseline");
//!
//! let m = MeasurementRecord::new(
//!     "gradle",
//!     "SHA1 0123456789abcdef0123456789abcdef01234567".parse().unwrap(),
//! )
//! .unwrap();
//!
//! let batch = baseline
//!     .contains(&[m.clone()], &store.provider(&baseline), &ImaPolicy::default())
//!     .expect("appraising");
//!
//! assert!(batch.found_match(&m).unwrap());
//! ```

pub use self::baseline::Baseline;
pub use self::baseline::BaselineKind;
pub use self::batchmatchstatus::BatchMatchStatus;
pub use self::blacklistrecord::ImaBlacklistRecord;
pub use self::document::BaselineDocument;
pub use self::errors::Error;
pub use self::ignoresetrecord::ImaIgnoreSetRecord;
pub use self::irecordprovider::IRecordProvider;
pub use self::matchstatus::MatchKind;
pub use self::matchstatus::MatchOutcome;
pub use self::matchstatus::MatchStatus;
pub use self::measurement::MeasurementRecord;
pub use self::memo_recordstore::MemoRecordProvider;
pub use self::memo_recordstore::MemoRecordStore;
pub use self::memo_recordstore::RecordId;
pub use self::pathmatch::is_partial_path;
pub use self::pathmatch::partial_path;
pub use self::pathmatch::paths_match;
pub use self::pathmatch::pattern_matches;
pub use self::policy::ImaPolicy;
pub use self::policy::PathEquivalences;
pub use self::record::BaselineRecord;
pub use self::record::ImaBaselineRecord;
pub use self::repo::BroadRepoBaseline;
pub use self::repo::TargetedRepoBaseline;
pub use self::repo::TrackedPackage;
pub use self::repo::UpdateSummary;

#[allow(clippy::module_inception)]
mod baseline;
mod batchmatchstatus;
mod blacklistrecord;
mod document;
mod errors;
mod ignoresetrecord;
mod irecordprovider;
mod matching;
mod matchstatus;
mod measurement;
mod memo_recordstore;
mod pathmatch;
mod policy;
mod record;
mod repo;
