// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::baseline::BaselineKind;
use super::errors::Error;
use super::record::BaselineRecord;
use serde::{Deserialize, Serialize};

/// Serialised form of a baseline together with its records
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BaselineDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: BaselineKind,
    #[serde(default)]
    pub records: Vec<BaselineRecord>,
}

impl BaselineDocument {
    pub fn parse(j: &str) -> Result<Self, Error> {
        serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))
    }
}
