// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use crate::{digest, repository};

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("Semantic error: {0}")]
    Sema(String),
    #[error("Invalid pattern: {0}")]
    Pattern(String),
    #[error("Unknown measurement record: {0}")]
    UnknownRecord(String),
    #[error("Duplicated baseline: {0}")]
    Duplicate(String),
    #[error("Record provider failure: {0}")]
    Provider(String),
    #[error("Repository failure: {0}")]
    Repository(#[from] repository::Error),
    #[error("Digest error: {0}")]
    Digest(#[from] digest::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(e)
            | Error::Sema(e)
            | Error::Pattern(e)
            | Error::UnknownRecord(e)
            | Error::Duplicate(e)
            | Error::Provider(e) => {
                write!(f, "{}", e)
            }
            Error::Repository(e) => write!(f, "{:?}", e),
            Error::Digest(e) => write!(f, "{:?}", e),
        }
    }
}
