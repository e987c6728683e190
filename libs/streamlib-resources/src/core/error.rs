// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::Duration;

use thiserror::Error;

use crate::core::config::Lint;
use crate::core::kind::ResourceKind;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("{kind} resource '{label}' was not found")]
    ResourceNotFound { kind: ResourceKind, label: String },

    #[error("{kind} resource label must not be empty")]
    EmptyLabel { kind: ResourceKind },

    #[error("{kind} resource label '{label}' is already registered")]
    DuplicateLabel { kind: ResourceKind, label: String },

    #[error("Config lint failed:\n{}", format_lints(.0))]
    Lint(Vec<Lint>),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Key already exists: {0}")]
    KeyAlreadyExists(String),

    #[error("Timed out after {0:?} waiting for close")]
    Timeout(Duration),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StreamError {
    pub fn not_found(kind: ResourceKind, label: &str) -> Self {
        Self::ResourceNotFound {
            kind,
            label: label.to_string(),
        }
    }

    /// True for lookups that missed, which callers at runtime treat as a
    /// degraded state rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}

fn format_lints(lints: &[Lint]) -> String {
    lints
        .iter()
        .map(|lint| format!("  {}", lint))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, StreamError>;
