// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::fmt;

use serde::{Deserialize, Serialize};

/// The families of component that can be declared once as a resource and
/// referenced by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Input,
    Output,
    Processor,
    Cache,
    RateLimit,
    Condition,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Input,
        ResourceKind::Output,
        ResourceKind::Processor,
        ResourceKind::Cache,
        ResourceKind::RateLimit,
        ResourceKind::Condition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Input => "input",
            ResourceKind::Output => "output",
            ResourceKind::Processor => "processor",
            ResourceKind::Cache => "cache",
            ResourceKind::RateLimit => "rate_limit",
            ResourceKind::Condition => "condition",
        }
    }

    /// Top-level config field holding the list of declarations of this kind.
    pub fn config_field(&self) -> &'static str {
        match self {
            ResourceKind::Input => "input_resources",
            ResourceKind::Output => "output_resources",
            ResourceKind::Processor => "processor_resources",
            ResourceKind::Cache => "cache_resources",
            ResourceKind::RateLimit => "rate_limit_resources",
            ResourceKind::Condition => "condition_resources",
        }
    }

    /// Field under the legacy `resources:` map.
    pub fn legacy_field(&self) -> &'static str {
        match self {
            ResourceKind::Input => "inputs",
            ResourceKind::Output => "outputs",
            ResourceKind::Processor => "processors",
            ResourceKind::Cache => "caches",
            ResourceKind::RateLimit => "rate_limits",
            ResourceKind::Condition => "conditions",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
