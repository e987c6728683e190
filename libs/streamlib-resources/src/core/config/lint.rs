// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Label lints for resource declarations.
//!
//! Every declaration needs a label that is non-empty and unique within its
//! kind, counting both the list form and the legacy map. The same label may
//! be reused across kinds.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::resources_config::{map_key_label, ResourcesConfig};
use super::source_map::{Position, SourceMap};
use crate::core::kind::ResourceKind;

pub const EMPTY_LABEL_MESSAGE: &str = "The label field for resources must be unique and not empty";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lint {
    pub line: usize,
    pub column: usize,
    pub kind: ResourceKind,
    pub message: String,
}

impl Lint {
    fn at(position: Position, kind: ResourceKind, message: String) -> Self {
        Self {
            line: position.line,
            column: position.column,
            kind,
            message,
        }
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}: {}", self.line, self.column, self.message)
    }
}

pub(crate) fn lint_resources(config: &ResourcesConfig, source: &str) -> Vec<Lint> {
    let map = SourceMap::new(source);
    let mut lints = Vec::new();

    for kind in ResourceKind::ALL {
        let mut seen: HashMap<String, usize> = HashMap::new();

        let listed = config
            .list(kind)
            .iter()
            .enumerate()
            .map(|(index, decl)| {
                (
                    decl.label().to_string(),
                    map.sequence_item_label(kind.config_field(), index),
                )
            });

        let legacy = config.resources.get(kind).keys().map(|key| {
            let label = map_key_label(key).unwrap_or_default();
            let position = map.nested_map_key("resources", kind.legacy_field(), &label);
            (label, position)
        });

        for (label, position) in listed.chain(legacy) {
            if label.is_empty() {
                lints.push(Lint::at(position, kind, EMPTY_LABEL_MESSAGE.to_string()));
                continue;
            }

            match seen.get(&label) {
                Some(first_line) => lints.push(Lint::at(
                    position,
                    kind,
                    format!(
                        "Label '{}' collides with a previously defined {} resource at line {}",
                        label, kind, first_line
                    ),
                )),
                None => {
                    seen.insert(label, position.line);
                }
            }
        }
    }

    lints.sort_by_key(|lint| (lint.line, lint.column));
    lints
}
