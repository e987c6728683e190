// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Resource declarations as they appear in a pipeline config.
//!
//! Only the resource sections are read; every other top-level field of the
//! file (`input`, `pipeline`, `output`, ...) is ignored here. The body of a
//! declaration is kept as raw YAML since building components from it is the
//! job of whoever owns the component constructors.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::lint::{lint_resources, Lint};
use crate::core::error::{Result, StreamError};
use crate::core::kind::ResourceKind;

/// One labelled component declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResourceDeclaration {
    #[serde(default)]
    pub label: Option<String>,

    /// Component type key and its settings, e.g. `kafka: { topics: [foo] }`.
    #[serde(flatten)]
    pub body: Mapping,
}

impl ResourceDeclaration {
    pub fn new(label: impl Into<String>, body: Mapping) -> Self {
        Self {
            label: Some(label.into()),
            body,
        }
    }

    /// The declared label, empty when missing.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// The first key of the body, which names the component type.
    pub fn component_type(&self) -> Option<&str> {
        self.body.keys().find_map(|key| key.as_str())
    }
}

/// Label spelled by a legacy map key. YAML reads keys such as `123:` or
/// `true:` as numbers and booleans; they still name a label. Null and
/// non-scalar keys name nothing.
pub(crate) fn map_key_label(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => map_key_label(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// The legacy `resources:` section, where map keys are the labels.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LegacyResources {
    pub inputs: Mapping,
    pub outputs: Mapping,
    pub processors: Mapping,
    pub caches: Mapping,
    pub rate_limits: Mapping,
    pub conditions: Mapping,
}

impl LegacyResources {
    pub fn get(&self, kind: ResourceKind) -> &Mapping {
        match kind {
            ResourceKind::Input => &self.inputs,
            ResourceKind::Output => &self.outputs,
            ResourceKind::Processor => &self.processors,
            ResourceKind::Cache => &self.caches,
            ResourceKind::RateLimit => &self.rate_limits,
            ResourceKind::Condition => &self.conditions,
        }
    }

    pub fn is_empty(&self) -> bool {
        ResourceKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourcesConfig {
    #[serde(skip_serializing_if = "LegacyResources::is_empty")]
    pub resources: LegacyResources,
    pub input_resources: Vec<ResourceDeclaration>,
    pub output_resources: Vec<ResourceDeclaration>,
    pub processor_resources: Vec<ResourceDeclaration>,
    pub cache_resources: Vec<ResourceDeclaration>,
    pub rate_limit_resources: Vec<ResourceDeclaration>,
    pub condition_resources: Vec<ResourceDeclaration>,
}

impl ResourcesConfig {
    /// Parse the resource sections of a YAML document. Does not lint.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(source).map_err(|e| {
            let location = e
                .location()
                .map(|l| format!(" at line {}, column {}", l.line(), l.column()))
                .unwrap_or_default();
            StreamError::Configuration(format!("Failed to parse resources{}: {}", location, e))
        })
    }

    /// Parse and lint, failing with every lint found.
    pub fn from_yaml_str_linted(source: &str) -> Result<Self> {
        let config = Self::from_yaml_str(source)?;
        let lints = config.lint(source);
        if !lints.is_empty() {
            return Err(StreamError::Lint(lints));
        }
        Ok(config)
    }

    /// Read, parse and lint a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            StreamError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_yaml_str_linted(&source)?;
        tracing::info!(
            "Loaded {} resource declarations from {}",
            config.len(),
            path.display()
        );
        Ok(config)
    }

    /// Lint against the text the config was parsed from, which is only used
    /// to recover positions.
    pub fn lint(&self, source: &str) -> Vec<Lint> {
        lint_resources(self, source)
    }

    /// The list-form declarations of one kind.
    pub fn list(&self, kind: ResourceKind) -> &[ResourceDeclaration] {
        match kind {
            ResourceKind::Input => &self.input_resources,
            ResourceKind::Output => &self.output_resources,
            ResourceKind::Processor => &self.processor_resources,
            ResourceKind::Cache => &self.cache_resources,
            ResourceKind::RateLimit => &self.rate_limit_resources,
            ResourceKind::Condition => &self.condition_resources,
        }
    }

    /// Every declaration of one kind, list form first, then the legacy map
    /// converted to labelled declarations.
    pub fn declarations(&self, kind: ResourceKind) -> Vec<ResourceDeclaration> {
        let legacy = self.resources.get(kind).iter().map(|(key, value)| {
            ResourceDeclaration {
                label: map_key_label(key),
                body: value.as_mapping().cloned().unwrap_or_default(),
            }
        });

        self.list(kind).iter().cloned().chain(legacy).collect()
    }

    /// Total declarations across kinds and forms.
    pub fn len(&self) -> usize {
        ResourceKind::ALL
            .iter()
            .map(|kind| self.list(*kind).len() + self.resources.get(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_lists_and_ignores_other_fields() {
        let config = ResourcesConfig::from_yaml_str(
            r#"
input:
  resource: foo
input_resources:
  - label: foo
    kafka:
      topics: [ foo ]
cache_resources:
  - label: dedupe
    memory: {}
"#,
        )
        .unwrap();

        assert_eq!(config.input_resources.len(), 1);
        assert_eq!(config.input_resources[0].label(), "foo");
        assert_eq!(config.input_resources[0].component_type(), Some("kafka"));
        assert_eq!(config.cache_resources[0].label(), "dedupe");
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_missing_label_reads_as_empty() {
        let config = ResourcesConfig::from_yaml_str("input_resources:\n  - kafka: {}\n").unwrap();
        assert_eq!(config.input_resources[0].label(), "");
        assert_eq!(config.input_resources[0].component_type(), Some("kafka"));
    }

    #[test]
    fn test_legacy_map_becomes_declarations() {
        let config = ResourcesConfig::from_yaml_str(
            r#"
resources:
  inputs:
    bar:
      http_server: {}
input_resources:
  - label: foo
    kafka: {}
"#,
        )
        .unwrap();

        let labels: Vec<_> = config
            .declarations(ResourceKind::Input)
            .iter()
            .map(|d| d.label().to_string())
            .collect();
        assert_eq!(labels, vec!["foo", "bar"]);
        assert_eq!(
            config.declarations(ResourceKind::Input)[1].component_type(),
            Some("http_server")
        );
    }

    #[test]
    fn test_scalar_legacy_keys_are_labels() {
        let config = ResourcesConfig::from_yaml_str_linted(
            "resources: {inputs: {123: {stdin: {}}, true: {stdin: {}}, 1.5: {stdin: {}}}}\n",
        )
        .unwrap();

        let labels: Vec<_> = config
            .declarations(ResourceKind::Input)
            .iter()
            .map(|d| d.label().to_string())
            .collect();
        assert_eq!(labels, vec!["123", "true", "1.5"]);
    }

    #[test]
    fn test_null_legacy_key_is_missing_label() {
        let config = ResourcesConfig::from_yaml_str("resources:\n  inputs:\n    ~: {stdin: {}}\n")
            .unwrap();
        assert_eq!(config.declarations(ResourceKind::Input)[0].label, None);
    }

    #[test]
    fn test_empty_source_is_default() {
        assert!(ResourcesConfig::from_yaml_str("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_is_configuration_error() {
        let err = ResourcesConfig::from_yaml_str("input_resources: {").unwrap_err();
        assert!(matches!(err, StreamError::Configuration(_)));
    }

    #[test]
    fn test_linted_parse_reports_lints() {
        let err = ResourcesConfig::from_yaml_str_linted("input_resources:\n  - kafka: {}\n")
            .unwrap_err();
        match err {
            StreamError::Lint(lints) => assert_eq!(lints.len(), 1),
            other => panic!("unexpected error: {}", other),
        }
    }
}
