// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;

use crate::core::error::Result;
use crate::core::message::Message;
use crate::core::metrics::{Metrics, StatCounter};
use crate::core::registry::{Conditions, ResourceManager};
use crate::core::traits::Condition;

/// Checks a labelled condition resource. Unbound labels check `false`.
pub struct ResourceCondition {
    manager: ResourceManager,
    label: String,
    span: tracing::Span,
    not_found: Arc<StatCounter>,
}

impl ResourceCondition {
    pub fn new(label: impl Into<String>, manager: ResourceManager, metrics: &Metrics) -> Result<Self> {
        let label = label.into();
        manager.probe::<Conditions>(&label)?;

        Ok(Self {
            span: tracing::debug_span!("resource_condition", label = %label),
            not_found: metrics.counter("error_not_found"),
            manager,
            label,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Condition for ResourceCondition {
    fn check(&self, message: &Message) -> bool {
        match self
            .manager
            .access::<Conditions, _>(&self.label, |condition| condition.check(message))
        {
            Ok(passed) => passed,
            Err(e) => {
                self.span.in_scope(|| {
                    tracing::debug!(
                        "[ResourceCondition] Failed to obtain condition resource '{}': {}",
                        self.label,
                        e
                    );
                });
                self.not_found.incr(1);
                false
            }
        }
    }
}
