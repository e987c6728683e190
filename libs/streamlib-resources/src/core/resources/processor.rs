// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;
use std::time::Duration;

use crate::core::error::Result;
use crate::core::message::Message;
use crate::core::metrics::{Metrics, StatCounter};
use crate::core::registry::{Processors, ResourceManager};
use crate::core::traits::{Closable, Processor};

/// Runs a labelled processor resource.
///
/// An unbound label fails the message with `ResourceNotFound` instead of
/// passing it through unprocessed.
pub struct ResourceProcessor {
    manager: ResourceManager,
    label: String,
    span: tracing::Span,
    not_found: Arc<StatCounter>,
}

impl ResourceProcessor {
    pub fn new(label: impl Into<String>, manager: ResourceManager, metrics: &Metrics) -> Result<Self> {
        let label = label.into();
        manager.probe::<Processors>(&label)?;

        Ok(Self {
            span: tracing::debug_span!("resource_processor", label = %label),
            not_found: metrics.counter("error_not_found"),
            manager,
            label,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Processor for ResourceProcessor {
    fn process_message(&self, message: Message) -> Result<Vec<Message>> {
        self.manager
            .access::<Processors, _>(&self.label, |processor| processor.process_message(message))
            .unwrap_or_else(|e| {
                self.span.in_scope(|| {
                    tracing::debug!(
                        "[ResourceProcessor] Failed to obtain processor resource '{}': {}",
                        self.label,
                        e
                    );
                });
                self.not_found.incr(1);
                Err(e)
            })
    }
}

impl Closable for ResourceProcessor {
    fn close_async(&self) {}

    fn wait_for_close(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}
