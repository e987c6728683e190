// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! ResourceInput - an input that runs a labelled input resource.
//!
//! Lets one configured input be referenced from several places, e.g. two
//! branches of a fan-in broker pointing at the same `kafka` input:
//!
//! ```yaml
//! input:
//!   broker:
//!     inputs:
//!       - resource: foo
//!       - resource: bar
//!
//! input_resources:
//!   - label: foo
//!     kafka: { topics: [ foo ] }
//!   - label: bar
//!     gcp_pubsub: { subscription: baz }
//! ```
//!
//! The wrapper resolves its label on every call and never owns what it
//! points at: closing it is a no-op, the shared input lives until the
//! [`ResourceManager`] tears it down.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::core::error::{Result, StreamError};
use crate::core::metrics::{Metrics, StatCounter};
use crate::core::registry::{Inputs, ResourceManager};
use crate::core::traits::{Closable, Input};
use crate::core::transaction::Transaction;

pub struct ResourceInput {
    manager: ResourceManager,
    label: String,
    span: tracing::Span,
    not_found: Arc<StatCounter>,
}

impl ResourceInput {
    /// Fails with `ResourceNotFound` when no input is bound to `label`.
    pub fn new(label: impl Into<String>, manager: ResourceManager, metrics: &Metrics) -> Result<Self> {
        let label = label.into();
        manager.probe::<Inputs>(&label)?;

        Ok(Self {
            span: tracing::debug_span!("resource_input", label = %label),
            not_found: metrics.counter("error_not_found"),
            manager,
            label,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn missed(&self, err: &StreamError) {
        self.span.in_scope(|| {
            tracing::debug!(
                "[ResourceInput] Failed to obtain input resource '{}': {}",
                self.label,
                err
            );
        });
        self.not_found.incr(1);
    }
}

impl Input for ResourceInput {
    /// The bound input's stream, or a stream that never yields and never
    /// disconnects while the label is unbound.
    fn transaction_chan(&self) -> Receiver<Transaction> {
        match self
            .manager
            .access::<Inputs, _>(&self.label, |input| input.transaction_chan())
        {
            Ok(transactions) => transactions,
            Err(e) => {
                self.missed(&e);
                crossbeam_channel::never()
            }
        }
    }

    fn connected(&self) -> bool {
        match self
            .manager
            .access::<Inputs, _>(&self.label, |input| input.connected())
        {
            Ok(connected) => connected,
            Err(e) => {
                self.missed(&e);
                false
            }
        }
    }
}

impl Closable for ResourceInput {
    fn close_async(&self) {}

    fn wait_for_close(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}
