// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! ResourceOutput - an output that writes to a labelled output resource.
//!
//! Unlike [`ResourceInput`](super::ResourceInput) this wrapper can own a
//! thread: [`consume`](ResourceOutput::consume) starts a worker that drains
//! a transaction stream into the bound output. Closing the wrapper stops
//! that worker only; the shared output is left running for every other
//! reference to it.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use crate::core::error::{Result, StreamError};
use crate::core::metrics::{Metrics, StatCounter};
use crate::core::registry::{Outputs, ResourceManager};
use crate::core::traits::{Closable, Output};
use crate::core::transaction::Transaction;

#[derive(Clone)]
struct OutputRelay {
    manager: ResourceManager,
    label: String,
    span: tracing::Span,
    not_found: Arc<StatCounter>,
}

impl OutputRelay {
    fn write(&self, transaction: Transaction) -> Result<()> {
        let mut pending = Some(transaction);

        let written = self.manager.access::<Outputs, _>(&self.label, |output| {
            match pending.take() {
                Some(transaction) => output.write_transaction(transaction),
                None => Ok(()),
            }
        });

        match written {
            Ok(result) => result,
            Err(e) => {
                self.missed(&e);
                if let Some(transaction) = pending.take() {
                    transaction.reject(e.to_string());
                }
                Err(e)
            }
        }
    }

    fn connected(&self) -> bool {
        match self
            .manager
            .access::<Outputs, _>(&self.label, |output| output.connected())
        {
            Ok(connected) => connected,
            Err(e) => {
                self.missed(&e);
                false
            }
        }
    }

    fn missed(&self, err: &StreamError) {
        self.span.in_scope(|| {
            tracing::debug!(
                "[ResourceOutput] Failed to obtain output resource '{}': {}",
                self.label,
                err
            );
        });
        self.not_found.incr(1);
    }
}

struct Worker {
    handle: Option<JoinHandle<()>>,
    shutdown_tx: Option<Sender<()>>,
    done_rx: Receiver<()>,
}

pub struct ResourceOutput {
    relay: OutputRelay,
    worker: Mutex<Option<Worker>>,
}

impl ResourceOutput {
    /// Fails with `ResourceNotFound` when no output is bound to `label`.
    pub fn new(label: impl Into<String>, manager: ResourceManager, metrics: &Metrics) -> Result<Self> {
        let label = label.into();
        manager.probe::<Outputs>(&label)?;

        Ok(Self {
            relay: OutputRelay {
                span: tracing::debug_span!("resource_output", label = %label),
                not_found: metrics.counter("error_not_found"),
                manager,
                label,
            },
            worker: Mutex::new(None),
        })
    }

    pub fn label(&self) -> &str {
        &self.relay.label
    }

    /// Forward every transaction from `transactions` to the bound output on a
    /// dedicated thread, until the stream disconnects or the wrapper is
    /// closed. A wrapper consumes at most one stream.
    pub fn consume(&self, transactions: Receiver<Transaction>) -> Result<()> {
        let mut worker = self.worker.lock();
        if worker.is_some() {
            return Err(StreamError::Configuration(format!(
                "output resource reference '{}' is already consuming a stream",
                self.relay.label
            )));
        }

        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
        let relay = self.relay.clone();

        let handle = std::thread::Builder::new()
            .name(format!("resource-output-{}", self.relay.label))
            .spawn(move || {
                // Dropped on exit, which wakes anyone in wait_for_close.
                let _done_tx = done_tx;

                loop {
                    crossbeam_channel::select! {
                        recv(transactions) -> transaction => match transaction {
                            Ok(transaction) => {
                                if let Err(e) = relay.write(transaction) {
                                    if !e.is_not_found() {
                                        relay.span.in_scope(|| {
                                            tracing::debug!(
                                                "[ResourceOutput] Write to '{}' failed: {}",
                                                relay.label,
                                                e
                                            );
                                        });
                                    }
                                }
                            }
                            Err(_) => break,
                        },
                        recv(shutdown_rx) -> _ => break,
                    }
                }

                relay.span.in_scope(|| {
                    tracing::debug!("[ResourceOutput] Stopped forwarding to '{}'", relay.label);
                });
            })?;

        *worker = Some(Worker {
            handle: Some(handle),
            shutdown_tx: Some(shutdown_tx),
            done_rx,
        });

        Ok(())
    }
}

impl Output for ResourceOutput {
    /// Unbound labels reject the transaction and return `ResourceNotFound`.
    fn write_transaction(&self, transaction: Transaction) -> Result<()> {
        self.relay.write(transaction)
    }

    fn connected(&self) -> bool {
        self.relay.connected()
    }
}

impl Closable for ResourceOutput {
    fn close_async(&self) {
        if let Some(worker) = self.worker.lock().as_mut() {
            worker.shutdown_tx.take();
        }
    }

    fn wait_for_close(&self, timeout: Duration) -> Result<()> {
        let done_rx = match self.worker.lock().as_ref() {
            Some(worker) => worker.done_rx.clone(),
            None => return Ok(()),
        };

        match done_rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => Err(StreamError::Timeout(timeout)),
            _ => {
                let handle = self.worker.lock().as_mut().and_then(|w| w.handle.take());
                match handle.map(JoinHandle::join) {
                    Some(Err(_)) => Err(StreamError::Other(anyhow::anyhow!(
                        "output resource reference '{}' worker panicked",
                        self.relay.label
                    ))),
                    _ => Ok(()),
                }
            }
        }
    }
}
