// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! MemoryInput - emits a fixed batch of messages as transactions.
//!
//! One transaction is in flight at a time: the next message is only offered
//! once the previous one was acknowledged. Rejected messages are offered
//! again. After the last acknowledgement the stream disconnects, which
//! consumers observe as end-of-stream.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use crate::core::error::{Result, StreamError};
use crate::core::message::Message;
use crate::core::traits::{Closable, Input};
use crate::core::transaction::{Response, Transaction};

pub struct MemoryInput {
    transactions: Receiver<Transaction>,
    running: Arc<AtomicBool>,
    shutdown_tx: Mutex<Option<Sender<()>>>,
    done_rx: Receiver<()>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl MemoryInput {
    pub fn new(messages: Vec<Message>) -> Result<Self> {
        let (transactions_tx, transactions) = crossbeam_channel::bounded(0);
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
        let running = Arc::new(AtomicBool::new(true));

        let thread_running = Arc::clone(&running);
        let handle = std::thread::Builder::new()
            .name("memory-input".to_string())
            .spawn(move || {
                let _done_tx = done_tx;
                emit(messages, transactions_tx, shutdown_rx);
                thread_running.store(false, Ordering::SeqCst);
            })?;

        Ok(Self {
            transactions,
            running,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            done_rx,
            handle: Mutex::new(Some(handle)),
        })
    }
}

fn emit(messages: Vec<Message>, transactions_tx: Sender<Transaction>, shutdown_rx: Receiver<()>) {
    let total = messages.len();

    for (index, message) in messages.into_iter().enumerate() {
        loop {
            let (transaction, response_rx) = Transaction::new(message.clone());

            crossbeam_channel::select! {
                send(transactions_tx, transaction) -> sent => {
                    if sent.is_err() {
                        return;
                    }
                }
                recv(shutdown_rx) -> _ => return,
            }

            let response = crossbeam_channel::select! {
                recv(response_rx) -> response => response,
                recv(shutdown_rx) -> _ => return,
            };

            match response {
                Ok(Response::Ack) => break,
                Ok(Response::Reject(reason)) => {
                    tracing::debug!(
                        "[MemoryInput] Message {}/{} rejected, resending: {}",
                        index + 1,
                        total,
                        reason
                    );
                }
                Err(_) => {
                    tracing::debug!(
                        "[MemoryInput] Message {}/{} lost its response channel, resending",
                        index + 1,
                        total
                    );
                }
            }
        }
    }

    tracing::debug!("[MemoryInput] All {} messages acknowledged", total);
}

impl Input for MemoryInput {
    fn transaction_chan(&self) -> Receiver<Transaction> {
        self.transactions.clone()
    }

    fn connected(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Closable for MemoryInput {
    fn close_async(&self) {
        self.shutdown_tx.lock().take();
    }

    fn wait_for_close(&self, timeout: Duration) -> Result<()> {
        match self.done_rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => Err(StreamError::Timeout(timeout)),
            _ => {
                let handle = self.handle.lock().take();
                match handle.map(JoinHandle::join) {
                    Some(Err(_)) => Err(StreamError::Other(anyhow::anyhow!(
                        "memory input thread panicked"
                    ))),
                    _ => Ok(()),
                }
            }
        }
    }
}

impl Drop for MemoryInput {
    fn drop(&mut self) {
        self.shutdown_tx.get_mut().take();
    }
}
