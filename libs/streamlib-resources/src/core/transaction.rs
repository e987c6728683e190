// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Transactions pair a message with a single-use response channel.
//!
//! Producers (inputs) keep the [`Receiver<Response>`] and block on it before
//! moving on; consumers must answer every transaction exactly once. A
//! transaction dropped without an answer is reported to the producer as a
//! rejection so that messages are never silently lost.

use crossbeam_channel::{Receiver, Sender};

use super::message::Message;

/// Outcome of delivering a transaction downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ack,
    Reject(String),
}

impl Response {
    pub fn is_ack(&self) -> bool {
        matches!(self, Response::Ack)
    }
}

pub struct Transaction {
    payload: Message,
    response_tx: Sender<Response>,
    answered: bool,
}

impl Transaction {
    /// Create a transaction and the receiver its answer will arrive on.
    pub fn new(payload: Message) -> (Self, Receiver<Response>) {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        (
            Self {
                payload,
                response_tx,
                answered: false,
            },
            response_rx,
        )
    }

    pub fn payload(&self) -> &Message {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Message {
        &mut self.payload
    }

    pub fn ack(mut self) {
        self.respond(Response::Ack);
    }

    pub fn reject(mut self, reason: impl Into<String>) {
        self.respond(Response::Reject(reason.into()));
    }

    fn respond(&mut self, response: Response) {
        if self.answered {
            return;
        }
        self.answered = true;
        // The producer may have given up on this transaction already.
        let _ = self.response_tx.try_send(response);
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        self.respond(Response::Reject(
            "transaction dropped without a response".to_string(),
        ));
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("payload", &self.payload)
            .field("answered", &self.answered)
            .finish()
    }
}
