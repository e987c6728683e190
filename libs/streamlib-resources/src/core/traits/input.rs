// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crossbeam_channel::Receiver;

use super::Closable;
use crate::core::transaction::Transaction;

/// A source of transactions.
///
/// The stream disconnects when the input has nothing more to produce. Every
/// transaction taken from it must be acknowledged or rejected.
pub trait Input: Closable {
    fn transaction_chan(&self) -> Receiver<Transaction>;

    /// Whether the input is currently connected to its upstream.
    fn connected(&self) -> bool;
}
