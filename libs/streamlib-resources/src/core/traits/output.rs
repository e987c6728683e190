// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::Closable;
use crate::core::error::Result;
use crate::core::transaction::Transaction;

/// A sink for transactions.
pub trait Output: Closable {
    /// Deliver one transaction. The output takes over answering it: on
    /// success it acks, on failure it rejects and also returns the error.
    fn write_transaction(&self, transaction: Transaction) -> Result<()>;

    fn connected(&self) -> bool;
}
