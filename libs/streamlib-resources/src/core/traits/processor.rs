// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::Closable;
use crate::core::error::Result;
use crate::core::message::Message;

/// Transforms one message into zero or more messages.
pub trait Processor: Closable {
    fn process_message(&self, message: Message) -> Result<Vec<Message>>;
}
