// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::message::Message;

/// A boolean test against a message. Conditions hold no lifecycle.
pub trait Condition: Send + Sync {
    fn check(&self, message: &Message) -> bool;
}
