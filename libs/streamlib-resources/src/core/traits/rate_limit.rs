// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::Duration;

use super::Closable;
use crate::core::error::Result;

pub trait RateLimit: Closable {
    /// Request one unit of access. `Duration::ZERO` means proceed now,
    /// anything else is how long the caller should back off before asking
    /// again.
    fn access(&self) -> Result<Duration>;
}
