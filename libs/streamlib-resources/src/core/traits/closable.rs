// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::Duration;

use crate::core::error::Result;

/// Two-phase shutdown shared by every component with a lifecycle.
pub trait Closable: Send + Sync {
    /// Signal the component to stop. Must not block.
    fn close_async(&self);

    /// Block until the component has stopped, or fail with
    /// [`StreamError::Timeout`](crate::core::StreamError::Timeout) once
    /// `timeout` has elapsed.
    fn wait_for_close(&self, timeout: Duration) -> Result<()>;
}
