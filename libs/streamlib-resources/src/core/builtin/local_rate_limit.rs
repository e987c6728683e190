// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::core::error::{Result, StreamError};
use crate::core::traits::{Closable, RateLimit};

struct Window {
    started: Instant,
    used: u32,
}

/// Allows `count` accesses per `interval`, shared by every caller.
pub struct LocalRateLimit {
    count: u32,
    interval: Duration,
    window: Mutex<Window>,
}

impl LocalRateLimit {
    pub fn new(count: u32, interval: Duration) -> Result<Self> {
        if count == 0 {
            return Err(StreamError::Configuration(
                "rate limit count must be larger than zero".to_string(),
            ));
        }
        if interval.is_zero() {
            return Err(StreamError::Configuration(
                "rate limit interval must be larger than zero".to_string(),
            ));
        }

        Ok(Self {
            count,
            interval,
            window: Mutex::new(Window {
                started: Instant::now(),
                used: 0,
            }),
        })
    }
}

impl RateLimit for LocalRateLimit {
    fn access(&self) -> Result<Duration> {
        let mut window = self.window.lock();
        let now = Instant::now();
        let elapsed = now.duration_since(window.started);

        if elapsed >= self.interval {
            window.started = now;
            window.used = 0;
        }

        if window.used < self.count {
            window.used += 1;
            return Ok(Duration::ZERO);
        }

        Ok(self.interval.saturating_sub(elapsed))
    }
}

impl Closable for LocalRateLimit {
    fn close_async(&self) {}

    fn wait_for_close(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}
