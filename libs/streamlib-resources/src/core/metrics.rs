// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! In-process counters.
//!
//! Components ask a [`Metrics`] handle for counters by name and keep the
//! returned [`StatCounter`]. Handles are cheap to clone and all clones share
//! one table, so a collector (or a test) can read every counter through
//! [`Metrics::snapshot`].

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct StatCounter {
    value: AtomicU64,
}

impl StatCounter {
    pub fn incr(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Default)]
pub struct Metrics {
    prefix: String,
    counters: Arc<RwLock<HashMap<String, Arc<StatCounter>>>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view whose counter names are scoped under `prefix`.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        Self {
            prefix: self.path(prefix),
            counters: Arc::clone(&self.counters),
        }
    }

    /// Get or create the counter at `<prefix>.<name>`.
    pub fn counter(&self, name: &str) -> Arc<StatCounter> {
        let path = self.path(name);

        if let Some(counter) = self.counters.read().get(&path) {
            return Arc::clone(counter);
        }

        Arc::clone(self.counters.write().entry(path).or_default())
    }

    /// Current value of the counter at an absolute path, if it exists.
    pub fn value(&self, path: &str) -> Option<u64> {
        self.counters.read().get(path).map(|c| c.get())
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters
            .read()
            .iter()
            .map(|(path, counter)| (path.clone(), counter.get()))
            .collect()
    }

    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("prefix", &self.prefix)
            .field("counters", &self.counters.read().len())
            .finish()
    }
}
