// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Central registry of labelled resources.
//!
//! A [`ResourceManager`] owns every resource instance of every kind. Pipeline
//! stages never keep a resolved instance: they [`probe`](ResourceManager::probe)
//! a label once while being built, then go through
//! [`access`](ResourceManager::access) on every call, which lets the owner
//! hot-swap or remove entries without coordinating with the stages that
//! reference them.
//!
//! ```rust,ignore
//! let manager = ResourceManager::new();
//! manager.register::<Inputs>("src", Arc::new(MemoryInput::new(messages)?))?;
//!
//! let connected = manager.access::<Inputs, _>("src", |input| input.connected())?;
//! ```

pub mod kinds;
mod table;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::error::{Result, StreamError};
use crate::core::kind::ResourceKind;
use crate::core::traits::{Cache, Condition, Input, Output, Processor, RateLimit};

pub use kinds::{Caches, Conditions, Inputs, Kind, Outputs, Processors, RateLimits};
pub use table::ResourceTable;

/// Reject labels that can never be referenced.
pub fn validate_label(kind: ResourceKind, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(StreamError::EmptyLabel { kind });
    }
    Ok(())
}

#[doc(hidden)]
pub struct ResourceTables {
    pub(crate) inputs: ResourceTable<dyn Input>,
    pub(crate) outputs: ResourceTable<dyn Output>,
    pub(crate) processors: ResourceTable<dyn Processor>,
    pub(crate) caches: ResourceTable<dyn Cache>,
    pub(crate) rate_limits: ResourceTable<dyn RateLimit>,
    pub(crate) conditions: ResourceTable<dyn Condition>,
}

/// Cloneable handle to one set of resource tables.
///
/// Clones share the same tables. Separate `ResourceManager::new()` calls give
/// fully independent registries, so several pipelines can live in one process.
#[derive(Clone)]
pub struct ResourceManager {
    inner: Arc<ResourceTables>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ResourceTables {
                inputs: ResourceTable::new(ResourceKind::Input),
                outputs: ResourceTable::new(ResourceKind::Output),
                processors: ResourceTable::new(ResourceKind::Processor),
                caches: ResourceTable::new(ResourceKind::Cache),
                rate_limits: ResourceTable::new(ResourceKind::RateLimit),
                conditions: ResourceTable::new(ResourceKind::Condition),
            }),
        }
    }

    /// Check that `label` is bound, without touching the resource.
    pub fn probe<K: Kind>(&self, label: &str) -> Result<()> {
        K::table(&self.inner).probe(label)
    }

    /// [`probe`](Self::probe) with the kind chosen at runtime.
    pub fn probe_kind(&self, kind: ResourceKind, label: &str) -> Result<()> {
        match kind {
            ResourceKind::Input => self.probe::<Inputs>(label),
            ResourceKind::Output => self.probe::<Outputs>(label),
            ResourceKind::Processor => self.probe::<Processors>(label),
            ResourceKind::Cache => self.probe::<Caches>(label),
            ResourceKind::RateLimit => self.probe::<RateLimits>(label),
            ResourceKind::Condition => self.probe::<Conditions>(label),
        }
    }

    /// Run `op` against the instance currently bound to `label`.
    ///
    /// The instance stays alive for the whole call even if the label is
    /// replaced or deregistered meanwhile. The table lock is released before
    /// `op` runs, so `op` may block or call back into the manager.
    pub fn access<K: Kind, R>(
        &self,
        label: &str,
        op: impl FnOnce(&K::Component) -> R,
    ) -> Result<R> {
        K::table(&self.inner).access(label, op)
    }

    /// Bind a new label. Fails on an empty label or one already bound for
    /// this kind.
    pub fn register<K: Kind>(
        &self,
        label: impl Into<String>,
        component: Arc<K::Component>,
    ) -> Result<()> {
        let label = label.into();
        K::table(&self.inner).insert(label.clone(), component)?;
        tracing::debug!("[ResourceManager] Registered {} resource '{}'", K::KIND, label);
        Ok(())
    }

    /// Bind `label` to `component` whether or not it is already bound.
    ///
    /// The previous instance, if any, is signalled to close and returned so
    /// the caller can wait on it. Operations already running against it are
    /// left to finish.
    pub fn replace<K: Kind>(
        &self,
        label: impl Into<String>,
        component: Arc<K::Component>,
    ) -> Result<Option<Arc<K::Component>>> {
        let label = label.into();
        let previous = K::table(&self.inner).swap(label.clone(), component)?;

        match &previous {
            Some(previous) => {
                K::close_async(previous);
                tracing::info!("[ResourceManager] Replaced {} resource '{}'", K::KIND, label);
            }
            None => {
                tracing::debug!("[ResourceManager] Registered {} resource '{}'", K::KIND, label);
            }
        }

        Ok(previous)
    }

    /// Unbind `label`. The removed instance is signalled to close and
    /// returned.
    pub fn deregister<K: Kind>(&self, label: &str) -> Result<Arc<K::Component>> {
        let removed = K::table(&self.inner).remove(label)?;
        K::close_async(&removed);
        tracing::info!("[ResourceManager] Removed {} resource '{}'", K::KIND, label);
        Ok(removed)
    }

    pub fn labels<K: Kind>(&self) -> Vec<String> {
        K::table(&self.inner).labels()
    }

    pub fn len<K: Kind>(&self) -> usize {
        K::table(&self.inner).len()
    }

    /// Signal every registered resource to close.
    pub fn close_async(&self) {
        self.close_kind_async::<Inputs>();
        self.close_kind_async::<Processors>();
        self.close_kind_async::<Conditions>();
        self.close_kind_async::<Outputs>();
        self.close_kind_async::<Caches>();
        self.close_kind_async::<RateLimits>();
    }

    /// Wait for every registered resource to finish closing, unbinding each
    /// one that did. All resources share one deadline. Waiting continues past
    /// a failure so every resource gets its chance to stop; the first error
    /// is returned. Resources that failed to close stay registered, so a
    /// later call can signal and wait on them again.
    pub fn wait_for_close(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut first_err = None;

        for result in [
            self.wait_kind::<Inputs>(deadline, timeout),
            self.wait_kind::<Processors>(deadline, timeout),
            self.wait_kind::<Conditions>(deadline, timeout),
            self.wait_kind::<Outputs>(deadline, timeout),
            self.wait_kind::<Caches>(deadline, timeout),
            self.wait_kind::<RateLimits>(deadline, timeout),
        ] {
            if let Err(e) = result {
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn close_kind_async<K: Kind>(&self) {
        for (_, component) in K::table(&self.inner).entries() {
            K::close_async(&component);
        }
    }

    fn wait_kind<K: Kind>(&self, deadline: Instant, timeout: Duration) -> Result<()> {
        let mut first_err = None;

        let table = K::table(&self.inner);
        for (label, component) in table.entries() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match K::wait_for_close(&component, remaining) {
                Ok(()) => {
                    table.remove_if_same(&label, &component);
                }
                Err(e) => {
                    tracing::warn!(
                        "[ResourceManager] {} resource '{}' did not close cleanly: {}",
                        K::KIND,
                        label,
                        e
                    );
                    first_err.get_or_insert(match e {
                        StreamError::Timeout(_) => StreamError::Timeout(timeout),
                        other => other,
                    });
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("inputs", &self.labels::<Inputs>())
            .field("outputs", &self.labels::<Outputs>())
            .field("processors", &self.labels::<Processors>())
            .field("caches", &self.labels::<Caches>())
            .field("rate_limits", &self.labels::<RateLimits>())
            .field("conditions", &self.labels::<Conditions>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use crate::core::traits::Closable;
    use crate::core::transaction::Transaction;
    use crossbeam_channel::Receiver;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubInput {
        close_calls: AtomicUsize,
        hang: AtomicBool,
    }

    impl Closable for StubInput {
        fn close_async(&self) {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
        }

        fn wait_for_close(&self, timeout: Duration) -> Result<()> {
            if self.hang.load(Ordering::SeqCst) {
                std::thread::sleep(timeout);
                return Err(StreamError::Timeout(timeout));
            }
            Ok(())
        }
    }

    impl Input for StubInput {
        fn transaction_chan(&self) -> Receiver<Transaction> {
            crossbeam_channel::never()
        }

        fn connected(&self) -> bool {
            true
        }
    }

    struct AlwaysTrue;

    impl Condition for AlwaysTrue {
        fn check(&self, _message: &Message) -> bool {
            true
        }
    }

    #[test]
    fn test_probe_registered_and_missing() {
        let manager = ResourceManager::new();
        manager
            .register::<Inputs>("foo", Arc::new(StubInput::default()))
            .unwrap();

        assert!(manager.probe::<Inputs>("foo").is_ok());
        assert!(manager.probe_kind(ResourceKind::Input, "foo").is_ok());
        assert!(manager.probe::<Inputs>("bar").unwrap_err().is_not_found());
        assert!(manager
            .access::<Inputs, _>("bar", |i| i.connected())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_same_label_in_different_kinds() {
        let manager = ResourceManager::new();
        manager
            .register::<Inputs>("foo", Arc::new(StubInput::default()))
            .unwrap();
        manager
            .register::<Conditions>("foo", Arc::new(AlwaysTrue))
            .unwrap();

        assert!(manager.probe::<Outputs>("foo").unwrap_err().is_not_found());
        assert_eq!(manager.len::<Inputs>(), 1);
        assert_eq!(manager.len::<Conditions>(), 1);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let manager = ResourceManager::new();
        manager
            .register::<Inputs>("foo", Arc::new(StubInput::default()))
            .unwrap();

        let err = manager
            .register::<Inputs>("foo", Arc::new(StubInput::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            StreamError::DuplicateLabel { kind: ResourceKind::Input, .. }
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let manager = ResourceManager::new();
        assert!(matches!(
            manager.register::<Inputs>("", Arc::new(StubInput::default())),
            Err(StreamError::EmptyLabel { .. })
        ));
        assert!(matches!(
            manager.replace::<Inputs>("", Arc::new(StubInput::default())),
            Err(StreamError::EmptyLabel { .. })
        ));
    }

    #[test]
    fn test_replace_closes_previous() {
        let manager = ResourceManager::new();
        let first = Arc::new(StubInput::default());
        manager.register::<Inputs>("foo", first.clone()).unwrap();

        let previous = manager
            .replace::<Inputs>("foo", Arc::new(StubInput::default()))
            .unwrap();

        assert!(previous.is_some());
        assert_eq!(first.close_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_deregister_closes_and_unbinds() {
        let manager = ResourceManager::new();
        let input = Arc::new(StubInput::default());
        manager.register::<Inputs>("foo", input.clone()).unwrap();

        manager.deregister::<Inputs>("foo").unwrap();

        assert_eq!(input.close_calls.load(Ordering::SeqCst), 1);
        assert!(manager.probe::<Inputs>("foo").is_err());
        assert!(manager.deregister::<Inputs>("foo").err().unwrap().is_not_found());
    }

    #[test]
    fn test_clones_share_tables_but_new_managers_do_not() {
        let manager = ResourceManager::new();
        let clone = manager.clone();
        clone
            .register::<Inputs>("foo", Arc::new(StubInput::default()))
            .unwrap();

        assert!(manager.probe::<Inputs>("foo").is_ok());
        assert!(ResourceManager::new().probe::<Inputs>("foo").is_err());
    }

    #[test]
    fn test_close_all() {
        let manager = ResourceManager::new();
        let input = Arc::new(StubInput::default());
        manager.register::<Inputs>("foo", input.clone()).unwrap();

        manager.close_async();
        manager.wait_for_close(Duration::from_secs(1)).unwrap();

        assert_eq!(input.close_calls.load(Ordering::SeqCst), 1);
        assert_eq!(manager.len::<Inputs>(), 0);
    }

    #[test]
    fn test_close_all_times_out() {
        let manager = ResourceManager::new();
        let stuck = Arc::new(StubInput::default());
        stuck.hang.store(true, Ordering::SeqCst);
        manager.register::<Inputs>("stuck", stuck.clone()).unwrap();
        manager
            .register::<Inputs>("fine", Arc::new(StubInput::default()))
            .unwrap();

        manager.close_async();
        let err = manager
            .wait_for_close(Duration::from_millis(20))
            .unwrap_err();

        assert!(matches!(err, StreamError::Timeout(d) if d == Duration::from_millis(20)));
        assert_eq!(manager.labels::<Inputs>(), vec!["stuck"]);

        stuck.hang.store(false, Ordering::SeqCst);
        manager.close_async();
        manager.wait_for_close(Duration::from_millis(20)).unwrap();

        assert_eq!(stuck.close_calls.load(Ordering::SeqCst), 2);
        assert_eq!(manager.len::<Inputs>(), 0);
    }
}
