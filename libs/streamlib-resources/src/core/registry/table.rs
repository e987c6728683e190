// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::validate_label;
use crate::core::error::{Result, StreamError};
use crate::core::kind::ResourceKind;

/// Label → instance table for a single resource kind.
///
/// The lock only ever guards a map lookup or a single map mutation. Entries
/// are handed out as `Arc` clones so callers run against an instance after
/// the guard is gone, and a concurrent swap or removal never invalidates it.
pub struct ResourceTable<T: ?Sized> {
    kind: ResourceKind,
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T: ?Sized> ResourceTable<T> {
    pub(crate) fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn probe(&self, label: &str) -> Result<()> {
        if self.entries.read().contains_key(label) {
            Ok(())
        } else {
            Err(StreamError::not_found(self.kind, label))
        }
    }

    pub(crate) fn access<R>(&self, label: &str, op: impl FnOnce(&T) -> R) -> Result<R> {
        let entry = self
            .entries
            .read()
            .get(label)
            .cloned()
            .ok_or_else(|| StreamError::not_found(self.kind, label))?;

        Ok(op(&entry))
    }

    pub(crate) fn insert(&self, label: String, component: Arc<T>) -> Result<()> {
        validate_label(self.kind, &label)?;

        match self.entries.write().entry(label) {
            Entry::Occupied(occupied) => Err(StreamError::DuplicateLabel {
                kind: self.kind,
                label: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(component);
                Ok(())
            }
        }
    }

    /// Bind `label` to `component`, returning whatever it was bound to.
    pub(crate) fn swap(&self, label: String, component: Arc<T>) -> Result<Option<Arc<T>>> {
        validate_label(self.kind, &label)?;
        Ok(self.entries.write().insert(label, component))
    }

    pub(crate) fn remove(&self, label: &str) -> Result<Arc<T>> {
        self.entries
            .write()
            .remove(label)
            .ok_or_else(|| StreamError::not_found(self.kind, label))
    }

    pub(crate) fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.entries.read().keys().cloned().collect();
        labels.sort();
        labels
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub(crate) fn entries(&self) -> Vec<(String, Arc<T>)> {
        self.entries
            .read()
            .iter()
            .map(|(label, entry)| (label.clone(), Arc::clone(entry)))
            .collect()
    }

    /// Remove `label` only while it is still bound to `component`, so a
    /// replacement bound in the meantime survives.
    pub(crate) fn remove_if_same(&self, label: &str, component: &Arc<T>) -> bool {
        let mut entries = self.entries.write();
        match entries.get(label) {
            Some(current) if Arc::ptr_eq(current, component) => {
                entries.remove(label);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResourceTable<str> {
        ResourceTable::new(ResourceKind::Cache)
    }

    #[test]
    fn test_insert_and_access() {
        let table = table();
        table.insert("foo".to_string(), Arc::from("value")).unwrap();

        assert!(table.probe("foo").is_ok());
        assert_eq!(table.access("foo", |v| v.len()).unwrap(), 5);
    }

    #[test]
    fn test_insert_rejects_empty_and_duplicate() {
        let table = table();
        table.insert("foo".to_string(), Arc::from("a")).unwrap();

        assert!(matches!(
            table.insert(String::new(), Arc::from("b")),
            Err(StreamError::EmptyLabel { kind: ResourceKind::Cache })
        ));
        assert!(matches!(
            table.insert("foo".to_string(), Arc::from("b")),
            Err(StreamError::DuplicateLabel { ref label, .. }) if label == "foo"
        ));
        // The original binding survives a rejected insert.
        assert_eq!(table.access("foo", |v| v.to_string()).unwrap(), "a");
    }

    #[test]
    fn test_swap_returns_previous() {
        let table = table();
        assert!(table.swap("foo".to_string(), Arc::from("a")).unwrap().is_none());

        let previous = table.swap("foo".to_string(), Arc::from("b")).unwrap();
        assert_eq!(previous.as_deref(), Some("a"));
        assert_eq!(table.access("foo", |v| v.to_string()).unwrap(), "b");
    }

    #[test]
    fn test_missing_label() {
        let table = table();
        assert!(table.probe("ghost").unwrap_err().is_not_found());
        assert!(table.access("ghost", |_| ()).unwrap_err().is_not_found());
        assert!(table.remove("ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_access_does_not_hold_the_lock() {
        let table = table();
        table.insert("foo".to_string(), Arc::from("a")).unwrap();

        // Mutating the same table from inside an access would deadlock if the
        // read guard were still held.
        table
            .access("foo", |_| {
                table.swap("foo".to_string(), Arc::from("b")).unwrap();
            })
            .unwrap();

        assert_eq!(table.access("foo", |v| v.to_string()).unwrap(), "b");
    }

    #[test]
    fn test_labels_sorted() {
        let table = table();
        table.insert("b".to_string(), Arc::from("1")).unwrap();
        table.insert("a".to_string(), Arc::from("2")).unwrap();

        assert_eq!(table.labels(), vec!["a", "b"]);
        assert_eq!(table.entries().len(), 2);
    }

    #[test]
    fn test_remove_if_same_keeps_replacement() {
        let table = table();
        let first: Arc<str> = Arc::from("a");
        table.insert("foo".to_string(), Arc::clone(&first)).unwrap();
        table.swap("foo".to_string(), Arc::from("b")).unwrap();

        assert!(!table.remove_if_same("foo", &first));
        assert_eq!(table.access("foo", |v| v.to_string()).unwrap(), "b");

        let current = table.entries();
        assert!(table.remove_if_same("foo", &current[0].1));
        assert_eq!(table.len(), 0);
    }
}
