// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::RwLock;

use crate::core::error::{Result, StreamError};
use crate::core::traits::{Cache, Closable};

/// Process-local cache backed by a map.
#[derive(Default)]
pub struct MemoryCache {
    items: RwLock<HashMap<String, Bytes>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Bytes> {
        self.items
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StreamError::KeyNotFound(key.to_string()))
    }

    fn set(&self, key: &str, value: Bytes) -> Result<()> {
        self.items.write().insert(key.to_string(), value);
        Ok(())
    }

    fn add(&self, key: &str, value: Bytes) -> Result<()> {
        match self.items.write().entry(key.to_string()) {
            Entry::Occupied(_) => Err(StreamError::KeyAlreadyExists(key.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                Ok(())
            }
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

impl Closable for MemoryCache {
    fn close_async(&self) {}

    fn wait_for_close(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let cache = MemoryCache::new();
        cache.set("a", Bytes::from_static(b"1")).unwrap();
        assert_eq!(cache.get("a").unwrap(), Bytes::from_static(b"1"));

        cache.delete("a").unwrap();
        assert!(matches!(cache.get("a"), Err(StreamError::KeyNotFound(_))));
        cache.delete("a").unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_add_does_not_overwrite() {
        let cache = MemoryCache::new();
        cache.add("a", Bytes::from_static(b"1")).unwrap();
        assert!(matches!(
            cache.add("a", Bytes::from_static(b"2")),
            Err(StreamError::KeyAlreadyExists(_))
        ));
        assert_eq!(cache.get("a").unwrap(), Bytes::from_static(b"1"));
        assert_eq!(cache.len(), 1);
    }
}
