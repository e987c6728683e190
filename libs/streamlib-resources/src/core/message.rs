// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Message batches carried through pipeline transactions.

use std::collections::BTreeMap;

use bytes::Bytes;

/// One payload within a message batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    pub payload: Bytes,
    pub metadata: BTreeMap<String, String>,
}

impl Part {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// An ordered batch of parts, processed and acknowledged as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    parts: Vec<Part>,
}

impl Message {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Single-part message from a raw payload.
    pub fn from_bytes(payload: impl Into<Bytes>) -> Self {
        Self {
            parts: vec![Part::new(payload)],
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut Vec<Part> {
        &mut self.parts
    }

    pub fn get(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl From<Part> for Message {
    fn from(part: Part) -> Self {
        Self { parts: vec![part] }
    }
}
