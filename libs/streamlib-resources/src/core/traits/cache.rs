// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use bytes::Bytes;

use super::Closable;
use crate::core::error::Result;

/// Key/value store shared between pipeline stages.
pub trait Cache: Closable {
    /// Fails with `KeyNotFound` when the key is absent.
    fn get(&self, key: &str) -> Result<Bytes>;

    fn set(&self, key: &str, value: Bytes) -> Result<()>;

    /// Like `set`, but fails with `KeyAlreadyExists` instead of overwriting.
    fn add(&self, key: &str, value: Bytes) -> Result<()>;

    /// Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}
