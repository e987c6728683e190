// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Concrete components that can be registered as resources.

pub mod local_rate_limit;
pub mod memory_cache;
pub mod memory_input;

pub use local_rate_limit::LocalRateLimit;
pub use memory_cache::MemoryCache;
pub use memory_input::MemoryInput;
