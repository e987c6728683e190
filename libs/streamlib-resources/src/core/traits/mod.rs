// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Capability traits, one per resource kind.
//!
//! Concrete components and the label-resolving wrappers in
//! [`crate::core::resources`] implement the same traits, so a pipeline stage
//! cannot tell a directly-owned component from a reference to a shared one.

pub mod cache;
pub mod closable;
pub mod condition;
pub mod input;
pub mod output;
pub mod processor;
pub mod rate_limit;

pub use cache::Cache;
pub use closable::Closable;
pub use condition::Condition;
pub use input::Input;
pub use output::Output;
pub use processor::Processor;
pub use rate_limit::RateLimit;
