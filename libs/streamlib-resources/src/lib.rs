// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! streamlib-resources: labelled resources shared across a pipeline.
//!
//! A component (input, output, processor, cache, rate limit or condition) is
//! registered once with a [`ResourceManager`] under a label. Pipeline stages
//! reference it through wrappers such as [`ResourceInput`] that implement the
//! component's own trait and resolve the label on every call, so the
//! component can be shared, swapped or removed without the stages holding on
//! to it.

pub mod core;

pub use crate::core::{
    Cache, Caches, Closable, Condition, Conditions, Input, Inputs, Kind, Lint, LocalRateLimit,
    MemoryCache, MemoryInput, Message, Metrics, Output, Outputs, Part, Processor, Processors,
    RateLimit, RateLimits, ResourceCondition, ResourceDeclaration, ResourceInput, ResourceKind,
    ResourceManager, ResourceOutput, ResourceProcessor, ResourcesConfig, Response, Result,
    StatCounter, StreamError, Transaction,
};

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
