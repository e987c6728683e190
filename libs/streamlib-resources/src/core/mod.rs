// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod builtin;
pub mod config;
pub mod error;
pub mod kind;
pub mod message;
pub mod metrics;
pub mod registry;
pub mod resources;
pub mod traits;
pub mod transaction;

pub use builtin::{LocalRateLimit, MemoryCache, MemoryInput};
pub use config::{Lint, ResourceDeclaration, ResourcesConfig};
pub use error::{Result, StreamError};
pub use kind::ResourceKind;
pub use message::{Message, Part};
pub use metrics::{Metrics, StatCounter};
pub use registry::{
    Caches, Conditions, Inputs, Kind, Outputs, Processors, RateLimits, ResourceManager,
};
pub use resources::{ResourceCondition, ResourceInput, ResourceOutput, ResourceProcessor};
pub use traits::{Cache, Closable, Condition, Input, Output, Processor, RateLimit};
pub use transaction::{Response, Transaction};
