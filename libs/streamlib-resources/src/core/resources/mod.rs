// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Label-resolving stand-ins for concrete components.
//!
//! Each wrapper implements the same trait as the kind it references, probes
//! its label once at construction and resolves it again on every call. None
//! of them cache a resolved instance, and none of them close what they point
//! at. A failed lookup at runtime is logged at debug, counted under
//! `error_not_found` and degraded to a harmless result.

pub mod condition;
pub mod input;
pub mod output;
pub mod processor;

pub use condition::ResourceCondition;
pub use input::ResourceInput;
pub use output::ResourceOutput;
pub use processor::ResourceProcessor;
