// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod lint;
pub mod resources_config;
mod source_map;

pub use lint::Lint;
pub use resources_config::{LegacyResources, ResourceDeclaration, ResourcesConfig};
pub use source_map::Position;
