// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Type-level resource kinds.
//!
//! [`ResourceManager`](super::ResourceManager) is generic over [`Kind`], so
//! `manager.access::<Inputs, _>(..)` hands the operation a `&dyn Input` and
//! `manager.access::<Caches, _>(..)` a `&dyn Cache`, from one implementation.

use std::time::Duration;

use super::table::ResourceTable;
use super::ResourceTables;
use crate::core::error::Result;
use crate::core::kind::ResourceKind;
use crate::core::traits::{Cache, Closable, Condition, Input, Output, Processor, RateLimit};

mod sealed {
    pub trait Sealed {}
}

pub trait Kind: sealed::Sealed + 'static {
    type Component: ?Sized + Send + Sync + 'static;

    const KIND: ResourceKind;

    #[doc(hidden)]
    fn table(tables: &ResourceTables) -> &ResourceTable<Self::Component>;

    fn close_async(component: &Self::Component);

    fn wait_for_close(component: &Self::Component, timeout: Duration) -> Result<()>;
}

macro_rules! closable_kind {
    ($marker:ident, $component:ident, $kind:ident, $field:ident) => {
        pub enum $marker {}

        impl sealed::Sealed for $marker {}

        impl Kind for $marker {
            type Component = dyn $component;

            const KIND: ResourceKind = ResourceKind::$kind;

            fn table(tables: &ResourceTables) -> &ResourceTable<Self::Component> {
                &tables.$field
            }

            fn close_async(component: &Self::Component) {
                Closable::close_async(component)
            }

            fn wait_for_close(component: &Self::Component, timeout: Duration) -> Result<()> {
                Closable::wait_for_close(component, timeout)
            }
        }
    };
}

closable_kind!(Inputs, Input, Input, inputs);
closable_kind!(Outputs, Output, Output, outputs);
closable_kind!(Processors, Processor, Processor, processors);
closable_kind!(Caches, Cache, Cache, caches);
closable_kind!(RateLimits, RateLimit, RateLimit, rate_limits);

pub enum Conditions {}

impl sealed::Sealed for Conditions {}

impl Kind for Conditions {
    type Component = dyn Condition;

    const KIND: ResourceKind = ResourceKind::Condition;

    fn table(tables: &ResourceTables) -> &ResourceTable<Self::Component> {
        &tables.conditions
    }

    fn close_async(_component: &Self::Component) {}

    fn wait_for_close(_component: &Self::Component, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}
