//! Recursive mock-data generation for beanmock.
//!
//! This crate consumes a [`beanmock_core::TypeCatalog`] and either builds
//! fully populated beans or fills the empty fields of existing ones, recursing
//! into nested bean types under an explicit depth bound.

pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod registry;
pub mod source;
mod typed;

pub use config::MockConfig;
pub use engine::MockEngine;
pub use errors::MockError;
pub use lookup::{AttrValue, Attributed, find_by};
pub use model::{
    BuildOptions, DEFAULT_MAX_DEPTH, DepthPolicy, MAX_DEPTH_LIMIT, NumericRange, ValueMode,
};
pub use registry::{GeneratorRule, RegistrySettings, ScalarKind, TypeValueRegistry};
pub use source::{Clock, FixedClock, RandomSource, ScalarSource, SystemClock};
