//! Core contracts for beanmock.
//!
//! This crate defines the type catalog that stands in for runtime reflection,
//! the dynamic bean and value model, and the two introspection primitives the
//! generation engine is built on: field discovery along the inheritance chain
//! and accessor resolution by naming convention.

pub mod bean;
pub mod error;
pub mod introspect;
pub mod resolver;
pub mod schema;
pub mod types;
pub mod validation;

pub use bean::Bean;
pub use error::{Error, Result};
pub use introspect::field_names;
pub use resolver::{FieldDescriptor, resolve};
pub use schema::{CatalogDocument, FieldDef, TypeCatalog, TypeDef, catalog_json_schema};
pub use types::{Value, type_ids};
pub use validation::validate_catalog;

/// Current contract version for catalog documents.
pub const CATALOG_VERSION: &str = "0.1";
