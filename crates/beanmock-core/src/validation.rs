use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::TypeDef;
use crate::types::type_ids;

/// Validate internal consistency of a set of type definitions.
///
/// This checks:
/// - empty and duplicate type names
/// - empty and duplicate field names within one type
/// - parents exist and are not builtin scalar types
/// - the inheritance graph has no cycles
pub fn validate_catalog(types: &[TypeDef]) -> Result<()> {
    let mut parents: BTreeMap<&str, Option<&str>> = BTreeMap::new();

    for def in types {
        if def.name.trim().is_empty() {
            return Err(Error::InvalidCatalog("type name must not be empty".to_string()));
        }
        if type_ids::is_builtin(&def.name) {
            return Err(Error::InvalidCatalog(format!(
                "type name collides with builtin type: {}",
                def.name
            )));
        }
        if parents
            .insert(def.name.as_str(), def.extends.as_deref())
            .is_some()
        {
            return Err(Error::InvalidCatalog(format!(
                "duplicate type name: {}",
                def.name
            )));
        }

        let mut fields = BTreeSet::new();
        for field in &def.fields {
            if field.name.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "empty field name in type: {}",
                    def.name
                )));
            }
            if !fields.insert(field.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate field name: {}.{}",
                    def.name, field.name
                )));
            }
        }
    }

    for def in types {
        if let Some(parent) = def.extends.as_deref() {
            if !parents.contains_key(parent) {
                return Err(Error::InvalidCatalog(format!(
                    "parent type not found: {} extends {}",
                    def.name, parent
                )));
            }
        }
    }

    for def in types {
        let mut seen = BTreeSet::new();
        let mut current = Some(def.name.as_str());
        while let Some(name) = current {
            if !seen.insert(name) {
                return Err(Error::InvalidCatalog(format!(
                    "inheritance cycle through type: {}",
                    def.name
                )));
            }
            current = parents.get(name).copied().flatten();
        }
    }

    Ok(())
}
