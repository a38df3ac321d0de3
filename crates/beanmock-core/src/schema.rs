use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validation::validate_catalog;

/// Serialized form of a type catalog (`catalog.json`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogDocument {
    /// Contract version for this catalog format.
    pub catalog_version: String,
    /// Bean types described by the catalog.
    pub types: Vec<TypeDef>,
}

/// Structural description of one bean type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct TypeDef {
    pub name: String,
    /// Parent type whose fields and methods are inherited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Fields declared directly on this type, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Public method names declared directly on this type.
    #[serde(default)]
    pub methods: Vec<String>,
    /// Whether the type exposes a no-argument constructor.
    #[serde(default = "default_constructible")]
    pub constructible: bool,
}

/// A declared field and its type identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

fn default_constructible() -> bool {
    true
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructible: true,
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Declare a bare field without accessors.
    pub fn field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(name.into());
        self
    }

    /// Declare a field together with its conventional getter and setter.
    pub fn property(self, name: &str, type_name: &str) -> Self {
        let suffix = capitalize(name);
        let getter = if type_name == crate::type_ids::BOOLEAN {
            format!("is{suffix}")
        } else {
            format!("get{suffix}")
        };
        self.field(name, type_name)
            .method(getter)
            .method(format!("set{suffix}"))
    }

    pub fn without_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }

    pub fn declares_method(&self, method: &str) -> bool {
        self.methods.iter().any(|name| name == method)
    }

    pub fn declared_field(&self, field: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.name == field)
    }
}

/// Validated set of bean types, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: BTreeMap<String, TypeDef>,
}

impl TypeCatalog {
    /// Build a catalog, rejecting duplicates, dangling parents and
    /// inheritance cycles.
    pub fn new(types: Vec<TypeDef>) -> Result<Self> {
        validate_catalog(&types)?;
        let types = types
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Ok(Self { types })
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        if document.catalog_version != crate::CATALOG_VERSION {
            return Err(Error::InvalidCatalog(format!(
                "unsupported catalog version: {}",
                document.catalog_version
            )));
        }
        Self::new(document.types)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(input)?;
        Self::from_document(document)
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            catalog_version: crate::CATALOG_VERSION.to_string(),
            types: self.types.values().cloned().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Iterate a type and its ancestors, the type itself first.
    ///
    /// Unknown types yield nothing; a parent missing from the catalog ends the
    /// walk.
    pub fn ancestry<'a>(&'a self, name: &str) -> Ancestry<'a> {
        Ancestry {
            catalog: self,
            next: self.types.get(name),
        }
    }
}

pub struct Ancestry<'a> {
    catalog: &'a TypeCatalog,
    next: Option<&'a TypeDef>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a TypeDef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .extends
            .as_deref()
            .and_then(|parent| self.catalog.types.get(parent));
        Some(current)
    }
}

/// JSON schema describing `catalog.json` documents.
pub fn catalog_json_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(CatalogDocument);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_ids;

    #[test]
    fn property_declares_conventional_accessors() {
        let def = TypeDef::new("Account")
            .property("owner", type_ids::STRING)
            .property("active", type_ids::BOOLEAN);

        assert_eq!(
            def.methods,
            vec!["getOwner", "setOwner", "isActive", "setActive"]
        );
        assert_eq!(def.fields.len(), 2);
    }

    #[test]
    fn ancestry_walks_parents_in_order() {
        let catalog = TypeCatalog::new(vec![
            TypeDef::new("Base"),
            TypeDef::new("Middle").extends("Base"),
            TypeDef::new("Leaf").extends("Middle"),
        ])
        .expect("valid catalog");

        let chain: Vec<&str> = catalog
            .ancestry("Leaf")
            .map(|def| def.name.as_str())
            .collect();
        assert_eq!(chain, vec!["Leaf", "Middle", "Base"]);
        assert_eq!(catalog.ancestry("Missing").count(), 0);
    }

    #[test]
    fn document_round_trip_keeps_defaults() {
        let input = r#"{
            "catalog_version": "0.1",
            "types": [
                {"name": "Tag", "fields": [{"name": "label", "type": "string"}]}
            ]
        }"#;
        let catalog = TypeCatalog::from_json_str(input).expect("parse catalog");
        let tag = catalog.get("Tag").expect("tag type");
        assert!(tag.constructible);
        assert!(tag.methods.is_empty());
        assert_eq!(tag.fields[0].type_name, "string");
    }

    #[test]
    fn rejects_unknown_catalog_version() {
        let input = r#"{"catalog_version": "9.9", "types": []}"#;
        let err = TypeCatalog::from_json_str(input).unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog(_)));
    }

    #[test]
    fn json_schema_lists_types() {
        let schema = catalog_json_schema();
        assert!(schema["properties"]["types"].is_object());
        assert!(schema["properties"]["catalog_version"].is_object());
    }
}
