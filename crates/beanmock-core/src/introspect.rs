use crate::schema::TypeCatalog;

/// Collect every declared field name of `type_name` and its ancestors.
///
/// Subtype fields come first. Shadowed names appear once per declaring level;
/// callers must tolerate seeing the same name more than once. Unknown types
/// and types without fields yield an empty list.
pub fn field_names(catalog: &TypeCatalog, type_name: &str) -> Vec<String> {
    catalog
        .ancestry(type_name)
        .flat_map(|def| def.fields.iter().map(|field| field.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeDef;
    use crate::types::type_ids;

    #[test]
    fn subtype_fields_come_first_and_shadowing_repeats() {
        let catalog = TypeCatalog::new(vec![
            TypeDef::new("Entity")
                .field("id", type_ids::LONG)
                .field("created", type_ids::DATE),
            TypeDef::new("User")
                .extends("Entity")
                .field("name", type_ids::STRING)
                .field("id", type_ids::STRING),
        ])
        .expect("valid catalog");

        assert_eq!(
            field_names(&catalog, "User"),
            vec!["name", "id", "id", "created"]
        );
    }

    #[test]
    fn empty_chain_yields_nothing() {
        let catalog = TypeCatalog::new(vec![
            TypeDef::new("Marker"),
            TypeDef::new("Empty").extends("Marker"),
        ])
        .expect("valid catalog");

        assert!(field_names(&catalog, "Empty").is_empty());
        assert!(field_names(&catalog, "Unknown").is_empty());
    }
}
