use crate::error::{Error, Result};
use crate::schema::{TypeCatalog, capitalize};
use crate::types::type_ids;

/// Resolved accessor pair and declared type of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Type the descriptor was resolved against.
    pub bean_type: String,
    pub name: String,
    /// Declared type identifier of the field.
    pub declared_type: String,
    /// Type in the chain that declares the field.
    pub declared_in: String,
    pub getter: String,
    pub setter: String,
}

/// Resolve the accessors of `field` on `type_name`.
///
/// Getters follow `get<Name>`, with `is<Name>` tried first for boolean
/// fields; setters follow `set<Name>`. Declarations and methods are looked up
/// from the type upward, so a shadowing subtype declaration wins.
pub fn resolve(catalog: &TypeCatalog, type_name: &str, field: &str) -> Result<FieldDescriptor> {
    if !catalog.contains(type_name) {
        return Err(Error::UnknownType(type_name.to_string()));
    }

    let (declared_in, declaration) = catalog
        .ancestry(type_name)
        .find_map(|def| def.declared_field(field).map(|decl| (def, decl)))
        .ok_or_else(|| introspection(type_name, field, "field is not declared"))?;

    let suffix = capitalize(field);
    let mut getters = Vec::with_capacity(2);
    if declaration.type_name == type_ids::BOOLEAN {
        getters.push(format!("is{suffix}"));
    }
    getters.push(format!("get{suffix}"));

    let has_method =
        |method: &str| catalog.ancestry(type_name).any(|def| def.declares_method(method));

    let getter = getters
        .into_iter()
        .find(|candidate| has_method(candidate.as_str()))
        .ok_or_else(|| {
            introspection(type_name, field, &format!("no getter 'get{suffix}'"))
        })?;

    let setter = format!("set{suffix}");
    if !has_method(setter.as_str()) {
        return Err(introspection(
            type_name,
            field,
            &format!("no setter '{setter}'"),
        ));
    }

    Ok(FieldDescriptor {
        bean_type: type_name.to_string(),
        name: field.to_string(),
        declared_type: declaration.type_name.clone(),
        declared_in: declared_in.name.clone(),
        getter,
        setter,
    })
}

fn introspection(type_name: &str, field: &str, reason: &str) -> Error {
    Error::Introspection {
        type_name: type_name.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
