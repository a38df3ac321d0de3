use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Map;

use crate::error::{Error, Result};
use crate::introspect::field_names;
use crate::resolver::{FieldDescriptor, resolve};
use crate::schema::TypeCatalog;
use crate::types::{Value, type_ids};

static NULL: Value = Value::Null;

/// Dynamic instance of a catalog type.
///
/// Fields that were never written read as [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bean {
    type_name: String,
    values: BTreeMap<String, Value>,
}

impl Bean {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, field: &str) -> &Value {
        self.values.get(field).unwrap_or(&NULL)
    }

    pub fn is_null(&self, field: &str) -> bool {
        self.get(field).is_null()
    }

    /// Store a value without accessor checks.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.set(field, value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Invoke the getter described by `descriptor`.
    pub fn read(&self, descriptor: &FieldDescriptor) -> Result<&Value> {
        self.check_owner(descriptor)?;
        Ok(self.get(&descriptor.name))
    }

    /// Invoke the setter described by `descriptor`.
    pub fn write(&mut self, descriptor: &FieldDescriptor, value: Value) -> Result<()> {
        self.check_owner(descriptor)?;
        if !value.fits(&descriptor.declared_type) {
            return Err(Error::Access {
                type_name: self.type_name.clone(),
                field: descriptor.name.clone(),
                reason: format!(
                    "{} rejects a value of type {}",
                    descriptor.setter,
                    value.type_name().unwrap_or("null")
                ),
            });
        }
        self.values.insert(descriptor.name.clone(), value);
        Ok(())
    }

    fn check_owner(&self, descriptor: &FieldDescriptor) -> Result<()> {
        if descriptor.bean_type == self.type_name {
            return Ok(());
        }
        Err(Error::Access {
            type_name: self.type_name.clone(),
            field: descriptor.name.clone(),
            reason: format!("accessor belongs to type {}", descriptor.bean_type),
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map: Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Decode a JSON object into a bean of `type_name`, converting each
    /// resolvable field according to its declared type. Keys the type does not
    /// expose are ignored.
    pub fn from_json(
        catalog: &TypeCatalog,
        type_name: &str,
        json: &serde_json::Value,
    ) -> Result<Self> {
        if !catalog.contains(type_name) {
            return Err(Error::UnknownType(type_name.to_string()));
        }
        let object = json.as_object().ok_or_else(|| Error::Access {
            type_name: type_name.to_string(),
            field: "*".to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let mut bean = Bean::new(type_name);
        for name in field_names(catalog, type_name) {
            let Ok(descriptor) = resolve(catalog, type_name, &name) else {
                continue;
            };
            let value = match object.get(&name) {
                Some(raw) => decode_field(catalog, &descriptor, raw)?,
                None => Value::Null,
            };
            bean.write(&descriptor, value)?;
        }
        Ok(bean)
    }
}

fn decode_field(
    catalog: &TypeCatalog,
    descriptor: &FieldDescriptor,
    raw: &serde_json::Value,
) -> Result<Value> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let mismatch = || Error::Access {
        type_name: descriptor.bean_type.clone(),
        field: descriptor.name.clone(),
        reason: format!("cannot decode {raw} as {}", descriptor.declared_type),
    };

    let value = match descriptor.declared_type.as_str() {
        type_ids::STRING => Value::String(raw.as_str().ok_or_else(mismatch)?.to_string()),
        type_ids::LONG => Value::Long(raw.as_i64().ok_or_else(mismatch)?),
        type_ids::INTEGER => Value::Integer(narrow(raw).ok_or_else(mismatch)?),
        type_ids::SHORT => Value::Short(narrow(raw).ok_or_else(mismatch)?),
        type_ids::BYTE => Value::Byte(narrow(raw).ok_or_else(mismatch)?),
        type_ids::DOUBLE => Value::Double(raw.as_f64().ok_or_else(mismatch)?),
        type_ids::FLOAT => Value::Float(raw.as_f64().ok_or_else(mismatch)? as f32),
        type_ids::BOOLEAN => Value::Boolean(raw.as_bool().ok_or_else(mismatch)?),
        type_ids::CHARACTER => {
            let text = raw.as_str().ok_or_else(mismatch)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Value::Character(ch),
                _ => return Err(mismatch()),
            }
        }
        type_ids::DATE => {
            let text = raw.as_str().ok_or_else(mismatch)?;
            let parsed = DateTime::parse_from_rfc3339(text).map_err(|_| mismatch())?;
            Value::Date(parsed.with_timezone(&Utc))
        }
        type_ids::LIST => Value::from_untyped_json(raw)
            .filter(|value| matches!(value, Value::List(_)))
            .ok_or_else(mismatch)?,
        nested => Value::Bean(Box::new(Bean::from_json(catalog, nested, raw)?)),
    };
    Ok(value)
}

fn narrow<T: TryFrom<i64>>(raw: &serde_json::Value) -> Option<T> {
    raw.as_i64().and_then(|value| T::try_from(value).ok())
}
