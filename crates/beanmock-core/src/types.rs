use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Number;

use crate::bean::Bean;

/// Builtin type identifiers understood by the catalog.
///
/// Any other identifier names a bean type described by the catalog.
pub mod type_ids {
    pub const STRING: &str = "string";
    pub const LONG: &str = "long";
    pub const INTEGER: &str = "integer";
    pub const DATE: &str = "date";
    pub const BOOLEAN: &str = "boolean";
    pub const CHARACTER: &str = "character";
    pub const BYTE: &str = "byte";
    pub const SHORT: &str = "short";
    pub const DOUBLE: &str = "double";
    pub const FLOAT: &str = "float";
    pub const LIST: &str = "list";

    pub const BUILTIN: &[&str] = &[
        STRING, LONG, INTEGER, DATE, BOOLEAN, CHARACTER, BYTE, SHORT, DOUBLE, FLOAT, LIST,
    ];

    pub fn is_builtin(type_name: &str) -> bool {
        BUILTIN.contains(&type_name)
    }
}

/// Dynamic value held by a bean field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Long(i64),
    Integer(i32),
    Date(DateTime<Utc>),
    Boolean(bool),
    Character(char),
    Byte(i8),
    Short(i16),
    Double(f64),
    Float(f32),
    List(Vec<Value>),
    Bean(Box<Bean>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type identifier of the held value; `None` for null.
    pub fn type_name(&self) -> Option<&str> {
        let name = match self {
            Value::Null => return None,
            Value::String(_) => type_ids::STRING,
            Value::Long(_) => type_ids::LONG,
            Value::Integer(_) => type_ids::INTEGER,
            Value::Date(_) => type_ids::DATE,
            Value::Boolean(_) => type_ids::BOOLEAN,
            Value::Character(_) => type_ids::CHARACTER,
            Value::Byte(_) => type_ids::BYTE,
            Value::Short(_) => type_ids::SHORT,
            Value::Double(_) => type_ids::DOUBLE,
            Value::Float(_) => type_ids::FLOAT,
            Value::List(_) => type_ids::LIST,
            Value::Bean(bean) => bean.type_name(),
        };
        Some(name)
    }

    /// Whether this value may be stored in a field declared as `declared`.
    ///
    /// Nested beans are accepted for any non-builtin declaration.
    pub fn fits(&self, declared: &str) -> bool {
        match self {
            Value::Null => true,
            Value::Bean(_) => !type_ids::is_builtin(declared),
            other => other.type_name() == Some(declared),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(value) => Some(*value),
            Value::Integer(value) => Some(i64::from(*value)),
            Value::Short(value) => Some(i64::from(*value)),
            Value::Byte(value) => Some(i64::from(*value)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(*value),
            Value::Float(value) => Some(f64::from(*value)),
            _ => None,
        }
    }

    pub fn as_bean(&self) -> Option<&Bean> {
        match self {
            Value::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::String(value) => Json::String(value.clone()),
            Value::Long(value) => Json::from(*value),
            Value::Integer(value) => Json::from(*value),
            Value::Date(value) => {
                Json::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Boolean(value) => Json::Bool(*value),
            Value::Character(value) => Json::String(value.to_string()),
            Value::Byte(value) => Json::from(*value),
            Value::Short(value) => Json::from(*value),
            Value::Double(value) => Number::from_f64(*value).map_or(Json::Null, Json::Number),
            Value::Float(value) => {
                Number::from_f64(f64::from(*value)).map_or(Json::Null, Json::Number)
            }
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Bean(bean) => bean.to_json(),
        }
    }

    /// Convert an untyped JSON value, used for list elements which carry no
    /// declared type.
    pub fn from_untyped_json(json: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;
        let value = match json {
            Json::Null => Value::Null,
            Json::Bool(value) => Value::Boolean(*value),
            Json::Number(number) => match number.as_i64() {
                Some(value) => Value::Long(value),
                None => Value::Double(number.as_f64()?),
            },
            Json::String(value) => Value::String(value.clone()),
            Json::Array(items) => Value::List(
                items
                    .iter()
                    .map(Value::from_untyped_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Json::Object(_) => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fits_checks_builtin_types_exactly() {
        assert!(Value::Integer(3).fits(type_ids::INTEGER));
        assert!(!Value::Integer(3).fits(type_ids::LONG));
        assert!(Value::Null.fits(type_ids::LONG));
        assert!(Value::Bean(Box::new(Bean::new("Address"))).fits("Address"));
        assert!(!Value::Bean(Box::new(Bean::new("Address"))).fits(type_ids::STRING));
        assert!(Value::Bean(Box::new(Bean::new("Address"))).fits("Location"));
    }

    #[test]
    fn dates_render_as_utc_rfc3339() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            Value::Date(date).to_json(),
            serde_json::json!("2024-01-02T03:04:05Z")
        );
    }

    #[test]
    fn untyped_objects_are_rejected() {
        assert!(Value::from_untyped_json(&serde_json::json!({"a": 1})).is_none());
        assert_eq!(
            Value::from_untyped_json(&serde_json::json!([1, "x", true])),
            Some(Value::List(vec![
                Value::Long(1),
                Value::String("x".to_string()),
                Value::Boolean(true),
            ]))
        );
    }
}
