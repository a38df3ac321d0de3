//! Serde bridge between caller-defined structs and catalog beans.

use serde::Serialize;
use serde::de::DeserializeOwned;

use beanmock_core::Bean;

use crate::engine::MockEngine;
use crate::errors::MockError;

impl MockEngine {
    /// Build `type_name` and decode the result into `T`.
    ///
    /// `T` must deserialize from the bean's JSON form: field names as keys,
    /// dates as RFC 3339 strings, characters as one-character strings.
    pub fn build_as<T: DeserializeOwned>(
        &mut self,
        type_name: &str,
        recurse: bool,
    ) -> Result<T, MockError> {
        let bean = self.try_build(type_name, recurse)?;
        decode(&bean)
    }

    /// Fill the empty fields of `value`, treating it as an instance of
    /// `type_name`.
    pub fn fill_as<T: Serialize + DeserializeOwned>(
        &mut self,
        type_name: &str,
        value: &T,
        recurse: bool,
    ) -> Result<T, MockError> {
        let json = serde_json::to_value(value).map_err(|err| MockError::Decode(err.to_string()))?;
        let bean = Bean::from_json(self.catalog(), type_name, &json).map_err(|err| match err {
            beanmock_core::Error::UnknownType(name) => MockError::UnknownType(name),
            other => MockError::Decode(other.to_string()),
        })?;
        let bean = self.try_fill(bean, recurse)?;
        decode(&bean)
    }
}

fn decode<T: DeserializeOwned>(bean: &Bean) -> Result<T, MockError> {
    serde_json::from_value(bean.to_json()).map_err(|err| {
        MockError::Decode(format!("cannot decode {} bean: {err}", bean.type_name()))
    })
}
