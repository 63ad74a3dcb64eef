// src/provider.rs
//! The value-builder seam. Collectors assemble matched fragments through a
//! [`JsonProvider`] so the value representation stays pluggable; the
//! default provider builds `serde_json::Value`s.

use crate::error::ProviderError;
use crate::event::JsonPrimitive;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

/// Builds and composes opaque JSON values on behalf of the collectors.
///
/// Implementations must be side-effect-free apart from the structures they
/// build.
pub trait JsonProvider {
    type Value: Clone + std::fmt::Debug + 'static;

    fn create_object(&self) -> Self::Value;
    fn create_array(&self) -> Self::Value;

    fn is_object(&self, value: &Self::Value) -> bool;
    fn is_array(&self, value: &Self::Value) -> bool;

    fn consume_object_entry(
        &self,
        object: &mut Self::Value,
        key: &str,
        value: Self::Value,
    ) -> Result<(), ProviderError>;

    fn consume_array_element(
        &self,
        array: &mut Self::Value,
        value: Self::Value,
    ) -> Result<(), ProviderError>;

    fn primitive_bool(&self, value: bool) -> Self::Value;
    fn primitive_int(&self, value: i64) -> Self::Value;
    fn primitive_float(&self, value: f64) -> Self::Value;
    fn primitive_str(&self, value: &str) -> Self::Value;
    fn primitive_null(&self) -> Self::Value;

    /// Casts an assembled value into a user type.
    fn cast<T: DeserializeOwned>(&self, value: &Self::Value) -> Result<T, ProviderError>;
}

/// Builds the scalar for one wire primitive.
pub(crate) fn build_primitive<P: JsonProvider>(
    provider: &P,
    value: &JsonPrimitive<'_>,
) -> P::Value {
    match value {
        JsonPrimitive::Null => provider.primitive_null(),
        JsonPrimitive::Bool(b) => provider.primitive_bool(*b),
        JsonPrimitive::Int(i) => provider.primitive_int(*i),
        JsonPrimitive::Float(f) => provider.primitive_float(*f),
        JsonPrimitive::Str(s) => provider.primitive_str(s),
    }
}

/// The default provider: assembles `serde_json::Value`s and casts through
/// `serde_json::from_value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonProvider;

impl JsonProvider for SerdeJsonProvider {
    type Value = Value;

    fn create_object(&self) -> Value {
        Value::Object(Map::new())
    }

    fn create_array(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn is_object(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn is_array(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn consume_object_entry(
        &self,
        object: &mut Value,
        key: &str,
        value: Value,
    ) -> Result<(), ProviderError> {
        match object {
            Value::Object(map) => {
                map.insert(key.to_owned(), value);
                Ok(())
            }
            _ => Err(ProviderError::NotAnObject),
        }
    }

    fn consume_array_element(&self, array: &mut Value, value: Value) -> Result<(), ProviderError> {
        match array {
            Value::Array(elements) => {
                elements.push(value);
                Ok(())
            }
            _ => Err(ProviderError::NotAnArray),
        }
    }

    fn primitive_bool(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn primitive_int(&self, value: i64) -> Value {
        Value::Number(Number::from(value))
    }

    fn primitive_float(&self, value: f64) -> Value {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }

    fn primitive_str(&self, value: &str) -> Value {
        Value::String(value.to_owned())
    }

    fn primitive_null(&self) -> Value {
        Value::Null
    }

    fn cast<T: DeserializeOwned>(&self, value: &Value) -> Result<T, ProviderError> {
        serde_json::from_value(value.clone()).map_err(|e| ProviderError::Cast(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assembles_nested_structures() {
        let provider = SerdeJsonProvider;
        let mut object = provider.create_object();
        let mut array = provider.create_array();
        provider
            .consume_array_element(&mut array, provider.primitive_int(1))
            .unwrap();
        provider
            .consume_array_element(&mut array, provider.primitive_str("two"))
            .unwrap();
        provider.consume_object_entry(&mut object, "xs", array).unwrap();
        assert_eq!(object, json!({"xs": [1, "two"]}));
    }

    #[test]
    fn classifies_objects_and_arrays() {
        let provider = SerdeJsonProvider;
        assert!(provider.is_object(&provider.create_object()));
        assert!(!provider.is_object(&provider.create_array()));
        assert!(!provider.is_object(&provider.primitive_int(1)));
        assert!(provider.is_array(&provider.create_array()));
        assert!(!provider.is_array(&provider.create_object()));
        assert!(!provider.is_array(&provider.primitive_str("x")));
        assert!(!provider.is_object(&provider.primitive_null()));
        assert!(!provider.is_array(&provider.primitive_null()));
    }

    #[test]
    fn consume_checks_target_shape() {
        let provider = SerdeJsonProvider;
        let mut not_an_object = provider.primitive_null();
        assert!(provider
            .consume_object_entry(&mut not_an_object, "k", Value::Null)
            .is_err());
        assert!(provider
            .consume_array_element(&mut not_an_object, Value::Null)
            .is_err());
    }

    #[test]
    fn cast_through_serde() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Point {
            x: i64,
            y: i64,
        }
        let provider = SerdeJsonProvider;
        let point: Point = provider.cast(&json!({"x": 1, "y": 2})).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
        assert!(provider.cast::<Point>(&json!({"x": 1})).is_err());
    }
}
