// src/emitter.rs
//! The bundled event-stream driver: walks a `serde_json::Value` and feeds
//! any SAX handler. This is the reference front end and the vehicle for
//! round-trip testing; true streaming front ends implement the same
//! handler contract over their own tokenizers.

use crate::error::SurfError;
use crate::event::{JsonPrimitive, JsonSaxHandler};
use serde_json::Value;

/// Drives a full document pass over `handler` from an in-memory value.
pub fn surf_value<H: JsonSaxHandler>(handler: &mut H, value: &Value) -> Result<(), SurfError> {
    handler.start_document()?;
    emit_value(handler, value)?;
    handler.end_document()
}

/// Parses `json` and drives a full document pass over `handler`.
pub fn surf_str<H: JsonSaxHandler>(handler: &mut H, json: &str) -> Result<(), SurfError> {
    let value: Value = serde_json::from_str(json)?;
    surf_value(handler, &value)
}

/// Emits the events for one value, containers recursively.
pub fn emit_value<H: JsonSaxHandler>(handler: &mut H, value: &Value) -> Result<(), SurfError> {
    match value {
        Value::Object(map) => {
            handler.start_object()?;
            for (key, entry) in map {
                handler.start_object_entry(key)?;
                emit_value(handler, entry)?;
            }
            handler.end_object()
        }
        Value::Array(elements) => {
            handler.start_array()?;
            for element in elements {
                emit_value(handler, element)?;
            }
            handler.end_array()
        }
        scalar => handler.primitive(primitive_of(scalar)),
    }
}

fn primitive_of(value: &Value) -> JsonPrimitive<'_> {
    match value {
        Value::Null => JsonPrimitive::Null,
        Value::Bool(b) => JsonPrimitive::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonPrimitive::Int(i)
            } else {
                JsonPrimitive::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => JsonPrimitive::Str(s),
        _ => unreachable!("containers handled by emit_value"),
    }
}
