// src/event.rs
//! The SAX event contract between a streaming JSON front end and the
//! matching core. Front ends push events; the core (and its collectors)
//! consume them. The enum form exists so event sequences can be built,
//! logged and replayed as plain data.

use crate::error::SurfError;

/// A scalar JSON value as it appears on the event stream. Strings are
/// borrowed from the front end; providers copy what they keep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonPrimitive<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
}

/// One SAX event, as plain data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    StartDocument,
    EndDocument,
    StartObject,
    EndObject,
    /// A named object entry; the events for its value follow.
    StartObjectEntry(&'a str),
    StartArray,
    EndArray,
    Primitive(JsonPrimitive<'a>),
}

/// Receiver side of the event contract.
///
/// Implemented by the surfing context and by the sub-tree collectors. All
/// methods return `Result` so a fatal error-strategy decision can
/// propagate back to the front end; ordinary listener failures are
/// absorbed before they get here.
pub trait JsonSaxHandler {
    fn start_document(&mut self) -> Result<(), SurfError>;
    fn end_document(&mut self) -> Result<(), SurfError>;
    fn start_object(&mut self) -> Result<(), SurfError>;
    fn end_object(&mut self) -> Result<(), SurfError>;
    fn start_object_entry(&mut self, key: &str) -> Result<(), SurfError>;
    fn start_array(&mut self) -> Result<(), SurfError>;
    fn end_array(&mut self) -> Result<(), SurfError>;
    fn primitive(&mut self, value: JsonPrimitive<'_>) -> Result<(), SurfError>;

    /// Dispatches one [`Event`] to the matching handler method.
    fn on_event(&mut self, event: Event<'_>) -> Result<(), SurfError> {
        match event {
            Event::StartDocument => self.start_document(),
            Event::EndDocument => self.end_document(),
            Event::StartObject => self.start_object(),
            Event::EndObject => self.end_object(),
            Event::StartObjectEntry(key) => self.start_object_entry(key),
            Event::StartArray => self.start_array(),
            Event::EndArray => self.end_array(),
            Event::Primitive(value) => self.primitive(value),
        }
    }
}
