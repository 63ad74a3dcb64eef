// src/dispatcher.rs
//! The dispatcher owns the stack of active collectors and broadcasts every
//! event to all of them, outermost first. A collector that completes on an
//! event is removed before control returns to the context, so the
//! collector stack only ever holds recordings still in progress.

use crate::collector::JsonCollector;
use crate::error::SurfError;
use crate::event::{JsonPrimitive, JsonSaxHandler};
use crate::provider::JsonProvider;

pub(crate) struct ContentDispatcher<P: JsonProvider> {
    receivers: Vec<JsonCollector<P>>,
}

impl<P: JsonProvider> ContentDispatcher<P> {
    pub fn new() -> Self {
        ContentDispatcher {
            receivers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn register(&mut self, collector: JsonCollector<P>) {
        self.receivers.push(collector);
    }

    pub fn clear(&mut self) {
        self.receivers.clear();
    }

    fn broadcast(
        &mut self,
        mut deliver: impl FnMut(&mut JsonCollector<P>) -> Result<(), SurfError>,
    ) -> Result<(), SurfError> {
        for receiver in &mut self.receivers {
            deliver(receiver)?;
        }
        self.receivers.retain(|receiver| !receiver.is_done());
        Ok(())
    }
}

impl<P: JsonProvider> JsonSaxHandler for ContentDispatcher<P> {
    fn start_document(&mut self) -> Result<(), SurfError> {
        self.broadcast(|r| r.start_document())
    }

    fn end_document(&mut self) -> Result<(), SurfError> {
        self.broadcast(|r| r.end_document())
    }

    fn start_object(&mut self) -> Result<(), SurfError> {
        self.broadcast(|r| r.start_object())
    }

    fn end_object(&mut self) -> Result<(), SurfError> {
        self.broadcast(|r| r.end_object())
    }

    fn start_object_entry(&mut self, key: &str) -> Result<(), SurfError> {
        self.broadcast(|r| r.start_object_entry(key))
    }

    fn start_array(&mut self) -> Result<(), SurfError> {
        self.broadcast(|r| r.start_array())
    }

    fn end_array(&mut self) -> Result<(), SurfError> {
        self.broadcast(|r| r.end_array())
    }

    fn primitive(&mut self, value: JsonPrimitive<'_>) -> Result<(), SurfError> {
        self.broadcast(|r| r.primitive(value))
    }
}
