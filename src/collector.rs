// src/collector.rs
//! Sub-tree collectors: transient receivers that rebuild one matched
//! fragment through the value provider and fire their listeners exactly
//! once when the fragment closes.

use crate::error::{ErrorAction, ErrorHandlingStrategy, SurfError};
use crate::event::{JsonPrimitive, JsonSaxHandler};
use crate::listener::{JsonPathListener, MatchContext};
use crate::provider::{build_primitive, JsonProvider};
use std::cell::Cell;
use std::rc::Rc;

enum Frame<V> {
    Object { value: V, pending_key: Option<String> },
    Array { value: V },
}

/// A recording receiver registered when a structural path matches.
///
/// The collector is primed so that the next value-opening event it sees is
/// the root of the matched fragment. Its own frame stack tracks nesting;
/// when the stack drains back to empty the assembled value is complete. A
/// match on a bare primitive completes immediately on the first
/// `primitive` event.
pub(crate) struct JsonCollector<P: JsonProvider> {
    provider: Rc<P>,
    strategy: Rc<dyn ErrorHandlingStrategy>,
    listeners: Vec<Rc<dyn JsonPathListener<P::Value>>>,
    stopped: Rc<Cell<bool>>,
    matched_path: String,
    matched_key: Option<String>,
    stack: Vec<Frame<P::Value>>,
    done: bool,
}

impl<P: JsonProvider> JsonCollector<P> {
    pub fn new(
        provider: Rc<P>,
        strategy: Rc<dyn ErrorHandlingStrategy>,
        listeners: Vec<Rc<dyn JsonPathListener<P::Value>>>,
        stopped: Rc<Cell<bool>>,
        matched_path: String,
        matched_key: Option<String>,
    ) -> Self {
        JsonCollector {
            provider,
            strategy,
            listeners,
            stopped,
            matched_path,
            matched_key,
            stack: Vec::new(),
            done: false,
        }
    }

    /// Whether the collector has dispatched its value and can be dropped.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Routes an assembled value into the enclosing frame, or completes the
    /// collector when the value is the matched root itself.
    fn consume(&mut self, value: P::Value) -> Result<(), SurfError> {
        match self.stack.last_mut() {
            Some(Frame::Object {
                value: object,
                pending_key,
            }) => {
                let key = pending_key
                    .take()
                    .ok_or(crate::error::ProviderError::MissingKey)?;
                self.provider.consume_object_entry(object, &key, value)?;
                Ok(())
            }
            Some(Frame::Array { value: array }) => {
                self.provider.consume_array_element(array, value)?;
                Ok(())
            }
            None => self.complete(value),
        }
    }

    /// Fires every target listener with the assembled value, then marks the
    /// collector for removal.
    fn complete(&mut self, value: P::Value) -> Result<(), SurfError> {
        self.done = true;
        log::trace!("Collector completed at '{}'", self.matched_path);
        for listener in &self.listeners {
            if self.stopped.get() {
                break;
            }
            let context = MatchContext::new(
                &self.matched_path,
                self.matched_key.as_deref(),
                &self.stopped,
            );
            if let Err(cause) = listener.on_value(&value, &context) {
                let error = SurfError::Listener {
                    path: self.matched_path.clone(),
                    cause,
                };
                match self.strategy.on_error(&error) {
                    ErrorAction::Continue => {}
                    ErrorAction::Stop => self.stopped.set(true),
                    ErrorAction::Abort => return Err(error),
                }
            }
        }
        Ok(())
    }
}

impl<P: JsonProvider> JsonSaxHandler for JsonCollector<P> {
    fn start_document(&mut self) -> Result<(), SurfError> {
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), SurfError> {
        // An unbalanced document can strand a collector; it is dropped with
        // the context without firing.
        Ok(())
    }

    fn start_object(&mut self) -> Result<(), SurfError> {
        self.stack.push(Frame::Object {
            value: self.provider.create_object(),
            pending_key: None,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), SurfError> {
        match self.stack.pop() {
            Some(Frame::Object { value, .. }) => self.consume(value),
            _ => Ok(()),
        }
    }

    fn start_object_entry(&mut self, key: &str) -> Result<(), SurfError> {
        if let Some(Frame::Object { pending_key, .. }) = self.stack.last_mut() {
            *pending_key = Some(key.to_owned());
        }
        Ok(())
    }

    fn start_array(&mut self) -> Result<(), SurfError> {
        self.stack.push(Frame::Array {
            value: self.provider.create_array(),
        });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), SurfError> {
        match self.stack.pop() {
            Some(Frame::Array { value }) => self.consume(value),
            _ => Ok(()),
        }
    }

    fn primitive(&mut self, value: JsonPrimitive<'_>) -> Result<(), SurfError> {
        let value = build_primitive(&*self.provider, &value);
        self.consume(value)
    }
}
