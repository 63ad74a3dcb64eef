// src/context.rs
//! The surfing context: the state machine that consumes SAX events,
//! advances the live position, probes the binding index and hands matched
//! sub-trees to the collector stack.

use crate::bindings::{Binding, BindingIndex, IndefiniteBinding};
use crate::collector::JsonCollector;
use crate::dispatcher::ContentDispatcher;
use crate::error::{
    ErrorAction, ErrorHandlingStrategy, PropagateErrors, SurfError,
};
use crate::event::{JsonPrimitive, JsonSaxHandler};
use crate::listener::{JsonPathListener, MatchContext};
use crate::provider::{build_primitive, JsonProvider, SerdeJsonProvider};
use jsonskim_path::{compile, CurrentPosition, FrameKind, JsonPath};
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Registers bindings and configuration, then freezes into a
/// [`SurfingContext`]. Any mutation after [`SurferBuilder::build`] fails
/// with [`SurfError::BuilderFrozen`].
pub struct SurferBuilder<P: JsonProvider = SerdeJsonProvider> {
    provider: Rc<P>,
    strategy: Rc<dyn ErrorHandlingStrategy>,
    definite: BTreeMap<usize, Vec<Binding<P::Value>>>,
    indefinite: Vec<IndefiniteBinding<P::Value>>,
    skip_overlapped_path: bool,
    built: bool,
}

impl SurferBuilder<SerdeJsonProvider> {
    /// A builder over the default `serde_json` provider.
    pub fn new() -> Self {
        Self::with_provider(SerdeJsonProvider)
    }
}

impl Default for SurferBuilder<SerdeJsonProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: JsonProvider> SurferBuilder<P> {
    /// A builder over a custom value provider.
    pub fn with_provider(provider: P) -> Self {
        SurferBuilder {
            provider: Rc::new(provider),
            strategy: Rc::new(PropagateErrors),
            definite: BTreeMap::new(),
            indefinite: Vec::new(),
            skip_overlapped_path: false,
            built: false,
        }
    }

    fn check(&self) -> Result<(), SurfError> {
        if self.built {
            return Err(SurfError::BuilderFrozen);
        }
        Ok(())
    }

    /// Compiles `expression` and registers `listener` for every path it
    /// expands to (a multi-index expression registers one binding per
    /// index, all sharing the listener).
    pub fn bind(
        &mut self,
        expression: &str,
        listener: impl JsonPathListener<P::Value> + 'static,
    ) -> Result<&mut Self, SurfError> {
        self.check()?;
        let listener: Rc<dyn JsonPathListener<P::Value>> = Rc::new(listener);
        for path in compile(expression)? {
            self.register(path, vec![Rc::clone(&listener)]);
        }
        Ok(self)
    }

    /// Registers `listener` for an already-compiled path.
    pub fn bind_path(
        &mut self,
        path: JsonPath,
        listener: impl JsonPathListener<P::Value> + 'static,
    ) -> Result<&mut Self, SurfError> {
        self.check()?;
        self.register(path, vec![Rc::new(listener)]);
        Ok(self)
    }

    /// Registers a listener that receives values cast to `T` through the
    /// provider. Cast failures are routed through the error strategy like
    /// any other provider failure.
    pub fn bind_typed<T, F>(&mut self, expression: &str, listener: F) -> Result<&mut Self, SurfError>
    where
        P: 'static,
        T: DeserializeOwned + 'static,
        F: Fn(T, &MatchContext<'_>) -> Result<(), crate::error::ListenerError> + 'static,
    {
        let provider = Rc::clone(&self.provider);
        self.bind(expression, move |value: &P::Value, context: &MatchContext<'_>| {
            let typed: T = provider
                .cast(value)
                .map_err(|e| Box::new(e) as crate::error::ListenerError)?;
            listener(typed, context)
        })
    }

    fn register(&mut self, path: JsonPath, listeners: Vec<Rc<dyn JsonPathListener<P::Value>>>) {
        log::debug!("Binding path {path}");
        if path.is_definite() {
            let depth = path.path_depth();
            self.definite
                .entry(depth)
                .or_default()
                .push(Binding { path, listeners });
        } else {
            let minimum_depth = path.minimum_depth();
            self.indefinite.push(IndefiniteBinding {
                binding: Binding { path, listeners },
                minimum_depth,
            });
        }
    }

    /// Suppresses any match that fires while an outer match is still being
    /// recorded. The check is deliberately coarse: a non-empty collector
    /// stack suppresses matching regardless of containment.
    pub fn skip_overlapped_path(&mut self) -> Result<&mut Self, SurfError> {
        self.check()?;
        self.skip_overlapped_path = true;
        Ok(self)
    }

    pub fn with_error_strategy(
        &mut self,
        strategy: impl ErrorHandlingStrategy + 'static,
    ) -> Result<&mut Self, SurfError> {
        self.check()?;
        self.strategy = Rc::new(strategy);
        Ok(self)
    }

    /// Freezes the bindings into the two-tier index and produces the
    /// single-use context.
    pub fn build(&mut self) -> Result<SurfingContext<P>, SurfError> {
        self.check()?;
        self.built = true;
        let index = BindingIndex::build(
            std::mem::take(&mut self.definite),
            std::mem::take(&mut self.indefinite),
        );
        Ok(SurfingContext {
            position: CurrentPosition::new(),
            index,
            dispatcher: ContentDispatcher::new(),
            provider: Rc::clone(&self.provider),
            strategy: Rc::clone(&self.strategy),
            stopped: Rc::new(Cell::new(false)),
            skip_overlapped_path: self.skip_overlapped_path,
            finished: false,
        })
    }
}

/// The matcher state machine. Single-use: built once, driven by exactly
/// one parser pass, then discarded. Not thread-safe.
pub struct SurfingContext<P: JsonProvider = SerdeJsonProvider> {
    position: CurrentPosition,
    index: BindingIndex<P::Value>,
    dispatcher: ContentDispatcher<P>,
    provider: Rc<P>,
    strategy: Rc<dyn ErrorHandlingStrategy>,
    stopped: Rc<Cell<bool>>,
    skip_overlapped_path: bool,
    finished: bool,
}

impl SurfingContext<SerdeJsonProvider> {
    pub fn builder() -> SurferBuilder<SerdeJsonProvider> {
        SurferBuilder::new()
    }
}

impl<P: JsonProvider> SurfingContext<P> {
    fn inactive(&self) -> bool {
        self.stopped.get() || self.finished
    }

    /// Canonical dot-and-bracket rendering of the live position.
    pub fn json_path(&self) -> String {
        self.position.canonical()
    }

    /// The current object key, if the innermost frame is an entry.
    pub fn key(&self) -> Option<&str> {
        self.position.current_key()
    }

    /// Latches the stop flag; every subsequent event becomes a no-op.
    pub fn stop_parsing(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Probes the binding index at the current position.
    ///
    /// For a primitive event the matched listeners are invoked here and
    /// now, before the primitive is forwarded to the collector stack. For a
    /// structural event the matched listeners are pooled into one new
    /// collector, which is registered before the enclosing start event
    /// propagates, so it captures its own opening delimiter.
    fn do_matching(
        &mut self,
        initialize_collector: bool,
        primitive: Option<&JsonPrimitive<'_>>,
    ) -> Result<(), SurfError> {
        if self.skip_overlapped_path && !self.dispatcher.is_empty() {
            return Ok(());
        }

        let mut matched: Vec<Rc<dyn JsonPathListener<P::Value>>> = Vec::new();
        self.index.for_each_match(&self.position, |binding| {
            matched.extend(binding.listeners.iter().cloned());
        });
        if matched.is_empty() {
            return Ok(());
        }

        let path = self.position.canonical();
        let key = self.position.current_key().map(str::to_owned);
        log::trace!("Matched {} listener(s) at '{path}'", matched.len());

        if let Some(primitive) = primitive {
            let value = build_primitive(&*self.provider, primitive);
            for listener in matched {
                if self.stopped.get() {
                    break;
                }
                let context = MatchContext::new(&path, key.as_deref(), &self.stopped);
                if let Err(cause) = listener.on_value(&value, &context) {
                    let error = SurfError::Listener {
                        path: path.clone(),
                        cause,
                    };
                    match self.strategy.on_error(&error) {
                        ErrorAction::Continue => {}
                        ErrorAction::Stop => self.stopped.set(true),
                        ErrorAction::Abort => return Err(error),
                    }
                }
            }
        } else {
            let mut collector = JsonCollector::new(
                Rc::clone(&self.provider),
                Rc::clone(&self.strategy),
                matched,
                Rc::clone(&self.stopped),
                path,
                key,
            );
            if initialize_collector {
                collector.start_document()?;
            }
            self.dispatcher.register(collector);
        }
        Ok(())
    }
}

impl<P: JsonProvider> JsonSaxHandler for SurfingContext<P> {
    fn start_document(&mut self) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        self.position.start();
        // A binding on `$` matches here; its collector is initialized by
        // the start-document broadcast below rather than primed.
        self.do_matching(false, None)?;
        self.dispatcher.start_document()
    }

    fn end_document(&mut self) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        self.dispatcher.end_document()?;
        // Release everything tied to the pass.
        self.position.clear();
        self.dispatcher.clear();
        self.finished = true;
        Ok(())
    }

    fn start_object(&mut self) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        if self.position.peek_kind() == Some(FrameKind::Array) {
            // The object is itself an array element: announce it first.
            self.position.advance_array_index();
            self.do_matching(true, None)?;
        }
        self.dispatcher.start_object()
    }

    fn end_object(&mut self) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        if self.position.peek_kind() == Some(FrameKind::Object) {
            self.position.step_out();
        }
        self.dispatcher.end_object()
    }

    fn start_object_entry(&mut self, key: &str) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        self.position.step_into_entry(key);
        // Forward before matching: a collector registered for this entry
        // must capture only the value, not the entry event itself.
        self.dispatcher.start_object_entry(key)?;
        self.do_matching(true, None)
    }

    fn start_array(&mut self) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        if self.position.peek_kind() == Some(FrameKind::Array) {
            self.position.advance_array_index();
            self.do_matching(true, None)?;
        }
        self.position.step_into_array();
        self.dispatcher.start_array()
    }

    fn end_array(&mut self) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        self.position.step_out();
        // An array held by a named entry pops both frames on close.
        if self.position.peek_kind() == Some(FrameKind::Object) {
            self.position.step_out();
        }
        self.dispatcher.end_array()
    }

    fn primitive(&mut self, value: JsonPrimitive<'_>) -> Result<(), SurfError> {
        if self.inactive() {
            return Ok(());
        }
        match self.position.peek_kind() {
            Some(FrameKind::Array) => {
                // The index advances before matching; changing this order
                // would make `$[0]` unmatchable.
                self.position.advance_array_index();
                self.do_matching(true, Some(&value))?;
            }
            Some(FrameKind::Object) => {
                self.position.step_out();
            }
            _ => {}
        }
        self.dispatcher.primitive(value)
    }
}
