// src/error.rs
use jsonskim_path::PathError;
use thiserror::Error;

/// Errors raised by listeners. Listeners are user code; anything they fail
/// with is carried opaquely and routed through the error strategy.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Failures inside a value provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Cannot cast assembled value: {0}")]
    Cast(String),

    #[error("Object entry consumed without a key")]
    MissingKey,

    #[error("Consume target is not an object")]
    NotAnObject,

    #[error("Consume target is not an array")]
    NotAnArray,
}

/// A comprehensive error type for the whole matching pipeline.
#[derive(Error, Debug)]
pub enum SurfError {
    #[error("Path compilation failed: {0}")]
    Path(#[from] PathError),

    #[error("Document parsing failed: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Bindings are frozen once the context is built")]
    BuilderFrozen,

    #[error("Listener failed at '{path}': {cause}")]
    Listener { path: String, cause: ListenerError },

    #[error("Provider failed: {0}")]
    Provider(#[from] ProviderError),
}

/// What the context should do after a listener or provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Swallow the failure and keep parsing.
    Continue,
    /// Latch the stop flag; subsequent events become no-ops.
    Stop,
    /// Propagate the failure out of the event handler.
    Abort,
}

/// Policy for failures raised inside listeners and providers.
///
/// The triggering event always finishes its structural bookkeeping before
/// the chosen action takes effect, so neither the position stack nor the
/// collector stack is corrupted by a failing listener.
pub trait ErrorHandlingStrategy {
    fn on_error(&self, error: &SurfError) -> ErrorAction;
}

/// Default strategy: every failure aborts the parse.
#[derive(Debug, Default)]
pub struct PropagateErrors;

impl ErrorHandlingStrategy for PropagateErrors {
    fn on_error(&self, _error: &SurfError) -> ErrorAction {
        ErrorAction::Abort
    }
}

/// Logs the failure and keeps going.
#[derive(Debug, Default)]
pub struct SuppressErrors;

impl ErrorHandlingStrategy for SuppressErrors {
    fn on_error(&self, error: &SurfError) -> ErrorAction {
        log::warn!("Suppressed failure during matching: {error}");
        ErrorAction::Continue
    }
}

/// Stops the parse quietly on the first failure.
#[derive(Debug, Default)]
pub struct StopOnError;

impl ErrorHandlingStrategy for StopOnError {
    fn on_error(&self, error: &SurfError) -> ErrorAction {
        log::warn!("Stopping parse after failure: {error}");
        ErrorAction::Stop
    }
}
