//! # jsonskim
//!
//! A streaming JSONPath matcher. Register JSONPath expressions against
//! listeners, feed the context SAX-style parse events, and matched
//! subtrees (or primitive values) are dispatched while the document is
//! being parsed. No full in-memory tree is required by the matcher.
//!
//! ## Module Structure
//!
//! - `path`: Re-exported from `jsonskim-path` - operators, compiled
//!   expressions, the text compiler and position tracking
//! - `context`: The surfing context and its builder
//! - `event`: The SAX event contract between front ends and the core
//! - `provider`: The pluggable value builder (default: `serde_json`)
//! - `emitter`: The bundled `serde_json::Value` event driver
//! - `collect`: One-shot collect helpers
//!
//! ## Usage
//!
//! ```
//! use jsonskim::{surf_str, SurfingContext};
//!
//! let mut builder = SurfingContext::builder();
//! builder.bind("$.store.book[*].author", |author: &serde_json::Value, _ctx: &jsonskim::MatchContext| {
//!     println!("author: {author}");
//!     Ok::<(), jsonskim::ListenerError>(())
//! })?;
//! let mut context = builder.build()?;
//! surf_str(&mut context, r#"{"store":{"book":[{"author":"Nigel Rees"}]}}"#)?;
//! # Ok::<(), jsonskim::SurfError>(())
//! ```
//!
//! Listeners run synchronously on the parsing thread and may stop the
//! parse early through their [`MatchContext`]. A context is single-use:
//! build, drive one document pass, discard.

// Re-export the path algorithm crate
pub use jsonskim_path as path;

mod bindings;
mod collect;
mod collector;
mod context;
mod dispatcher;
mod emitter;
mod error;
mod event;
mod listener;
mod provider;

#[cfg(test)]
mod testutil;

// Public API
pub use crate::collect::{collect_all, collect_one, select_all};
pub use crate::context::{SurferBuilder, SurfingContext};
pub use crate::emitter::{emit_value, surf_str, surf_value};
pub use crate::error::{
    ErrorAction, ErrorHandlingStrategy, ListenerError, PropagateErrors, ProviderError,
    StopOnError, SuppressErrors, SurfError,
};
pub use crate::event::{Event, JsonPrimitive, JsonSaxHandler};
pub use crate::listener::{JsonPathListener, MatchContext};
pub use crate::provider::{JsonProvider, SerdeJsonProvider};

// Convenience re-exports from the path crate
pub use jsonskim_path::{compile, compile_one, JsonPath, PathError, PathOperator};
