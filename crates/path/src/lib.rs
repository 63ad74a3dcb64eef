//! Path operators, compiled expressions and position tracking for the
//! jsonskim streaming matcher.
//!
//! This crate knows nothing about parsing JSON or dispatching values; it
//! answers exactly one question: does a compiled path expression match the
//! position the parser is currently at? The matcher core feeds a
//! [`CurrentPosition`] with structural events and probes registered
//! [`JsonPath`]s against it.

pub mod error;
pub mod expression;
pub mod operator;
mod parser;
pub mod position;

// --- Public API ---
pub use error::PathError;
pub use expression::{JsonPath, JsonPathBuilder};
pub use operator::PathOperator;
pub use parser::{compile, compile_one};
pub use position::{CurrentPosition, FrameKind, PositionFrame};
