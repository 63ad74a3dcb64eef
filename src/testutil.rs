// src/testutil.rs
//! Small helpers shared by unit tests.

use crate::error::ListenerError;
use crate::listener::{JsonPathListener, MatchContext};
use serde_json::Value;

/// A listener that accepts every value and does nothing.
pub fn sink_listener() -> impl JsonPathListener<Value> + 'static {
    |_: &Value, _: &MatchContext<'_>| Ok::<(), ListenerError>(())
}
