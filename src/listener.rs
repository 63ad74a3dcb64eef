// src/listener.rs
//! Listener traits and the context handed to a listener while it runs.

use crate::error::ListenerError;
use std::cell::Cell;

/// Receives one matched value per distinct position match.
///
/// Listeners run synchronously on the parsing thread, between two SAX
/// events. They may inspect the live parse through the [`MatchContext`]
/// and may stop the parse; they must not assume they own the value.
pub trait JsonPathListener<V> {
    fn on_value(&self, value: &V, context: &MatchContext<'_>) -> Result<(), ListenerError>;
}

impl<V, F> JsonPathListener<V> for F
where
    F: Fn(&V, &MatchContext<'_>) -> Result<(), ListenerError>,
{
    fn on_value(&self, value: &V, context: &MatchContext<'_>) -> Result<(), ListenerError> {
        self(value, context)
    }
}

/// What a listener can see and do while it is being invoked.
///
/// `json_path` is the canonical path of the matched value, captured at the
/// moment the match fired, so collector-assembled values report the
/// position of their opening frame rather than wherever the parser is when
/// the fragment closes.
pub struct MatchContext<'a> {
    json_path: &'a str,
    key: Option<&'a str>,
    stopped: &'a Cell<bool>,
}

impl<'a> MatchContext<'a> {
    pub(crate) fn new(json_path: &'a str, key: Option<&'a str>, stopped: &'a Cell<bool>) -> Self {
        MatchContext {
            json_path,
            key,
            stopped,
        }
    }

    /// Canonical dot-and-bracket path of the matched value.
    pub fn json_path(&self) -> &str {
        self.json_path
    }

    /// The object key of the matched value, if it is a named entry.
    pub fn key(&self) -> Option<&str> {
        self.key
    }

    /// Latches the stop flag. All later events become no-ops; listeners
    /// already scheduled for the current event are skipped from the next
    /// boundary check on.
    pub fn stop_parsing(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}
