//! The mutable stack that mirrors the parser's location in the document.
//!
//! One frame is pushed per structural level: a synthetic root frame at
//! document start, an `Entry` frame for every named object entry, and an
//! `Array` frame for every array. The array frame carries the index of the
//! element currently being delivered; it starts at -1 and is advanced
//! *before* the element is matched, so index 0 is observable on the first
//! element.

use std::fmt::Write as _;

/// Coarse classification of the innermost frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Root,
    Object,
    Array,
}

/// One level of the live document position.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionFrame {
    /// The synthetic frame below everything else. Only ever at depth 0.
    Root,
    /// Inside the value of a named object entry.
    Entry(String),
    /// Inside an array; `index` is the 0-based index of the current element,
    /// or -1 before the first element is announced.
    Array { index: i64 },
}

impl PositionFrame {
    pub fn kind(&self) -> FrameKind {
        match self {
            PositionFrame::Root => FrameKind::Root,
            PositionFrame::Entry(_) => FrameKind::Object,
            PositionFrame::Array { .. } => FrameKind::Array,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            PositionFrame::Entry(key) => Some(key),
            _ => None,
        }
    }

    pub fn array_index(&self) -> Option<i64> {
        match self {
            PositionFrame::Array { index } => Some(*index),
            _ => None,
        }
    }
}

/// Growable stack of [`PositionFrame`]s tracking the parser's location.
#[derive(Debug, Default)]
pub struct CurrentPosition {
    frames: Vec<PositionFrame>,
}

impl CurrentPosition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the stack to the single root frame. Called at document start.
    pub fn start(&mut self) {
        self.frames.clear();
        self.frames.push(PositionFrame::Root);
    }

    pub fn step_into_entry(&mut self, key: &str) {
        self.frames.push(PositionFrame::Entry(key.to_owned()));
    }

    pub fn step_into_array(&mut self) {
        self.frames.push(PositionFrame::Array { index: -1 });
    }

    pub fn step_out(&mut self) {
        self.frames.pop();
    }

    /// Advances the index of the innermost array frame. No-op when the top
    /// frame is not an array.
    pub fn advance_array_index(&mut self) {
        if let Some(PositionFrame::Array { index }) = self.frames.last_mut() {
            *index += 1;
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[PositionFrame] {
        &self.frames
    }

    pub fn peek(&self) -> Option<&PositionFrame> {
        self.frames.last()
    }

    pub fn peek_kind(&self) -> Option<FrameKind> {
        self.frames.last().map(PositionFrame::kind)
    }

    /// The key of the innermost frame, if it is an object entry.
    pub fn current_key(&self) -> Option<&str> {
        self.frames.last().and_then(PositionFrame::key)
    }

    /// Renders the position in canonical dot-and-bracket notation,
    /// e.g. `$.store.book[3].title`.
    pub fn canonical(&self) -> String {
        let mut out = String::from("$");
        for frame in &self.frames {
            match frame {
                PositionFrame::Root => {}
                PositionFrame::Entry(key) => {
                    let _ = write!(out, ".{key}");
                }
                PositionFrame::Array { index } => {
                    let _ = write!(out, "[{index}]");
                }
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
