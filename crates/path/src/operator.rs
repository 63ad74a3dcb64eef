//! Path operators: one hop of a compiled JSONPath expression.

use crate::position::PositionFrame;

/// A single step of a path expression.
///
/// Expressed as a tagged union; the expression matcher pattern-matches on
/// the variants directly. `DeepScan` is the only operator without a
/// positional match: it is consumed by the expression-level walk in
/// [`crate::JsonPath::matches`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathOperator {
    /// `$` — the document root. Valid only as the first operator.
    Root,
    /// `.key` or `['key']` — a named object entry.
    Child(String),
    /// `.*` or `[*]` — any object entry or array element at this level.
    Wildcard,
    /// `[i]` — the array element at a single 0-based index.
    ArrayIndex(usize),
    /// `[start:end]` — array elements with `start <= index < end`.
    /// An open bound matches from the first, or to the last, element.
    ArraySlice {
        start: Option<usize>,
        end: Option<usize>,
    },
    /// `..` — zero or more intervening levels.
    DeepScan,
}

impl PathOperator {
    /// Whether this operator applies to the given position frame.
    pub fn matches(&self, frame: &PositionFrame) -> bool {
        match self {
            PathOperator::Root => matches!(frame, PositionFrame::Root),
            PathOperator::Child(name) => frame.key() == Some(name.as_str()),
            PathOperator::Wildcard => {
                matches!(frame, PositionFrame::Entry(_) | PositionFrame::Array { .. })
            }
            PathOperator::ArrayIndex(i) => frame.array_index() == Some(*i as i64),
            PathOperator::ArraySlice { start, end } => match frame.array_index() {
                Some(index) if index >= 0 => {
                    let index = index as usize;
                    start.map_or(true, |s| index >= s) && end.map_or(true, |e| index < e)
                }
                _ => false,
            },
            // Consumed by the expression matcher, never matched positionally.
            PathOperator::DeepScan => false,
        }
    }

    /// Whether this operator can only ever match a single position.
    pub fn is_definite(&self) -> bool {
        !matches!(
            self,
            PathOperator::Wildcard | PathOperator::ArraySlice { .. } | PathOperator::DeepScan
        )
    }
}
