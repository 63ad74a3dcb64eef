//! Compiled path expressions and the expression-level matcher.

use crate::error::PathError;
use crate::operator::PathOperator;
use crate::position::CurrentPosition;
use std::fmt;

/// An immutable, validated sequence of [`PathOperator`]s.
///
/// Construction computes two derived attributes used by the binding index:
///
/// - `definite` — the path can match at most one position in any document
///   (no wildcard, deep scan or slice).
/// - `minimum_depth` — the number of non-deep-scan operators; no position
///   shallower than this can ever match.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    ops: Vec<PathOperator>,
    definite: bool,
    minimum_depth: usize,
}

impl JsonPath {
    /// Validates and compiles an operator sequence.
    pub fn new(ops: Vec<PathOperator>) -> Result<Self, PathError> {
        if ops.is_empty() {
            return Err(PathError::Empty);
        }
        if ops[0] != PathOperator::Root {
            return Err(PathError::MissingRoot);
        }
        for window in ops.windows(2) {
            if window[1] == PathOperator::Root {
                return Err(PathError::UnsupportedOperator("$".to_owned()));
            }
            if window[0] == PathOperator::DeepScan && window[1] == PathOperator::DeepScan {
                return Err(PathError::UnsupportedOperator("..".to_owned()));
            }
        }
        let definite = ops.iter().all(PathOperator::is_definite);
        let minimum_depth = ops
            .iter()
            .filter(|op| !matches!(op, PathOperator::DeepScan))
            .count();
        Ok(JsonPath {
            ops,
            definite,
            minimum_depth,
        })
    }

    /// Fluent construction of a path, starting from the root operator.
    pub fn builder() -> JsonPathBuilder {
        JsonPathBuilder {
            ops: vec![PathOperator::Root],
        }
    }

    pub fn operators(&self) -> &[PathOperator] {
        &self.ops
    }

    /// True iff the path matches at most one position in any document.
    pub fn is_definite(&self) -> bool {
        self.definite
    }

    /// Exact match depth for definite paths.
    pub fn path_depth(&self) -> usize {
        self.ops.len()
    }

    /// Lower bound on the live path depth at which a match can fire.
    pub fn minimum_depth(&self) -> usize {
        self.minimum_depth
    }

    /// Whole-expression match against the live position.
    ///
    /// A forward two-pointer walk. On `DeepScan` the first frame satisfying
    /// the following operator is consumed (greedy first fit, no
    /// backtracking): the supported operator set never makes backtracking
    /// observable, and the walk stays O(|ops| * depth).
    pub fn matches(&self, position: &CurrentPosition) -> bool {
        let frames = position.frames();
        if self.definite {
            if frames.len() != self.ops.len() {
                return false;
            }
        } else if frames.len() < self.minimum_depth {
            return false;
        }

        let mut i = 0;
        let mut j = 0;
        while i < self.ops.len() && j < frames.len() {
            match &self.ops[i] {
                PathOperator::DeepScan => {
                    if i == self.ops.len() - 1 {
                        // A trailing `..` matches everything below here.
                        return true;
                    }
                    i += 1;
                    let anchor = &self.ops[i];
                    while j < frames.len() && !anchor.matches(&frames[j]) {
                        j += 1;
                    }
                    if j == frames.len() {
                        return false;
                    }
                    i += 1;
                    j += 1;
                }
                op => {
                    if !op.matches(&frames[j]) {
                        return false;
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        i == self.ops.len() && j == frames.len()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut after_deep_scan = false;
        for op in &self.ops {
            match op {
                PathOperator::Root => write!(f, "$")?,
                PathOperator::Child(key) => {
                    if after_deep_scan {
                        write!(f, "{key}")?;
                    } else {
                        write!(f, ".{key}")?;
                    }
                }
                PathOperator::Wildcard => {
                    if after_deep_scan {
                        write!(f, "*")?;
                    } else {
                        write!(f, "[*]")?;
                    }
                }
                PathOperator::ArrayIndex(i) => write!(f, "[{i}]")?,
                PathOperator::ArraySlice { start, end } => {
                    write!(f, "[")?;
                    if let Some(s) = start {
                        write!(f, "{s}")?;
                    }
                    write!(f, ":")?;
                    if let Some(e) = end {
                        write!(f, "{e}")?;
                    }
                    write!(f, "]")?;
                }
                PathOperator::DeepScan => write!(f, "..")?,
            }
            after_deep_scan = matches!(op, PathOperator::DeepScan);
        }
        Ok(())
    }
}

/// Programmatic construction of a [`JsonPath`].
#[derive(Debug)]
pub struct JsonPathBuilder {
    ops: Vec<PathOperator>,
}

impl JsonPathBuilder {
    pub fn child(mut self, key: impl Into<String>) -> Self {
        self.ops.push(PathOperator::Child(key.into()));
        self
    }

    pub fn wildcard(mut self) -> Self {
        self.ops.push(PathOperator::Wildcard);
        self
    }

    pub fn array_index(mut self, index: usize) -> Self {
        self.ops.push(PathOperator::ArrayIndex(index));
        self
    }

    pub fn array_slice(mut self, start: Option<usize>, end: Option<usize>) -> Self {
        self.ops.push(PathOperator::ArraySlice { start, end });
        self
    }

    pub fn deep_scan(mut self) -> Self {
        self.ops.push(PathOperator::DeepScan);
        self
    }

    pub fn build(self) -> Result<JsonPath, PathError> {
        JsonPath::new(self.ops)
    }
}
