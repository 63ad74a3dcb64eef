// src/bindings.rs
//! The two-tier lookup over registered bindings.
//!
//! Definite paths can only match at one exact depth, so they live in a
//! dense table indexed by `depth - min_depth`. Indefinite paths are kept
//! sorted ascending by their minimum match depth, which lets the lookup
//! loop stop at the first binding that cannot match the current depth yet.

use crate::listener::JsonPathListener;
use jsonskim_path::{CurrentPosition, JsonPath};
use std::collections::BTreeMap;
use std::rc::Rc;

/// One registered (expression, listeners) pair.
pub(crate) struct Binding<V> {
    pub path: JsonPath,
    pub listeners: Vec<Rc<dyn JsonPathListener<V>>>,
}

pub(crate) struct IndefiniteBinding<V> {
    pub binding: Binding<V>,
    pub minimum_depth: usize,
}

/// Frozen lookup structure, materialized once at build time.
pub(crate) struct BindingIndex<V> {
    definite: Vec<Vec<Binding<V>>>,
    min_depth: usize,
    max_depth: usize,
    indefinite: Vec<IndefiniteBinding<V>>,
}

impl<V> BindingIndex<V> {
    pub fn build(
        definite: BTreeMap<usize, Vec<Binding<V>>>,
        mut indefinite: Vec<IndefiniteBinding<V>>,
    ) -> Self {
        // Stable sort: bindings with equal minimum depth keep their
        // registration order, which fixes listener invocation order.
        indefinite.sort_by_key(|b| b.minimum_depth);

        let min_depth = definite.keys().next().copied().unwrap_or(0);
        let max_depth = definite.keys().next_back().copied().unwrap_or(0);
        let mut table: Vec<Vec<Binding<V>>> = Vec::new();
        if !definite.is_empty() {
            table.resize_with(max_depth - min_depth + 1, Vec::new);
            for (depth, bindings) in definite {
                table[depth - min_depth] = bindings;
            }
        }
        log::debug!(
            "Binding index built: {} definite depth slot(s), {} indefinite binding(s)",
            table.len(),
            indefinite.len()
        );
        BindingIndex {
            definite: table,
            min_depth,
            max_depth,
            indefinite,
        }
    }

    /// Calls `matched` for every binding whose path matches the position.
    ///
    /// Indefinite bindings are probed first, then the definite slot for the
    /// current depth; within each tier, registration order is preserved.
    pub fn for_each_match(
        &self,
        position: &CurrentPosition,
        mut matched: impl FnMut(&Binding<V>),
    ) {
        let depth = position.depth();
        for entry in &self.indefinite {
            if entry.minimum_depth > depth {
                break;
            }
            if entry.binding.path.matches(position) {
                matched(&entry.binding);
            }
        }
        if !self.definite.is_empty() && depth >= self.min_depth && depth <= self.max_depth {
            for binding in &self.definite[depth - self.min_depth] {
                if binding.path.matches(position) {
                    matched(binding);
                }
            }
        }
    }
}
