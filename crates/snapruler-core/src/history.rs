//! Undo/redo history over whole-document snapshots.
//!
//! Each entry is a full [`ShapeSet`]. That costs one O(n) copy per action,
//! which is fine at drawing-sized shape counts.

use crate::store::ShapeSet;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 20;

/// Bounded undo and redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<ShapeSet>,
    redo_stack: Vec<ShapeSet>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history with the default depth.
    pub fn new() -> Self {
        Self::with_depth(MAX_UNDO_HISTORY)
    }

    /// Create a history keeping at most `max_depth` undo entries (at least 1).
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Push the state before a new action. Clears the redo stack.
    pub fn record_before_action(&mut self, snapshot: ShapeSet) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Step back. Returns the state to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: ShapeSet) -> Option<ShapeSet> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward. Returns the state to restore, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current: ShapeSet) -> Option<ShapeSet> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Shape};
    use crate::store::ShapeStore;
    use kurbo::Point;

    fn add_line(store: &mut ShapeStore, history: &mut History, x: f64) {
        history.record_before_action(store.snapshot());
        store.add(Shape::Line(Line::new(Point::new(x, 0.0), Point::new(x, 10.0))));
    }

    #[test]
    fn test_undo_add_shape() {
        let mut store = ShapeStore::new();
        let mut history = History::new();

        add_line(&mut store, &mut history, 1.0);
        let drawn = store.snapshot();
        assert!(history.can_undo());

        let previous = history.undo(store.snapshot()).unwrap();
        store.restore(&previous);
        assert!(store.is_empty());
        assert!(history.can_redo());

        let next = history.redo(store.snapshot()).unwrap();
        store.restore(&next);
        assert_eq!(store.shapes(), &drawn[..]);
    }

    #[test]
    fn test_undo_restores_exact_sequence() {
        let mut store = ShapeStore::new();
        let mut history = History::new();
        let mut states = vec![store.snapshot()];

        for i in 0..MAX_UNDO_HISTORY {
            add_line(&mut store, &mut history, i as f64);
            states.push(store.snapshot());
        }

        for expected in states.iter().rev().skip(1) {
            let previous = history.undo(store.snapshot()).unwrap();
            store.restore(&previous);
            assert_eq!(store.shapes(), &expected[..]);
        }
        assert!(!history.can_undo());
        assert!(store.is_empty());
    }

    #[test]
    fn test_depth_limit_evicts_oldest() {
        let mut store = ShapeStore::new();
        let mut history = History::new();

        for i in 0..=MAX_UNDO_HISTORY {
            add_line(&mut store, &mut history, i as f64);
        }
        assert_eq!(history.undo_len(), MAX_UNDO_HISTORY);

        // The empty initial state was evicted; the oldest reachable state has one shape.
        let mut last = None;
        while let Some(previous) = history.undo(store.snapshot()) {
            store.restore(&previous);
            last = Some(previous);
        }
        assert_eq!(last.unwrap().len(), 1);
    }

    #[test]
    fn test_new_action_clears_redo() {
        let mut store = ShapeStore::new();
        let mut history = History::new();

        add_line(&mut store, &mut history, 1.0);
        let previous = history.undo(store.snapshot()).unwrap();
        store.restore(&previous);
        assert!(history.can_redo());

        add_line(&mut store, &mut history, 2.0);
        assert!(!history.can_redo());
        assert!(history.redo(store.snapshot()).is_none());
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut history = History::new();
        let store = ShapeStore::new();
        assert!(history.undo(store.snapshot()).is_none());
        assert!(history.redo(store.snapshot()).is_none());
        assert!(!history.can_redo());
    }
}
