//! Ordered shape storage and immutable snapshots.

use crate::shapes::{Shape, ShapeId};
use std::sync::Arc;

/// An immutable copy of the full shape list at one point in time.
pub type ShapeSet = Arc<[Shape]>;

/// Ordered collection of drawn shapes, back to front.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. Its identifier must not already be present.
    pub fn add(&mut self, shape: Shape) {
        debug_assert!(!self.contains(shape.id()), "duplicate shape id {}", shape.id());
        self.shapes.push(shape);
    }

    /// Remove every shape with the given id. Returns how many were removed.
    pub fn remove(&mut self, id: ShapeId) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|shape| shape.id() != id);
        before - self.shapes.len()
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Copy the current sequence into an immutable snapshot.
    pub fn snapshot(&self) -> ShapeSet {
        Arc::from(self.shapes.as_slice())
    }

    /// Replace the contents with `snapshot`, preserving ids and order.
    pub fn restore(&mut self, snapshot: &ShapeSet) {
        self.clear();
        for shape in snapshot.iter() {
            self.add(shape.clone());
        }
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    /// Check if a shape with this id is stored.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
