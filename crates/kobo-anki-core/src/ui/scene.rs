//! Per-frame registry of touch targets
//!
//! The scene is cleared at the start of every screen draw and filled in
//! paint order. Insertion order is z-order: a later element sits on top of
//! an earlier one, so hit-testing walks the list backwards.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::warn;

use crate::ui::core::{Action, TouchPoint};

/// Upper bound on touch targets in one frame
pub const MAX_ELEMENTS: usize = 48;

/// A touch target: the action it triggers and where it lives on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub action: Action,
    pub bounds: Rectangle,
}

#[derive(Debug, Default)]
pub struct Scene {
    elements: Vec<Element, MAX_ELEMENTS>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every element from the previous frame.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Register a touch target on top of everything added so far.
    pub fn add(&mut self, action: Action, bounds: Rectangle) {
        if self.elements.push(Element { action, bounds }).is_err() {
            warn!("Scene full, dropping touch target {}", action);
        }
    }

    /// The topmost action whose bounds contain `point`.
    pub fn hit_test(&self, point: TouchPoint) -> Option<Action> {
        let point = point.to_point();
        self.elements
            .iter()
            .rev()
            .find(|e| e.bounds.contains(point))
            .map(|e| e.action)
    }

    /// Elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Bounds of the topmost element registered for `action`, if any.
    pub fn bounds_of(&self, action: Action) -> Option<Rectangle> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.action == action)
            .map(|e| e.bounds)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
