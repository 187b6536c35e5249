//! Pointer-to-drop-target resolution for drag interactions.
//!
//! Hosts register the screen rectangle of each rendered node; given a
//! pointer position and the dragged subtree, [`DropTargetResolver`] picks
//! the node the drop should land on and how (inside it, or after it as a
//! sibling). Selection prefers the smallest region containing the pointer;
//! when the pointer is inside no region, the region with the greatest
//! overlap against the dragged rectangle wins. A drop onto the dragged node
//! or one of its descendants resolves to nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{editor::Position, ident::NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let h = (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            return 0.0;
        }
        w * h
    }
}

/// One registered droppable region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropRegion {
    pub node: NodeId,
    pub bounds: Rect,
    pub accepts_children: bool,
}

/// The dragged subtree and its current on-screen rectangle.
#[derive(Debug, Clone)]
pub struct DragSource {
    pub node: NodeId,
    pub bounds: Rect,
    /// Identity set of the dragged subtree, the dragged node included.
    pub descendants: HashSet<NodeId>,
}

/// Where a drop would land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    pub anchor: NodeId,
    pub position: Position,
}

#[derive(Debug, Clone, Default)]
pub struct DropTargetResolver {
    regions: Vec<DropRegion>,
}

impl DropTargetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or refresh a region. Re-registering a node replaces its
    /// bounds but keeps its original registration order, which is the
    /// tie-break for equal-area candidates.
    pub fn register(&mut self, region: DropRegion) {
        match self.regions.iter_mut().find(|r| r.node == region.node) {
            Some(existing) => *existing = region,
            None => self.regions.push(region),
        }
    }

    pub fn unregister(&mut self, node: NodeId) {
        self.regions.retain(|r| r.node != node);
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Resolve the drop target for a pointer position.
    pub fn resolve(&self, pointer: Point, drag: &DragSource) -> Option<DropTarget> {
        let candidate = self
            .containing_region(pointer)
            .or_else(|| self.overlapping_region(&drag.bounds))?;
        if drag.descendants.contains(&candidate.node) {
            tracing::debug!(node = %candidate.node, "drop onto dragged subtree rejected");
            return None;
        }
        let position = if candidate.accepts_children {
            Position::Inside
        } else {
            Position::After
        };
        Some(DropTarget {
            anchor: candidate.node,
            position,
        })
    }

    /// Smallest region containing the pointer; ties keep the
    /// first-registered one.
    fn containing_region(&self, pointer: Point) -> Option<&DropRegion> {
        let mut best: Option<&DropRegion> = None;
        for region in &self.regions {
            if !region.bounds.contains(pointer) {
                continue;
            }
            match best {
                Some(current) if region.bounds.area() >= current.bounds.area() => {}
                _ => best = Some(region),
            }
        }
        best
    }

    /// Fallback: greatest overlap with the dragged rectangle.
    fn overlapping_region(&self, drag_bounds: &Rect) -> Option<&DropRegion> {
        let mut best: Option<(&DropRegion, f64)> = None;
        for region in &self.regions {
            let overlap = region.bounds.intersection_area(drag_bounds);
            if overlap <= 0.0 {
                continue;
            }
            match best {
                Some((_, current)) if overlap <= current => {}
                _ => best = Some((region, overlap)),
            }
        }
        best.map(|(region, _)| region)
    }
}
