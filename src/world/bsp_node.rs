// src/world/bsp_node.rs

use crate::utils::{BoundingBox, Line2D, LineSide, Point2D};

/// Index of a node's child in the map's flat arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BspChild {
    Node(usize),
    Leaf(usize),
}

/// Hardened interior node.
#[derive(Debug, Clone)]
pub struct BspNode {
    pub index: usize,
    pub partition: Line2D,
    /// Child on the front (right) side of the partition.
    pub right: BspChild,
    pub left: BspChild,
    pub right_bounds: BoundingBox,
    pub left_bounds: BoundingBox,
}

impl BspNode {
    pub fn child(&self, side: LineSide) -> BspChild {
        match side {
            LineSide::Right => self.right,
            LineSide::Left => self.left,
        }
    }

    pub fn child_bounds(&self, side: LineSide) -> &BoundingBox {
        match side {
            LineSide::Right => &self.right_bounds,
            LineSide::Left => &self.left_bounds,
        }
    }

    /// Bounds of everything below this node.
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = self.right_bounds;
        bounds.combine(&self.left_bounds);
        bounds
    }

    /// Side of the partition `point` falls on; points on the line go right.
    pub fn side_of(&self, point: &Point2D) -> LineSide {
        self.partition.point_on_side(point)
    }
}
