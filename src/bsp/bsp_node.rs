//! src/bsp/bsp_node.rs

use crate::bsp::bsp_seg::LineSeg;
use crate::mesh::FaceId;
use crate::utils::{Line2D, Point2D};

/// A leaf of the build-time tree.
#[derive(Debug)]
pub struct LeafData {
    /// Order in which the partitioner produced this leaf.
    pub order: usize,
    pub segs: Vec<LineSeg>,
    pub sector: Option<usize>,
    /// Convex outline, clockwise. `None` when the leaf encloses no area.
    pub polygon: Option<Vec<Point2D>>,
    pub face: Option<FaceId>,
}

impl LeafData {
    /// A leaf with no sector or no polygon cannot be drawn or clustered.
    pub fn is_orphan(&self) -> bool {
        self.sector.is_none() || self.face.is_none()
    }
}

/// Build-time BSP tree. Interior nodes own their children; the hardener
/// consumes the whole tree.
#[derive(Debug)]
pub enum BspTreeNode {
    Node {
        /// Right children lie on the front (right) side of this line.
        partition: Line2D,
        right: Box<BspTreeNode>,
        left: Box<BspTreeNode>,
    },
    Leaf(LeafData),
}

impl BspTreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, BspTreeNode::Leaf(_))
    }

    /// Number of edges on the longest root-to-leaf path. A lone leaf has height 0.
    pub fn height(&self) -> usize {
        match self {
            BspTreeNode::Leaf(_) => 0,
            BspTreeNode::Node { right, left, .. } => 1 + right.height().max(left.height()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            BspTreeNode::Leaf(_) => 1,
            BspTreeNode::Node { right, left, .. } => right.leaf_count() + left.leaf_count(),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            BspTreeNode::Leaf(_) => 0,
            BspTreeNode::Node { right, left, .. } => 1 + right.node_count() + left.node_count(),
        }
    }

    /// Leafs in traversal order, right subtree first.
    pub fn leafs(&self) -> Vec<&LeafData> {
        let mut out = Vec::new();
        self.collect_leafs(&mut out);
        out
    }

    fn collect_leafs<'a>(&'a self, out: &mut Vec<&'a LeafData>) {
        match self {
            BspTreeNode::Leaf(leaf) => out.push(leaf),
            BspTreeNode::Node { right, left, .. } => {
                right.collect_leafs(out);
                left.collect_leafs(out);
            }
        }
    }

    pub(crate) fn leafs_mut(&mut self) -> Vec<&mut LeafData> {
        let mut out = Vec::new();
        self.collect_leafs_mut(&mut out);
        out
    }

    fn collect_leafs_mut<'a>(&'a mut self, out: &mut Vec<&'a mut LeafData>) {
        match self {
            BspTreeNode::Leaf(leaf) => out.push(leaf),
            BspTreeNode::Node { right, left, .. } => {
                right.collect_leafs_mut(out);
                left.collect_leafs_mut(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(order: usize) -> BspTreeNode {
        BspTreeNode::Leaf(LeafData {
            order,
            segs: Vec::new(),
            sector: None,
            polygon: None,
            face: None,
        })
    }

    #[test]
    fn test_tree_counts() {
        let partition = Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(0.0, 1.0));
        let tree = BspTreeNode::Node {
            partition,
            right: Box::new(BspTreeNode::Node {
                partition,
                right: Box::new(leaf(0)),
                left: Box::new(leaf(1)),
            }),
            left: Box::new(leaf(2)),
        };
        assert!(!tree.is_leaf());
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.node_count(), 2);
        let orders: Vec<usize> = tree.leafs().iter().map(|l| l.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert!(tree.leafs()[0].is_orphan());
    }
}
