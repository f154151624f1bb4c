// src/bsp/bsp_superblock.rs

use crate::bsp::bsp_seg::LineSeg;
use crate::utils::{BoundingBox, Line2D, LineSide};

/// Binary spatial subdivision of a seg list.
///
/// Each block halves its parent along the longer axis. A seg is stored in the
/// smallest block that wholly contains it; `total` counts every seg in the
/// block and its children, so a block lying entirely on one side of a
/// candidate partition can be counted without visiting its segs.
#[derive(Debug)]
pub struct SuperBlock {
    pub bounds: BoundingBox,
    /// Indices of segs that straddle both children (or of every seg, in a smallest block).
    pub segs: Vec<usize>,
    pub total: usize,
    pub children: Option<Box<[SuperBlock; 2]>>,
}

impl SuperBlock {
    fn empty(bounds: BoundingBox) -> Self {
        SuperBlock {
            bounds,
            segs: Vec::new(),
            total: 0,
            children: None,
        }
    }

    /// Builds the block tree over `segs`. Blocks are not split once both
    /// sides are at most `min_size` long.
    pub fn build(segs: &[LineSeg], min_size: f64) -> SuperBlock {
        let mut bounds = BoundingBox::new_empty();
        for seg in segs {
            bounds.combine(&seg.bounds());
        }
        let mut root = SuperBlock::empty(bounds);
        for (i, seg) in segs.iter().enumerate() {
            root.insert(i, &seg.bounds(), min_size);
        }
        root
    }

    fn insert(&mut self, index: usize, seg_bounds: &BoundingBox, min_size: f64) {
        self.total += 1;
        if self.bounds.width() <= min_size && self.bounds.height() <= min_size {
            self.segs.push(index);
            return;
        }
        let halves = self.halves();
        match halves.iter().position(|h| h.contains_box(seg_bounds)) {
            Some(side) => {
                let children = self.children.get_or_insert_with(|| {
                    Box::new([SuperBlock::empty(halves[0]), SuperBlock::empty(halves[1])])
                });
                children[side].insert(index, seg_bounds, min_size);
            }
            None => self.segs.push(index),
        }
    }

    fn halves(&self) -> [BoundingBox; 2] {
        let b = self.bounds;
        if b.width() >= b.height() {
            let mid = (b.min_x + b.max_x) / 2.0;
            [
                BoundingBox::new(b.min_x, b.min_y, mid, b.max_y),
                BoundingBox::new(mid, b.min_y, b.max_x, b.max_y),
            ]
        } else {
            let mid = (b.min_y + b.max_y) / 2.0;
            [
                BoundingBox::new(b.min_x, b.min_y, b.max_x, mid),
                BoundingBox::new(b.min_x, mid, b.max_x, b.max_y),
            ]
        }
    }

    /// Side of `partition` this block lies on, if all of it lies further
    /// than `epsilon` from the line.
    pub fn side_of(&self, partition: &Line2D, epsilon: f64) -> Option<LineSide> {
        if self.bounds.is_empty() {
            return None;
        }
        let distances = self.bounds.corners().map(|c| partition.signed_distance(&c));
        if distances.iter().all(|&d| d > epsilon) {
            Some(LineSide::Right)
        } else if distances.iter().all(|&d| d < -epsilon) {
            Some(LineSide::Left)
        } else {
            None
        }
    }
}
