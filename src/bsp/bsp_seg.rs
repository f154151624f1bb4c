// src/bsp/bsp_seg.rs

use crate::bsp::SegPosition;
use crate::mesh::{LineSideRef, VertexId};
use crate::utils::{BoundingBox, Line2D, LineSide, Point2D};

/// One side of a map line, or a piece of one, as seen by the partitioner.
///
/// The segment runs so that the sector it belongs to is on its right.
#[derive(Debug, Clone)]
pub struct LineSeg {
    /// Build order of the seg this one was cut from; pieces keep it.
    pub index: usize,
    pub from: VertexId,
    pub to: VertexId,
    pub start: Point2D,
    pub end: Point2D,
    pub line_side: LineSideRef,
    pub sector: Option<usize>,
}

impl LineSeg {
    pub fn line(&self) -> Line2D {
        Line2D::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points([&self.start, &self.end])
    }

    pub fn source_line(&self) -> usize {
        self.line_side.line
    }

    /// Classifies this seg against `partition`. Endpoints within `epsilon`
    /// of the line count as lying on it.
    pub fn classify(&self, partition: &Line2D, epsilon: f64) -> SegPosition {
        let a = partition.signed_distance(&self.start);
        let b = partition.signed_distance(&self.end);
        position_from_distances(a, b, epsilon)
    }

    /// Side a collinear seg goes to: right when it runs the same way as the partition.
    pub fn collinear_side(&self, partition: &Line2D) -> LineSide {
        if self.line().direction().dot(&partition.direction()) > 0.0 {
            LineSide::Right
        } else {
            LineSide::Left
        }
    }

    /// Copy of this seg over `[from, to]`, keeping its source.
    pub fn piece(&self, from: (VertexId, Point2D), to: (VertexId, Point2D)) -> LineSeg {
        LineSeg {
            index: self.index,
            from: from.0,
            to: to.0,
            start: from.1,
            end: to.1,
            line_side: self.line_side,
            sector: self.sector,
        }
    }

    /// True when both ends of `a`-`b` lie on this seg and run the same way.
    pub fn covers(&self, a: &Point2D, b: &Point2D, epsilon: f64) -> bool {
        let line = self.line();
        let length = self.length();
        if length <= epsilon {
            return false;
        }
        if line.distance_to_point(a) > epsilon || line.distance_to_point(b) > epsilon {
            return false;
        }
        if line.direction().dot(&a.to(b)) <= 0.0 {
            return false;
        }
        let slack = epsilon / length;
        let within = |t: f64| t >= -slack && t <= 1.0 + slack;
        within(line.project(a)) && within(line.project(b))
    }
}

pub(crate) fn position_from_distances(a: f64, b: f64, epsilon: f64) -> SegPosition {
    if a.abs() <= epsilon && b.abs() <= epsilon {
        SegPosition::Collinear
    } else if a >= -epsilon && b >= -epsilon {
        SegPosition::Right
    } else if a <= epsilon && b <= epsilon {
        SegPosition::Left
    } else {
        SegPosition::Split
    }
}
