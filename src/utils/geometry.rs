// src/utils/geometry.rs
// 2D geometry shared by the partitioner, the mesh and the runtime map.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Vector from `self` to `other`.
    pub fn to(&self, other: &Point2D) -> Vector2D {
        Vector2D::new(other.x - self.x, other.y - self.y)
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        Point2D::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn approx_eq(&self, other: &Point2D, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product. Negative when `other` turns clockwise.
    pub fn cross(&self, other: &Vector2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle in radians, counter-clockwise from +X, in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        let a = self.y.atan2(self.x);
        if a < 0.0 {
            a + std::f64::consts::TAU
        } else {
            a
        }
    }
}

/// Which side of a directed line a point or segment lies on.
///
/// Doom convention: the right side of a line, looking from `start` to `end`,
/// is its front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSide {
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub start: Point2D,
    pub end: Point2D,
}

impl Line2D {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Line2D { start, end }
    }

    pub fn direction(&self) -> Vector2D {
        self.start.to(&self.end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn classify_point(&self, point: &Point2D) -> f64 {
        // Returns positive if point is on the right (front) side
        // Returns negative if point is on the left (back) side
        // Returns near zero if point is on the line
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dy * (point.x - self.start.x)) - (dx * (point.y - self.start.y))
    }

    /// `classify_point` scaled to map units.
    pub fn signed_distance(&self, point: &Point2D) -> f64 {
        let length = self.length();
        if length == 0.0 {
            return 0.0;
        }
        self.classify_point(point) / length
    }

    /// Side of the line the point falls on. Points on the line count as right.
    pub fn point_on_side(&self, point: &Point2D) -> LineSide {
        if self.classify_point(point) >= 0.0 {
            LineSide::Right
        } else {
            LineSide::Left
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.is_vertical() || self.is_horizontal()
    }

    /// Parameter of the projection of `point` onto the line, 0 at `start`, 1 at `end`.
    pub fn project(&self, point: &Point2D) -> f64 {
        let d = self.direction();
        let len_sq = d.dot(&d);
        if len_sq == 0.0 {
            return 0.0;
        }
        self.start.to(point).dot(&d) / len_sq
    }

    pub fn distance_to_point(&self, point: &Point2D) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Point where the segment `from`-`to` crosses this line, given the
    /// signed distances of both endpoints. The result is snapped onto the
    /// line when the line is axis-aligned so that both sides of a split agree
    /// on the exact coordinate.
    pub fn crossing_point(&self, from: &Point2D, to: &Point2D, d_from: f64, d_to: f64) -> Point2D {
        let t = super::util::clamp(d_from / (d_from - d_to), 0.0, 1.0);
        let mut p = from.lerp(to, t);
        if self.is_vertical() {
            p.x = self.start.x;
        } else if self.is_horizontal() {
            p.y = self.start.y;
        }
        if from.x == to.x {
            p.x = from.x;
        } else if from.y == to.y {
            p.y = from.y;
        }
        p
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new_empty() -> Self {
        BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    pub fn from_points<'a, I: IntoIterator<Item = &'a Point2D>>(points: I) -> Self {
        let mut bbox = BoundingBox::new_empty();
        for p in points {
            bbox.expand_point(p.x, p.y);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn expand_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn combine(&mut self, other: &BoundingBox) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Grows the box by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> BoundingBox {
        BoundingBox::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width() * self.height()
        }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn corners(&self) -> [Point2D; 4] {
        [
            Point2D::new(self.min_x, self.min_y),
            Point2D::new(self.min_x, self.max_y),
            Point2D::new(self.max_x, self.max_y),
            Point2D::new(self.max_x, self.min_y),
        ]
    }

    // Check if the bounding box contains a point
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}

/// Shoelace area. Positive for counter-clockwise rings, negative for clockwise.
pub fn signed_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Clips a convex, clockwise ring against `line`, keeping the requested side.
///
/// Points within `epsilon` of the line are kept on both sides, so the two
/// halves of a split share their cut edge exactly.
pub fn clip_convex(points: &[Point2D], line: &Line2D, keep: LineSide, epsilon: f64) -> Vec<Point2D> {
    let sign = match keep {
        LineSide::Right => 1.0,
        LineSide::Left => -1.0,
    };
    let n = points.len();
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..n {
        let cur = points[i];
        let nxt = points[(i + 1) % n];
        let dc = sign * line.signed_distance(&cur);
        let dn = sign * line.signed_distance(&nxt);
        if dc >= -epsilon {
            out.push(cur);
        }
        if (dc > epsilon && dn < -epsilon) || (dc < -epsilon && dn > epsilon) {
            out.push(line.crossing_point(&cur, &nxt, dc, dn));
        }
    }
    dedup_ring(&mut out, epsilon);
    out
}

/// Removes consecutive points (including last-to-first) closer than `epsilon`.
pub fn dedup_ring(points: &mut Vec<Point2D>, epsilon: f64) {
    points.dedup_by(|b, a| a.approx_eq(b, epsilon));
    while points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if first.approx_eq(&last, epsilon) {
            points.pop();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn square() -> Vec<Point2D> {
        // Clockwise in a y-up frame.
        vec![
            Point2D::new(0.0, 10.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_classify_point_right_is_positive() {
        let east = Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        assert!(east.classify_point(&Point2D::new(5.0, -1.0)) > 0.0);
        assert!(east.classify_point(&Point2D::new(5.0, 1.0)) < 0.0);
        assert_eq!(east.point_on_side(&Point2D::new(5.0, -1.0)), LineSide::Right);
        assert_approx_eq!(east.signed_distance(&Point2D::new(3.0, -2.0)), 2.0);
    }

    #[test]
    fn test_signed_area_clockwise_is_negative() {
        assert_approx_eq!(signed_area(&square()), -100.0);
    }

    #[test]
    fn test_clip_convex_halves() {
        let cut = Line2D::new(Point2D::new(4.0, 20.0), Point2D::new(4.0, -20.0));
        // Heading south, so the right side is west.
        let west = clip_convex(&square(), &cut, LineSide::Right, 1e-6);
        let east = clip_convex(&square(), &cut, LineSide::Left, 1e-6);
        assert_approx_eq!(signed_area(&west), -40.0);
        assert_approx_eq!(signed_area(&east), -60.0);
        assert!(west.iter().all(|p| p.x <= 4.0));
        assert!(east.iter().all(|p| p.x >= 4.0));
    }

    #[test]
    fn test_clip_convex_on_edge_keeps_ring() {
        let cut = Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(0.0, 10.0));
        let kept = clip_convex(&square(), &cut, LineSide::Right, 1e-6);
        assert_eq!(kept.len(), 4);
        let gone = clip_convex(&square(), &cut, LineSide::Left, 1e-6);
        assert!(gone.len() < 3);
    }

    #[test]
    fn test_crossing_point_snaps_to_axis() {
        let cut = Line2D::new(Point2D::new(3.0, 0.0), Point2D::new(3.0, 1.0));
        let a = Point2D::new(0.0, 7.0);
        let b = Point2D::new(9.0, 7.0);
        let p = cut.crossing_point(&a, &b, cut.signed_distance(&a), cut.signed_distance(&b));
        assert_eq!(p, Point2D::new(3.0, 7.0));
    }

    #[test]
    fn test_bbox_expand_and_area() {
        let bbox = BoundingBox::from_points(&square());
        assert_eq!(bbox.area(), 100.0);
        assert!(bbox.expanded(1.0).contains_box(&bbox));
        assert!(BoundingBox::new_empty().is_empty());
    }
}
