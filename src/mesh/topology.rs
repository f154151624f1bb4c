//! Navigation and geometric queries over a `Mesh`.

use std::f64::consts::TAU;

use super::types::{ClockDirection, Face, FaceId, GeometryError, HEdge, HEdgeId, Vertex, VertexId};
use super::Mesh;
use crate::utils::geometry::signed_area;
use crate::utils::{BoundingBox, Line2D, Point2D};

/// How far, in map units, a corner may bulge the wrong way before a polygon
/// stops counting as convex. Vertex merging moves points by up to the
/// partition epsilon, which can leave tiny reflex corners behind.
const CONVEXITY_EPSILON: f64 = 1.0 / 64.0;

/// Iterator over the half-edges of one face loop, following `next`.
pub struct FaceHedges<'a> {
    mesh: &'a Mesh,
    start: HEdgeId,
    current: Option<HEdgeId>,
    remaining: usize,
}

impl<'a> Iterator for FaceHedges<'a> {
    type Item = HEdgeId;

    fn next(&mut self) -> Option<HEdgeId> {
        let current = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        self.current = self
            .mesh
            .hedges
            .get(current.index())
            .and_then(|h| h.next)
            .filter(|&n| n != self.start);
        Some(current)
    }
}

impl Mesh {
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    pub fn hedge(&self, id: HEdgeId) -> &HEdge {
        &self.hedges[id.index()]
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    pub fn twin(&self, h: HEdgeId) -> HEdgeId {
        self.hedges[h.index()].twin
    }

    pub fn next(&self, h: HEdgeId) -> Option<HEdgeId> {
        self.hedges[h.index()].next
    }

    pub fn prev(&self, h: HEdgeId) -> Option<HEdgeId> {
        self.hedges[h.index()].prev
    }

    /// The adjacent half-edge in the face loop, walking in `direction`.
    pub fn neighbor(&self, h: HEdgeId, direction: ClockDirection) -> Option<HEdgeId> {
        match direction {
            ClockDirection::Clockwise => self.next(h),
            ClockDirection::Anticlockwise => self.prev(h),
        }
    }

    pub fn origin(&self, h: HEdgeId) -> VertexId {
        self.hedges[h.index()].origin
    }

    pub fn destination(&self, h: HEdgeId) -> VertexId {
        self.hedges[self.twin(h).index()].origin
    }

    /// The half-edge `from -> to`, if that edge exists.
    pub fn find_hedge(&self, from: VertexId, to: VertexId) -> Option<HEdgeId> {
        self.edge_map.get(&(from, to)).copied()
    }

    /// Segment spanned by a half-edge.
    pub fn hedge_line(&self, h: HEdgeId) -> Line2D {
        Line2D::new(self.position(self.origin(h)), self.position(self.destination(h)))
    }

    pub fn face_hedges(&self, face: FaceId) -> FaceHedges<'_> {
        let start = self.faces[face.index()].hedge;
        FaceHedges {
            mesh: self,
            start,
            current: Some(start),
            remaining: self.hedges.len(),
        }
    }

    pub fn face_vertices(&self, face: FaceId) -> Vec<VertexId> {
        self.face_hedges(face).map(|h| self.origin(h)).collect()
    }

    pub fn face_points(&self, face: FaceId) -> Vec<Point2D> {
        self.face_hedges(face)
            .map(|h| self.position(self.origin(h)))
            .collect()
    }

    pub fn face_bounds(&self, face: FaceId) -> BoundingBox {
        BoundingBox::from_points(&self.face_points(face))
    }

    /// Unsigned area of a face.
    pub fn face_area(&self, face: FaceId) -> f64 {
        signed_area(&self.face_points(face)).abs()
    }

    /// True when `point` lies on the interior (right) side of every edge,
    /// within `epsilon`.
    pub fn face_contains_point(&self, face: FaceId, point: &Point2D, epsilon: f64) -> bool {
        self.face_hedges(face)
            .all(|h| self.hedge_line(h).signed_distance(point) >= -epsilon)
    }

    pub fn is_face_convex(&self, face: FaceId) -> bool {
        self.face_winding_check(face).is_ok()
    }

    /// Checks that a face is a simple, convex polygon wound with its interior
    /// on the right.
    ///
    /// Every corner must turn right (or run straight on), and the turns must
    /// add up to exactly one clockwise revolution; a ring that turns right
    /// throughout but winds twice is a self-intersecting star.
    pub fn face_winding_check(&self, face: FaceId) -> Result<(), GeometryError> {
        if face.index() >= self.faces.len() {
            return Err(GeometryError::UnknownFace(face));
        }
        let points = self.face_points(face);
        let n = points.len();
        if n < 3 {
            return Err(GeometryError::TooFewEdges { face, edges: n });
        }

        let mut turning = 0.0;
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let c = points[(i + 2) % n];
            let e1 = a.to(&b);
            let e2 = b.to(&c);
            let cross = e1.cross(&e2);
            let length = e1.length();
            if length > 0.0 && cross / length > CONVEXITY_EPSILON {
                return Err(GeometryError::NotConvex(face));
            }
            turning += cross.atan2(e1.dot(&e2));
        }
        if (turning + TAU).abs() > 1e-6 {
            return Err(GeometryError::SelfIntersecting(face));
        }
        if signed_area(&points) >= 0.0 {
            return Err(GeometryError::NotConvex(face));
        }
        Ok(())
    }

    /// Rebuilds every vertex's ring of outgoing half-edges, sorted by angle.
    pub fn rebuild_vertex_owners(&mut self) {
        for v in &mut self.vertices {
            v.owners.clear();
        }
        for (i, h) in self.hedges.iter().enumerate() {
            self.vertices[h.origin.index()].owners.push(HEdgeId(i as u32));
        }
        let angles: Vec<f64> = (0..self.hedges.len())
            .map(|i| self.hedge_line(HEdgeId(i as u32)).direction().angle())
            .collect();
        for v in &mut self.vertices {
            v.owners.sort_by(|a, b| angles[a.index()].total_cmp(&angles[b.index()]));
        }
    }

    /// Outgoing half-edges of `v`, counter-clockwise from +X.
    pub fn vertex_owners(&self, v: VertexId) -> &[HEdgeId] {
        &self.vertices[v.index()].owners
    }

    /// Faces incident to `v`, in owner-ring order.
    pub fn one_ring_faces(&self, v: VertexId) -> Vec<FaceId> {
        let mut faces: Vec<FaceId> = Vec::new();
        for &h in self.vertex_owners(v) {
            if let Some(f) = self.hedges[h.index()].face {
                if !faces.contains(&f) {
                    faces.push(f);
                }
            }
        }
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn mesh_with_ring(points: &[(f64, f64)]) -> (Mesh, FaceId) {
        let mut mesh = Mesh::from_points(points.iter().map(|&(x, y)| Point2D::new(x, y)));
        let ring: Vec<VertexId> = (0..points.len() as u32).map(VertexId).collect();
        let f = mesh.add_face(&ring).unwrap();
        (mesh, f)
    }

    #[test]
    fn test_face_loop_navigation() {
        let (mesh, f) = mesh_with_ring(&[(0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let hedges: Vec<HEdgeId> = mesh.face_hedges(f).collect();
        assert_eq!(hedges.len(), 4);
        for &h in &hedges {
            let n = mesh.neighbor(h, ClockDirection::Clockwise).unwrap();
            assert_eq!(mesh.neighbor(n, ClockDirection::Anticlockwise), Some(h));
            assert_eq!(mesh.destination(h), mesh.origin(n));
        }
        assert_approx_eq!(mesh.face_area(f), 4.0);
    }

    #[test]
    fn test_convex_clockwise_square_passes() {
        let (mesh, f) = mesh_with_ring(&[(0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        assert!(mesh.is_face_convex(f));
        assert!(mesh.face_contains_point(f, &Point2D::new(1.0, 1.0), 1e-6));
        assert!(mesh.face_contains_point(f, &Point2D::new(2.0, 1.0), 1e-6));
        assert!(!mesh.face_contains_point(f, &Point2D::new(3.0, 1.0), 1e-6));
    }

    #[test]
    fn test_collinear_corner_is_still_convex() {
        let (mesh, f) = mesh_with_ring(&[(0.0, 2.0), (1.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        assert!(mesh.is_face_convex(f));
    }

    #[test]
    fn test_concave_face_rejected() {
        // L shape, clockwise.
        let (mesh, f) = mesh_with_ring(&[
            (0.0, 0.0),
            (0.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 0.0),
        ]);
        assert_eq!(mesh.face_winding_check(f), Err(GeometryError::NotConvex(f)));
    }

    #[test]
    fn test_tiny_reflex_corner_is_tolerated() {
        // A corner pushed out by less than 1/64 of a unit still counts as convex.
        let (mesh, f) = mesh_with_ring(&[(0.0, 64.0), (32.0, 64.005), (64.0, 64.0), (64.0, 0.0), (0.0, 0.0)]);
        assert!(mesh.is_face_convex(f));
    }

    #[test]
    fn test_anticlockwise_face_rejected() {
        let (mesh, f) = mesh_with_ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert!(!mesh.is_face_convex(f));
    }

    #[test]
    fn test_pentagram_is_self_intersecting() {
        // Five points visited every second corner, clockwise.
        let star: Vec<(f64, f64)> = (0..5)
            .map(|i| {
                let a = std::f64::consts::FRAC_PI_2 - (i as f64) * 2.0 * TAU / 5.0;
                (10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect();
        let (mesh, f) = mesh_with_ring(&star);
        assert_eq!(
            mesh.face_winding_check(f),
            Err(GeometryError::SelfIntersecting(f))
        );
    }

    #[test]
    fn test_vertex_owner_ring_sorted_by_angle() {
        let (mut mesh, f) = mesh_with_ring(&[(0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        mesh.rebuild_vertex_owners();
        // Corner (0, 0) has outgoing edges to the north (face) and east (outside).
        let owners = mesh.vertex_owners(VertexId(3));
        assert_eq!(owners.len(), 2);
        assert_eq!(mesh.destination(owners[0]), VertexId(2));
        assert_eq!(mesh.destination(owners[1]), VertexId(0));
        assert_eq!(mesh.one_ring_faces(VertexId(3)), vec![f]);
    }
}
