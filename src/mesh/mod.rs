//! Half-edge mesh
//!
//! Arena-backed doubly-connected edge list. Vertices, half-edges and faces are
//! addressed by stable integer ids; twin/next/prev links are ids into the same
//! arena, so the mesh can be moved wholesale without fixing up references.
//!
//! ## Winding
//!
//! Faces are wound so that their interior lies on the right of each
//! half-edge, matching the front side of a Doom line. In a y-up frame that
//! makes faces clockwise (negative signed area).

mod construction;
mod topology;
mod types;
mod validation;

pub use topology::FaceHedges;
pub use types::*;

use std::collections::HashMap;

use crate::utils::{BoundingBox, Point2D};

/// Arena half-edge mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) hedges: Vec<HEdge>,
    pub(crate) faces: Vec<Face>,
    /// Directed edge lookup `(origin, destination) -> half-edge`
    pub(crate) edge_map: HashMap<(VertexId, VertexId), HEdgeId>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn hedge_count(&self) -> usize {
        self.hedges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn hedges(&self) -> &[HEdge] {
        &self.hedges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn get_hedge(&self, id: HEdgeId) -> Option<&HEdge> {
        self.hedges.get(id.index())
    }

    pub fn get_face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    /// Bounds of every vertex in the mesh.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().map(|v| &v.position))
    }

    pub fn position(&self, v: VertexId) -> Point2D {
        self.vertices[v.index()].position
    }
}

/// Capability shared by everything that is backed by a convex mesh polygon.
pub trait Polygonal {
    /// The face describing this object's polygon, if one is attached.
    fn poly(&self) -> Option<FaceId>;

    fn has_poly(&self) -> bool {
        self.poly().is_some()
    }

    fn poly_bounds(&self, mesh: &Mesh) -> Option<BoundingBox> {
        self.poly()
            .filter(|f| f.index() < mesh.face_count())
            .map(|f| mesh.face_bounds(f))
    }

    /// Average of the polygon's corners.
    fn poly_center(&self, mesh: &Mesh) -> Option<Point2D> {
        let face = self.poly().filter(|f| f.index() < mesh.face_count())?;
        let points = mesh.face_points(face);
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point2D::new(sx / n, sy / n))
    }

    fn poly_contains(&self, mesh: &Mesh, point: &Point2D, epsilon: f64) -> bool {
        self.poly()
            .filter(|f| f.index() < mesh.face_count())
            .map_or(false, |f| mesh.face_contains_point(f, point, epsilon))
    }
}

impl Polygonal for Face {
    fn poly(&self) -> Option<FaceId> {
        Some(self.id)
    }
}
