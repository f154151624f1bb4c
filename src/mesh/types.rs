//! Type definitions for the half-edge mesh data structure.

use crate::utils::{LineSide, Point2D};

/// Type-safe vertex identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Type-safe half-edge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HEdgeId(pub u32);

/// Type-safe face identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl HEdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Rotational direction around a face loop. Leaf faces are wound
/// clockwise, so `Clockwise` follows `next` and `Anticlockwise` follows `prev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDirection {
    Clockwise,
    Anticlockwise,
}

impl ClockDirection {
    pub fn reverse(self) -> Self {
        match self {
            ClockDirection::Clockwise => ClockDirection::Anticlockwise,
            ClockDirection::Anticlockwise => ClockDirection::Clockwise,
        }
    }
}

/// Reference to one side of a map line. `LineSide::Right` is the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSideRef {
    pub line: usize,
    pub side: LineSide,
}

impl LineSideRef {
    pub fn front(line: usize) -> Self {
        LineSideRef { line, side: LineSide::Right }
    }

    pub fn back(line: usize) -> Self {
        LineSideRef { line, side: LineSide::Left }
    }

    pub fn is_front(&self) -> bool {
        self.side == LineSide::Right
    }
}

/// A vertex in the half-edge mesh
#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Point2D,
    /// Outgoing half-edges ordered by angle, counter-clockwise from +X.
    /// Treated as a circular list; rebuilt by `Mesh::rebuild_vertex_owners`.
    pub owners: Vec<HEdgeId>,
}

/// A half-edge in the mesh
///
/// Every half-edge has exactly one twin running the opposite way. Half-edges
/// bordering a face form a closed loop through `next`/`prev`; face-less
/// half-edges (the outside of the map, or bare edges) have neither.
#[derive(Debug, Clone)]
pub struct HEdge {
    /// The vertex this half-edge originates from
    pub origin: VertexId,
    pub twin: HEdgeId,
    pub next: Option<HEdgeId>,
    pub prev: Option<HEdgeId>,
    pub face: Option<FaceId>,
    /// Map line side this half-edge was cut from; `None` for partition edges.
    pub line_side: Option<LineSideRef>,
}

/// A face (polygon) in the mesh
#[derive(Debug, Clone)]
pub struct Face {
    pub id: FaceId,
    /// One half-edge on the boundary of this face
    pub hedge: HEdgeId,
    /// Index of the BSP leaf this face is the polygon of.
    pub leaf: Option<usize>,
}

/// Errors that can occur during half-edge mesh operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Vertex {0:?} does not exist")]
    InvalidVertex(VertexId),
    #[error("Half-edge {0:?} does not exist")]
    InvalidHEdge(HEdgeId),
    #[error("Face {0:?} does not exist")]
    InvalidFace(FaceId),
    #[error("Face needs at least 3 distinct vertices, got {vertices}")]
    DegenerateFace { vertices: usize },
    #[error("Non-manifold edge {from:?} -> {to:?}: already bounds a face")]
    NonManifoldEdge { from: VertexId, to: VertexId },
    #[error("Half-edge {0:?} has an inconsistent twin")]
    TwinMismatch(HEdgeId),
    #[error("Half-edge {0:?} has inconsistent next/prev links")]
    BrokenLoop(HEdgeId),
    #[error("Face {0:?} boundary loop is not closed")]
    OpenFaceLoop(FaceId),
}

/// Polygon shape errors raised when a face is assigned to a BSP leaf.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Face {0:?} does not exist in this mesh")]
    UnknownFace(FaceId),
    #[error("Face {face:?} has {edges} edges; a polygon needs at least 3")]
    TooFewEdges { face: FaceId, edges: usize },
    #[error("Face {0:?} is not convex")]
    NotConvex(FaceId),
    #[error("Face {0:?} is self-intersecting")]
    SelfIntersecting(FaceId),
}
