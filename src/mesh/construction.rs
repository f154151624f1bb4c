//! Construction and mutation methods for `Mesh`.
//!
//! Every method here leaves the mesh valid: each half-edge keeps exactly one
//! twin and face loops stay closed.

use std::collections::HashSet;

use super::types::{Face, FaceId, HEdge, HEdgeId, LineSideRef, MeshError, Vertex, VertexId};
use super::Mesh;
use crate::utils::Point2D;

impl Mesh {
    /// Builds a mesh holding only vertices, one per point, in order.
    pub fn from_points<I: IntoIterator<Item = Point2D>>(points: I) -> Self {
        let mut mesh = Mesh::new();
        for p in points {
            mesh.add_vertex(p);
        }
        mesh
    }

    pub fn add_vertex(&mut self, position: Point2D) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            position,
            owners: Vec::new(),
        });
        id
    }

    /// Adds a bare edge: a twin pair of half-edges with no face.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<HEdgeId, MeshError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(MeshError::DegenerateFace { vertices: 1 });
        }
        Ok(self.edge_pair(from, to))
    }

    /// Adds a face bounded by `ring`, wound so the interior lies on the
    /// right of every edge.
    ///
    /// Half-edges already created as the face-less twin of a neighbouring
    /// face are claimed; otherwise a new twin pair is made.
    pub fn add_face(&mut self, ring: &[VertexId]) -> Result<FaceId, MeshError> {
        let n = ring.len();
        if n < 3 {
            return Err(MeshError::DegenerateFace { vertices: n });
        }
        let mut seen = HashSet::with_capacity(n);
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            self.check_vertex(a)?;
            if a == b {
                return Err(MeshError::DegenerateFace { vertices: n });
            }
            if !seen.insert((a, b)) {
                return Err(MeshError::NonManifoldEdge { from: a, to: b });
            }
            if let Some(&h) = self.edge_map.get(&(a, b)) {
                if self.hedges[h.index()].face.is_some() {
                    return Err(MeshError::NonManifoldEdge { from: a, to: b });
                }
            }
        }

        let face = FaceId(self.faces.len() as u32);
        let loop_hedges: Vec<HEdgeId> = (0..n)
            .map(|i| self.edge_pair(ring[i], ring[(i + 1) % n]))
            .collect();
        for i in 0..n {
            let h = loop_hedges[i];
            let record = &mut self.hedges[h.index()];
            record.face = Some(face);
            record.next = Some(loop_hedges[(i + 1) % n]);
            record.prev = Some(loop_hedges[(i + n - 1) % n]);
        }
        self.faces.push(Face {
            id: face,
            hedge: loop_hedges[0],
            leaf: None,
        });
        Ok(face)
    }

    /// Inserts a new vertex at `position` in the middle of `hedge`.
    ///
    /// Both `hedge` and its twin are split; the new halves join the same
    /// face loops (if any) and inherit the line side. Returns the new vertex.
    pub fn split_hedge(&mut self, hedge: HEdgeId, position: Point2D) -> Result<VertexId, MeshError> {
        self.check_hedge(hedge)?;
        let twin = self.hedges[hedge.index()].twin;
        let a = self.hedges[hedge.index()].origin;
        let b = self.hedges[twin.index()].origin;
        let mid = self.add_vertex(position);

        // hedge: a->mid, h2: mid->b, twin: b->mid, t2: mid->a
        let h2 = HEdgeId(self.hedges.len() as u32);
        let t2 = HEdgeId(h2.0 + 1);
        let (h_face, h_next, h_side) = {
            let h = &self.hedges[hedge.index()];
            (h.face, h.next, h.line_side)
        };
        let (t_face, t_next, t_side) = {
            let t = &self.hedges[twin.index()];
            (t.face, t.next, t.line_side)
        };
        self.hedges.push(HEdge {
            origin: mid,
            twin,
            next: h_next,
            prev: h_face.map(|_| hedge),
            face: h_face,
            line_side: h_side,
        });
        self.hedges.push(HEdge {
            origin: mid,
            twin: hedge,
            next: t_next,
            prev: t_face.map(|_| twin),
            face: t_face,
            line_side: t_side,
        });

        if h_face.is_some() {
            self.hedges[hedge.index()].next = Some(h2);
            if let Some(n) = h_next {
                self.hedges[n.index()].prev = Some(h2);
            }
        }
        if t_face.is_some() {
            self.hedges[twin.index()].next = Some(t2);
            if let Some(n) = t_next {
                self.hedges[n.index()].prev = Some(t2);
            }
        }
        self.hedges[hedge.index()].twin = t2;
        self.hedges[twin.index()].twin = h2;

        self.edge_map.remove(&(a, b));
        self.edge_map.remove(&(b, a));
        self.edge_map.insert((a, mid), hedge);
        self.edge_map.insert((mid, b), h2);
        self.edge_map.insert((b, mid), twin);
        self.edge_map.insert((mid, a), t2);
        Ok(mid)
    }

    pub fn set_line_side(&mut self, hedge: HEdgeId, side: Option<LineSideRef>) -> Result<(), MeshError> {
        self.check_hedge(hedge)?;
        self.hedges[hedge.index()].line_side = side;
        Ok(())
    }

    pub fn set_face_leaf(&mut self, face: FaceId, leaf: Option<usize>) -> Result<(), MeshError> {
        let record = self
            .faces
            .get_mut(face.index())
            .ok_or(MeshError::InvalidFace(face))?;
        record.leaf = leaf;
        Ok(())
    }

    /// Renumbers half-edges and faces. `hedge_order[i]` is the old id of the
    /// half-edge that becomes `HEdgeId(i)`; likewise for `face_order`. Both
    /// must be permutations of the current ids.
    pub(crate) fn remap(&mut self, hedge_order: &[HEdgeId], face_order: &[FaceId]) -> Result<(), MeshError> {
        let hedge_map = permutation(hedge_order, self.hedges.len(), |h| h.index())
            .ok_or(MeshError::InvalidHEdge(HEdgeId(self.hedges.len() as u32)))?;
        let face_map = permutation(face_order, self.faces.len(), |f| f.index())
            .ok_or(MeshError::InvalidFace(FaceId(self.faces.len() as u32)))?;
        let new_hedge = |h: HEdgeId| HEdgeId(hedge_map[h.index()] as u32);
        let new_face = |f: FaceId| FaceId(face_map[f.index()] as u32);

        let mut hedges: Vec<HEdge> = hedge_order
            .iter()
            .map(|&old| std::mem::replace(&mut self.hedges[old.index()], placeholder_hedge()))
            .collect();
        for h in &mut hedges {
            h.twin = new_hedge(h.twin);
            h.next = h.next.map(new_hedge);
            h.prev = h.prev.map(new_hedge);
            h.face = h.face.map(new_face);
        }

        let mut faces: Vec<Face> = face_order
            .iter()
            .map(|&old| self.faces[old.index()].clone())
            .collect();
        for f in &mut faces {
            f.id = new_face(f.id);
            f.hedge = new_hedge(f.hedge);
        }

        for h in self.edge_map.values_mut() {
            *h = new_hedge(*h);
        }
        for v in &mut self.vertices {
            for h in &mut v.owners {
                *h = new_hedge(*h);
            }
        }
        self.hedges = hedges;
        self.faces = faces;
        Ok(())
    }

    /// Returns the half-edge `from -> to`, creating it and its twin if needed.
    fn edge_pair(&mut self, from: VertexId, to: VertexId) -> HEdgeId {
        if let Some(&h) = self.edge_map.get(&(from, to)) {
            return h;
        }
        let h = HEdgeId(self.hedges.len() as u32);
        let t = HEdgeId(h.0 + 1);
        self.hedges.push(HEdge {
            origin: from,
            twin: t,
            next: None,
            prev: None,
            face: None,
            line_side: None,
        });
        self.hedges.push(HEdge {
            origin: to,
            twin: h,
            next: None,
            prev: None,
            face: None,
            line_side: None,
        });
        self.edge_map.insert((from, to), h);
        self.edge_map.insert((to, from), t);
        h
    }

    pub(crate) fn check_vertex(&self, v: VertexId) -> Result<(), MeshError> {
        if v.index() < self.vertices.len() {
            Ok(())
        } else {
            Err(MeshError::InvalidVertex(v))
        }
    }

    pub(crate) fn check_hedge(&self, h: HEdgeId) -> Result<(), MeshError> {
        if h.index() < self.hedges.len() {
            Ok(())
        } else {
            Err(MeshError::InvalidHEdge(h))
        }
    }
}

fn placeholder_hedge() -> HEdge {
    HEdge {
        origin: VertexId(0),
        twin: HEdgeId(0),
        next: None,
        prev: None,
        face: None,
        line_side: None,
    }
}

/// Inverse of `order` (old index -> new index), if it is a permutation of `0..len`.
fn permutation<T: Copy>(order: &[T], len: usize, index: impl Fn(T) -> usize) -> Option<Vec<usize>> {
    if order.len() != len {
        return None;
    }
    let mut inverse = vec![usize::MAX; len];
    for (new, &old) in order.iter().enumerate() {
        let slot = inverse.get_mut(index(old))?;
        if *slot != usize::MAX {
            return None;
        }
        *slot = new;
    }
    Some(inverse)
}
