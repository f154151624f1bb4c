//! Structural validation for `Mesh`.

use super::types::{FaceId, HEdgeId, MeshError};
use super::Mesh;

impl Mesh {
    /// Checks the structural invariants of the mesh.
    ///
    /// - every half-edge has exactly one twin, distinct from itself, whose twin is the half-edge
    /// - face loops are closed through `next`, with `prev` as its inverse
    /// - all members of a loop reference the same face
    /// - face-less half-edges carry no `next`/`prev`
    pub fn validate(&self) -> Result<(), MeshError> {
        let hedge_count = self.hedges.len();

        for (i, h) in self.hedges.iter().enumerate() {
            let id = HEdgeId(i as u32);
            self.check_vertex(h.origin)?;
            if h.twin.index() >= hedge_count || h.twin == id {
                return Err(MeshError::TwinMismatch(id));
            }
            let twin = &self.hedges[h.twin.index()];
            if twin.twin != id || twin.origin == h.origin {
                return Err(MeshError::TwinMismatch(id));
            }

            match (h.face, h.next, h.prev) {
                (None, None, None) => {}
                (Some(face), Some(next), Some(prev)) => {
                    if face.index() >= self.faces.len() {
                        return Err(MeshError::InvalidFace(face));
                    }
                    if next.index() >= hedge_count || prev.index() >= hedge_count {
                        return Err(MeshError::BrokenLoop(id));
                    }
                    let n = &self.hedges[next.index()];
                    if n.prev != Some(id) || n.face != Some(face) || n.origin != twin.origin {
                        return Err(MeshError::BrokenLoop(id));
                    }
                    if self.hedges[prev.index()].next != Some(id) {
                        return Err(MeshError::BrokenLoop(id));
                    }
                }
                _ => return Err(MeshError::BrokenLoop(id)),
            }
        }

        for (i, face) in self.faces.iter().enumerate() {
            let id = FaceId(i as u32);
            if face.id != id || face.hedge.index() >= hedge_count {
                return Err(MeshError::OpenFaceLoop(id));
            }
            let mut current = face.hedge;
            let mut steps = 0;
            loop {
                if self.hedges[current.index()].face != Some(id) {
                    return Err(MeshError::OpenFaceLoop(id));
                }
                steps += 1;
                match self.hedges[current.index()].next {
                    Some(next) if next == face.hedge => break,
                    Some(next) if steps < hedge_count => current = next,
                    _ => return Err(MeshError::OpenFaceLoop(id)),
                }
            }
            if steps < 3 {
                return Err(MeshError::DegenerateFace { vertices: steps });
            }
        }

        Ok(())
    }
}
