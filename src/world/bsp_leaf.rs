// src/world/bsp_leaf.rs

use crate::mesh::{FaceId, GeometryError, Mesh, Polygonal};

use super::cluster::ClusterRef;

/// Hardened BSP leaf: a convex polygon of the map mesh attributed to a sector.
#[derive(Debug, Clone)]
pub struct BspLeaf {
    pub index: usize,
    pub sector: Option<usize>,
    poly: Option<FaceId>,
    /// Geometry that cannot join the map mesh without making it non-manifold,
    /// such as polyobjects.
    pub extra_meshes: Vec<Mesh>,
    pub(crate) cluster: Option<ClusterRef>,
}

impl BspLeaf {
    pub fn new(index: usize, sector: Option<usize>) -> Self {
        BspLeaf {
            index,
            sector,
            poly: None,
            extra_meshes: Vec::new(),
            cluster: None,
        }
    }

    /// Attaches `face` as this leaf's polygon. The face must be simple and
    /// convex; on error the leaf keeps its previous polygon.
    pub fn set_poly(&mut self, face: FaceId, mesh: &Mesh) -> Result<(), GeometryError> {
        mesh.face_winding_check(face)?;
        self.poly = Some(face);
        Ok(())
    }

    pub fn clear_poly(&mut self) {
        self.poly = None;
    }

    /// Orphans have no sector or no polygon; they are never drawn or clustered.
    pub fn is_orphan(&self) -> bool {
        self.sector.is_none() || self.poly.is_none()
    }

    pub fn cluster(&self) -> Option<ClusterRef> {
        self.cluster
    }

    pub fn add_extra_mesh(&mut self, mesh: Mesh) {
        self.extra_meshes.push(mesh);
    }
}

impl Polygonal for BspLeaf {
    fn poly(&self) -> Option<FaceId> {
        self.poly
    }
}
