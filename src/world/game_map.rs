// src/world/game_map.rs

use std::collections::BTreeMap;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::bsp::{BspError, Partitioner};
use crate::config::BspConfig;
use crate::document::Document;
use crate::mesh::{Face, FaceId, HEdge, HEdgeId, Mesh, Polygonal, Vertex, VertexId};
use crate::utils::{LineSide, Point2D};

use super::bsp_leaf::BspLeaf;
use super::bsp_node::{BspChild, BspNode};
use super::circulator::SectorClusterCirculator;
use super::cluster::{self, ClusterError, ClusterRef, SectorCluster};
use super::line::Line;
use super::polyobj::{build_polyobj_mesh, polyobj_center};
use super::sector::Sector;
use super::MapError;

/// The hardened runtime map.
///
/// Nodes, leafs, half-edges and vertices live in flat arrays whose indices
/// stay valid for the lifetime of the map.
#[derive(Debug)]
pub struct GameMap {
    pub(crate) mesh: Mesh,
    pub(crate) nodes: Vec<BspNode>,
    pub(crate) leafs: Vec<BspLeaf>,
    pub(crate) root: BspChild,
    pub(crate) lines: Vec<Line>,
    pub(crate) sectors: Vec<Sector>,
    pub(crate) epsilon: f64,
}

impl GameMap {
    /// Builds the runtime map of the document's current level: partition,
    /// harden, attach polyobjects and derive sector clusters.
    pub fn from_document(doc: &Document, config: &BspConfig) -> Result<GameMap, MapError> {
        let mesh = Mesh::from_points(doc.vertices.read().iter().map(|v| v.position()));
        let sectors: Vec<Sector> = doc.sectors.read().iter().map(|s| Sector::from_map(s)).collect();

        let mut lines: Vec<Line> = {
            let linedefs = doc.linedefs.read();
            linedefs
                .iter()
                .map(|ld| {
                    let mut line = Line::new(
                        VertexId(ld.start as u32),
                        VertexId(ld.end as u32),
                        doc.get_sector_id(ld, LineSide::Right),
                        doc.get_sector_id(ld, LineSide::Left),
                    );
                    line.flags = ld.flags;
                    line
                })
                .collect()
        };

        for (p, poly_lines) in doc.polyobjs.read().iter().enumerate() {
            for &id in poly_lines.iter() {
                match lines.get_mut(id) {
                    Some(line) => line.polyobj = Some(p),
                    None => warn!("Polyobject {} references missing line {}", p, id),
                }
            }
        }

        GameMap::build(mesh, lines, sectors, config)
    }

    /// Builds a map from lines over `mesh`, whose vertices the lines index.
    pub fn build(mesh: Mesh, lines: Vec<Line>, sectors: Vec<Sector>, config: &BspConfig) -> Result<GameMap, MapError> {
        config.validate()?;
        for (i, line) in lines.iter().enumerate() {
            for sector in [line.front_sector, line.back_sector].into_iter().flatten() {
                if sector >= sectors.len() {
                    return Err(BspError::InvalidSector { line: i, sector }.into());
                }
            }
        }

        let build = Partitioner::new(config).build(mesh, &lines)?;
        let mut map = build.harden(lines, sectors)?;
        map.attach_polyobjs()?;
        let clusters = map.build_all_clusters()?;
        info!(
            "Map ready: {} sectors, {} clusters, {} leafs",
            map.sectors.len(),
            clusters,
            map.leafs.len()
        );
        Ok(map)
    }

    fn attach_polyobjs(&mut self) -> Result<(), MapError> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, line) in self.lines.iter().enumerate() {
            if let Some(p) = line.polyobj {
                groups.entry(p).or_default().push(i);
            }
        }
        for (p, line_ids) in groups {
            let mesh = build_polyobj_mesh(&self.mesh, &self.lines, &line_ids)?;
            let center = match polyobj_center(&mesh) {
                Some(center) => center,
                None => continue,
            };
            let leaf = self.bsp_leaf_at_point(&center).index;
            debug!("Polyobject {} ({} lines) attached to leaf #{}", p, line_ids.len(), leaf);
            self.leafs[leaf].add_extra_mesh(mesh);
        }
        Ok(())
    }

    // --- Accessors ---

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn bsp_nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    pub fn bsp_leafs(&self) -> &[BspLeaf] {
        &self.leafs
    }

    pub fn hedges(&self) -> &[HEdge] {
        self.mesh.hedges()
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.mesh.vertices()
    }

    pub fn faces(&self) -> &[Face] {
        self.mesh.faces()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn root(&self) -> BspChild {
        self.root
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leafs.len()
    }

    pub fn hedge_count(&self) -> usize {
        self.mesh.hedge_count()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    // --- Point location ---

    /// Leaf whose BSP cell contains `point`, found by walking the tree.
    pub fn bsp_leaf_at_point(&self, point: &Point2D) -> &BspLeaf {
        let mut child = self.root;
        loop {
            match child {
                BspChild::Leaf(i) => return &self.leafs[i],
                BspChild::Node(i) => {
                    let node = &self.nodes[i];
                    child = node.child(node.side_of(point));
                }
            }
        }
    }

    /// True when the leaf's polygon contains `point`, within the build epsilon.
    pub fn leaf_contains_point(&self, leaf: usize, point: &Point2D) -> bool {
        self.leafs
            .get(leaf)
            .map_or(false, |l| l.poly_contains(&self.mesh, point, self.epsilon))
    }

    // --- Clusters ---

    pub fn cluster(&self, cluster: ClusterRef) -> Option<&SectorCluster> {
        self.sectors.get(cluster.sector)?.clusters.get(cluster.index)
    }

    pub fn cluster_of_leaf(&self, leaf: usize) -> Option<ClusterRef> {
        self.leafs.get(leaf)?.cluster
    }

    /// Cluster of the leaf whose polygon `hedge` bounds.
    pub fn cluster_of_hedge(&self, hedge: HEdgeId) -> Option<ClusterRef> {
        let face = self.mesh.get_hedge(hedge)?.face?;
        let leaf = self.mesh.get_face(face)?.leaf?;
        self.cluster_of_leaf(leaf)
    }

    /// Circulator over the cluster boundary, starting at its boundary half-edge.
    /// Empty when the cluster is unknown.
    pub fn cluster_circulator(&self, cluster: ClusterRef) -> SectorClusterCirculator<'_> {
        match self.cluster(cluster).and_then(|c| c.boundary_hedge) {
            Some(hedge) => SectorClusterCirculator::new(self, hedge),
            None => SectorClusterCirculator::default(),
        }
    }

    /// Every half-edge of the cluster's leafs whose far side lies outside the cluster.
    pub fn cluster_boundary_hedges(&self, cluster: ClusterRef) -> Vec<HEdgeId> {
        let record = match self.cluster(cluster) {
            Some(record) => record,
            None => return Vec::new(),
        };
        record
            .leafs
            .iter()
            .filter_map(|&leaf| self.leafs[leaf].poly())
            .flat_map(|face| self.mesh.face_hedges(face))
            .filter(|&h| self.cluster_of_hedge(self.mesh.twin(h)) != Some(cluster))
            .collect()
    }

    pub fn cluster_has_sky_masked_plane(&self, cluster: ClusterRef) -> bool {
        self.sectors
            .get(cluster.sector)
            .map_or(false, |s| s.has_sky_masked_plane())
    }

    pub fn cluster_contains_point(&self, cluster: ClusterRef, point: &Point2D) -> bool {
        self.cluster(cluster).map_or(false, |c| {
            c.bounds.contains_point(point.x, point.y)
                && c.leafs.iter().any(|&leaf| self.leaf_contains_point(leaf, point))
        })
    }

    /// True when `point` is inside the cluster and `z` between its sector's planes.
    pub fn cluster_is_point_in_world_volume(&self, cluster: ClusterRef, point: &Point2D, z: f64) -> bool {
        self.cluster_contains_point(cluster, point)
            && self
                .sectors
                .get(cluster.sector)
                .map_or(false, |s| s.contains_height(z))
    }

    /// Partitions the sector's leafs into clusters, replacing any earlier
    /// result. Returns the number of clusters.
    pub fn build_clusters(&mut self, sector: usize) -> Result<usize, ClusterError> {
        if sector >= self.sectors.len() {
            return Err(ClusterError::UnknownSector(sector));
        }
        let clusters = cluster::build_sector_clusters(sector, &self.leafs, &self.mesh, &self.lines)?;

        for leaf in &mut self.leafs {
            if leaf.cluster.map_or(false, |c| c.sector == sector) {
                leaf.cluster = None;
            }
        }
        for (index, c) in clusters.iter().enumerate() {
            for &leaf in &c.leafs {
                self.leafs[leaf].cluster = Some(ClusterRef { sector, index });
            }
        }
        if clusters.len() > 1 {
            debug!("Sector {} splits into {} clusters", sector, clusters.len());
        }
        let count = clusters.len();
        self.sectors[sector].clusters = clusters;
        Ok(count)
    }

    pub fn build_all_clusters(&mut self) -> Result<usize, ClusterError> {
        let mut total = 0;
        for sector in 0..self.sectors.len() {
            total += self.build_clusters(sector)?;
        }
        Ok(total)
    }

    /// Same as `build_clusters`; call after editing lines that bound the sector.
    pub fn rebuild_clusters(&mut self, sector: usize) -> Result<usize, ClusterError> {
        self.build_clusters(sector)
    }

    /// Replaces a line's flags. Clusters are not updated until
    /// `rebuild_clusters` runs for the affected sectors.
    pub fn set_line_flags(&mut self, line: usize, flags: u16) -> Result<(), MapError> {
        let record = self.lines.get_mut(line).ok_or(MapError::UnknownLine(line))?;
        record.flags = flags;
        Ok(())
    }

    // --- Verification ---

    /// Re-checks the hardened map: mesh structure, leaf convexity, half-edge
    /// ownership and the cluster partition of every sector.
    pub fn verify(&self) -> Result<(), MapError> {
        self.mesh.validate()?;

        self.leafs
            .par_iter()
            .filter_map(|leaf| leaf.poly())
            .try_for_each(|face| self.mesh.face_winding_check(face))?;

        let mut owner: Vec<Option<usize>> = vec![None; self.mesh.hedge_count()];
        for leaf in &self.leafs {
            let face = match leaf.poly() {
                Some(face) => face,
                None => continue,
            };
            if self.mesh.face(face).leaf != Some(leaf.index) {
                return Err(MapError::FaceMismatch { leaf: leaf.index, face });
            }
            for h in self.mesh.face_hedges(face) {
                if owner[h.index()].replace(leaf.index).is_some() {
                    return Err(MapError::DuplicateHEdge(h));
                }
            }
        }

        for (index, sector) in self.sectors.iter().enumerate() {
            let members: Vec<usize> = self
                .leafs
                .iter()
                .filter(|l| l.sector == Some(index) && l.has_poly())
                .map(|l| l.index)
                .collect();
            cluster::check_partition(index, &members, &sector.clusters)?;
        }
        Ok(())
    }

    /// Face of a leaf, if it has one.
    pub fn leaf_face(&self, leaf: usize) -> Option<FaceId> {
        self.leafs.get(leaf)?.poly()
    }
}
