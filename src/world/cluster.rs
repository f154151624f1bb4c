// src/world/cluster.rs

use std::collections::{HashMap, HashSet};

use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::mesh::{HEdgeId, Mesh, Polygonal};
use crate::utils::BoundingBox;

use super::bsp_leaf::BspLeaf;
use super::line::Line;

/// Address of a cluster: its sector and its position in the sector's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterRef {
    pub sector: usize,
    pub index: usize,
}

/// A maximal set of connected leafs of one sector.
#[derive(Debug, Clone)]
pub struct SectorCluster {
    pub sector: usize,
    /// Leaf indices, ascending.
    pub leafs: Vec<usize>,
    pub bounds: BoundingBox,
    /// A half-edge on the cluster's outer boundary, the usual circulator start.
    pub boundary_hedge: Option<HEdgeId>,
}

impl SectorCluster {
    /// Area of the bounding box; cheap and only roughly proportional to the real area.
    pub fn rough_area(&self) -> f64 {
        self.bounds.area()
    }

    pub fn leaf_count(&self) -> usize {
        self.leafs.len()
    }

    pub fn contains_leaf(&self, leaf: usize) -> bool {
        self.leafs.binary_search(&leaf).is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClusterError {
    #[error("Sector {0} does not exist")]
    UnknownSector(usize),
    #[error("Clusters of sector {sector} cover {found} leaf slots, expected {expected} distinct leafs")]
    InvariantViolation {
        sector: usize,
        expected: usize,
        found: usize,
    },
}

/// Whether the edge under `hedge` stops a cluster from growing across it.
/// Partition edges never block; map lines block unless two-sided.
pub(crate) fn edge_blocks(mesh: &Mesh, lines: &[Line], hedge: HEdgeId) -> bool {
    let twin = mesh.twin(hedge);
    let side = mesh.hedge(hedge).line_side.or(mesh.hedge(twin).line_side);
    match side {
        Some(side) => lines.get(side.line).map_or(true, |line| line.blocks_clusters()),
        None => false,
    }
}

/// Leaf owning the face on the other side of `hedge`, if any.
pub(crate) fn leaf_across(mesh: &Mesh, hedge: HEdgeId) -> Option<usize> {
    let twin = mesh.twin(hedge);
    mesh.hedge(twin).face.and_then(|f| mesh.face(f).leaf)
}

/// Groups the leafs of `sector` into clusters.
///
/// Two leafs join when they share a half-edge pair that does not block.
/// Clusters come out ordered by their lowest leaf index.
pub(crate) fn build_sector_clusters(
    sector: usize,
    leafs: &[BspLeaf],
    mesh: &Mesh,
    lines: &[Line],
) -> Result<Vec<SectorCluster>, ClusterError> {
    let members: Vec<usize> = leafs
        .iter()
        .filter(|leaf| leaf.sector == Some(sector) && leaf.has_poly())
        .map(|leaf| leaf.index)
        .collect();
    let local: HashMap<usize, usize> = members.iter().enumerate().map(|(i, &leaf)| (leaf, i)).collect();

    let mut sets: QuickUnionUf<UnionBySize> = QuickUnionUf::new(members.len());
    for (i, &leaf) in members.iter().enumerate() {
        let face = match leafs[leaf].poly() {
            Some(face) => face,
            None => continue,
        };
        for h in mesh.face_hedges(face) {
            let other = match leaf_across(mesh, h).and_then(|l| local.get(&l)) {
                Some(&other) => other,
                None => continue,
            };
            if other != i && !edge_blocks(mesh, lines, h) {
                sets.union(i, other);
            }
        }
    }

    let mut order: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, &leaf) in members.iter().enumerate() {
        let root = sets.find(i);
        let slot = *order.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(leaf);
    }

    let clusters: Vec<SectorCluster> = groups
        .into_iter()
        .map(|group| make_cluster(sector, group, leafs, mesh))
        .collect();
    check_partition(sector, &members, &clusters)?;
    Ok(clusters)
}

fn make_cluster(sector: usize, leafs_in: Vec<usize>, leafs: &[BspLeaf], mesh: &Mesh) -> SectorCluster {
    let mut bounds = BoundingBox::new_empty();
    let mut boundary_hedge = None;
    for &leaf in &leafs_in {
        if let Some(b) = leafs[leaf].poly_bounds(mesh) {
            bounds.combine(&b);
        }
        if boundary_hedge.is_some() {
            continue;
        }
        if let Some(face) = leafs[leaf].poly() {
            boundary_hedge = mesh.face_hedges(face).find(|&h| {
                leaf_across(mesh, h).map_or(true, |other| leafs_in.binary_search(&other).is_err())
            });
        }
    }
    SectorCluster {
        sector,
        leafs: leafs_in,
        bounds,
        boundary_hedge,
    }
}

/// Every member leaf must appear in exactly one cluster.
pub(crate) fn check_partition(
    sector: usize,
    members: &[usize],
    clusters: &[SectorCluster],
) -> Result<(), ClusterError> {
    let found: usize = clusters.iter().map(|c| c.leafs.len()).sum();
    let distinct: HashSet<usize> = clusters.iter().flat_map(|c| c.leafs.iter().copied()).collect();
    let expected: HashSet<usize> = members.iter().copied().collect();
    if found != members.len() || distinct != expected {
        return Err(ClusterError::InvariantViolation {
            sector,
            expected: members.len(),
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(leafs: Vec<usize>) -> SectorCluster {
        SectorCluster {
            sector: 0,
            leafs,
            bounds: BoundingBox::new(0.0, 0.0, 64.0, 32.0),
            boundary_hedge: None,
        }
    }

    #[test]
    fn test_partition_law() {
        let clusters = vec![cluster(vec![0, 2]), cluster(vec![5])];
        assert!(check_partition(0, &[0, 2, 5], &clusters).is_ok());

        let overlapping = vec![cluster(vec![0, 2]), cluster(vec![2, 5])];
        assert_eq!(
            check_partition(0, &[0, 2, 5], &overlapping),
            Err(ClusterError::InvariantViolation {
                sector: 0,
                expected: 3,
                found: 4
            })
        );
        assert!(check_partition(0, &[0, 2, 5, 7], &clusters).is_err());
    }

    #[test]
    fn test_cluster_queries() {
        let c = cluster(vec![1, 4, 9]);
        assert_eq!(c.rough_area(), 2048.0);
        assert!(c.contains_leaf(4));
        assert!(!c.contains_leaf(5));
        assert_eq!(c.leaf_count(), 3);
    }
}
