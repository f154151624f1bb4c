// src/bsp/mod.rs
pub mod bsp_blockmap;
pub mod bsp_hardener;
pub mod bsp_node;
pub mod bsp_partitioner;
pub mod bsp_procedural;
pub mod bsp_seg;
pub mod bsp_superblock;

pub use bsp_blockmap::VertexBlockmap;
pub use bsp_node::{BspTreeNode, LeafData};
pub use bsp_partitioner::{BspBuild, Partitioner};
pub use bsp_procedural::{GeneratorConfig, ProceduralGenerator};
pub use bsp_seg::LineSeg;
pub use bsp_superblock::SuperBlock;

use crate::mesh::{GeometryError, MeshError, VertexId};

/// Cell size of the vertex blockmap, in map units.
pub const BLOCK_SIZE: f64 = 128.0;

/// Where a segment lies relative to a partition line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegPosition {
    Right,
    Left,
    /// On the partition line; placed by its direction.
    Collinear,
    /// Crosses the partition line and must be cut.
    Split,
}

#[derive(Debug, thiserror::Error)]
pub enum BspError {
    #[error("No line segments to partition")]
    NoSegments,
    #[error("Line {line} references missing vertex {vertex:?}")]
    InvalidVertex { line: usize, vertex: VertexId },
    #[error("Line {line} references missing sector {sector}")]
    InvalidSector { line: usize, sector: usize },
    #[error("Partitioning produced no leafs")]
    NoLeafs,
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
