// src/world/mod.rs
//! Hardened runtime map: flat BSP arrays, sectors and their clusters.

pub mod bsp_leaf;
pub mod bsp_node;
pub mod circulator;
pub mod cluster;
pub mod game_map;
pub mod line;
pub mod polyobj;
pub mod sector;

pub use bsp_leaf::BspLeaf;
pub use bsp_node::{BspChild, BspNode};
pub use circulator::{CirculatorError, SectorClusterCirculator};
pub use cluster::{ClusterError, ClusterRef, SectorCluster};
pub use game_map::GameMap;
pub use line::Line;
pub use sector::{Plane, Sector};

use crate::bsp::BspError;
use crate::config::ConfigError;
use crate::mesh::{FaceId, GeometryError, HEdgeId, MeshError};

/// Errors raised while building or checking a `GameMap`.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Bsp(#[from] BspError),
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("Line {0} does not exist")]
    UnknownLine(usize),
    #[error("Half-edge {0:?} bounds more than one leaf")]
    DuplicateHEdge(HEdgeId),
    #[error("Leaf #{leaf} and face {face:?} disagree about each other")]
    FaceMismatch { leaf: usize, face: FaceId },
}
