// src/world/circulator.rs

use crate::mesh::{ClockDirection, HEdgeId};

use super::cluster::ClusterRef;
use super::game_map::GameMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CirculatorError {
    #[error("circulator references an empty sequence")]
    EmptySequence,
    #[error("Broken topology at half-edge {0:?}")]
    BrokenTopology(HEdgeId),
}

/// Walks the boundary of a sector cluster one half-edge at a time.
///
/// Edges between two leafs of the same cluster are skipped by rotating
/// around their shared vertex, so the cluster reads as one polygon even when
/// it is made of many leafs. A default circulator is empty and every access
/// fails with `CirculatorError::EmptySequence`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectorClusterCirculator<'a> {
    map: Option<&'a GameMap>,
    current: Option<HEdgeId>,
    cluster: Option<ClusterRef>,
}

impl<'a> SectorClusterCirculator<'a> {
    pub fn new(map: &'a GameMap, hedge: HEdgeId) -> Self {
        SectorClusterCirculator {
            map: Some(map),
            current: Some(hedge),
            cluster: map.cluster_of_hedge(hedge),
        }
    }

    pub fn cluster(&self) -> Option<ClusterRef> {
        self.cluster
    }

    pub fn current(&self) -> Result<HEdgeId, CirculatorError> {
        self.current.ok_or(CirculatorError::EmptySequence)
    }

    /// Advances clockwise and returns the new current half-edge.
    pub fn next(&mut self) -> Result<HEdgeId, CirculatorError> {
        self.advance(ClockDirection::Clockwise)
    }

    /// Steps back anticlockwise; the inverse of `next`.
    pub fn previous(&mut self) -> Result<HEdgeId, CirculatorError> {
        self.advance(ClockDirection::Anticlockwise)
    }

    /// The boundary half-edge after the current one in `direction`, without moving.
    pub fn neighbor(&self, direction: ClockDirection) -> Result<HEdgeId, CirculatorError> {
        let map = self.map.ok_or(CirculatorError::EmptySequence)?;
        let hedge = self.current()?;
        let mesh = map.mesh();

        let mut candidate = mesh
            .neighbor(hedge, direction)
            .ok_or(CirculatorError::BrokenTopology(hedge))?;
        let mut guard = mesh.hedge_count();
        while self.is_internal(map, candidate) {
            if guard == 0 {
                return Err(CirculatorError::BrokenTopology(hedge));
            }
            guard -= 1;
            let twin = mesh.twin(candidate);
            candidate = mesh
                .neighbor(twin, direction)
                .ok_or(CirculatorError::BrokenTopology(twin))?;
        }
        Ok(candidate)
    }

    /// Twin of the face neighbour of `hedge` in `direction`: the half-edge
    /// that leaves the shared vertex on the far side of the neighbouring edge.
    pub fn find_back_neighbor(
        map: &GameMap,
        hedge: HEdgeId,
        direction: ClockDirection,
    ) -> Result<HEdgeId, CirculatorError> {
        let mesh = map.mesh();
        if mesh.get_hedge(hedge).is_none() {
            return Err(CirculatorError::BrokenTopology(hedge));
        }
        let neighbor = mesh
            .neighbor(hedge, direction)
            .ok_or(CirculatorError::BrokenTopology(hedge))?;
        Ok(mesh.twin(neighbor))
    }

    fn advance(&mut self, direction: ClockDirection) -> Result<HEdgeId, CirculatorError> {
        let next = self.neighbor(direction)?;
        self.current = Some(next);
        Ok(next)
    }

    /// Internal edges have this cluster on both sides.
    fn is_internal(&self, map: &GameMap, hedge: HEdgeId) -> bool {
        match self.cluster {
            Some(cluster) => map.cluster_of_hedge(map.mesh().twin(hedge)) == Some(cluster),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_circulator() {
        let mut empty = SectorClusterCirculator::default();
        assert_eq!(empty.current(), Err(CirculatorError::EmptySequence));
        assert_eq!(empty.next(), Err(CirculatorError::EmptySequence));
        assert_eq!(
            empty.neighbor(ClockDirection::Anticlockwise),
            Err(CirculatorError::EmptySequence)
        );
        assert_eq!(
            CirculatorError::EmptySequence.to_string(),
            "circulator references an empty sequence"
        );
    }
}
