// src/world/line.rs

use crate::map::linedef::ML_TWOSIDED;
use crate::mesh::VertexId;
use crate::utils::LineSide;

/// A map line in the runtime map. Endpoints index the map mesh; the front
/// side is on the right of `from -> to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: VertexId,
    pub to: VertexId,
    pub front_sector: Option<usize>,
    pub back_sector: Option<usize>,
    pub flags: u16,
    /// Polyobject this line belongs to. Polyobject lines are never partitioned.
    pub polyobj: Option<usize>,
}

impl Line {
    pub fn new(from: VertexId, to: VertexId, front_sector: Option<usize>, back_sector: Option<usize>) -> Self {
        let flags = if front_sector.is_some() && back_sector.is_some() {
            ML_TWOSIDED
        } else {
            0
        };
        Line {
            from,
            to,
            front_sector,
            back_sector,
            flags,
            polyobj: None,
        }
    }

    pub fn sector(&self, side: LineSide) -> Option<usize> {
        match side {
            LineSide::Right => self.front_sector,
            LineSide::Left => self.back_sector,
        }
    }

    pub fn is_two_sided(&self) -> bool {
        self.flags & ML_TWOSIDED != 0 && self.front_sector.is_some() && self.back_sector.is_some()
    }

    /// Both sides face the same sector.
    pub fn is_self_referencing(&self) -> bool {
        self.front_sector.is_some() && self.front_sector == self.back_sector
    }

    /// Whether this line separates sector clusters. Only two-sided lines let
    /// a cluster continue across them.
    pub fn blocks_clusters(&self) -> bool {
        !self.is_two_sided()
    }
}
