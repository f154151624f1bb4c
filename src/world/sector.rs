// src/world/sector.rs

use crate::map::sector::SKY_FLAT;
use crate::map::Sector as MapSector;

use super::cluster::SectorCluster;

/// Floor or ceiling surface of a sector.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub height: f64,
    pub material: String,
}

impl Plane {
    pub fn new(height: f64, material: &str) -> Self {
        Plane {
            height,
            material: material.to_string(),
        }
    }

    /// Sky planes are drawn as the sky and mask the geometry behind them.
    pub fn is_sky_masked(&self) -> bool {
        self.material.eq_ignore_ascii_case(SKY_FLAT)
    }
}

/// Runtime sector: two planes, light, and the clusters its leafs form.
#[derive(Debug, Clone)]
pub struct Sector {
    pub floor: Plane,
    pub ceiling: Plane,
    /// Light level, normalised to `[0, 1]`.
    pub light_level: f32,
    pub special: i32,
    pub tag: i32,
    pub(crate) clusters: Vec<SectorCluster>,
}

impl Sector {
    pub fn new(floor: Plane, ceiling: Plane, light_level: f32) -> Self {
        Sector {
            floor,
            ceiling,
            light_level,
            special: 0,
            tag: 0,
            clusters: Vec::new(),
        }
    }

    pub fn from_map(sector: &MapSector) -> Self {
        Sector {
            floor: Plane::new(sector.floor_height as f64, &sector.floor_tex),
            ceiling: Plane::new(sector.ceiling_height as f64, &sector.ceiling_tex),
            light_level: (sector.light.clamp(0, 255) as f32) / 255.0,
            special: sector.special,
            tag: sector.tag,
            clusters: Vec::new(),
        }
    }

    pub fn planes(&self) -> [&Plane; 2] {
        [&self.floor, &self.ceiling]
    }

    pub fn clusters(&self) -> &[SectorCluster] {
        &self.clusters
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn has_sky_masked_plane(&self) -> bool {
        self.planes().iter().any(|p| p.is_sky_masked())
    }

    /// True when `z` lies between floor and ceiling, inclusive.
    pub fn contains_height(&self, z: f64) -> bool {
        z >= self.floor.height && z <= self.ceiling.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_sector() {
        let map_sector = MapSector::new(0, 128, "FLOOR4_8", "F_SKY1", 255);
        let sector = Sector::from_map(&map_sector);
        assert_eq!(sector.ceiling.height, 128.0);
        assert_eq!(sector.light_level, 1.0);
        assert!(sector.has_sky_masked_plane());
        assert!(sector.contains_height(64.0));
        assert!(!sector.contains_height(129.0));
    }
}
