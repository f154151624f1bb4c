// src/bsp/bsp_procedural.rs

use std::collections::HashMap;
use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::document::Document;
use crate::map::sector::SKY_FLAT;
use crate::map::Sector;
use crate::utils::BoundingBox;

/// Generates reproducible test levels: rooms laid out on a grid of cells,
/// never touching, some split by a two-sided divider, some L-shaped.
pub struct ProceduralGenerator {
    config: GeneratorConfig,
    rooms: Vec<BoundingBox>,
    stats: Option<GenerationStats>,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub cols: usize,
    pub rows: usize,
    /// Edge length of one grid cell, in map units.
    pub cell_size: i32,
    /// Chance that a cell holds a room.
    pub room_density: f64,
    /// Chance that a room joins the sector shared by all such rooms.
    pub shared_sector_chance: f64,
    pub divider_chance: f64,
    pub l_shape_chance: f64,
    /// Chance of a room split by a sloped two-sided line.
    pub slanted_divider_chance: f64,
    /// Chance of a V-shaped notch cut into the top wall.
    pub notch_chance: f64,
    pub sky_chance: f64,
    pub polyobj_chance: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            cols: 4,
            rows: 3,
            cell_size: 256,
            room_density: 0.8,
            shared_sector_chance: 0.3,
            divider_chance: 0.2,
            l_shape_chance: 0.2,
            slanted_divider_chance: 0.2,
            notch_chance: 0.2,
            sky_chance: 0.2,
            polyobj_chance: 0.2,
            seed: 0,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct GenerationStats {
    pub generation_time: f64,
    pub room_count: usize,
    pub divider_count: usize,
    pub sector_count: usize,
    pub vertex_count: usize,
    pub linedef_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RoomShape {
    Rect,
    /// Split at this x by a two-sided line; the east half gets its own sector.
    Divided(i32),
    /// Top-right corner cut away from this corner point.
    LShape(i32, i32),
    /// Split by a line from the top-right corner down to this height on the west wall.
    SlantedDivider(i32),
    /// Top wall replaced by two sloped walls meeting at this point.
    Notched(i32, i32),
}

#[derive(Debug, Clone)]
struct RoomPlan {
    bounds: (i32, i32, i32, i32),
    shape: RoomShape,
    shared_sector: bool,
    sky: bool,
    polyobj: bool,
}

/// Rounds down to the 8-unit grid.
fn snap(v: i32) -> i32 {
    v.div_euclid(8) * 8
}

impl ProceduralGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        ProceduralGenerator {
            config,
            rooms: Vec::new(),
            stats: None,
        }
    }

    /// Bounds of every room placed by the last `generate` call.
    pub fn rooms(&self) -> &[BoundingBox] {
        &self.rooms
    }

    pub fn stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    pub fn generate(&mut self) -> Document {
        let started = Instant::now();
        let plans = self.plan_rooms();

        let mut doc = Document::new();
        let mut builder = DocBuilder::default();
        let mut stats = GenerationStats::default();
        let mut shared: Option<usize> = None;
        self.rooms.clear();

        for plan in &plans {
            let (x0, y0, x1, y1) = plan.bounds;
            let sector = if plan.shared_sector {
                *shared.get_or_insert_with(|| builder.sector(&mut doc, false))
            } else {
                builder.sector(&mut doc, plan.sky)
            };

            match plan.shape {
                RoomShape::Rect => {
                    builder.outline(&mut doc, &[(x0, y0), (x0, y1), (x1, y1), (x1, y0)], |_| sector);
                }
                RoomShape::LShape(xm, ym) => {
                    let outline = [(x0, y0), (x0, y1), (xm, y1), (xm, ym), (x1, ym), (x1, y0)];
                    builder.outline(&mut doc, &outline, |_| sector);
                }
                RoomShape::Divided(xm) => {
                    let east = builder.sector(&mut doc, plan.sky);
                    let outline = [(x0, y0), (x0, y1), (xm, y1), (x1, y1), (x1, y0), (xm, y0)];
                    builder.outline(&mut doc, &outline, |k| if (2..5).contains(&k) { east } else { sector });
                    let top = builder.vertex(&mut doc, xm, y1);
                    let bottom = builder.vertex(&mut doc, xm, y0);
                    doc.add_linedef(top, bottom, Some(sector), Some(east));
                    stats.divider_count += 1;
                }
                RoomShape::SlantedDivider(ya) => {
                    // Walls 1 and 2 lie above the divider, the rest below it.
                    let lower = builder.sector(&mut doc, plan.sky);
                    let outline = [(x0, y0), (x0, ya), (x0, y1), (x1, y1), (x1, y0)];
                    builder.outline(&mut doc, &outline, |k| if k == 1 || k == 2 { sector } else { lower });
                    let top = builder.vertex(&mut doc, x1, y1);
                    let west = builder.vertex(&mut doc, x0, ya);
                    doc.add_linedef(top, west, Some(sector), Some(lower));
                    stats.divider_count += 1;
                }
                RoomShape::Notched(xm, ym) => {
                    let outline = [(x0, y0), (x0, y1), (xm, ym), (x1, y1), (x1, y0)];
                    builder.outline(&mut doc, &outline, |_| sector);
                }
            }

            if plan.polyobj {
                let (px, py) = (x0 + (x1 - x0) / 4, y0 + (y1 - y0) / 4);
                let corners = [(px - 4, py - 4), (px - 4, py + 4), (px + 4, py + 4), (px + 4, py - 4)];
                let lines = builder.outline(&mut doc, &corners, |_| sector);
                doc.add_polyobj(lines);
            }

            self.rooms
                .push(BoundingBox::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64));
        }

        stats.room_count = plans.len();
        stats.sector_count = doc.sectors.read().len();
        stats.vertex_count = doc.vertices.read().len();
        stats.linedef_count = doc.linedefs.read().len();
        stats.generation_time = started.elapsed().as_secs_f64();
        debug!(
            "Generated {} rooms ({} divided) in {} sectors from seed {}",
            stats.room_count, stats.divider_count, stats.sector_count, self.config.seed
        );
        self.stats = Some(stats);
        doc
    }

    /// Decides every cell independently, each from its own seeded RNG.
    fn plan_rooms(&self) -> Vec<RoomPlan> {
        let config = &self.config;
        (0..config.cols * config.rows)
            .into_par_iter()
            .filter_map(|cell| {
                let seed = config.seed ^ (cell as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                let mut rng = StdRng::seed_from_u64(seed);
                plan_cell(config, cell, &mut rng)
            })
            .collect()
    }
}

fn plan_cell(config: &GeneratorConfig, cell: usize, rng: &mut StdRng) -> Option<RoomPlan> {
    if !rng.random_bool(config.room_density.clamp(0.0, 1.0)) {
        return None;
    }
    let size = config.cell_size.max(128);
    let margin = 16;
    let cx = (cell % config.cols) as i32 * size;
    let cy = (cell / config.cols) as i32 * size;

    let max = size - 2 * margin;
    let w = snap(rng.random_range(max / 2..=max));
    let h = snap(rng.random_range(max / 2..=max));
    let x0 = cx + margin + snap(rng.random_range(0..=max - w));
    let y0 = cy + margin + snap(rng.random_range(0..=max - h));
    let (x1, y1) = (x0 + w, y0 + h);

    // Shape chances stack; whatever is left over is a plain rectangle.
    let roll: f64 = rng.random();
    let divided = config.divider_chance;
    let l_shape = divided + config.l_shape_chance;
    let slanted = l_shape + config.slanted_divider_chance;
    let notched = slanted + config.notch_chance;
    let shape = if roll < divided {
        RoomShape::Divided(x0 + snap(w / 2))
    } else if roll < l_shape {
        RoomShape::LShape(x0 + snap(w * 3 / 4), y0 + snap(h * 3 / 4))
    } else if roll < slanted {
        RoomShape::SlantedDivider(y0 + snap(h / 4))
    } else if roll < notched {
        // Off-centre so the sloped walls cut the side walls at odd heights.
        RoomShape::Notched(x0 + snap(w * 2 / 5), y1 - snap(h / 4))
    } else {
        RoomShape::Rect
    };
    Some(RoomPlan {
        bounds: (x0, y0, x1, y1),
        shape,
        shared_sector: rng.random_bool(config.shared_sector_chance.clamp(0.0, 1.0)),
        sky: rng.random_bool(config.sky_chance.clamp(0.0, 1.0)),
        polyobj: rng.random_bool(config.polyobj_chance.clamp(0.0, 1.0)),
    })
}

/// Adds vertices through a coordinate map so rooms never duplicate a vertex.
#[derive(Default)]
struct DocBuilder {
    vertex_map: HashMap<(i32, i32), usize>,
}

impl DocBuilder {
    fn vertex(&mut self, doc: &mut Document, x: i32, y: i32) -> usize {
        *self
            .vertex_map
            .entry((x, y))
            .or_insert_with(|| doc.add_vertex(x, y))
    }

    fn sector(&mut self, doc: &mut Document, sky: bool) -> usize {
        let ceiling = if sky { SKY_FLAT } else { "CEIL3_5" };
        doc.add_sector(Sector::new(0, 128, "FLOOR4_8", ceiling, 160))
    }

    /// One-sided walls around a clockwise outline; `sector_of(k)` gives the
    /// sector of wall `k`. Returns the new linedef ids.
    fn outline(
        &mut self,
        doc: &mut Document,
        corners: &[(i32, i32)],
        sector_of: impl Fn(usize) -> usize,
    ) -> Vec<usize> {
        let ids: Vec<usize> = corners.iter().map(|&(x, y)| self.vertex(doc, x, y)).collect();
        (0..ids.len())
            .map(|k| doc.add_linedef(ids[k], ids[(k + 1) % ids.len()], Some(sector_of(k)), None))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedural_generation() {
        let mut generator = ProceduralGenerator::new(GeneratorConfig {
            seed: 5,
            ..GeneratorConfig::default()
        });
        let doc = generator.generate();

        assert!(doc.vertices().read().len() > 0);
        assert!(doc.linedefs().read().len() > 0);
        assert!(doc.sectors().read().len() > 0);
        let stats = generator.stats().unwrap();
        assert_eq!(stats.room_count, generator.rooms().len());
        assert_eq!(stats.linedef_count, doc.linedefs().read().len());
    }

    #[test]
    fn test_same_seed_same_level() {
        let config = GeneratorConfig {
            seed: 99,
            ..GeneratorConfig::default()
        };
        let a = ProceduralGenerator::new(config.clone()).generate();
        let b = ProceduralGenerator::new(config).generate();
        assert_eq!(a.get_level_checksum(), b.get_level_checksum());
    }

    #[test]
    fn test_rooms_stay_apart() {
        let mut generator = ProceduralGenerator::new(GeneratorConfig {
            room_density: 1.0,
            seed: 3,
            ..GeneratorConfig::default()
        });
        generator.generate();
        let rooms = generator.rooms();
        assert_eq!(rooms.len(), 12);
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                let apart = a.max_x < b.min_x || b.max_x < a.min_x || a.max_y < b.min_y || b.max_y < a.min_y;
                assert!(apart, "{:?} touches {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_divided_rooms_get_two_sided_line() {
        let mut generator = ProceduralGenerator::new(GeneratorConfig {
            room_density: 1.0,
            divider_chance: 1.0,
            polyobj_chance: 0.0,
            seed: 8,
            ..GeneratorConfig::default()
        });
        let doc = generator.generate();
        let stats = generator.stats().unwrap();
        assert_eq!(stats.divider_count, stats.room_count);
        let two_sided = doc.linedefs().read().iter().filter(|l| l.is_two_sided()).count();
        assert_eq!(two_sided, stats.room_count);
    }

    #[test]
    fn test_slanted_dividers_are_sloped() {
        let mut generator = ProceduralGenerator::new(GeneratorConfig {
            room_density: 1.0,
            divider_chance: 0.0,
            l_shape_chance: 0.0,
            slanted_divider_chance: 1.0,
            polyobj_chance: 0.0,
            seed: 4,
            ..GeneratorConfig::default()
        });
        let doc = generator.generate();
        let vertices_lock = doc.vertices();
        let vertices = vertices_lock.read();
        let linedefs_lock = doc.linedefs();
        let linedefs = linedefs_lock.read();
        let dividers: Vec<_> = linedefs.iter().filter(|l| l.is_two_sided()).collect();
        assert_eq!(dividers.len(), generator.rooms().len());
        for line in dividers {
            let (a, b) = (&vertices[line.start], &vertices[line.end]);
            assert!(a.x != b.x && a.y != b.y, "divider {:?} is axis-aligned", line);
        }
    }
}
