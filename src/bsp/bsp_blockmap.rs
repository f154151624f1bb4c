// src/bsp/bsp_blockmap.rs

use crate::mesh::{Mesh, VertexId};
use crate::utils::{BoundingBox, Point2D};

/// Uniform grid of mesh vertices, used to merge points that land within
/// `epsilon` of an existing vertex.
///
/// Points outside the grid are filed under the nearest edge cell, so every
/// point has a cell.
#[derive(Debug, Default)]
pub struct VertexBlockmap {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub cell_size: f64,
    pub epsilon: f64,
    pub cells: Vec<Vec<VertexId>>,
}

impl VertexBlockmap {
    pub fn new(bounds: BoundingBox, cell_size: f64, epsilon: f64) -> Self {
        let (min_x, min_y, max_x, max_y) = if bounds.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            (bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y)
        };
        let x = (min_x / cell_size).floor() as i32;
        let y = (min_y / cell_size).floor() as i32;
        let width = (max_x / cell_size).floor() as i32 - x + 1;
        let height = (max_y / cell_size).floor() as i32 - y + 1;
        Self {
            x,
            y,
            width,
            height,
            cell_size,
            epsilon,
            cells: vec![Vec::new(); (width * height) as usize],
        }
    }

    /// Grid over every vertex already in `mesh`.
    pub fn from_mesh(mesh: &Mesh, bounds: BoundingBox, cell_size: f64, epsilon: f64) -> Self {
        let mut blockmap = Self::new(bounds, cell_size, epsilon);
        for (i, v) in mesh.vertices().iter().enumerate() {
            blockmap.insert(VertexId(i as u32), &v.position);
        }
        blockmap
    }

    fn cell_coords(&self, p: &Point2D) -> (i32, i32) {
        let cx = ((p.x / self.cell_size).floor() as i32 - self.x).clamp(0, self.width - 1);
        let cy = ((p.y / self.cell_size).floor() as i32 - self.y).clamp(0, self.height - 1);
        (cx, cy)
    }

    pub fn get_cell(&self, cx: i32, cy: i32) -> Option<&Vec<VertexId>> {
        if cx >= 0 && cx < self.width && cy >= 0 && cy < self.height {
            return self.cells.get((cy * self.width + cx) as usize);
        }
        None
    }

    pub fn get_cell_mut(&mut self, cx: i32, cy: i32) -> Option<&mut Vec<VertexId>> {
        if cx >= 0 && cx < self.width && cy >= 0 && cy < self.height {
            return self.cells.get_mut((cy * self.width + cx) as usize);
        }
        None
    }

    pub fn insert(&mut self, id: VertexId, p: &Point2D) {
        let (cx, cy) = self.cell_coords(p);
        if let Some(cell) = self.get_cell_mut(cx, cy) {
            cell.push(id);
        }
    }

    /// Existing vertex within `epsilon` of `p`, lowest id first.
    pub fn find(&self, mesh: &Mesh, p: &Point2D) -> Option<VertexId> {
        let reach = BoundingBox::new(p.x, p.y, p.x, p.y).expanded(self.epsilon);
        self.query(&reach)
            .filter(|&v| mesh.position(v).approx_eq(p, self.epsilon))
            .min()
    }

    /// Returns the vertex at `p`, adding one to `mesh` if none is close enough.
    pub fn intern(&mut self, mesh: &mut Mesh, p: Point2D) -> VertexId {
        if let Some(v) = self.find(mesh, &p) {
            return v;
        }
        let v = mesh.add_vertex(p);
        self.insert(v, &p);
        v
    }

    /// Every vertex filed in a cell that overlaps `area`.
    pub fn query<'a>(&'a self, area: &BoundingBox) -> impl Iterator<Item = VertexId> + 'a {
        let (x0, y0) = self.cell_coords(&Point2D::new(area.min_x, area.min_y));
        let (x1, y1) = self.cell_coords(&Point2D::new(area.max_x, area.max_y));
        (y0..=y1)
            .flat_map(move |cy| (x0..=x1).map(move |cx| (cx, cy)))
            .filter_map(move |(cx, cy)| self.get_cell(cx, cy))
            .flat_map(|cell| cell.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_merges_close_points() {
        let mut mesh = Mesh::from_points([Point2D::new(0.0, 0.0), Point2D::new(128.0, 64.0)]);
        let bounds = mesh.bounds().expanded(64.0);
        let mut blockmap = VertexBlockmap::from_mesh(&mesh, bounds, 128.0, 1.0 / 128.0);

        assert_eq!(blockmap.intern(&mut mesh, Point2D::new(128.001, 64.0)), VertexId(1));
        let fresh = blockmap.intern(&mut mesh, Point2D::new(32.0, 32.0));
        assert_eq!(fresh, VertexId(2));
        assert_eq!(blockmap.intern(&mut mesh, Point2D::new(32.0, 32.0)), fresh);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_merge_across_cell_border() {
        let mut mesh = Mesh::from_points([Point2D::new(127.999, 0.0)]);
        let bounds = BoundingBox::new(0.0, 0.0, 512.0, 512.0);
        let mut blockmap = VertexBlockmap::from_mesh(&mesh, bounds, 128.0, 1.0 / 128.0);
        assert_eq!(blockmap.intern(&mut mesh, Point2D::new(128.0, 0.0)), VertexId(0));
    }

    #[test]
    fn test_points_outside_grid_are_clamped() {
        let mut mesh = Mesh::new();
        let bounds = BoundingBox::new(0.0, 0.0, 256.0, 256.0);
        let mut blockmap = VertexBlockmap::new(bounds, 128.0, 0.01);
        let far = blockmap.intern(&mut mesh, Point2D::new(-1000.0, 5000.0));
        assert_eq!(blockmap.find(&mesh, &Point2D::new(-1000.0, 5000.0)), Some(far));
        let area = BoundingBox::new(-2000.0, 4000.0, -900.0, 6000.0);
        assert_eq!(blockmap.query(&area).collect::<Vec<_>>(), vec![far]);
    }
}
