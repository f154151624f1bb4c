// src/world/polyobj.rs

use std::collections::HashMap;

use crate::mesh::{Mesh, MeshError, VertexId};
use crate::utils::geometry::signed_area;
use crate::utils::{BoundingBox, Point2D};

use super::line::Line;

/// Builds the stand-alone mesh of one polyobject from its lines.
///
/// Lines forming a single closed loop become one face, wound with the
/// interior on the right. Anything else is kept as bare edges.
pub fn build_polyobj_mesh(map_mesh: &Mesh, lines: &[Line], line_ids: &[usize]) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::new();
    let mut local: HashMap<VertexId, VertexId> = HashMap::new();
    let mut edges: Vec<(VertexId, VertexId)> = Vec::with_capacity(line_ids.len());

    for &id in line_ids {
        let line = match lines.get(id) {
            Some(line) => line,
            None => continue,
        };
        let mut map_vertex = |v: VertexId| -> Result<VertexId, MeshError> {
            if let Some(&lv) = local.get(&v) {
                return Ok(lv);
            }
            let position = map_mesh.get_vertex(v).ok_or(MeshError::InvalidVertex(v))?.position;
            let lv = mesh.add_vertex(position);
            local.insert(v, lv);
            Ok(lv)
        };
        let from = map_vertex(line.from)?;
        let to = map_vertex(line.to)?;
        if from != to {
            edges.push((from, to));
        }
    }

    match closed_loop(&edges) {
        Some(mut ring) => {
            let points: Vec<Point2D> = ring.iter().map(|&v| mesh.position(v)).collect();
            if signed_area(&points) > 0.0 {
                ring.reverse();
            }
            mesh.add_face(&ring)?;
        }
        None => {
            for (from, to) in edges {
                if mesh.find_hedge(from, to).is_none() {
                    mesh.add_edge(from, to)?;
                }
            }
        }
    }
    Ok(mesh)
}

/// Vertex ring of `edges` when they chain into exactly one cycle.
fn closed_loop(edges: &[(VertexId, VertexId)]) -> Option<Vec<VertexId>> {
    if edges.len() < 3 {
        return None;
    }
    let mut next: HashMap<VertexId, VertexId> = HashMap::with_capacity(edges.len());
    for &(from, to) in edges {
        if next.insert(from, to).is_some() {
            return None;
        }
    }
    let start = edges[0].0;
    let mut ring = vec![start];
    let mut current = *next.get(&start)?;
    while current != start {
        if ring.len() >= edges.len() {
            return None;
        }
        ring.push(current);
        current = *next.get(&current)?;
    }
    if ring.len() == edges.len() {
        Some(ring)
    } else {
        None
    }
}

/// Centre of a polyobject mesh, used to pick the leaf that carries it.
pub fn polyobj_center(mesh: &Mesh) -> Option<Point2D> {
    let bounds: BoundingBox = mesh.bounds();
    if bounds.is_empty() {
        None
    } else {
        Some(bounds.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_map() -> (Mesh, Vec<Line>) {
        let mesh = Mesh::from_points([
            Point2D::new(0.0, 0.0),
            Point2D::new(16.0, 0.0),
            Point2D::new(16.0, 16.0),
            Point2D::new(0.0, 16.0),
        ]);
        // Anticlockwise outline: the builder has to flip it.
        let v = VertexId;
        let lines = vec![
            Line::new(v(0), v(1), Some(0), None),
            Line::new(v(1), v(2), Some(0), None),
            Line::new(v(2), v(3), Some(0), None),
            Line::new(v(3), v(0), Some(0), None),
        ];
        (mesh, lines)
    }

    #[test]
    fn test_closed_polyobj_becomes_face() {
        let (map_mesh, lines) = square_map();
        let mesh = build_polyobj_mesh(&map_mesh, &lines, &[0, 1, 2, 3]).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.hedge_count(), 8);
        assert!(mesh.is_face_convex(crate::mesh::FaceId(0)));
        assert_eq!(polyobj_center(&mesh), Some(Point2D::new(8.0, 8.0)));
        mesh.validate().unwrap();
    }

    #[test]
    fn test_open_polyobj_keeps_edges() {
        let (map_mesh, lines) = square_map();
        let mesh = build_polyobj_mesh(&map_mesh, &lines, &[0, 1]).unwrap();
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.hedge_count(), 4);
        assert_eq!(mesh.vertex_count(), 3);
    }
}
