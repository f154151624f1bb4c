// src/bsp/bsp_hardener.rs

use log::info;

use crate::bsp::bsp_node::{BspTreeNode, LeafData};
use crate::bsp::{BspBuild, BspError};
use crate::mesh::{FaceId, HEdgeId, Mesh};
use crate::utils::BoundingBox;
use crate::world::{BspChild, BspLeaf, BspNode, GameMap, Line, Sector};

/// Flat arrays filled by the post-order walk.
#[derive(Default)]
struct Hardener {
    nodes: Vec<BspNode>,
    leafs: Vec<BspLeaf>,
    /// Build-time face of each leaf, by leaf index.
    leaf_faces: Vec<Option<FaceId>>,
}

impl Hardener {
    fn visit(&mut self, node: BspTreeNode) -> (BspChild, BoundingBox) {
        match node {
            BspTreeNode::Leaf(data) => self.visit_leaf(data),
            BspTreeNode::Node { partition, right, left } => {
                let (right, right_bounds) = self.visit(*right);
                let (left, left_bounds) = self.visit(*left);
                let index = self.nodes.len();
                self.nodes.push(BspNode {
                    index,
                    partition,
                    right,
                    left,
                    right_bounds,
                    left_bounds,
                });
                (BspChild::Node(index), combined(&right_bounds, &left_bounds))
            }
        }
    }

    fn visit_leaf(&mut self, data: LeafData) -> (BspChild, BoundingBox) {
        let index = self.leafs.len();
        let bounds = match &data.polygon {
            Some(poly) => BoundingBox::from_points(poly),
            None => data.segs.iter().fold(BoundingBox::new_empty(), |mut b, seg| {
                b.combine(&seg.bounds());
                b
            }),
        };
        self.leafs.push(BspLeaf::new(index, data.sector));
        self.leaf_faces.push(data.face);
        (BspChild::Leaf(index), bounds)
    }
}

fn combined(a: &BoundingBox, b: &BoundingBox) -> BoundingBox {
    let mut out = *a;
    out.combine(b);
    out
}

/// Half-edge order of the hardened map: leaf face loops in leaf order, then
/// everything else in creation order.
fn hedge_order(mesh: &Mesh, leaf_faces: &[Option<FaceId>]) -> Vec<HEdgeId> {
    let mut placed = vec![false; mesh.hedge_count()];
    let mut order = Vec::with_capacity(mesh.hedge_count());
    for face in leaf_faces.iter().flatten() {
        for h in mesh.face_hedges(*face) {
            if !placed[h.index()] {
                placed[h.index()] = true;
                order.push(h);
            }
        }
    }
    for (i, done) in placed.iter().enumerate() {
        if !done {
            order.push(HEdgeId(i as u32));
        }
    }
    order
}

fn face_order(mesh: &Mesh, leaf_faces: &[Option<FaceId>]) -> Vec<FaceId> {
    let mut placed = vec![false; mesh.face_count()];
    let mut order = Vec::with_capacity(mesh.face_count());
    for face in leaf_faces.iter().flatten() {
        if !placed[face.index()] {
            placed[face.index()] = true;
            order.push(*face);
        }
    }
    for (i, done) in placed.iter().enumerate() {
        if !done {
            order.push(FaceId(i as u32));
        }
    }
    order
}

impl BspBuild {
    /// Turns the build into the runtime map, consuming it.
    ///
    /// Nodes and leafs are numbered in post-order, right subtree first. The
    /// mesh is moved into the map and renumbered so that leaf `i`'s face loop
    /// comes before leaf `i + 1`'s. Each leaf polygon passes the convexity
    /// check on the way in.
    pub fn harden(self, lines: Vec<Line>, sectors: Vec<Sector>) -> Result<GameMap, BspError> {
        let (right_height, left_height) = self.root_heights();
        let BspBuild { mut mesh, tree, epsilon } = self;

        let mut hardener = Hardener::default();
        let (root, _) = hardener.visit(tree);
        let Hardener {
            nodes,
            mut leafs,
            leaf_faces,
        } = hardener;
        if leafs.is_empty() {
            return Err(BspError::NoLeafs);
        }

        let hedges = hedge_order(&mesh, &leaf_faces);
        let faces = face_order(&mesh, &leaf_faces);
        mesh.remap(&hedges, &faces)?;

        // Leaf faces are the first faces in the new order, in leaf order.
        let mut next_face = 0u32;
        for (leaf, face) in leafs.iter_mut().zip(&leaf_faces) {
            if face.is_none() {
                continue;
            }
            let face = FaceId(next_face);
            next_face += 1;
            mesh.set_face_leaf(face, Some(leaf.index))?;
            leaf.set_poly(face, &mesh)?;
        }
        mesh.rebuild_vertex_owners();

        info!(
            "BSP built: {} nodes, {} leafs, {} half-edges, {} vertices, heights {}:{}",
            nodes.len(),
            leafs.len(),
            mesh.hedge_count(),
            mesh.vertex_count(),
            right_height,
            left_height
        );

        Ok(GameMap {
            mesh,
            nodes,
            leafs,
            root,
            lines,
            sectors,
            epsilon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::bsp_partitioner::tests::{add_room, room, L_ROOM};
    use crate::bsp::Partitioner;
    use crate::config::BspConfig;
    use crate::mesh::Polygonal;
    use crate::utils::{Line2D, Point2D};
    use crate::world::Plane;

    fn sectors(n: usize) -> Vec<Sector> {
        (0..n)
            .map(|_| Sector::new(Plane::new(0.0, "FLOOR4_8"), Plane::new(128.0, "CEIL3_5"), 0.75))
            .collect()
    }

    #[test]
    fn test_single_leaf_root() {
        let (mesh, lines) = room(&[(0.0, 0.0), (0.0, 64.0), (64.0, 64.0), (64.0, 0.0)], 0);
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        let map = build.harden(lines, sectors(1)).unwrap();
        assert_eq!(map.root(), BspChild::Leaf(0));
        assert_eq!(map.node_count(), 0);
        assert_eq!(map.leaf_count(), 1);
        assert_eq!(map.leaf_face(0), Some(FaceId(0)));
        // The leaf's loop takes the first half-edge indices.
        let loop_ids: Vec<HEdgeId> = map.mesh().face_hedges(FaceId(0)).collect();
        let mut sorted = loop_ids.clone();
        sorted.sort();
        assert_eq!(sorted, (0..4).map(HEdgeId).collect::<Vec<_>>());
    }

    #[test]
    fn test_hardening_conserves_counts() {
        let (mesh, lines) = room(&L_ROOM, 0);
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        let counts = (build.num_nodes(), build.num_leafs(), build.num_hedges(), build.num_vertices());

        let map = build.harden(lines, sectors(1)).unwrap();
        let hardened = (map.node_count(), map.leaf_count(), map.hedge_count(), map.vertex_count());
        assert_eq!(counts, hardened);
        // Asking again changes nothing.
        assert_eq!(hardened, (map.node_count(), map.leaf_count(), map.hedge_count(), map.vertex_count()));

        assert_eq!(map.root(), BspChild::Node(0));
        let node = &map.bsp_nodes()[0];
        assert_eq!(node.right, BspChild::Leaf(0));
        assert_eq!(node.left, BspChild::Leaf(1));
        assert_eq!(node.right_bounds, BoundingBox::new(0.0, 0.0, 64.0, 128.0));
        assert_eq!(node.left_bounds, BoundingBox::new(64.0, 0.0, 128.0, 64.0));

        for leaf in map.bsp_leafs() {
            let face = leaf.poly().unwrap();
            assert_eq!(face, FaceId(leaf.index as u32));
            assert_eq!(map.faces()[face.index()].leaf, Some(leaf.index));
        }
        // Owner rings cover every half-edge exactly once.
        let owners: usize = map.vertices().iter().map(|v| v.owners.len()).sum();
        assert_eq!(owners, map.hedge_count());
        map.mesh().validate().unwrap();
    }

    #[test]
    fn test_orphan_leaf_is_kept_but_not_clustered() {
        let (mesh, lines) = room(&[(0.0, 0.0), (0.0, 64.0), (64.0, 64.0), (64.0, 0.0)], 0);
        let BspBuild { mesh, tree, epsilon } =
            Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        // Graft a leaf with no polygon onto the far side of a line east of the room.
        let orphan = LeafData {
            order: 1,
            segs: Vec::new(),
            sector: Some(0),
            polygon: None,
            face: None,
        };
        let tree = BspTreeNode::Node {
            partition: Line2D::new(Point2D::new(200.0, 100.0), Point2D::new(200.0, 0.0)),
            right: Box::new(tree),
            left: Box::new(BspTreeNode::Leaf(orphan)),
        };

        let mut map = BspBuild { mesh, tree, epsilon }.harden(lines, sectors(1)).unwrap();
        map.build_all_clusters().unwrap();

        assert_eq!(map.leaf_count(), 2);
        assert_eq!(map.node_count(), 1);
        let leaf = &map.bsp_leafs()[1];
        assert!(leaf.is_orphan());
        assert_eq!(leaf.sector, Some(0));
        assert_eq!(leaf.poly(), None);
        assert_eq!(map.cluster_of_leaf(1), None);
        assert!(map.cluster_of_leaf(0).is_some());
        assert_eq!(map.sectors()[0].cluster_count(), 1);
        assert_eq!(map.bsp_leaf_at_point(&Point2D::new(300.0, 50.0)).index, 1);
        map.verify().unwrap();
    }

    #[test]
    fn test_post_order_numbering() {
        // Three rooms in a row: the root splits one off, its child splits the rest.
        let mut mesh = Mesh::new();
        let mut lines = Vec::new();
        for i in 0..3 {
            let x = i as f64 * 128.0;
            add_room(
                &mut mesh,
                &mut lines,
                &[(x, 0.0), (x, 64.0), (x + 64.0, 64.0), (x + 64.0, 0.0)],
                0,
            );
        }
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        assert_eq!(build.num_leafs(), 3);
        let map = build.harden(lines, sectors(1)).unwrap();
        assert_eq!(map.node_count(), 2);
        // Children are numbered before their parent, so the root comes last.
        assert_eq!(map.root(), BspChild::Node(1));
        let root = &map.bsp_nodes()[1];
        let mut seen = vec![false; 3];
        for node in map.bsp_nodes() {
            for child in [node.right, node.left] {
                if let BspChild::Leaf(i) = child {
                    assert!(!seen[i]);
                    seen[i] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
        assert!(root.bounds().contains_point(1.0, 1.0));
        let p = Point2D::new(300.0, 30.0);
        assert!(map.leaf_contains_point(map.bsp_leaf_at_point(&p).index, &p));
    }
}
