// src/bsp/bsp_partitioner.rs

use std::collections::HashSet;

use log::{debug, warn};

use crate::bsp::bsp_node::{BspTreeNode, LeafData};
use crate::bsp::bsp_seg::{position_from_distances, LineSeg};
use crate::bsp::bsp_superblock::SuperBlock;
use crate::bsp::{BspError, SegPosition, VertexBlockmap, BLOCK_SIZE};
use crate::config::BspConfig;
use crate::mesh::{FaceId, HEdgeId, LineSideRef, Mesh, VertexId};
use crate::utils::geometry::{clip_convex, signed_area};
use crate::utils::{BoundingBox, Line2D, LineSide, Point2D};
use crate::world::Line;

/// Chooses partition lines and builds the BSP tree over a map's lines.
pub struct Partitioner {
    config: BspConfig,
}

/// Result of partitioning: the build tree and the mesh holding every leaf
/// polygon. Consumed by `BspBuild::harden`.
#[derive(Debug)]
pub struct BspBuild {
    pub(crate) mesh: Mesh,
    pub(crate) tree: BspTreeNode,
    pub(crate) epsilon: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct SplitCounts {
    right: usize,
    left: usize,
    splits: usize,
}

impl SplitCounts {
    fn add(&mut self, position: SegPosition, collinear_side: impl FnOnce() -> LineSide) {
        match position {
            SegPosition::Right => self.right += 1,
            SegPosition::Left => self.left += 1,
            SegPosition::Split => self.splits += 1,
            SegPosition::Collinear => match collinear_side() {
                LineSide::Right => self.right += 1,
                LineSide::Left => self.left += 1,
            },
        }
    }

    /// Both sides must end up non-empty for the partition to be useful.
    fn is_valid(&self) -> bool {
        self.right + self.splits > 0 && self.left + self.splits > 0
    }

    fn cost(&self, factor: i64) -> i64 {
        self.splits as i64 * factor + (self.right as i64 - self.left as i64).abs()
    }
}

/// Mutable state of one build.
struct Builder<'a> {
    config: &'a BspConfig,
    mesh: Mesh,
    blockmap: VertexBlockmap,
    leaf_count: usize,
}

impl Partitioner {
    pub fn new(config: &BspConfig) -> Self {
        Partitioner {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &BspConfig {
        &self.config
    }

    /// Partitions `lines`, whose endpoints are vertices of `mesh`.
    ///
    /// Fails only on malformed input: a line referencing a vertex the mesh
    /// does not have, or no line with a sector on either side.
    pub fn build(&self, mesh: Mesh, lines: &[Line]) -> Result<BspBuild, BspError> {
        let eps = self.config.distance_epsilon;
        for (i, line) in lines.iter().enumerate() {
            for v in [line.from, line.to] {
                if mesh.get_vertex(v).is_none() {
                    return Err(BspError::InvalidVertex { line: i, vertex: v });
                }
            }
        }

        let segs = create_initial_segs(&mesh, lines, eps);
        if segs.is_empty() {
            return Err(BspError::NoSegments);
        }

        let mut bounds = BoundingBox::new_empty();
        for seg in &segs {
            bounds.combine(&seg.bounds());
        }
        let region_bounds = bounds.expanded(self.config.region_margin);
        let region = region_bounds.corners().to_vec();

        let blockmap = VertexBlockmap::from_mesh(&mesh, region_bounds, BLOCK_SIZE, eps);
        let mut builder = Builder {
            config: &self.config,
            mesh,
            blockmap,
            leaf_count: 0,
        };

        let seg_count = segs.len();
        let mut tree = builder.build_node(segs, region);
        builder.assemble_faces(&mut tree)?;

        debug!(
            "Partitioned {} segs into {} leafs ({} half-edges)",
            seg_count,
            builder.leaf_count,
            builder.mesh.hedge_count()
        );
        Ok(BspBuild {
            mesh: builder.mesh,
            tree,
            epsilon: eps,
        })
    }
}

/// One seg per line side with a sector; front sides run `from -> to`.
fn create_initial_segs(mesh: &Mesh, lines: &[Line], epsilon: f64) -> Vec<LineSeg> {
    let mut segs = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        if line.polyobj.is_some() {
            continue;
        }
        let start = mesh.position(line.from);
        let end = mesh.position(line.to);
        if line.from == line.to || start.distance_to(&end) <= epsilon {
            debug!("Skipping zero-length line {}", i);
            continue;
        }
        if let Some(sector) = line.front_sector {
            segs.push(LineSeg {
                index: segs.len(),
                from: line.from,
                to: line.to,
                start,
                end,
                line_side: LineSideRef::front(i),
                sector: Some(sector),
            });
        }
        if let Some(sector) = line.back_sector {
            segs.push(LineSeg {
                index: segs.len(),
                from: line.to,
                to: line.from,
                start: end,
                end: start,
                line_side: LineSideRef::back(i),
                sector: Some(sector),
            });
        }
    }
    segs
}

impl<'a> Builder<'a> {
    fn epsilon(&self) -> f64 {
        self.config.distance_epsilon
    }

    fn build_node(&mut self, segs: Vec<LineSeg>, region: Vec<Point2D>) -> BspTreeNode {
        let block = SuperBlock::build(&segs, self.config.superblock_size);
        let best = match self.choose_partition(&segs, &block) {
            Some(best) => best,
            None => return BspTreeNode::Leaf(self.make_leaf(segs, region)),
        };

        let partition = segs[best].line();
        let (right_segs, left_segs) = self.divide(segs, &partition);
        let eps = self.epsilon();
        let right_region = clip_convex(&region, &partition, LineSide::Right, eps);
        let left_region = clip_convex(&region, &partition, LineSide::Left, eps);

        let right = self.build_node(right_segs, right_region);
        let left = self.build_node(left_segs, left_region);
        BspTreeNode::Node {
            partition,
            right: Box::new(right),
            left: Box::new(left),
        }
    }

    /// Picks the seg whose line gives the cheapest valid partition.
    ///
    /// Cost is `splits * factor + |right - left|`. Ties go to axis-aligned
    /// lines, then to the lowest seg index. Returns `None` when no line has
    /// segs on both sides, i.e. the set is convex.
    fn choose_partition(&self, segs: &[LineSeg], block: &SuperBlock) -> Option<usize> {
        let mut seen_lines = HashSet::new();
        let mut best: Option<((i64, u8, usize), usize)> = None;

        for (pos, seg) in segs.iter().enumerate() {
            if !seen_lines.insert(seg.source_line()) {
                continue;
            }
            let partition = seg.line();
            let limit = best.map(|(key, _)| key.0);
            let mut counts = SplitCounts::default();
            if !self.count_block(segs, block, &partition, &mut counts, limit) {
                continue;
            }
            if !counts.is_valid() {
                continue;
            }
            let aligned = if partition.is_axis_aligned() { 0 } else { 1 };
            let key = (counts.cost(self.config.split_cost_factor as i64), aligned, seg.index);
            if best.map_or(true, |(best_key, _)| key < best_key) {
                best = Some((key, pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    /// Tallies segs of `block` against `partition`. Returns false as soon as
    /// the split penalty alone exceeds `limit`.
    fn count_block(
        &self,
        segs: &[LineSeg],
        block: &SuperBlock,
        partition: &Line2D,
        counts: &mut SplitCounts,
        limit: Option<i64>,
    ) -> bool {
        let eps = self.epsilon();
        match block.side_of(partition, eps) {
            Some(LineSide::Right) => {
                counts.right += block.total;
                return true;
            }
            Some(LineSide::Left) => {
                counts.left += block.total;
                return true;
            }
            None => {}
        }

        for &i in &block.segs {
            let seg = &segs[i];
            counts.add(seg.classify(partition, eps), || seg.collinear_side(partition));
        }
        if let Some(limit) = limit {
            if counts.splits as i64 * self.config.split_cost_factor as i64 > limit {
                return false;
            }
        }
        if let Some(children) = &block.children {
            for child in children.iter() {
                if !self.count_block(segs, child, partition, counts, limit) {
                    return false;
                }
            }
        }
        true
    }

    /// Sorts segs to the two sides of `partition`, cutting those that cross it.
    fn divide(&mut self, segs: Vec<LineSeg>, partition: &Line2D) -> (Vec<LineSeg>, Vec<LineSeg>) {
        let eps = self.epsilon();
        let mut right = Vec::with_capacity(segs.len());
        let mut left = Vec::with_capacity(segs.len());

        for seg in segs {
            let a = partition.signed_distance(&seg.start);
            let b = partition.signed_distance(&seg.end);
            match position_from_distances(a, b, eps) {
                SegPosition::Right => right.push(seg),
                SegPosition::Left => left.push(seg),
                SegPosition::Collinear => match seg.collinear_side(partition) {
                    LineSide::Right => right.push(seg),
                    LineSide::Left => left.push(seg),
                },
                SegPosition::Split => {
                    let p = partition.crossing_point(&seg.start, &seg.end, a, b);
                    let v = self.blockmap.intern(&mut self.mesh, p);
                    let vp = self.mesh.position(v);
                    let head = seg.piece((seg.from, seg.start), (v, vp));
                    let tail = seg.piece((v, vp), (seg.to, seg.end));
                    let (r, l) = if a > 0.0 { (head, tail) } else { (tail, head) };
                    self.keep_piece(r, &mut right);
                    self.keep_piece(l, &mut left);
                }
            }
        }
        (right, left)
    }

    fn keep_piece(&self, piece: LineSeg, out: &mut Vec<LineSeg>) {
        if piece.from == piece.to || piece.length() <= self.epsilon() {
            debug!(
                "Dropping zero-length piece of line {} (seg {})",
                piece.source_line(),
                piece.index
            );
            return;
        }
        out.push(piece);
    }

    /// The leaf polygon is the region cut down to the front of every seg.
    fn make_leaf(&mut self, segs: Vec<LineSeg>, region: Vec<Point2D>) -> LeafData {
        let eps = self.epsilon();
        let order = self.leaf_count;
        self.leaf_count += 1;

        let polygon = if segs.is_empty() {
            None
        } else {
            let mut poly = region;
            for seg in &segs {
                poly = clip_convex(&poly, &seg.line(), LineSide::Right, eps);
                if poly.len() < 3 {
                    break;
                }
            }
            if poly.len() >= 3 && signed_area(&poly).abs() > eps {
                Some(poly)
            } else {
                None
            }
        };

        let sector = leaf_sector(order, &segs);
        LeafData {
            order,
            segs,
            sector,
            polygon,
            face: None,
        }
    }

    /// Turns leaf polygons into mesh faces.
    ///
    /// Corners are merged through the vertex blockmap, then every edge picks
    /// up the used vertices (corners and seg ends) that lie on it, so that
    /// neighbouring leafs share their half-edges as twins.
    fn assemble_faces(&mut self, tree: &mut BspTreeNode) -> Result<(), BspError> {
        let eps = self.epsilon();
        let mut leafs = tree.leafs_mut();

        let mut rings: Vec<Option<Vec<VertexId>>> = Vec::with_capacity(leafs.len());
        for leaf in leafs.iter() {
            let ring = match &leaf.polygon {
                Some(poly) => {
                    let mut ring = Vec::with_capacity(poly.len());
                    for p in poly {
                        ring.push(self.blockmap.intern(&mut self.mesh, *p));
                    }
                    dedup_ring_ids(&mut ring);
                    Some(ring)
                }
                None => None,
            };
            rings.push(ring);
        }

        let mut used = vec![false; self.mesh.vertex_count()];
        for ring in rings.iter().flatten() {
            for v in ring {
                used[v.index()] = true;
            }
        }
        for leaf in leafs.iter() {
            for seg in &leaf.segs {
                used[seg.from.index()] = true;
                used[seg.to.index()] = true;
            }
        }

        for (leaf, ring) in leafs.iter_mut().zip(rings) {
            let ring = match ring {
                Some(ring) => self.insert_t_junctions(&ring, &used),
                None => continue,
            };
            if ring.len() < 3 {
                continue;
            }
            match self.mesh.add_face(&ring) {
                Ok(face) => {
                    leaf.face = Some(face);
                    self.assign_line_sides(face, &leaf.segs, eps)?;
                }
                Err(err) => warn!("Leaf #{}: polygon rejected by mesh: {}", leaf.order, err),
            }
        }

        for leaf in leafs.iter() {
            if leaf.is_orphan() {
                warn!(
                    "Orphan leaf #{}: {} segs, sector {:?}, polygon {}",
                    leaf.order,
                    leaf.segs.len(),
                    leaf.sector,
                    if leaf.face.is_some() { "yes" } else { "none" }
                );
            }
        }
        Ok(())
    }

    /// Subdivides each ring edge at used vertices lying on it.
    fn insert_t_junctions(&self, ring: &[VertexId], used: &[bool]) -> Vec<VertexId> {
        let eps = self.epsilon();
        let n = ring.len();
        let mut out = Vec::with_capacity(n * 2);
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            out.push(a);

            let pa = self.mesh.position(a);
            let pb = self.mesh.position(b);
            let edge = Line2D::new(pa, pb);
            let length = edge.length();
            if length <= eps {
                continue;
            }
            let area = BoundingBox::from_points([&pa, &pb]).expanded(eps);
            let mut between: Vec<(f64, VertexId)> = self
                .blockmap
                .query(&area)
                .filter(|&v| v != a && v != b && used.get(v.index()).copied().unwrap_or(false))
                .filter_map(|v| {
                    let p = self.mesh.position(v);
                    if edge.distance_to_point(&p) > eps {
                        return None;
                    }
                    let t = edge.project(&p);
                    if t * length > eps && (1.0 - t) * length > eps {
                        Some((t, v))
                    } else {
                        None
                    }
                })
                .collect();
            between.sort_by(|x, y| x.0.total_cmp(&y.0));
            out.extend(between.into_iter().map(|(_, v)| v));
        }
        dedup_ring_ids(&mut out);
        out
    }

    /// Half-edges lying along one of the leaf's segs take that seg's line side.
    fn assign_line_sides(&mut self, face: FaceId, segs: &[LineSeg], eps: f64) -> Result<(), BspError> {
        let hedges: Vec<HEdgeId> = self.mesh.face_hedges(face).collect();
        for h in hedges {
            let a = self.mesh.position(self.mesh.origin(h));
            let b = self.mesh.position(self.mesh.destination(h));
            if let Some(seg) = segs.iter().find(|s| s.covers(&a, &b, eps)) {
                self.mesh.set_line_side(h, Some(seg.line_side))?;
            }
        }
        Ok(())
    }
}

/// Sector most of the leaf's segs face; ties go to the earliest seg.
fn leaf_sector(order: usize, segs: &[LineSeg]) -> Option<usize> {
    let mut tally: Vec<(usize, usize, usize)> = Vec::new(); // (sector, count, first seg index)
    for seg in segs {
        if let Some(sector) = seg.sector {
            match tally.iter_mut().find(|t| t.0 == sector) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.2 = entry.2.min(seg.index);
                }
                None => tally.push((sector, 1, seg.index)),
            }
        }
    }
    if tally.len() > 1 {
        debug!("Leaf #{} segs disagree about their sector: {:?}", order, tally);
    }
    tally
        .into_iter()
        .max_by(|x, y| x.1.cmp(&y.1).then(y.2.cmp(&x.2)))
        .map(|(sector, _, _)| sector)
}

fn dedup_ring_ids(ring: &mut Vec<VertexId>) {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
}

impl BspBuild {
    pub fn num_hedges(&self) -> usize {
        self.mesh.hedge_count()
    }

    pub fn num_leafs(&self) -> usize {
        self.tree.leaf_count()
    }

    pub fn num_nodes(&self) -> usize {
        self.tree.node_count()
    }

    pub fn num_vertices(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Heights of the root's right and left subtrees.
    pub fn root_heights(&self) -> (usize, usize) {
        match &self.tree {
            BspTreeNode::Node { right, left, .. } => (right.height(), left.height()),
            BspTreeNode::Leaf(_) => (0, 0),
        }
    }

    pub fn tree(&self) -> &BspTreeNode {
        &self.tree
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    /// Lines around a clockwise ring of points, all facing `sector`.
    pub(crate) fn room(points: &[(f64, f64)], sector: usize) -> (Mesh, Vec<Line>) {
        let mut mesh = Mesh::new();
        let mut lines = Vec::new();
        add_room(&mut mesh, &mut lines, points, sector);
        (mesh, lines)
    }

    pub(crate) fn add_room(mesh: &mut Mesh, lines: &mut Vec<Line>, points: &[(f64, f64)], sector: usize) {
        let first = mesh.vertex_count() as u32;
        for &(x, y) in points {
            mesh.add_vertex(Point2D::new(x, y));
        }
        let n = points.len() as u32;
        for i in 0..n {
            lines.push(Line::new(
                VertexId(first + i),
                VertexId(first + (i + 1) % n),
                Some(sector),
                None,
            ));
        }
    }

    pub(crate) const L_ROOM: [(f64, f64); 6] = [
        (0.0, 0.0),
        (0.0, 128.0),
        (64.0, 128.0),
        (64.0, 64.0),
        (128.0, 64.0),
        (128.0, 0.0),
    ];

    #[test]
    fn test_single_room_is_one_leaf() {
        let (mesh, lines) = room(&[(0.0, 0.0), (0.0, 128.0), (128.0, 128.0), (128.0, 0.0)], 0);
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        assert!(build.tree().is_leaf());
        assert_eq!(build.num_leafs(), 1);
        assert_eq!(build.num_nodes(), 0);
        assert_eq!(build.num_hedges(), 8);
        assert_eq!(build.root_heights(), (0, 0));

        let leaf = build.tree().leafs()[0];
        assert_eq!(leaf.sector, Some(0));
        let face = leaf.face.unwrap();
        assert!(build.mesh().is_face_convex(face));
        assert_eq!(build.mesh().face_area(face), 128.0 * 128.0);
        // Every face edge came from a wall.
        assert!(build
            .mesh()
            .face_hedges(face)
            .all(|h| build.mesh().hedge(h).line_side.is_some()));
        build.mesh().validate().unwrap();
    }

    #[test]
    fn test_l_room_splits_once_with_t_junction() {
        let (mesh, lines) = room(&L_ROOM, 0);
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        assert_eq!(build.num_leafs(), 2);
        assert_eq!(build.num_nodes(), 1);
        // One new vertex where the south wall is cut at x = 64.
        assert_eq!(build.num_vertices(), 7);
        assert_eq!(build.num_hedges(), 16);

        match build.tree() {
            BspTreeNode::Node { partition, .. } => {
                assert!(partition.is_vertical());
                assert_eq!(partition.start.x, 64.0);
            }
            BspTreeNode::Leaf(_) => panic!("expected a partition"),
        }

        let leafs = build.tree().leafs();
        let west = leafs[0].face.unwrap();
        let east = leafs[1].face.unwrap();
        // The west leaf carries the (64, 64) corner of the east leaf on its edge.
        assert_eq!(build.mesh().face_hedges(west).count(), 5);
        assert_eq!(build.mesh().face_hedges(east).count(), 4);
        assert_eq!(build.mesh().face_area(west) + build.mesh().face_area(east), 12288.0);
        build.mesh().validate().unwrap();
    }

    #[test]
    fn test_disjoint_rooms_partition_between_them() {
        let mut mesh = Mesh::new();
        let mut lines = Vec::new();
        add_room(&mut mesh, &mut lines, &[(0.0, 0.0), (0.0, 64.0), (64.0, 64.0), (64.0, 0.0)], 0);
        add_room(&mut mesh, &mut lines, &[(128.0, 0.0), (128.0, 64.0), (192.0, 64.0), (192.0, 0.0)], 0);
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        assert_eq!(build.num_leafs(), 2);
        assert_eq!(build.num_hedges(), 16);
        assert_eq!(build.root_heights(), (0, 0));
        match build.tree() {
            // The first room's east wall balances four segs against four.
            BspTreeNode::Node { partition, .. } => assert_eq!(partition.start, Point2D::new(64.0, 64.0)),
            BspTreeNode::Leaf(_) => panic!("expected a partition"),
        }
    }

    #[test]
    fn test_two_sided_divider_makes_two_sectors() {
        // A 128x64 room cut in half by a two-sided line at x = 64.
        let mesh = Mesh::from_points([
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 64.0),
            Point2D::new(64.0, 64.0),
            Point2D::new(128.0, 64.0),
            Point2D::new(128.0, 0.0),
            Point2D::new(64.0, 0.0),
        ]);
        let v = |i: u32| VertexId(i);
        let lines = vec![
            Line::new(v(0), v(1), Some(0), None),
            Line::new(v(1), v(2), Some(0), None),
            Line::new(v(2), v(3), Some(1), None),
            Line::new(v(3), v(4), Some(1), None),
            Line::new(v(4), v(5), Some(1), None),
            Line::new(v(5), v(0), Some(0), None),
            Line::new(v(2), v(5), Some(0), Some(1)),
        ];
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        assert_eq!(build.num_leafs(), 2);
        let sectors: Vec<Option<usize>> = build.tree().leafs().iter().map(|l| l.sector).collect();
        assert!(sectors.contains(&Some(0)));
        assert!(sectors.contains(&Some(1)));
        // The shared edge is covered from both sides.
        let shared = build.mesh().find_hedge(v(2), v(5)).unwrap();
        let twin = build.mesh().twin(shared);
        assert_eq!(build.mesh().hedge(shared).line_side, Some(LineSideRef::front(6)));
        assert_eq!(build.mesh().hedge(twin).line_side, Some(LineSideRef::back(6)));
    }

    #[test]
    fn test_rejects_bad_input() {
        let partitioner = Partitioner::new(&BspConfig::default());
        assert!(matches!(
            partitioner.build(Mesh::new(), &[]),
            Err(BspError::NoSegments)
        ));

        let mesh = Mesh::from_points([Point2D::new(0.0, 0.0)]);
        let lines = vec![Line::new(VertexId(0), VertexId(3), Some(0), None)];
        assert!(matches!(
            partitioner.build(mesh, &lines),
            Err(BspError::InvalidVertex { line: 0, vertex: VertexId(3) })
        ));

        // Lines without sectors give the partitioner nothing to work on.
        let mesh = Mesh::from_points([Point2D::new(0.0, 0.0), Point2D::new(8.0, 0.0)]);
        let lines = vec![Line::new(VertexId(0), VertexId(1), None, None)];
        assert!(matches!(partitioner.build(mesh, &lines), Err(BspError::NoSegments)));
    }

    #[test]
    fn test_sloped_notch_splits_off_axis() {
        // The sloped walls extend to meet the side walls at y = 42.67 and y = 76.8.
        let notch = [(0.0, 0.0), (0.0, 128.0), (48.0, 96.0), (128.0, 128.0), (128.0, 0.0)];
        let (mesh, lines) = room(&notch, 0);
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();

        match build.tree() {
            BspTreeNode::Node { partition, .. } => assert!(!partition.is_axis_aligned()),
            BspTreeNode::Leaf(_) => panic!("a concave room cannot be one leaf"),
        }
        assert!(build.num_leafs() >= 2);

        let mut area = 0.0;
        for leaf in build.tree().leafs() {
            let face = leaf.face.unwrap();
            assert!(build.mesh().is_face_convex(face));
            area += build.mesh().face_area(face);
        }
        assert_approx_eq!(area, 128.0 * 128.0 - 2048.0, 1e-6);

        let off_grid = (0..build.num_vertices())
            .map(|i| build.mesh().position(VertexId(i as u32)))
            .filter(|p| p.x == 0.0 || p.x == 128.0)
            .any(|p| p.y.fract() != 0.0);
        assert!(off_grid);
        build.mesh().validate().unwrap();
    }

    #[test]
    fn test_lone_wall_leaf() {
        // A single one-sided wall: one leaf, bounded by the region margin.
        let mesh = Mesh::from_points([Point2D::new(0.0, 0.0), Point2D::new(0.0, 64.0)]);
        let lines = vec![Line::new(VertexId(0), VertexId(1), Some(0), None)];
        let build = Partitioner::new(&BspConfig::default()).build(mesh, &lines).unwrap();
        assert_eq!(build.num_leafs(), 1);
        let leaf = build.tree().leafs()[0];
        assert!(leaf.face.is_some());
        assert_eq!(leaf.sector, Some(0));
    }

    #[test]
    fn test_leaf_sector_majority() {
        let seg = |index: usize, sector: usize| LineSeg {
            index,
            from: VertexId(0),
            to: VertexId(1),
            start: Point2D::new(0.0, 0.0),
            end: Point2D::new(1.0, 0.0),
            line_side: LineSideRef::front(index),
            sector: Some(sector),
        };
        assert_eq!(leaf_sector(0, &[seg(0, 3), seg(1, 4), seg(2, 4)]), Some(4));
        assert_eq!(leaf_sector(0, &[seg(5, 3), seg(1, 4)]), Some(4));
        assert_eq!(leaf_sector(0, &[]), None);
    }
}
