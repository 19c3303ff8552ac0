//! Edge-cut clustering of a spanning tree.
//!
//! Removing the K-1 heaviest edges of a spanning tree leaves exactly K
//! connected components. Components are found with a union-find over the
//! surviving edges; no recursive traversal is involved, so depth is bounded
//! regardless of tree shape.

use log::{debug, trace};
use petgraph::unionfind::UnionFind;

use crate::mst::SpanningTree;

/// A partition of the distinct colors `[0, D)` into clusters.
#[derive(Debug, Clone, Default)]
pub struct Clusters {
    /// Member color indices of each cluster, ascending. Clusters are ordered
    /// by their smallest member.
    members: Vec<Vec<usize>>,
    /// Cluster id of every color index.
    assignment: Vec<usize>,
    /// Positions (in tree edge order) of the edges that were cut.
    removed_edges: Vec<usize>,
}

impl Clusters {
    pub fn members(&self) -> &[Vec<usize>] {
        &self.members
    }

    /// Cluster id of every distinct color, indexed by color index.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Cluster id of one distinct color.
    pub fn cluster_of(&self, color: usize) -> usize {
        self.assignment[color]
    }

    /// Positions of the cut edges in the tree's edge order, heaviest first.
    pub fn removed_edges(&self) -> &[usize] {
        &self.removed_edges
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Pick the `count` heaviest edges of `tree`.
///
/// Heavier edges come first; among equal weights the edge produced earlier by
/// the tree builder wins. This is the same selection as repeatedly taking the
/// strict maximum of the remaining edges in builder order.
fn heaviest_edges(tree: &SpanningTree, count: usize) -> Vec<usize> {
    let edges = tree.edges();
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&a, &b| {
        edges[b]
            .weight
            .total_cmp(&edges[a].weight)
            .then(a.cmp(&b))
    });
    order.truncate(count);
    order
}

/// Split the tree into `k` clusters by cutting its `k - 1` heaviest edges.
///
/// `k` is clamped to `[1, D]`: asking for more clusters than colors yields one
/// singleton per color. An empty tree over zero vertices yields no clusters.
pub fn extract_clusters(tree: &SpanningTree, k: usize) -> Clusters {
    let vertex_count = tree.vertex_count();
    if vertex_count == 0 {
        return Clusters::default();
    }

    let k = k.clamp(1, vertex_count);
    let removed_edges = heaviest_edges(tree, k - 1);
    let mut removed = vec![false; tree.len()];
    for &pos in &removed_edges {
        let edge = tree.edges()[pos];
        trace!(
            "cluster: cut {} -> {} ({:.3})",
            edge.child, edge.parent, edge.weight
        );
        removed[pos] = true;
    }

    let mut components: UnionFind<usize> = UnionFind::new(vertex_count);
    for (edge, _) in tree
        .edges()
        .iter()
        .zip(removed.iter())
        .filter(|(_, cut)| !**cut)
    {
        components.union(edge.child, edge.parent);
    }

    let labels = components.into_labeling();
    let mut cluster_of_root: Vec<Option<usize>> = vec![None; vertex_count];
    let mut members: Vec<Vec<usize>> = Vec::with_capacity(k);
    let mut assignment = Vec::with_capacity(vertex_count);

    for (color, &root) in labels.iter().enumerate() {
        let id = *cluster_of_root[root].get_or_insert_with(|| {
            members.push(Vec::new());
            members.len() - 1
        });
        members[id].push(color);
        assignment.push(id);
    }

    debug!(
        "cluster: {} colors, {} edges cut, {} clusters",
        vertex_count,
        removed_edges.len(),
        members.len()
    );

    Clusters {
        members,
        assignment,
        removed_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mst::{MstStrategy, build_mst};
    use rgb::RGB8;

    fn gray(v: u8) -> RGB8 {
        RGB8 { r: v, g: v, b: v }
    }

    fn assert_partition(clusters: &Clusters, d: usize) {
        let mut seen = vec![false; d];
        for (id, group) in clusters.members().iter().enumerate() {
            assert!(!group.is_empty());
            for &c in group {
                assert!(!seen[c], "color {c} in two clusters");
                seen[c] = true;
                assert_eq!(clusters.cluster_of(c), id);
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn one_cluster_keeps_every_edge() {
        let colors: Vec<RGB8> = (0..10).map(|i| gray(i * 20)).collect();
        let tree = build_mst(&colors, MstStrategy::PriorityQueue);
        let clusters = extract_clusters(&tree, 1);
        assert_eq!(clusters.len(), 1);
        assert!(clusters.removed_edges().is_empty());
        assert_partition(&clusters, 10);
    }

    #[test]
    fn k_at_least_d_gives_singletons() {
        let colors: Vec<RGB8> = (0..6).map(|i| gray(i * 40)).collect();
        let tree = build_mst(&colors, MstStrategy::PriorityQueue);
        for k in [6, 7, 1000] {
            let clusters = extract_clusters(&tree, k);
            assert_eq!(clusters.len(), 6);
            assert!(clusters.members().iter().all(|m| m.len() == 1));
        }
    }

    #[test]
    fn zero_k_is_clamped_to_one() {
        let colors = vec![gray(0), gray(255)];
        let tree = build_mst(&colors, MstStrategy::PriorityQueue);
        assert_eq!(extract_clusters(&tree, 0).len(), 1);
    }

    #[test]
    fn cuts_the_largest_gap() {
        // Two tight groups with a wide gap between them.
        let colors = vec![gray(0), gray(2), gray(4), gray(200), gray(202)];
        let tree = build_mst(&colors, MstStrategy::PriorityQueue);
        let clusters = extract_clusters(&tree, 2);
        assert_eq!(clusters.members(), &[vec![0, 1, 2], vec![3, 4]]);
        assert_partition(&clusters, 5);
    }

    #[test]
    fn equal_weights_cut_earliest_edge() {
        // Evenly spaced chain: every edge has the same weight.
        let colors = vec![gray(0), gray(10), gray(20), gray(30)];
        let tree = build_mst(&colors, MstStrategy::PriorityQueue);
        let clusters = extract_clusters(&tree, 2);
        assert_eq!(clusters.removed_edges(), &[0]);
        assert_eq!(clusters.members(), &[vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn exact_cluster_count() {
        let colors: Vec<RGB8> = (0..50u32)
            .map(|i| {
                let h = i.wrapping_mul(2654435761);
                RGB8 {
                    r: h as u8,
                    g: (h >> 8) as u8,
                    b: (h >> 16) as u8,
                }
            })
            .collect();
        let tree = build_mst(&colors, MstStrategy::PriorityQueue);
        for k in 1..=50 {
            let clusters = extract_clusters(&tree, k);
            assert_eq!(clusters.len(), k);
            assert_partition(&clusters, 50);
        }
    }

    #[test]
    fn empty_tree() {
        let tree = build_mst(&[], MstStrategy::PriorityQueue);
        assert!(extract_clusters(&tree, 3).is_empty());
    }
}
