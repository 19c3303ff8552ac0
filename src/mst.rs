//! Prim's minimum spanning tree over the implicit complete color graph.
//!
//! Vertices are distinct colors, edge weights are Euclidean RGB distances
//! computed on demand. The tree is grown from vertex 0; each step extracts
//! the frontier vertex with the smallest `(weight, index)` key, so equal
//! weights resolve to the lower color index and the output never depends on
//! hashing or scheduling.

use core::cmp::{Ordering, Reverse};

use log::{debug, trace};
use priority_queue::PriorityQueue;
use rgb::RGB8;

use crate::distance::distance;

/// How the frontier minimum is found on each Prim step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MstStrategy {
    /// Updatable min-priority queue keyed by `(weight, index)`.
    #[default]
    PriorityQueue,
    /// Flat O(D²) scan over per-vertex best weights. Reference implementation
    /// for small inputs; builds the same tree as `PriorityQueue`.
    Dense,
}

/// A tree edge pointing from a vertex to the tree vertex it was attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    pub child: usize,
    pub parent: usize,
    pub weight: f64,
}

/// A spanning tree rooted at vertex 0. Edges are kept in the order Prim's
/// algorithm produced them.
#[derive(Debug, Clone, Default)]
pub struct SpanningTree {
    edges: Vec<TreeEdge>,
    total_weight: f64,
    vertex_count: usize,
}

impl SpanningTree {
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Number of vertices spanned (D).
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges (D - 1, or 0 for an empty graph).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Ordering key of a frontier vertex: lighter edge first, then lower index.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FrontierKey {
    weight: f64,
    index: usize,
}

impl Eq for FrontierKey {}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the minimum spanning tree of `colors`.
///
/// An empty slice gives an empty tree; a single color gives an empty tree with
/// zero weight.
pub fn build_mst(colors: &[RGB8], strategy: MstStrategy) -> SpanningTree {
    let edges = match strategy {
        MstStrategy::PriorityQueue => prim_priority_queue(colors),
        MstStrategy::Dense => prim_dense(colors),
    };
    let total_weight = edges.iter().map(|e| e.weight).sum();

    debug!(
        "mst ({strategy:?}): {} vertices, {} edges, total weight {total_weight:.3}",
        colors.len(),
        edges.len()
    );

    SpanningTree {
        edges,
        total_weight,
        vertex_count: colors.len(),
    }
}

fn prim_priority_queue(colors: &[RGB8]) -> Vec<TreeEdge> {
    let n = colors.len();
    if n < 2 {
        return Vec::new();
    }

    let mut best = vec![f64::INFINITY; n];
    let mut parent = vec![0usize; n];
    let mut in_tree = vec![false; n];
    in_tree[0] = true;

    // Seed the frontier with every vertex attached to the root.
    let mut queue: PriorityQueue<usize, Reverse<FrontierKey>> = PriorityQueue::with_capacity(n - 1);
    for v in 1..n {
        let weight = distance(colors[0], colors[v]);
        best[v] = weight;
        queue.push(v, Reverse(FrontierKey { weight, index: v }));
    }

    let mut edges = Vec::with_capacity(n - 1);
    while let Some((u, Reverse(key))) = queue.pop() {
        in_tree[u] = true;
        trace!("mst: attach {u} -> {} ({:.3})", parent[u], key.weight);
        edges.push(TreeEdge {
            child: u,
            parent: parent[u],
            weight: key.weight,
        });

        let cu = colors[u];
        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            let weight = distance(cu, colors[v]);
            if weight < best[v] {
                best[v] = weight;
                parent[v] = u;
                queue.change_priority(&v, Reverse(FrontierKey { weight, index: v }));
            }
        }
    }

    edges
}

fn prim_dense(colors: &[RGB8]) -> Vec<TreeEdge> {
    let n = colors.len();
    if n < 2 {
        return Vec::new();
    }

    let mut best = vec![f64::INFINITY; n];
    let mut parent = vec![0usize; n];
    let mut in_tree = vec![false; n];
    in_tree[0] = true;

    let mut edges = Vec::with_capacity(n - 1);
    let mut last = 0;
    for _ in 1..n {
        relax(colors, last, &in_tree, &mut best, &mut parent);
        let Some(next) = cheapest_frontier(&in_tree, &best) else {
            break;
        };
        in_tree[next] = true;
        trace!("mst: attach {next} -> {} ({:.3})", parent[next], best[next]);
        edges.push(TreeEdge {
            child: next,
            parent: parent[next],
            weight: best[next],
        });
        last = next;
    }

    edges
}

/// Update every non-tree vertex against the newly attached vertex `u`.
/// Only a strict improvement replaces the recorded parent.
#[cfg(not(feature = "rayon"))]
fn relax(colors: &[RGB8], u: usize, in_tree: &[bool], best: &mut [f64], parent: &mut [usize]) {
    let cu = colors[u];
    for v in 0..colors.len() {
        if in_tree[v] {
            continue;
        }
        let weight = distance(cu, colors[v]);
        if weight < best[v] {
            best[v] = weight;
            parent[v] = u;
        }
    }
}

#[cfg(feature = "rayon")]
fn relax(colors: &[RGB8], u: usize, in_tree: &[bool], best: &mut [f64], parent: &mut [usize]) {
    use rayon::prelude::*;

    let cu = colors[u];
    best.par_iter_mut()
        .zip(parent.par_iter_mut())
        .enumerate()
        .filter(|(v, _)| !in_tree[*v])
        .for_each(|(v, (best_v, parent_v))| {
            let weight = distance(cu, colors[v]);
            if weight < *best_v {
                *best_v = weight;
                *parent_v = u;
            }
        });
}

#[cfg(not(feature = "rayon"))]
fn cheapest_frontier(in_tree: &[bool], best: &[f64]) -> Option<usize> {
    (0..best.len())
        .filter(|&v| !in_tree[v])
        .map(|v| FrontierKey {
            weight: best[v],
            index: v,
        })
        .min()
        .map(|k| k.index)
}

#[cfg(feature = "rayon")]
fn cheapest_frontier(in_tree: &[bool], best: &[f64]) -> Option<usize> {
    use rayon::prelude::*;

    // FrontierKey is a total order, so the reduction result is independent
    // of how rayon splits the range.
    (0..best.len())
        .into_par_iter()
        .filter(|&v| !in_tree[v])
        .map(|v| FrontierKey {
            weight: best[v],
            index: v,
        })
        .min()
        .map(|k| k.index)
}
