#![allow(dead_code)]

use mlc_core::{CsrGraph, GraphView, ModeFilter, ShortestPathTree, SolverConfig, NO_PRED};

pub fn build(n: usize, links: &[(usize, usize, f64)]) -> CsrGraph {
    CsrGraph::from_links(n, links).expect("valid test graph")
}

pub fn path_graph(n: usize, w: f64) -> CsrGraph {
    let links: Vec<_> = (0..n.saturating_sub(1)).map(|u| (u, u + 1, w)).collect();
    build(n, &links)
}

pub fn star_graph(k: usize, w: f64) -> CsrGraph { // center 0, leaves 1..=k
    let links: Vec<_> = (1..=k).map(|leaf| (0, leaf, w)).collect();
    build(k + 1, &links)
}

pub fn complete_graph(n: usize, w: f64) -> CsrGraph {
    let mut links = Vec::new();
    for u in 0..n { for v in 0..n { if u != v { links.push((u, v, w)); } } }
    build(n, &links)
}

pub fn bridge_cliques(a: usize, b: usize, w: f64) -> CsrGraph { // two cliques joined by a-1 -> a
    let n = a + b;
    let mut links = Vec::new();
    for u in 0..a { for v in 0..a { if u != v { links.push((u, v, w)); } } }
    links.push((a - 1, a, w));
    for u in a..n { for v in a..n { if u != v { links.push((u, v, w)); } } }
    build(n, &links)
}

/// xorshift64* stream; deterministic per seed.
pub struct XorShift(u64);
impl XorShift {
    pub fn new(seed: u64) -> Self { Self(seed | 1) }
    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.0;
        s ^= s >> 12; s ^= s << 25; s ^= s >> 27;
        self.0 = s;
        (s.wrapping_mul(2685821657736338717) >> 32) as u32
    }
}

/// Random directed graph with integer weights in `[w_min, w_max]`, no self loops,
/// parallel links allowed (the solver must cope with them).
pub fn pseudo_random_links(n: usize, m: usize, seed: u64, w_min: u32, w_max: u32) -> Vec<(usize, usize, f64)> {
    assert!(n >= 2);
    let mut rng = XorShift::new(seed);
    let mut links = Vec::with_capacity(m);
    while links.len() < m {
        let u = rng.next_u32() as usize % n;
        let v = rng.next_u32() as usize % n;
        if u == v { continue; }
        let w = w_min + rng.next_u32() % (w_max - w_min + 1);
        links.push((u, v, w as f64));
    }
    links
}

pub fn assert_parity(base: &[f64], other: &[f64], what: &str) {
    let diffs: Vec<_> = base.iter().zip(other).enumerate().filter(|(_, (a, b))| a != b).take(16).collect();
    assert!(diffs.is_empty(), "{what}: label mismatch at {diffs:?} (n={})", base.len());
}

/// Every reached non-origin node's label equals its predecessor's label plus the
/// predecessor link's cost, that link really goes pred -> node, the mode filter admits
/// it, and the predecessor is allowed to relay.
pub fn assert_tree_consistent<F: ModeFilter + ?Sized>(graph: &GraphView<'_>, tree: &ShortestPathTree, filter: &F, cfg: &SolverConfig) {
    let origin = tree.origin();
    for v in 0..graph.node_count() {
        let (p, l) = (tree.node_preds()[v], tree.link_preds()[v]);
        if v == origin || tree.cost(v).is_none() {
            assert_eq!(p, NO_PRED, "node {v} should have no predecessor");
            assert_eq!(l, NO_PRED, "node {v} should have no predecessor link");
            continue;
        }
        let (p, l) = (p as usize, l as usize);
        assert_eq!(graph.tail(l), p, "link_pred of {v} does not start at node_pred");
        assert_eq!(graph.head(l), v, "link_pred of {v} does not end at {v}");
        assert_eq!(tree.label_costs()[v], tree.label_costs()[p] + graph.cost(l), "label of {v} not tight");
        assert!(filter.allows(l), "link_pred {l} of {v} is not usable by the mode");
        assert!(cfg.through.permits(p, origin), "node_pred {p} of {v} may not relay");
    }
}
