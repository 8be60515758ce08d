//! Alternative engines over the same inputs as the MLC deque solver:
//!  - FIFO label-correcting (append-only scan list with an in-list flag)
//!  - label-setting Dijkstra on a binary heap
//! Both apply the same mode and through-node filters, so labels must match the deque
//! engine exactly on integer-valued costs; on ties predecessors may differ.

use crate::config::SolverConfig;
use crate::error::Error;
use crate::graph::GraphView;
use crate::mode::ModeFilter;
use crate::solver::{LabelState, MlcStats};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Deque,
    Fifo,
    Dijkstra,
}

impl FromStr for Algorithm {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deque" => Ok(Algorithm::Deque),
            "fifo" => Ok(Algorithm::Fifo),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

pub(crate) fn fifo<F: ModeFilter + ?Sized>(
    graph: &GraphView<'_>,
    origin: usize,
    filter: &F,
    config: &SolverConfig,
    labels: &mut LabelState<'_>,
) -> MlcStats {
    labels.reset(config.max_label_cost);
    // 1 while in the list, 0 otherwise
    let in_list = &mut *labels.deque_next;
    in_list.fill(0);
    let mut stats = MlcStats::default();
    let mut list = VecDeque::with_capacity(graph.node_count().min(1024));
    labels.label_cost[origin] = config.departure;
    list.push_back(origin);
    in_list[origin] = 1;
    while let Some(u) = list.pop_front() {
        in_list[u] = 0;
        stats.scans += 1;
        if !config.through.permits(u, origin) { stats.centroid_skips += 1; continue; }
        let base = labels.label_cost[u];
        for link in graph.outgoing(u) {
            if !filter.allows(link) { stats.mode_skips += 1; continue; }
            let v = graph.head(link);
            let nd = base + graph.cost(link);
            if nd < labels.label_cost[v] {
                labels.label_cost[v] = nd;
                labels.node_pred[v] = u as i32;
                labels.link_pred[v] = link as i32;
                stats.relaxations += 1;
                if in_list[v] == 0 { list.push_back(v); in_list[v] = 1; stats.back_pushes += 1; }
            }
        }
    }
    stats.reached = labels.count_reached(config.max_label_cost);
    stats
}

#[derive(Copy, Clone)]
struct HeapItem { node: u32, dist: f64 }

// Plain binary min-heap with explicit sift ops; lazy deletion of stale entries.
struct BinaryHeapSimple { data: Vec<HeapItem> }
impl BinaryHeapSimple {
    #[inline] fn new(cap: usize) -> Self { Self { data: Vec::with_capacity(cap) } }
    #[inline] fn push(&mut self, item: HeapItem) { self.data.push(item); self.sift_up(self.data.len()-1); }
    #[inline] fn pop(&mut self) -> Option<HeapItem> {
        let len = self.data.len();
        if len == 0 { return None; }
        self.data.swap(0, len-1);
        let out = self.data.pop();
        if !self.data.is_empty() { self.sift_down(0); }
        out
    }
    #[inline] fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[idx].dist < self.data[parent].dist { self.data.swap(idx, parent); idx = parent; } else { break; }
        }
    }
    #[inline] fn sift_down(&mut self, mut idx: usize) {
        let n = self.data.len();
        loop {
            let left = idx * 2 + 1;
            if left >= n { break; }
            let right = left + 1;
            let mut best = left;
            if right < n && self.data[right].dist < self.data[left].dist { best = right; }
            if self.data[best].dist < self.data[idx].dist { self.data.swap(idx, best); idx = best; } else { break; }
        }
    }
}

pub(crate) fn dijkstra<F: ModeFilter + ?Sized>(
    graph: &GraphView<'_>,
    origin: usize,
    filter: &F,
    config: &SolverConfig,
    labels: &mut LabelState<'_>,
) -> MlcStats {
    labels.reset(config.max_label_cost);
    // 1 once settled
    let settled = &mut *labels.deque_next;
    settled.fill(0);
    let mut stats = MlcStats::default();
    let mut heap = BinaryHeapSimple::new(graph.node_count().min(1024));
    labels.label_cost[origin] = config.departure;
    heap.push(HeapItem { node: origin as u32, dist: config.departure });
    while let Some(item) = heap.pop() {
        let u = item.node as usize;
        if settled[u] == 1 || item.dist > labels.label_cost[u] { continue; }
        settled[u] = 1;
        stats.scans += 1;
        if !config.through.permits(u, origin) { stats.centroid_skips += 1; continue; }
        for link in graph.outgoing(u) {
            if !filter.allows(link) { stats.mode_skips += 1; continue; }
            let v = graph.head(link);
            let nd = item.dist + graph.cost(link);
            if nd < labels.label_cost[v] {
                labels.label_cost[v] = nd;
                labels.node_pred[v] = u as i32;
                labels.link_pred[v] = link as i32;
                stats.relaxations += 1;
                heap.push(HeapItem { node: v as u32, dist: nd });
                stats.back_pushes += 1;
            }
        }
    }
    stats.reached = labels.count_reached(config.max_label_cost);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("DEQUE".parse::<Algorithm>().unwrap(), Algorithm::Deque);
        assert_eq!(" fifo".parse::<Algorithm>().unwrap(), Algorithm::Fifo);
        assert_eq!("Dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert!(matches!("bellman".parse::<Algorithm>(), Err(Error::UnknownAlgorithm(_))));
    }
}
