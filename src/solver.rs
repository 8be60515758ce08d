//! Modified label-correcting (MLC) one-to-all shortest paths.
//!
//! The scan-eligible list is the deque from [`crate::deque`]: nodes whose label improves
//! after they were already scanned go to the front, first discoveries go to the back.
//! A node may be scanned any number of times; the run ends when the list is empty.
//! This deque discipline follows Bar-Gera's TNTP implementation (also found in
//! DYNASMART and DTALite).

use crate::config::SolverConfig;
use crate::deque::{ScanList, SlotState};
use crate::error::{Error, Result};
use crate::graph::GraphView;
use crate::mode::ModeFilter;
use crate::path::{self, PathKind};
use crate::reference::{self, Algorithm};
use serde::{Deserialize, Serialize};

/// Predecessor value for the origin and for unreached nodes.
pub const NO_PRED: i32 = -1;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlcStats {
    pub scans: u64,          // nodes popped from the list (origin included)
    pub relaxations: u64,    // label improvements
    pub front_pushes: u64,   // improved after being scanned
    pub back_pushes: u64,    // first discoveries
    pub mode_skips: u64,     // links rejected by the mode filter
    pub centroid_skips: u64, // scans that could not relay (trip-end nodes)
    pub reached: u32,        // nodes whose label is below the sentinel, origin included
}

/// Caller-owned per-node output and scratch buffers, all sized to the node count.
/// Fully overwritten by every run.
pub struct LabelState<'a> {
    pub label_cost: &'a mut [f64],
    pub node_pred: &'a mut [i32],
    pub link_pred: &'a mut [i32],
    pub deque_next: &'a mut [i32],
}

impl LabelState<'_> {
    /// Sentinel labels and invalid predecessors everywhere.
    pub(crate) fn reset(&mut self, max_label_cost: f64) {
        self.label_cost.fill(max_label_cost);
        self.node_pred.fill(NO_PRED);
        self.link_pred.fill(NO_PRED);
    }

    pub(crate) fn count_reached(&self, max_label_cost: f64) -> u32 {
        self.label_cost.iter().filter(|&&c| c < max_label_cost).count() as u32
    }
}

/// Run MLC from `origin`, writing labels and predecessors into `labels`.
///
/// Preconditions (checked only in debug builds): `origin < node_count`, every buffer
/// in `labels` has `node_count` entries, and the graph satisfies [`GraphView::validate`].
pub fn label_correcting<F: ModeFilter + ?Sized>(
    graph: &GraphView<'_>,
    origin: usize,
    filter: &F,
    config: &SolverConfig,
    labels: &mut LabelState<'_>,
) -> MlcStats {
    let n = graph.node_count();
    debug_assert!(origin < n, "origin {origin} out of range for {n} nodes");
    debug_assert_eq!(labels.label_cost.len(), n);
    debug_assert_eq!(labels.node_pred.len(), n);
    debug_assert_eq!(labels.link_pred.len(), n);
    debug_assert_eq!(labels.deque_next.len(), n);

    labels.reset(config.max_label_cost);
    let label_cost = &mut *labels.label_cost;
    let node_pred = &mut *labels.node_pred;
    let link_pred = &mut *labels.link_pred;
    let mut list = ScanList::reset(labels.deque_next);
    let mut stats = MlcStats::default();

    label_cost[origin] = config.departure;
    list.push_back(origin);

    while let Some(u) = list.pop_front() {
        stats.scans += 1;
        if !config.through.permits(u, origin) {
            stats.centroid_skips += 1;
            continue;
        }
        let base = label_cost[u];
        for link in graph.outgoing(u) {
            if !filter.allows(link) {
                stats.mode_skips += 1;
                continue;
            }
            let v = graph.head(link);
            let candidate = base + graph.cost(link);
            if candidate < label_cost[v] {
                label_cost[v] = candidate;
                node_pred[v] = u as i32;
                link_pred[v] = link as i32;
                stats.relaxations += 1;
                match list.requeue(v) {
                    SlotState::Dequeued => stats.front_pushes += 1,
                    SlotState::Unseen => stats.back_pushes += 1,
                    SlotState::Queued => {}
                }
            }
        }
    }

    stats.reached = labels.count_reached(config.max_label_cost);
    stats
}

/// Owned label buffers reused across origins; each run fully reinitialises them.
#[derive(Clone, Debug)]
pub struct ShortestPathTree {
    origin: usize,
    max_label_cost: f64,
    label_cost: Vec<f64>,
    node_pred: Vec<i32>,
    link_pred: Vec<i32>,
    deque_next: Vec<i32>,
    stats: MlcStats,
}

impl ShortestPathTree {
    pub fn with_node_count(node_count: usize) -> Self {
        let max_label_cost = crate::config::DEFAULT_MAX_LABEL_COST;
        Self {
            origin: 0,
            max_label_cost,
            label_cost: vec![max_label_cost; node_count],
            node_pred: vec![NO_PRED; node_count],
            link_pred: vec![NO_PRED; node_count],
            deque_next: vec![crate::deque::UNSEEN; node_count],
            stats: MlcStats::default(),
        }
    }

    /// MLC run from `origin`.
    pub fn compute<F: ModeFilter + ?Sized>(
        &mut self,
        graph: &GraphView<'_>,
        origin: usize,
        filter: &F,
        config: &SolverConfig,
    ) -> Result<MlcStats> {
        self.compute_with(Algorithm::Deque, graph, origin, filter, config)
    }

    /// Run with any of the engines; they agree on labels, predecessors may differ on ties.
    pub fn compute_with<F: ModeFilter + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        graph: &GraphView<'_>,
        origin: usize,
        filter: &F,
        config: &SolverConfig,
    ) -> Result<MlcStats> {
        let n = graph.node_count();
        if origin >= n { return Err(Error::InvalidOrigin { origin, node_count: n }); }
        if self.label_cost.len() != n {
            return Err(Error::BufferSize { buffer: "label_cost", expected: n, actual: self.label_cost.len() });
        }
        let mut labels = LabelState {
            label_cost: &mut self.label_cost,
            node_pred: &mut self.node_pred,
            link_pred: &mut self.link_pred,
            deque_next: &mut self.deque_next,
        };
        let stats = match algorithm {
            Algorithm::Deque => label_correcting(graph, origin, filter, config, &mut labels),
            Algorithm::Fifo => reference::fifo(graph, origin, filter, config, &mut labels),
            Algorithm::Dijkstra => reference::dijkstra(graph, origin, filter, config, &mut labels),
        };
        log::trace!(
            "{algorithm:?} origin={origin} scans={} relaxations={} reached={}",
            stats.scans, stats.relaxations, stats.reached
        );
        self.origin = origin;
        self.max_label_cost = config.max_label_cost;
        self.stats = stats;
        Ok(stats)
    }

    #[inline] pub fn origin(&self) -> usize { self.origin }
    #[inline] pub fn stats(&self) -> &MlcStats { &self.stats }
    #[inline] pub fn label_costs(&self) -> &[f64] { &self.label_cost }
    #[inline] pub fn node_preds(&self) -> &[i32] { &self.node_pred }
    #[inline] pub fn link_preds(&self) -> &[i32] { &self.link_pred }

    /// Cost to `node`, or `None` while it still carries the sentinel.
    pub fn cost(&self, node: usize) -> Option<f64> {
        let c = self.label_cost[node];
        (c < self.max_label_cost).then_some(c)
    }

    pub fn node_path(&self, dest: usize) -> Option<Vec<usize>> {
        path::node_sequence(&self.node_pred, self.origin, dest)
    }

    pub fn link_path(&self, dest: usize) -> Option<Vec<usize>> {
        path::link_sequence(&self.node_pred, &self.link_pred, self.origin, dest)
    }

    /// `"distance: 4.00 | path: 0;1;3"`, or `"distance: infinity | path: "`.
    pub fn describe(&self, dest: usize, kind: PathKind) -> String {
        let seq = match kind {
            PathKind::Node => self.node_path(dest),
            PathKind::Link => self.link_path(dest),
        };
        path::describe_path(self.cost(dest), seq.as_deref())
    }
}
