//! Path reconstruction by walking predecessors back to the origin.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    #[default]
    Node,
    Link,
}

/// Nodes from `origin` to `dest` inclusive, or `None` if `dest` was not reached.
/// Stale or corrupted buffers (a predecessor outside the node range, or a walk longer
/// than the node count) also yield `None`.
pub fn node_sequence(node_pred: &[i32], origin: usize, dest: usize) -> Option<Vec<usize>> {
    let mut path = vec![dest];
    let mut current = dest;
    while current != origin {
        let p = node_pred[current];
        if p < 0 || p as usize >= node_pred.len() || path.len() > node_pred.len() { return None; }
        current = p as usize;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// Links from `origin` to `dest`; empty when `dest == origin`.
pub fn link_sequence(node_pred: &[i32], link_pred: &[i32], origin: usize, dest: usize) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    let mut current = dest;
    while current != origin {
        let (p, l) = (node_pred[current], link_pred[current]);
        if p < 0 || l < 0 || p as usize >= node_pred.len() || path.len() >= node_pred.len() { return None; }
        path.push(l as usize);
        current = p as usize;
    }
    path.reverse();
    Some(path)
}

/// Human-readable summary in the host system's report format. The unreachable case
/// reads `infinity`; the host's `infinitity` misspelling is deliberately not kept.
pub fn describe_path(cost: Option<f64>, sequence: Option<&[usize]>) -> String {
    match (cost, sequence) {
        (Some(c), Some(seq)) => {
            let mut out = format!("distance: {c:.2} | path: ");
            for (i, x) in seq.iter().enumerate() {
                if i > 0 { out.push(';'); }
                let _ = write!(out, "{x}");
            }
            out
        }
        _ => "distance: infinity | path: ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_back_to_origin() {
        // 0 -> 1 -> 3, 2 unreached
        let node_pred = [-1, 0, -1, 1];
        let link_pred = [-1, 0, -1, 2];
        assert_eq!(node_sequence(&node_pred, 0, 3), Some(vec![0, 1, 3]));
        assert_eq!(link_sequence(&node_pred, &link_pred, 0, 3), Some(vec![0, 2]));
        assert_eq!(node_sequence(&node_pred, 0, 0), Some(vec![0]));
        assert_eq!(link_sequence(&node_pred, &link_pred, 0, 0), Some(vec![]));
        assert_eq!(node_sequence(&node_pred, 0, 2), None);
    }

    #[test]
    fn cycle_in_stale_buffer() {
        let node_pred = [-1, 2, 1];
        assert_eq!(node_sequence(&node_pred, 0, 1), None);
        assert_eq!(link_sequence(&node_pred, &[-1, 0, 1], 0, 1), None);
    }

    #[test]
    fn predecessor_out_of_range() {
        let node_pred = [-1, 7, 1];
        assert_eq!(node_sequence(&node_pred, 0, 2), None);
        assert_eq!(node_sequence(&node_pred, 0, 1), None);
        assert_eq!(link_sequence(&node_pred, &[-1, 0, 1], 0, 2), None);
    }

    #[test]
    fn summary_format() {
        assert_eq!(describe_path(Some(4.0), Some(&[0, 1, 3])), "distance: 4.00 | path: 0;1;3");
        assert_eq!(describe_path(None, None), "distance: infinity | path: ");
    }
}
