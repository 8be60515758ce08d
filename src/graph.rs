//! CSR adjacency over caller-owned flat arrays.
//!
//! Links are grouped by tail node through `sorted_links`; node `u` owns the positions
//! `first_link_from[u]..last_link_from[u]` of that array. Indices are `i32` because the
//! arrays usually arrive from a host over the C ABI.

use crate::error::GraphError;
use core::ops::Range;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug)]
pub struct GraphView<'a> {
    from_node: &'a [i32],
    to_node: &'a [i32],
    first_link_from: &'a [i32],
    last_link_from: &'a [i32],
    sorted_links: &'a [i32],
    link_cost: &'a [f64],
}

impl<'a> GraphView<'a> {
    /// No validation beyond debug-build length checks; see [`GraphView::validate`].
    pub fn new(
        from_node: &'a [i32],
        to_node: &'a [i32],
        first_link_from: &'a [i32],
        last_link_from: &'a [i32],
        sorted_links: &'a [i32],
        link_cost: &'a [f64],
    ) -> Self {
        debug_assert_eq!(first_link_from.len(), last_link_from.len());
        debug_assert_eq!(from_node.len(), sorted_links.len());
        debug_assert_eq!(to_node.len(), sorted_links.len());
        debug_assert_eq!(link_cost.len(), sorted_links.len());
        Self { from_node, to_node, first_link_from, last_link_from, sorted_links, link_cost }
    }

    #[inline] pub fn node_count(&self) -> usize { self.first_link_from.len() }
    #[inline] pub fn link_count(&self) -> usize { self.sorted_links.len() }

    /// Positions in the sorted link array owned by `node`.
    #[inline(always)]
    pub fn link_range(&self, node: usize) -> Range<usize> {
        self.first_link_from[node] as usize..self.last_link_from[node] as usize
    }

    /// Outgoing link indices of `node` in adjacency order.
    #[inline(always)]
    pub fn outgoing(&self, node: usize) -> impl Iterator<Item = usize> + 'a {
        let links: &'a [i32] = self.sorted_links;
        links[self.link_range(node)].iter().map(|&l| l as usize)
    }

    #[inline(always)] pub fn tail(&self, link: usize) -> usize { self.from_node[link] as usize }
    #[inline(always)] pub fn head(&self, link: usize) -> usize { self.to_node[link] as usize }
    #[inline(always)] pub fn cost(&self, link: usize) -> f64 { self.link_cost[link] }

    /// Full O(n + m) check of the adjacency contract. The solver never calls this on
    /// its own; hosts run it once after building the arrays.
    pub fn validate(&self) -> Result<(), GraphError> {
        let n = self.node_count();
        let m = self.link_count();
        let lens = [
            ("last_link_from", n, self.last_link_from.len()),
            ("from_node", m, self.from_node.len()),
            ("to_node", m, self.to_node.len()),
            ("link_cost", m, self.link_cost.len()),
        ];
        for (array, expected, actual) in lens {
            if expected != actual { return Err(GraphError::LengthMismatch { array, expected, actual }); }
        }
        for link in 0..m {
            for node in [self.from_node[link] as i64, self.to_node[link] as i64] {
                if node < 0 || node >= n as i64 {
                    return Err(GraphError::EndpointOutOfRange { link, node, node_count: n });
                }
            }
            let cost = self.link_cost[link];
            if !cost.is_finite() || cost < 0.0 { return Err(GraphError::InvalidCost { link, cost }); }
        }
        let mut position_used = vec![false; m];
        let mut link_seen = vec![false; m];
        let mut covered = 0usize;
        for node in 0..n {
            let (first, last) = (self.first_link_from[node] as i64, self.last_link_from[node] as i64);
            if first < 0 || last < first || last > m as i64 {
                return Err(GraphError::RangeOutOfBounds { node, first, last, link_count: m });
            }
            for position in first as usize..last as usize {
                if std::mem::replace(&mut position_used[position], true) {
                    return Err(GraphError::OverlappingRange { position });
                }
                covered += 1;
                let link = self.sorted_links[position] as i64;
                if link < 0 || link >= m as i64 || std::mem::replace(&mut link_seen[link as usize], true) {
                    return Err(GraphError::NotPermutation { position, link });
                }
                let tail = self.from_node[link as usize] as i64;
                if tail != node as i64 {
                    return Err(GraphError::TailMismatch { link: link as usize, node, tail });
                }
            }
        }
        if covered != m { return Err(GraphError::NotExhaustive { covered, link_count: m }); }
        Ok(())
    }
}

/// Owned CSR arrays in the exact layout [`GraphView`] borrows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CsrGraph {
    pub from_node: Vec<i32>,
    pub to_node: Vec<i32>,
    pub first_link_from: Vec<i32>,
    pub last_link_from: Vec<i32>,
    pub sorted_links: Vec<i32>,
    pub link_cost: Vec<f64>,
}

impl CsrGraph {
    /// Build from `(tail, head, cost)` triples; link `i` is the `i`-th triple.
    /// Counting sort by tail, so links of one node keep their input order.
    pub fn from_links(node_count: usize, links: &[(usize, usize, f64)]) -> Result<Self, GraphError> {
        let m = links.len();
        let mut out_degree = vec![0i32; node_count];
        for (link, &(tail, head, cost)) in links.iter().enumerate() {
            for node in [tail, head] {
                if node >= node_count {
                    return Err(GraphError::EndpointOutOfRange { link, node: node as i64, node_count });
                }
            }
            if !cost.is_finite() || cost < 0.0 { return Err(GraphError::InvalidCost { link, cost }); }
            out_degree[tail] += 1;
        }
        let mut first_link_from = Vec::with_capacity(node_count);
        let mut last_link_from = Vec::with_capacity(node_count);
        let mut cumulative = 0i32;
        for &deg in &out_degree {
            first_link_from.push(cumulative);
            cumulative += deg;
            last_link_from.push(cumulative);
        }
        let mut cursor = first_link_from.clone();
        let mut sorted_links = vec![-1i32; m];
        for (link, &(tail, _, _)) in links.iter().enumerate() {
            sorted_links[cursor[tail] as usize] = link as i32;
            cursor[tail] += 1;
        }
        Ok(Self {
            from_node: links.iter().map(|l| l.0 as i32).collect(),
            to_node: links.iter().map(|l| l.1 as i32).collect(),
            first_link_from,
            last_link_from,
            sorted_links,
            link_cost: links.iter().map(|l| l.2).collect(),
        })
    }

    #[inline] pub fn node_count(&self) -> usize { self.first_link_from.len() }
    #[inline] pub fn link_count(&self) -> usize { self.sorted_links.len() }

    pub fn view(&self) -> GraphView<'_> {
        GraphView::new(
            &self.from_node,
            &self.to_node,
            &self.first_link_from,
            &self.last_link_from,
            &self.sorted_links,
            &self.link_cost,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_sort_groups_by_tail() {
        // links deliberately out of tail order
        let g = CsrGraph::from_links(3, &[(2, 0, 1.0), (0, 1, 2.0), (0, 2, 3.0), (1, 2, 4.0)]).unwrap();
        assert_eq!(g.first_link_from, vec![0, 2, 3]);
        assert_eq!(g.last_link_from, vec![2, 3, 4]);
        assert_eq!(g.sorted_links, vec![1, 2, 3, 0]);
        let v = g.view();
        assert_eq!(v.outgoing(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(v.head(3), 2);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn validate_rejects_broken_ranges() {
        let mut g = CsrGraph::from_links(2, &[(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
        g.first_link_from[1] = 0;
        assert_eq!(g.view().validate(), Err(GraphError::OverlappingRange { position: 0 }));

        let mut g = CsrGraph::from_links(2, &[(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
        g.sorted_links.swap(0, 1);
        assert!(matches!(g.view().validate(), Err(GraphError::TailMismatch { .. })));

        let mut g = CsrGraph::from_links(2, &[(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
        g.last_link_from[1] = 1;
        assert_eq!(g.view().validate(), Err(GraphError::NotExhaustive { covered: 1, link_count: 2 }));
    }

    #[test]
    fn builder_rejects_bad_links() {
        assert!(matches!(CsrGraph::from_links(2, &[(0, 2, 1.0)]), Err(GraphError::EndpointOutOfRange { .. })));
        assert!(matches!(CsrGraph::from_links(2, &[(0, 1, -1.0)]), Err(GraphError::InvalidCost { .. })));
    }
}
