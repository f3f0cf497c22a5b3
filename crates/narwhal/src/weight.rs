//! Weighted ordering helpers shared by the balancing passes.

use crate::connectivity::Neighbor;
use crate::model::{CellId, Hierarchy};
use std::cmp::Ordering;

/// A cell queued for processing, with the key it is sorted by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedCell {
    pub cell: CellId,
    pub rank: usize,
    pub rank_index: usize,
    pub weight: f64,
    /// Already placed in the current sweep (median balancing) or waiting in the queue
    /// (relaxation).
    pub visited: bool,
}

impl WeightedCell {
    pub fn new(cell: CellId, rank: usize, rank_index: usize, weight: f64) -> Self {
        Self {
            cell,
            rank,
            rank_index,
            weight,
            visited: false,
        }
    }
}

/// Heaviest first; equal weights keep rank order.
pub fn by_weight_desc(a: &WeightedCell, b: &WeightedCell) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then(a.rank_index.cmp(&b.rank_index))
}

/// Lightest first; equal weights keep rank order.
pub fn by_weight_asc(a: &WeightedCell, b: &WeightedCell) -> Ordering {
    a.weight
        .total_cmp(&b.weight)
        .then(a.rank_index.cmp(&b.rank_index))
}

/// Affinity of `cell` to its reference-rank neighbours.
///
/// Dummy-to-dummy links weigh 8, vertex-to-vertex links 1 and mixed links 2, so long edges are
/// placed before the vertices around them.
pub fn affinity(h: &Hierarchy, cell: CellId, neighbors: &[Neighbor]) -> f64 {
    let cell_is_vertex = h.cell(cell).is_some_and(|c| c.is_vertex());
    neighbors
        .iter()
        .map(|n| {
            let other_is_vertex = h.cell(n.cell).is_some_and(|c| c.is_vertex());
            match (cell_is_vertex, other_is_vertex) {
                (true, true) => 1.0,
                (false, false) => 8.0,
                _ => 2.0,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::Connectivity;
    use crate::model::{EdgeId, VertexId};

    #[test]
    fn sorts_heaviest_first_with_stable_ties() {
        let c = |i: usize, w: f64| WeightedCell::new(CellId(i), 0, i, w);
        let mut cells = vec![c(0, 1.0), c(1, 8.0), c(2, 1.0), c(3, 2.0)];
        cells.sort_by(by_weight_desc);
        let order: Vec<usize> = cells.iter().map(|w| w.cell.0).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn affinity_prefers_dummy_links() {
        let mut h = Hierarchy::new();
        let a = h.add_vertex(VertexId(0), 0);
        let b = h.add_vertex(VertexId(1), 3);
        let c = h.add_vertex(VertexId(2), 1);
        let long = h.add_edge_chain(a, b, vec![EdgeId(0)], false).unwrap();
        h.add_edge_chain(a, c, vec![EdgeId(1)], false).unwrap();
        let conn = Connectivity::build(&h);

        assert_eq!(affinity(&h, long, conn.next_layer(long, 1)), 8.0);
        assert_eq!(affinity(&h, long, conn.previous_layer(long, 1)), 2.0);
        assert_eq!(affinity(&h, a, conn.next_layer(a, 0)), 3.0);
    }
}
