//! Median balancing.
//!
//! Each sweep moves the cells of a rank towards the median of their neighbours on a reference
//! rank. Cells are placed one at a time, heaviest first, and never closer to an already placed
//! same-rank cell than `intra_cell_spacing` allows. Whatever a cell with reference neighbours
//! could not travel is added to the run's `current_x_delta`.

use crate::assignment::CoordinateAssignment;
use crate::connectivity::Neighbor;
use crate::model::Hierarchy;
use crate::weight::{WeightedCell, affinity, by_weight_desc};
use tracing::trace;

/// One sweep. Even iterations walk from the last rank to the first, using the next rank as the
/// reference; odd iterations walk forwards using the previous rank.
pub fn median_pos(run: &mut CoordinateAssignment, h: &mut Hierarchy, iteration: usize) {
    let max_rank = h.rank_count().saturating_sub(1);
    if iteration % 2 == 0 {
        for rank in (0..max_rank).rev() {
            rank_median_position(run, h, rank, rank + 1);
        }
    } else {
        for rank in 1..=max_rank {
            rank_median_position(run, h, rank, rank - 1);
        }
    }
}

/// Repositions the trial `x` of every cell on `rank` relative to `reference`.
pub fn rank_median_position(
    run: &mut CoordinateAssignment,
    h: &mut Hierarchy,
    rank: usize,
    reference: usize,
) {
    let cells = h.rank(rank).to_vec();
    let mut weighted: Vec<WeightedCell> = cells
        .iter()
        .enumerate()
        .map(|(idx, &id)| {
            let neighbors = run.connectivity.toward(id, rank, reference);
            WeightedCell::new(id, rank, idx, affinity(h, id, neighbors))
        })
        .collect();

    let mut order: Vec<usize> = (0..weighted.len()).collect();
    order.sort_by(|&a, &b| by_weight_desc(&weighted[a], &weighted[b]));

    let spacing = run.options.intra_cell_spacing;
    for idx in order {
        let id = weighted[idx].cell;
        let width = h.width(id);
        let neighbors = run.connectivity.toward(id, rank, reference);
        let aligned = !neighbors.is_empty();
        let median = if !aligned {
            // Nothing to align with: try to stay put.
            h.trial_x(id, rank)
        } else {
            median_x_value(h, neighbors, reference)
        };

        // Unplaced cells in between are packed at minimum spacing.
        let mut left_buffer = 0.0;
        let mut left_limit = f64::NEG_INFINITY;
        for other in weighted[..idx].iter().rev() {
            let other_width = h.width(other.cell);
            if other.visited {
                left_limit = h.trial_x(other.cell, rank)
                    + other_width / 2.0
                    + spacing
                    + left_buffer
                    + width / 2.0;
                break;
            }
            left_buffer += other_width + spacing;
        }

        let mut right_buffer = 0.0;
        let mut right_limit = f64::INFINITY;
        for other in &weighted[idx + 1..] {
            let other_width = h.width(other.cell);
            if other.visited {
                right_limit = h.trial_x(other.cell, rank)
                    - other_width / 2.0
                    - spacing
                    - right_buffer
                    - width / 2.0;
                break;
            }
            right_buffer += other_width + spacing;
        }

        let placed = if median < left_limit {
            left_limit
        } else if median > right_limit {
            right_limit
        } else {
            median
        };
        // A cell with nothing to align with has no median to miss.
        if aligned {
            run.current_x_delta += (placed - median).abs();
        }
        trace!(cell = id.0, rank, median, placed, "median placement");
        h.set_trial_x(id, rank, placed);
        weighted[idx].visited = true;
    }
}

/// Median trial `x` of `neighbors` on `rank`; 0 for an empty set.
pub fn median_x_value(h: &Hierarchy, neighbors: &[Neighbor], rank: usize) -> f64 {
    if neighbors.is_empty() {
        return 0.0;
    }
    let mut xs: Vec<f64> = neighbors.iter().map(|n| h.trial_x(n.cell, rank)).collect();
    xs.sort_by(f64::total_cmp);
    let mid = xs.len() / 2;
    if xs.len() % 2 == 1 {
        xs[mid]
    } else {
        (xs[mid - 1] + xs[mid]) / 2.0
    }
}

/// Residual misalignment of the current trial layout against each rank's previous rank.
///
/// This is the delta a forward sweep would report if it left every cell where it is, and is
/// used as the baseline for the first iteration.
pub fn measure_x_delta(run: &CoordinateAssignment, h: &Hierarchy) -> f64 {
    let mut delta = 0.0;
    for rank in 1..h.rank_count() {
        for &id in h.rank(rank) {
            let neighbors = run.connectivity.previous_layer(id, rank);
            if neighbors.is_empty() {
                continue;
            }
            delta += (median_x_value(h, neighbors, rank - 1) - h.trial_x(id, rank)).abs();
        }
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::Neighbor;
    use crate::model::{CellId, VertexId};

    fn rank_of(xs: &[f64]) -> (Hierarchy, Vec<Neighbor>) {
        let mut h = Hierarchy::new();
        let neighbors = xs
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let id = h.add_vertex(VertexId(i), 0);
                h.set_x(id, 0, x);
                Neighbor {
                    cell: id,
                    chain: CellId(usize::MAX),
                }
            })
            .collect();
        (h, neighbors)
    }

    #[test]
    fn median_of_odd_set_is_the_central_value() {
        let (h, n) = rank_of(&[40.0, 0.0, 100.0]);
        assert_eq!(median_x_value(&h, &n, 0), 40.0);
    }

    #[test]
    fn median_of_even_set_is_the_mean_of_the_central_pair() {
        let (h, n) = rank_of(&[0.0, 10.0, 30.0, 1000.0]);
        assert_eq!(median_x_value(&h, &n, 0), 20.0);
    }

    #[test]
    fn median_of_empty_set_is_zero() {
        let (h, _) = rank_of(&[]);
        assert_eq!(median_x_value(&h, &[], 0), 0.0);
    }
}
