//! Path straightening for long edges.
//!
//! A chain with at least two dummy nodes is scanned twice: forwards (first dummy to last) and
//! backwards. Each scan carries the current `x` along as long as the next dummy can legally
//! move there. The scan producing more straight segments wins; on a tie the forward scan is
//! used. Nothing is applied unless the winner beats the chain's current straight-segment count.

use crate::assignment::CoordinateAssignment;
use crate::error::{Error, Result};
use crate::model::{CellId, Hierarchy};
use tracing::trace;

pub fn min_path(run: &mut CoordinateAssignment, h: &mut Hierarchy) -> Result<()> {
    let chains: Vec<CellId> = h.chain_ids().collect();
    for id in chains {
        let Some(chain) = h.chain(id) else {
            continue;
        };
        if chain.dummy_count() < 2 {
            continue;
        }
        let first_rank = chain.min_rank + 1;
        let xs: Vec<f64> = chain.dummy_ranks().map(|r| h.committed_x(id, r)).collect();
        let last = xs.len() - 1;

        let reference_count = straight_segments(&xs);
        if reference_count == last {
            continue;
        }

        let mut down = xs.clone();
        let mut down_count = 0;
        let mut current = xs[0];
        for k in 1..=last {
            if xs[k] == current || reposition_valid(run, h, id, first_rank + k, current)? {
                down[k] = current;
                down_count += 1;
            } else {
                current = xs[k];
            }
        }

        let mut up = xs.clone();
        let mut up_count = 0;
        let mut current = xs[last];
        for k in (0..last).rev() {
            if xs[k] == current || reposition_valid(run, h, id, first_rank + k, current)? {
                up[k] = current;
                up_count += 1;
            } else {
                current = xs[k];
            }
        }

        if down_count <= reference_count && up_count <= reference_count {
            continue;
        }
        let chosen = if down_count >= up_count { down } else { up };
        trace!(
            chain = id.0,
            reference_count, down_count, up_count, "straightened chain"
        );
        for (k, x) in chosen.iter().enumerate() {
            h.set_x(id, first_rank + k, *x);
        }
        if !run.stats.straightened_chains.contains(&id) {
            run.stats.straightened_chains.push(id);
        }
    }
    Ok(())
}

/// Whether `cell` may move to `position` on `rank` without crowding the same-rank neighbour
/// it moves towards. Cells at either end of a rank are unrestricted on that side.
pub fn reposition_valid(
    run: &CoordinateAssignment,
    h: &Hierarchy,
    cell: CellId,
    rank: usize,
    position: f64,
) -> Result<bool> {
    let rank_cells = h.rank(rank);
    let rank_index = h
        .rank_index_of(cell, rank)
        .ok_or(Error::CellNotInRank { cell, rank })?;
    let spacing = run.options.intra_cell_spacing;
    let current = h.committed_x(cell, rank);
    let half_width = h.width(cell) / 2.0;

    if position < current {
        if rank_index == 0 {
            return Ok(true);
        }
        let left = rank_cells[rank_index - 1];
        let left_limit = h.committed_x(left, rank) + h.width(left) / 2.0 + spacing + half_width;
        Ok(left_limit <= position)
    } else if position > current {
        if rank_index + 1 == rank_cells.len() {
            return Ok(true);
        }
        let right = rank_cells[rank_index + 1];
        let right_limit =
            h.committed_x(right, rank) - h.width(right) / 2.0 - spacing - half_width;
        Ok(right_limit >= position)
    } else {
        Ok(true)
    }
}

/// Number of consecutive equal pairs.
pub fn straight_segments(xs: &[f64]) -> usize {
    xs.windows(2).filter(|w| w[0] == w[1]).count()
}

/// Number of distinct values, used to check that straightening never adds bends.
pub fn distinct_positions(xs: &[f64]) -> usize {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_straight_segments() {
        assert_eq!(straight_segments(&[1.0, 1.0, 2.0, 2.0, 2.0]), 3);
        assert_eq!(straight_segments(&[1.0]), 0);
    }

    #[test]
    fn counts_distinct_positions() {
        assert_eq!(distinct_positions(&[3.0, 1.0, 3.0, 2.0]), 3);
    }
}
