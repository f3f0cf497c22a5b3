//! Node-level relaxation.
//!
//! Works through a FIFO queue of (cell, rank) entries instead of whole ranks. A cell moves
//! towards the weighted median of both adjacent ranks, limited by its immediate same-rank
//! neighbours; when it moves, its neighbours are queued again.

use crate::assignment::CoordinateAssignment;
use crate::median::median_x_value;
use crate::model::{CellId, Hierarchy};
use crate::weight::WeightedCell;
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;
use tracing::{trace, warn};

/// Moves smaller than this are ignored.
const TOLERANCE: f64 = 1.0;

/// Relaxes with the default budget of ten steps per queued entry. Returns the steps taken.
pub fn min_node(run: &mut CoordinateAssignment, h: &mut Hierarchy) -> usize {
    let entries: usize = h.ranks().iter().map(Vec::len).sum();
    min_node_with_budget(run, h, entries * 10)
}

pub fn min_node_with_budget(
    run: &mut CoordinateAssignment,
    h: &mut Hierarchy,
    max_tries: usize,
) -> usize {
    let mut entries: Vec<WeightedCell> = Vec::new();
    let mut index: HashMap<(CellId, usize), usize> = HashMap::default();
    let mut queue: VecDeque<usize> = VecDeque::new();

    for (rank, cells) in h.ranks().iter().enumerate() {
        for (rank_index, &cell) in cells.iter().enumerate() {
            let mut entry = WeightedCell::new(cell, rank, rank_index, 0.0);
            entry.visited = true;
            index.insert((cell, rank), entries.len());
            queue.push_back(entries.len());
            entries.push(entry);
        }
    }

    let spacing = run.options.intra_cell_spacing;
    let mut count = 0usize;
    while count < max_tries {
        let Some(current) = queue.pop_front() else {
            break;
        };
        let WeightedCell {
            cell,
            rank,
            rank_index,
            ..
        } = entries[current];

        let next = run.connectivity.next_layer(cell, rank);
        let previous = run.connectivity.previous_layer(cell, rank);
        let connected = next.len() + previous.len();

        let position = h.trial_x(cell, rank);
        let target = if connected > 0 {
            let median_next = median_x_value(h, next, rank + 1);
            let median_previous = if rank > 0 {
                median_x_value(h, previous, rank - 1)
            } else {
                0.0
            };
            (median_next * next.len() as f64 + median_previous * previous.len() as f64)
                / connected as f64
        } else {
            position
        };

        let width = h.width(cell);
        let rank_cells = h.rank(rank);
        let mut moved_to = None;
        if target < position - TOLERANCE {
            if rank_index == 0 {
                moved_to = Some(target);
            } else {
                let left = rank_cells[rank_index - 1];
                let left_limit =
                    h.trial_x(left, rank) + h.width(left) / 2.0 + spacing + width / 2.0;
                if left_limit <= target {
                    moved_to = Some(target);
                } else if left_limit < position - TOLERANCE {
                    moved_to = Some(left_limit);
                }
            }
        } else if target > position + TOLERANCE {
            if rank_index + 1 == rank_cells.len() {
                moved_to = Some(target);
            } else {
                let right = rank_cells[rank_index + 1];
                let right_limit =
                    h.trial_x(right, rank) - h.width(right) / 2.0 - spacing - width / 2.0;
                if right_limit >= target {
                    moved_to = Some(target);
                } else if right_limit > position + TOLERANCE {
                    moved_to = Some(right_limit);
                }
            }
        }

        if let Some(x) = moved_to {
            trace!(cell = cell.0, rank, from = position, to = x, "relaxed");
            let requeue: Vec<(CellId, usize)> = next
                .iter()
                .map(|n| (n.cell, rank + 1))
                .chain(previous.iter().map(|n| (n.cell, rank - 1)))
                .collect();
            h.set_trial_x(cell, rank, x);
            for key in requeue {
                if let Some(&k) = index.get(&key) {
                    if !entries[k].visited {
                        entries[k].visited = true;
                        queue.push_back(k);
                    }
                }
            }
        }

        entries[current].visited = false;
        count += 1;
    }

    run.stats.relaxation_steps += count;
    if !queue.is_empty() {
        warn!(
            max_tries,
            pending = queue.len(),
            "relaxation budget exhausted, keeping best effort positions"
        );
        run.stats.relaxation_budget_exhausted = true;
    }
    count
}
