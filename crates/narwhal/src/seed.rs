//! Initial coordinates.
//!
//! Every rank is packed left to right with `intra_cell_spacing` between cells and centred on
//! the widest rank. The result is legal (no overlaps) but not yet balanced.

use crate::assignment::CoordinateAssignment;
use crate::coordinate_system::adjust_size;
use crate::facade::GraphFacade;
use crate::model::{Cell, Hierarchy};
use tracing::warn;

/// Seeds every rank, working outwards from the widest one.
pub fn initial_coords<F: GraphFacade>(
    run: &mut CoordinateAssignment,
    h: &mut Hierarchy,
    facade: &F,
) {
    calculate_widest_rank(run, h, facade);

    let rank_count = h.rank_count();
    if rank_count == 0 {
        return;
    }
    for rank in (0..=run.widest_rank).rev() {
        rank_coordinates(run, h, rank);
    }
    for rank in run.widest_rank + 1..rank_count {
        rank_coordinates(run, h, rank);
    }
}

/// Sizes every cell, records rank widths and rank `y` values and picks the widest rank.
pub fn calculate_widest_rank<F: GraphFacade>(
    run: &mut CoordinateAssignment,
    h: &mut Hierarchy,
    facade: &F,
) {
    let rank_count = h.rank_count();
    let opts = run.options.clone();
    let step = opts.orientation.rank_step();

    run.rank_widths = vec![0.0; rank_count];
    run.rank_y = vec![0.0; rank_count];
    run.widest_rank = 0;
    run.widest_rank_value = 0.0;
    let mut widest: Option<f64> = None;

    let mut y = -step * opts.inter_rank_cell_spacing;
    let mut last_rank_max_height: f64 = 0.0;

    for rank in 0..rank_count {
        let mut max_height: f64 = 0.0;
        let mut local_x = opts.initial_x;
        let mut missing_bounds = 0usize;

        for id in h.rank(rank).to_vec() {
            let Some(cell) = h.cell_mut(id) else {
                continue;
            };
            match cell {
                Cell::Vertex(v) => {
                    match facade.vertex_bounds(v.vertex) {
                        Some(size) => {
                            (v.width, v.height) = adjust_size(opts.orientation, size);
                        }
                        None => {
                            v.width = 0.0;
                            v.height = 0.0;
                            missing_bounds += 1;
                            if !run.stats.missing_bounds.contains(&v.vertex) {
                                run.stats.missing_bounds.push(v.vertex);
                            }
                        }
                    }
                    max_height = max_height.max(v.height);
                }
                Cell::Edge(e) => {
                    if e.edges.is_empty() {
                        warn!(chain = id.0, "edge chain has no real edges, assuming one");
                    }
                    e.width = (e.edge_count() - 1) as f64 * opts.parallel_edge_spacing;
                }
            }

            let width = cell.width();
            local_x += width / 2.0;
            cell.set_x(rank, local_x);
            local_x += width / 2.0 + opts.intra_cell_spacing;
        }

        if missing_bounds > 0 {
            warn!(rank, missing_bounds, "at least one cell has no bounds");
        }

        let rank_width = local_x - opts.initial_x;
        run.rank_widths[rank] = rank_width;
        if widest.is_none_or(|w| rank_width > w) {
            widest = Some(rank_width);
            run.widest_rank = rank;
            run.widest_rank_value = rank_width;
        }

        let distance_to_next_rank =
            max_height / 2.0 + last_rank_max_height / 2.0 + opts.inter_rank_cell_spacing;
        last_rank_max_height = max_height;
        y += step * distance_to_next_rank;
        run.rank_y[rank] = y;
    }
}

/// Packs one rank, centred on the widest rank.
pub fn rank_coordinates(run: &CoordinateAssignment, h: &mut Hierarchy, rank: usize) {
    let spacing = run.options.intra_cell_spacing;
    let rank_width = run.rank_widths.get(rank).copied().unwrap_or(0.0);
    let mut local_x = run.options.initial_x + (run.widest_rank_value - rank_width) / 2.0;

    for id in h.rank(rank).to_vec() {
        let width = h.width(id);
        local_x += width / 2.0;
        h.set_x(id, rank, local_x);
        local_x += width / 2.0 + spacing;
    }
}
