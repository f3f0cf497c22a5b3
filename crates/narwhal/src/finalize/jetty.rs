//! Jetty (connector stub) placement.
//!
//! For every vertex face, the chains attached to it are sorted by the position of the cell
//! they lead to and their real edges are spread evenly along the face. Each parallel edge gets
//! its own `x` on the face and a `y` offset forming a tent: middle stubs are the longest.

use crate::assignment::CoordinateAssignment;
use crate::model::{CellId, Hierarchy};
use crate::weight::{WeightedCell, by_weight_asc};
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JettyEnd {
    /// End attached to the chain's source vertex (lower rank).
    Source,
    /// End attached to the chain's target vertex (higher rank).
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct JettyPoint {
    pub x: f64,
    pub y_offset: f64,
}

/// Stubs of one real edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Jetty {
    pub source: JettyPoint,
    pub target: JettyPoint,
}

impl Jetty {
    pub fn end(&self, end: JettyEnd) -> JettyPoint {
        match end {
            JettyEnd::Source => self.source,
            JettyEnd::Target => self.target,
        }
    }

    fn set(&mut self, end: JettyEnd, point: JettyPoint) {
        match end {
            JettyEnd::Source => self.source = point,
            JettyEnd::Target => self.target = point,
        }
    }
}

/// Chain id to one entry per parallel edge.
pub type JettyTable = HashMap<CellId, Vec<Jetty>>;

pub fn local_edge_processing(run: &mut CoordinateAssignment, h: &Hierarchy) {
    run.jetty_positions.clear();

    for rank in 0..h.rank_count() {
        for &id in h.rank(rank) {
            let Ok(v) = h.vertex(id) else {
                continue;
            };

            for end in [JettyEnd::Source, JettyEnd::Target] {
                let (neighbors, neighbor_rank) = match end {
                    JettyEnd::Source => (run.connectivity.next_layer(id, rank), rank + 1),
                    JettyEnd::Target if rank > 0 => {
                        (run.connectivity.previous_layer(id, rank), rank - 1)
                    }
                    JettyEnd::Target => continue,
                };
                if neighbors.is_empty() {
                    continue;
                }

                let mut sorted: Vec<WeightedCell> = neighbors
                    .iter()
                    .enumerate()
                    .map(|(i, n)| {
                        WeightedCell::new(n.chain, rank, i, h.committed_x(n.cell, neighbor_rank))
                    })
                    .collect();
                sorted.sort_by(by_weight_asc);

                let edge_counts: Vec<usize> = sorted
                    .iter()
                    .map(|w| h.chain(w.cell).map_or(1, |c| c.edge_count()))
                    .collect();
                let connected_edge_count: usize = edge_counts.iter().sum();
                let group_count = sorted.len();

                let sep = run.options.pref_hoz_edge_sep;
                let mut left_limit = v.slot.committed - v.width / 2.0;
                let mut right_limit = left_limit + v.width;
                // Keep a margin from the corners when the face is wide enough.
                let required_width = (connected_edge_count + 1) as f64 * sep;
                if v.width > required_width + 2.0 * sep {
                    left_limit += sep;
                    right_limit -= sep;
                }

                let edge_spacing = (right_limit - left_limit) / connected_edge_count as f64;
                let mut current_x = left_limit + edge_spacing / 2.0;
                let vert_off = run.options.pref_vert_edge_off;
                let mut current_y_offset = run.options.min_edge_jetty - vert_off;
                let half = group_count as f64 / 2.0;

                for (j, (group, &count)) in sorted.iter().zip(&edge_counts).enumerate() {
                    let j = j as f64;
                    if j < half {
                        current_y_offset += vert_off;
                    } else if j > half {
                        current_y_offset -= vert_off;
                    }
                    let jetties = run.jetty_positions.entry(group.cell).or_default();
                    if jetties.len() < count {
                        jetties.resize(count, Jetty::default());
                    }
                    for jetty in jetties.iter_mut().take(count) {
                        jetty.set(
                            end,
                            JettyPoint {
                                x: current_x,
                                y_offset: current_y_offset,
                            },
                        );
                        current_x += edge_spacing;
                    }
                }
            }
        }
    }
}
