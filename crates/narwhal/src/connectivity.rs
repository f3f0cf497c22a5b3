//! Adjacent-rank neighbour cache.
//!
//! Built once per run and read-only afterwards. For a cell on rank `r`, "next layer" neighbours
//! sit on rank `r + 1` and "previous layer" neighbours on rank `r - 1`.

use crate::model::{Cell, CellId, Hierarchy};
use rustc_hash::FxHashMap as HashMap;

/// A neighbouring cell and the chain that links it to the cell being inspected.
///
/// When the neighbour is a dummy node, `cell == chain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub cell: CellId,
    pub chain: CellId,
}

#[derive(Debug, Clone, Default)]
pub struct Connectivity {
    next: HashMap<(CellId, usize), Vec<Neighbor>>,
    previous: HashMap<(CellId, usize), Vec<Neighbor>>,
}

impl Connectivity {
    pub fn build(h: &Hierarchy) -> Self {
        let mut out = Self::default();
        for id in h.cell_ids() {
            let Some(cell) = h.cell(id) else {
                continue;
            };
            match cell {
                Cell::Vertex(v) => {
                    let next = v
                        .outgoing
                        .iter()
                        .filter_map(|&chain_id| {
                            let chain = h.chain(chain_id)?;
                            let cell = if chain.dummy_count() == 0 {
                                chain.target
                            } else {
                                chain_id
                            };
                            Some(Neighbor {
                                cell,
                                chain: chain_id,
                            })
                        })
                        .collect();
                    let previous = v
                        .incoming
                        .iter()
                        .filter_map(|&chain_id| {
                            let chain = h.chain(chain_id)?;
                            let cell = if chain.dummy_count() == 0 {
                                chain.source
                            } else {
                                chain_id
                            };
                            Some(Neighbor {
                                cell,
                                chain: chain_id,
                            })
                        })
                        .collect();
                    out.next.insert((id, v.rank), next);
                    out.previous.insert((id, v.rank), previous);
                }
                Cell::Edge(e) => {
                    for rank in e.dummy_ranks() {
                        let next = if rank + 1 == e.max_rank {
                            e.target
                        } else {
                            id
                        };
                        let previous = if rank - 1 == e.min_rank {
                            e.source
                        } else {
                            id
                        };
                        out.next.insert(
                            (id, rank),
                            vec![Neighbor {
                                cell: next,
                                chain: id,
                            }],
                        );
                        out.previous.insert(
                            (id, rank),
                            vec![Neighbor {
                                cell: previous,
                                chain: id,
                            }],
                        );
                    }
                }
            }
        }
        out
    }

    pub fn next_layer(&self, cell: CellId, rank: usize) -> &[Neighbor] {
        self.next.get(&(cell, rank)).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn previous_layer(&self, cell: CellId, rank: usize) -> &[Neighbor] {
        self.previous
            .get(&(cell, rank))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Neighbours on `reference`, which must be `rank - 1` or `rank + 1`.
    pub fn toward(&self, cell: CellId, rank: usize, reference: usize) -> &[Neighbor] {
        if reference > rank {
            self.next_layer(cell, rank)
        } else {
            self.previous_layer(cell, rank)
        }
    }
}
