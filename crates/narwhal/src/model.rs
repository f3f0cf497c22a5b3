//! Rank structure handed over by the ranking/ordering stage.
//!
//! Cells live in a single arena owned by [`Hierarchy`] and refer to each other through
//! [`CellId`] handles. Real vertices and edges are owned by the graph facade and are only known
//! here through [`VertexId`] / [`EdgeId`].

use crate::error::{Error, Result};
use crate::result::EdgeRoute;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VertexId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellId(pub usize);

/// Position of a cell on one rank.
///
/// `trial` is what the sweeps read and write; `committed` is the best layout seen so far. The
/// two only meet in [`Hierarchy::commit_trials`] and [`Hierarchy::restore_committed`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RankSlot {
    pub committed: f64,
    pub trial: f64,
}

impl RankSlot {
    fn seeded(x: f64) -> Self {
        Self {
            committed: x,
            trial: x,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexCell {
    pub vertex: VertexId,
    pub rank: usize,
    /// Size along the rank axis / across it, already swapped for east and west layouts.
    pub width: f64,
    pub height: f64,
    pub slot: RankSlot,
    /// Chains leaving this vertex towards higher ranks.
    pub outgoing: Vec<CellId>,
    /// Chains arriving from lower ranks.
    pub incoming: Vec<CellId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeChain {
    pub source: CellId,
    pub target: CellId,
    pub min_rank: usize,
    pub max_rank: usize,
    /// Real edges drawn along this chain; more than one means parallel edges.
    pub edges: Vec<EdgeId>,
    /// Set by cycle removal when the real edges point from `target` to `source`.
    pub reversed: bool,
    pub width: f64,
    /// One slot per intermediate rank, `min_rank + 1 ..= max_rank - 1`.
    slots: Vec<RankSlot>,
    pub(crate) routes: Option<Vec<EdgeRoute>>,
}

impl EdgeChain {
    /// Number of dummy nodes.
    pub fn dummy_count(&self) -> usize {
        self.slots.len()
    }

    pub fn dummy_ranks(&self) -> std::ops::Range<usize> {
        self.min_rank + 1..self.max_rank
    }

    /// Parallel edge count used for sizing. An empty edge list counts as one edge.
    pub fn edge_count(&self) -> usize {
        self.edges.len().max(1)
    }

    pub fn is_finalized(&self) -> bool {
        self.routes.is_some()
    }

    fn slot_index(&self, rank: usize) -> Option<usize> {
        if rank > self.min_rank && rank < self.max_rank {
            Some(rank - self.min_rank - 1)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Vertex(VertexCell),
    Edge(EdgeChain),
}

impl Cell {
    pub fn is_vertex(&self) -> bool {
        matches!(self, Cell::Vertex(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Cell::Edge(_))
    }

    pub fn as_chain(&self) -> Option<&EdgeChain> {
        match self {
            Cell::Edge(e) => Some(e),
            Cell::Vertex(_) => None,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Cell::Vertex(v) => v.width,
            Cell::Edge(e) => e.width,
        }
    }

    pub fn slot(&self, rank: usize) -> Option<&RankSlot> {
        match self {
            Cell::Vertex(v) => (v.rank == rank).then_some(&v.slot),
            Cell::Edge(e) => e.slot_index(rank).map(|i| &e.slots[i]),
        }
    }

    pub fn slot_mut(&mut self, rank: usize) -> Option<&mut RankSlot> {
        match self {
            Cell::Vertex(v) => (v.rank == rank).then_some(&mut v.slot),
            Cell::Edge(e) => match e.slot_index(rank) {
                Some(i) => Some(&mut e.slots[i]),
                None => None,
            },
        }
    }

    pub fn trial_x(&self, rank: usize) -> f64 {
        self.slot(rank).map_or(0.0, |s| s.trial)
    }

    pub fn committed_x(&self, rank: usize) -> f64 {
        self.slot(rank).map_or(0.0, |s| s.committed)
    }

    pub fn set_trial_x(&mut self, rank: usize, x: f64) {
        if let Some(slot) = self.slot_mut(rank) {
            slot.trial = x;
        }
    }

    /// Sets both slots; used by seeding and by the path straightener, which operate on the
    /// committed layout directly.
    pub fn set_x(&mut self, rank: usize, x: f64) {
        if let Some(slot) = self.slot_mut(rank) {
            *slot = RankSlot::seeded(x);
        }
    }

    fn slots_mut(&mut self) -> &mut [RankSlot] {
        match self {
            Cell::Vertex(v) => std::slice::from_mut(&mut v.slot),
            Cell::Edge(e) => &mut e.slots,
        }
    }
}

/// Ordered ranks of layout cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    cells: Vec<Cell>,
    ranks: Vec<Vec<CellId>>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex at the end of `rank`, creating empty ranks as needed.
    pub fn add_vertex(&mut self, vertex: VertexId, rank: usize) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(Cell::Vertex(VertexCell {
            vertex,
            rank,
            width: 0.0,
            height: 0.0,
            slot: RankSlot::default(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }));
        self.ensure_rank(rank);
        self.ranks[rank].push(id);
        id
    }

    /// Connects two vertex cells, appending one dummy node to every intermediate rank.
    ///
    /// `source` must sit on a lower rank than `target`; edges that point the other way after
    /// cycle removal are expressed with `reversed`.
    pub fn add_edge_chain(
        &mut self,
        source: CellId,
        target: CellId,
        edges: Vec<EdgeId>,
        reversed: bool,
    ) -> Result<CellId> {
        let source_rank = self.vertex(source)?.rank;
        let target_rank = self.vertex(target)?.rank;
        if source_rank >= target_rank {
            return Err(Error::InvalidChain {
                source_rank,
                target_rank,
            });
        }

        let id = CellId(self.cells.len());
        let dummies = target_rank - source_rank - 1;
        self.cells.push(Cell::Edge(EdgeChain {
            source,
            target,
            min_rank: source_rank,
            max_rank: target_rank,
            edges,
            reversed,
            width: 0.0,
            slots: vec![RankSlot::default(); dummies],
            routes: None,
        }));
        for rank in source_rank + 1..target_rank {
            self.ranks[rank].push(id);
        }
        if let Some(Cell::Vertex(v)) = self.cells.get_mut(source.0) {
            v.outgoing.push(id);
        }
        if let Some(Cell::Vertex(v)) = self.cells.get_mut(target.0) {
            v.incoming.push(id);
        }
        Ok(id)
    }

    /// Installs the order produced by crossing minimisation.
    pub fn reorder_rank(&mut self, rank: usize, order: Vec<CellId>) -> Result<()> {
        let current = self.ranks.get(rank).ok_or(Error::UnknownRank { rank })?;
        let mut expected = current.clone();
        let mut given = order.clone();
        expected.sort_unstable();
        given.sort_unstable();
        if expected != given {
            return Err(Error::InvalidRankOrder { rank });
        }
        self.ranks[rank] = order;
        Ok(())
    }

    pub fn ranks(&self) -> &[Vec<CellId>] {
        &self.ranks
    }

    pub fn rank(&self, rank: usize) -> &[CellId] {
        self.ranks.get(rank).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rank_count(&self) -> usize {
        self.ranks.len()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.0)
    }

    pub fn vertex(&self, id: CellId) -> Result<&VertexCell> {
        match self.cells.get(id.0) {
            Some(Cell::Vertex(v)) => Ok(v),
            Some(Cell::Edge(_)) => Err(Error::NotAVertex { cell: id }),
            None => Err(Error::UnknownCell { cell: id }),
        }
    }

    pub fn chain(&self, id: CellId) -> Option<&EdgeChain> {
        self.cell(id).and_then(Cell::as_chain)
    }

    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len()).map(CellId)
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cell_ids().filter(|id| self.cells[id.0].is_vertex())
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cell_ids().filter(|id| self.cells[id.0].is_edge())
    }

    /// Width of `id`, or 0 for unknown cells.
    pub fn width(&self, id: CellId) -> f64 {
        self.cell(id).map_or(0.0, Cell::width)
    }

    pub fn trial_x(&self, id: CellId, rank: usize) -> f64 {
        self.cell(id).map_or(0.0, |c| c.trial_x(rank))
    }

    pub fn committed_x(&self, id: CellId, rank: usize) -> f64 {
        self.cell(id).map_or(0.0, |c| c.committed_x(rank))
    }

    pub fn set_trial_x(&mut self, id: CellId, rank: usize, x: f64) {
        if let Some(cell) = self.cells.get_mut(id.0) {
            cell.set_trial_x(rank, x);
        }
    }

    pub fn set_x(&mut self, id: CellId, rank: usize, x: f64) {
        if let Some(cell) = self.cells.get_mut(id.0) {
            cell.set_x(rank, x);
        }
    }

    /// Position of `id` within `rank`.
    pub fn rank_index_of(&self, id: CellId, rank: usize) -> Option<usize> {
        self.rank(rank).iter().position(|&c| c == id)
    }

    pub fn commit_trials(&mut self) {
        for cell in &mut self.cells {
            for slot in cell.slots_mut() {
                slot.committed = slot.trial;
            }
        }
    }

    pub fn restore_committed(&mut self) {
        for cell in &mut self.cells {
            for slot in cell.slots_mut() {
                slot.trial = slot.committed;
            }
        }
    }

    /// Drops per-chain finalization markers so a new layout run recomputes edge routes.
    pub fn clear_routes(&mut self) {
        for cell in &mut self.cells {
            if let Cell::Edge(e) = cell {
                e.routes = None;
            }
        }
    }

    fn ensure_rank(&mut self, rank: usize) {
        if self.ranks.len() <= rank {
            self.ranks.resize_with(rank + 1, Vec::new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_places_one_dummy_per_intermediate_rank() {
        let mut h = Hierarchy::new();
        let a = h.add_vertex(VertexId(0), 0);
        let b = h.add_vertex(VertexId(1), 3);
        let e = h.add_edge_chain(a, b, vec![EdgeId(0)], false).unwrap();

        assert_eq!(h.rank_count(), 4);
        assert_eq!(h.rank(1), &[e]);
        assert_eq!(h.rank(2), &[e]);
        assert_eq!(h.chain(e).unwrap().dummy_count(), 2);
        assert_eq!(h.chain(e).unwrap().dummy_ranks(), 1..3);
    }

    #[test]
    fn chain_must_descend() {
        let mut h = Hierarchy::new();
        let a = h.add_vertex(VertexId(0), 1);
        let b = h.add_vertex(VertexId(1), 1);
        assert!(matches!(
            h.add_edge_chain(a, b, vec![], false),
            Err(Error::InvalidChain { .. })
        ));
    }

    #[test]
    fn reorder_requires_a_permutation() {
        let mut h = Hierarchy::new();
        let a = h.add_vertex(VertexId(0), 0);
        let b = h.add_vertex(VertexId(1), 0);
        h.reorder_rank(0, vec![b, a]).unwrap();
        assert_eq!(h.rank(0), &[b, a]);
        assert!(matches!(
            h.reorder_rank(0, vec![b]),
            Err(Error::InvalidRankOrder { rank: 0 })
        ));
    }

    #[test]
    fn trial_stays_private_until_committed() {
        let mut h = Hierarchy::new();
        let a = h.add_vertex(VertexId(0), 0);
        h.set_x(a, 0, 10.0);
        h.set_trial_x(a, 0, 25.0);
        assert_eq!(h.committed_x(a, 0), 10.0);

        h.restore_committed();
        assert_eq!(h.trial_x(a, 0), 10.0);

        h.set_trial_x(a, 0, 25.0);
        h.commit_trials();
        assert_eq!(h.committed_x(a, 0), 25.0);
    }
}
