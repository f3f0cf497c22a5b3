//! Layout output.

use crate::geometry::{Point, Rect};
use crate::model::{CellId, EdgeId, VertexId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRoute {
    pub edge: EdgeId,
    pub chain: CellId,
    /// Control points in model coordinates, from the real source to the real target.
    pub points: Vec<Point>,
    /// Perpendicular shift applied to the intermediate points of this parallel edge.
    pub parallel_offset: f64,
    /// Whether the points were emitted against the rank direction.
    pub reversed: bool,
}

/// Extent of a rank across the rank axis, in layout coordinates (before axis transposition).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankBand {
    pub top: f64,
    pub bottom: f64,
}

/// Routing channel between rank `upper` and rank `upper + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Channel {
    pub upper: usize,
    /// Midline used for the control points of long edges.
    pub mid: f64,
    /// Bounds inset by `channel_buffer` from the neighbouring rank bands.
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationReport {
    pub iteration: usize,
    pub x_delta: f64,
    pub committed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutStats {
    pub iterations: Vec<IterationReport>,
    /// Delta of the layout that was finally kept.
    pub best_x_delta: Option<f64>,
    pub relaxation_steps: usize,
    pub relaxation_budget_exhausted: bool,
    /// Chains whose dummy nodes were realigned by the path straightener.
    pub straightened_chains: Vec<CellId>,
    pub missing_bounds: Vec<VertexId>,
}

impl LayoutStats {
    /// Smallest delta among the committed iterations.
    pub fn min_committed_x_delta(&self) -> Option<f64> {
        self.iterations
            .iter()
            .filter(|it| it.committed)
            .map(|it| it.x_delta)
            .reduce(f64::min)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub vertices: Vec<(VertexId, Rect)>,
    pub edges: Vec<EdgeRoute>,
    pub rank_bands: Vec<RankBand>,
    pub channels: Vec<Channel>,
    /// Largest coordinate reached along the rank axis.
    pub limit_x: f64,
    pub stats: LayoutStats,
}

impl LayoutResult {
    pub fn vertex(&self, id: VertexId) -> Option<Rect> {
        self.vertices
            .iter()
            .find_map(|(v, rect)| (*v == id).then_some(*rect))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeRoute> {
        self.edges.iter().find(|route| route.edge == id)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
