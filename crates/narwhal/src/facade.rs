//! Callback surface into the graph that owns the real vertices and edges.

use crate::geometry::{Point, Rect, Size};
use crate::model::{EdgeId, VertexId};
use std::collections::BTreeMap;

pub trait GraphFacade {
    /// Unrotated size of a vertex, or `None` when the graph cannot resolve it.
    fn vertex_bounds(&self, vertex: VertexId) -> Option<Size>;

    /// Moves the top-left corner of a vertex and returns its previous bounds, if any.
    fn set_vertex_location(&mut self, vertex: VertexId, x: f64, y: f64) -> Option<Rect>;

    fn set_edge_points(&mut self, edge: EdgeId, points: Vec<Point>);

    /// Visible source terminal of a real edge.
    fn edge_source(&self, edge: EdgeId) -> Option<VertexId>;
}

/// A `BTreeMap`-backed facade, good enough for headless callers and tests.
#[derive(Debug, Clone, Default)]
pub struct SimpleGraph {
    sizes: BTreeMap<VertexId, Size>,
    locations: BTreeMap<VertexId, Point>,
    sources: BTreeMap<EdgeId, VertexId>,
    points: BTreeMap<EdgeId, Vec<Point>>,
    edge_point_writes: usize,
}

impl SimpleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: VertexId, width: f64, height: f64) {
        self.sizes.insert(vertex, Size::new(width, height));
    }

    pub fn add_edge(&mut self, edge: EdgeId, source: VertexId) {
        self.sources.insert(edge, source);
    }

    pub fn bounds(&self, vertex: VertexId) -> Option<Rect> {
        let size = self.sizes.get(&vertex)?;
        let loc = self.locations.get(&vertex)?;
        Some(Rect::new(loc.x, loc.y, size.width, size.height))
    }

    pub fn points(&self, edge: EdgeId) -> Option<&[Point]> {
        self.points.get(&edge).map(Vec::as_slice)
    }

    /// Number of `set_edge_points` calls received so far.
    pub fn edge_point_writes(&self) -> usize {
        self.edge_point_writes
    }
}

impl GraphFacade for SimpleGraph {
    fn vertex_bounds(&self, vertex: VertexId) -> Option<Size> {
        self.sizes.get(&vertex).copied()
    }

    fn set_vertex_location(&mut self, vertex: VertexId, x: f64, y: f64) -> Option<Rect> {
        let previous = self.bounds(vertex);
        self.locations.insert(vertex, Point::new(x, y));
        previous
    }

    fn set_edge_points(&mut self, edge: EdgeId, points: Vec<Point>) {
        self.edge_point_writes += 1;
        self.points.insert(edge, points);
    }

    fn edge_source(&self, edge: EdgeId) -> Option<VertexId> {
        self.sources.get(&edge).copied()
    }
}
