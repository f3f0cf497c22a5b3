#![forbid(unsafe_code)]

//! Coordinate assignment for layered (rank-based) graph layouts.
//!
//! `narwhal` takes a hierarchy that is already ranked and ordered, including dummy nodes for
//! edges spanning several ranks, and computes a position for every vertex and a control-point
//! route for every edge:
//!
//! 1. [`seed`] packs each rank left to right, centred on the widest rank.
//! 2. [`median`] sweeps ranks towards the median of their neighbours, keeping the sweep with the
//!    least displacement.
//! 3. [`relax`] propagates single-cell moves through a work queue.
//! 4. [`straighten`] aligns the dummy nodes of long edges.
//! 5. [`finalize`] commits vertex positions and emits edge routes with jetties.
//!
//! Real vertices and edges stay owned by the caller and are reached through [`GraphFacade`].

pub mod assignment;
pub mod config;
pub mod connectivity;
pub mod coordinate_system;
pub mod error;
pub mod facade;
pub mod finalize;
pub mod geometry;
pub mod median;
pub mod model;
pub mod relax;
pub mod result;
pub mod seed;
pub mod straighten;
pub mod weight;

pub use assignment::CoordinateAssignment;
pub use config::{CoordinateOptions, EdgeStyle, Orientation};
pub use error::{Error, Result};
pub use facade::{GraphFacade, SimpleGraph};
pub use geometry::{Point, Rect, Size};
pub use model::{Cell, CellId, EdgeChain, EdgeId, Hierarchy, RankSlot, VertexCell, VertexId};
pub use result::{Channel, EdgeRoute, IterationReport, LayoutResult, LayoutStats, RankBand};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the whole coordinate assignment over `hierarchy`.
pub fn layout<F: GraphFacade>(
    hierarchy: &mut Hierarchy,
    facade: &mut F,
    options: &CoordinateOptions,
) -> Result<LayoutResult> {
    let mut run = CoordinateAssignment::new(hierarchy, options.clone())?;
    run.execute(hierarchy, facade)
}
