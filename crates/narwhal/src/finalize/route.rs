//! Edge route emission.

use super::{channel_mid, face_toward_next, face_toward_previous};
use crate::assignment::CoordinateAssignment;
use crate::config::EdgeStyle;
use crate::coordinate_system::to_model;
use crate::error::{Error, Result};
use crate::facade::GraphFacade;
use crate::finalize::jetty::JettyEnd;
use crate::geometry::Point;
use crate::model::{Cell, CellId, Hierarchy};
use crate::result::EdgeRoute;
use tracing::warn;

/// Emits the points of every real edge of `chain`. A chain is only routed once per run; later
/// calls keep the routes computed first.
pub fn set_edge_position<F: GraphFacade>(
    run: &mut CoordinateAssignment,
    h: &mut Hierarchy,
    facade: &mut F,
    id: CellId,
) -> Result<()> {
    let chain = h.chain(id).ok_or(Error::UnknownCell { cell: id })?;
    if chain.is_finalized() {
        return Ok(());
    }
    if chain.edges.is_empty() {
        warn!(chain = id.0, "edge chain has no real edges, nothing to route");
    }

    let orientation = run.options.orientation;
    let step = orientation.rank_step();
    let curve = run.options.edge_style == EdgeStyle::Curve;
    let parallel_spacing = run.options.parallel_edge_spacing;
    let source_vertex = h.vertex(chain.source)?.vertex;
    let (min_rank, max_rank) = (chain.min_rank, chain.max_rank);
    let jetties = run.jetty_positions.get(&id);

    // Layout-space anchor of a stub and the direction pointing away from its vertex.
    let stub = |end: JettyEnd, y_offset: f64| -> Result<(f64, f64)> {
        Ok(match end {
            JettyEnd::Source => (face_toward_next(run, min_rank)? + step * y_offset, step),
            JettyEnd::Target => (face_toward_previous(run, max_rank)? - step * y_offset, -step),
        })
    };

    let mut routes = Vec::with_capacity(chain.edges.len());
    let mut limit_x = run.limit_x;
    let mut offset_x = 0.0;
    for (m, &edge) in chain.edges.iter().enumerate() {
        // Members of a parallel group can point either way; judge each against the source.
        let reversed = match facade.edge_source(edge) {
            Some(source) => source != source_vertex,
            None => chain.reversed,
        };
        let (first_end, last_end) = if reversed {
            (JettyEnd::Target, JettyEnd::Source)
        } else {
            (JettyEnd::Source, JettyEnd::Target)
        };
        let jetty = jetties.and_then(|j| j.get(m)).copied();

        let mut points: Vec<Point> = Vec::new();
        if let Some(jetty) = jetty {
            let p = jetty.end(first_end);
            let (y, away) = stub(first_end, p.y_offset)?;
            points.push(Point::new(p.x, y));
            if curve {
                points.push(Point::new(p.x, y + away * p.y_offset));
            }
        }

        let mut ranks: Vec<usize> = chain.dummy_ranks().collect();
        if reversed {
            ranks.reverse();
        }
        for rank in ranks {
            let x = h.committed_x(id, rank) + offset_x;
            let before = channel_mid(run, rank - 1)?;
            let after = channel_mid(run, rank)?;
            let (first, second) = if reversed {
                (after, before)
            } else {
                (before, after)
            };
            points.push(Point::new(x, first));
            points.push(Point::new(x, second));
            limit_x = limit_x.max(x);
        }

        if let Some(jetty) = jetty {
            let p = jetty.end(last_end);
            let (y, away) = stub(last_end, p.y_offset)?;
            if curve {
                points.push(Point::new(p.x, y + away * p.y_offset));
            }
            points.push(Point::new(p.x, y));
        }

        let points: Vec<Point> = points
            .into_iter()
            .map(|p| to_model(orientation, p))
            .collect();
        facade.set_edge_points(edge, points.clone());
        routes.push(EdgeRoute {
            edge,
            chain: id,
            points,
            parallel_offset: offset_x,
            reversed,
        });

        // Spread the next parallel edge to the other side: 0, +s, -s, +2s, -2s, ...
        offset_x = if offset_x == 0.0 {
            parallel_spacing
        } else if offset_x > 0.0 {
            -offset_x
        } else {
            -offset_x + parallel_spacing
        };
    }

    run.limit_x = limit_x;
    if let Some(Cell::Edge(chain)) = h.cell_mut(id) {
        chain.routes = Some(routes);
    }
    Ok(())
}
