//! Finalization: commit vertex positions, derive rank bands and routing channels, then emit
//! edge routes.
//!
//! Vertices go first since they define the top and bottom of every rank; the channels between
//! those bands are where edges are routed.

use crate::assignment::CoordinateAssignment;
use crate::coordinate_system::rect_to_model;
use crate::error::{Error, Result};
use crate::facade::GraphFacade;
use crate::geometry::Rect;
use crate::model::{CellId, Hierarchy};
use crate::result::{Channel, RankBand};

mod jetty;
mod route;

pub use jetty::{Jetty, JettyEnd, JettyPoint, JettyTable, local_edge_processing};
pub use route::set_edge_position;

pub fn set_cell_locations<F: GraphFacade>(
    run: &mut CoordinateAssignment,
    h: &mut Hierarchy,
    facade: &mut F,
) -> Result<()> {
    let rank_count = h.rank_count();
    run.rank_bands = vec![
        RankBand {
            top: f64::INFINITY,
            bottom: f64::NEG_INFINITY,
        };
        rank_count
    ];
    run.vertices.clear();
    run.limit_x = 0.0;

    let vertices: Vec<CellId> = h.vertex_ids().collect();
    for id in vertices {
        set_vertex_location(run, h, facade, id)?;
    }

    // Ranks made only of dummy nodes collapse onto their centre line.
    for (rank, band) in run.rank_bands.iter_mut().enumerate() {
        if band.top > band.bottom {
            let y = run.rank_y.get(rank).copied().unwrap_or(0.0);
            *band = RankBand { top: y, bottom: y };
        }
    }
    run.channels = compute_channels(run)?;

    if run.options.edge_style.uses_jetties() {
        local_edge_processing(run, h);
    } else {
        run.jetty_positions.clear();
    }

    let chains: Vec<CellId> = h.chain_ids().collect();
    for id in chains {
        set_edge_position(run, h, facade, id)?;
    }
    Ok(())
}

/// Commits the top-left corner of one vertex and widens its rank band.
pub fn set_vertex_location<F: GraphFacade>(
    run: &mut CoordinateAssignment,
    h: &Hierarchy,
    facade: &mut F,
    id: CellId,
) -> Result<()> {
    let v = h.vertex(id)?;
    let x = v.slot.committed - v.width / 2.0;
    let y = run.rank_y.get(v.rank).copied().unwrap_or(0.0) - v.height / 2.0;
    let bounds = Rect::new(x, y, v.width, v.height);

    if let Some(band) = run.rank_bands.get_mut(v.rank) {
        band.top = band.top.min(bounds.y);
        band.bottom = band.bottom.max(bounds.bottom());
    }

    let rect = rect_to_model(run.options.orientation, bounds);
    facade.set_vertex_location(v.vertex, rect.x, rect.y);
    run.vertices.push((v.vertex, rect));
    run.limit_x = run.limit_x.max(bounds.right());
    Ok(())
}

fn rank_band(run: &CoordinateAssignment, rank: usize) -> Result<RankBand> {
    run.rank_bands
        .get(rank)
        .copied()
        .ok_or(Error::MissingRankBand { rank })
}

/// Side of `rank`'s band facing `rank + 1`.
pub(crate) fn face_toward_next(run: &CoordinateAssignment, rank: usize) -> Result<f64> {
    let band = rank_band(run, rank)?;
    Ok(if run.options.orientation.is_reversed() {
        band.top
    } else {
        band.bottom
    })
}

/// Side of `rank`'s band facing `rank - 1`.
pub(crate) fn face_toward_previous(run: &CoordinateAssignment, rank: usize) -> Result<f64> {
    let band = rank_band(run, rank)?;
    Ok(if run.options.orientation.is_reversed() {
        band.bottom
    } else {
        band.top
    })
}

/// Midline of the channel between `upper` and `upper + 1`.
pub(crate) fn channel_mid(run: &CoordinateAssignment, upper: usize) -> Result<f64> {
    Ok((face_toward_next(run, upper)? + face_toward_previous(run, upper + 1)?) / 2.0)
}

fn compute_channels(run: &CoordinateAssignment) -> Result<Vec<Channel>> {
    let step = run.options.orientation.rank_step();
    let buffer = run.options.channel_buffer;
    (1..run.rank_bands.len())
        .map(|lower| {
            let upper = lower - 1;
            let mid = channel_mid(run, upper)?;
            let mut start = face_toward_next(run, upper)? + step * buffer;
            let mut end = face_toward_previous(run, lower)? - step * buffer;
            if (end - start) * step < 0.0 {
                start = mid;
                end = mid;
            }
            Ok(Channel {
                upper,
                mid,
                start,
                end,
            })
        })
        .collect()
}
