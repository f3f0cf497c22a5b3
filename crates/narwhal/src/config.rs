//! Layout options.
//!
//! Every key is optional when deserializing; missing keys fall back to the defaults below, so a
//! caller can override a single spacing with `{"intraCellSpacing": 40}`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Flow direction of the hierarchy.
///
/// `North` puts rank 0 at the top and grows downwards, `South` mirrors that. `West` and `East`
/// are the horizontal counterparts (rank 0 on the left and on the right respectively).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    North,
    South,
    East,
    West,
}

/// How edge routes are shaped. Only `Straight` skips jetty computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Orthogonal,
    #[default]
    Polyline,
    Straight,
    Curve,
}

impl EdgeStyle {
    pub fn uses_jetties(self) -> bool {
        !matches!(self, EdgeStyle::Straight)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinateOptions {
    /// Minimum gap between the facing sides of two cells on the same rank.
    pub intra_cell_spacing: f64,
    /// Gap between the bands of two adjacent ranks.
    pub inter_rank_cell_spacing: f64,
    /// Perpendicular distance between parallel edges sharing a chain.
    pub parallel_edge_spacing: f64,
    pub max_iterations: usize,
    /// Preferred horizontal gap between edge attachment points on a vertex face.
    pub pref_hoz_edge_sep: f64,
    /// Vertical step between neighbouring jetties.
    pub pref_vert_edge_off: f64,
    pub min_edge_jetty: f64,
    /// Clearance kept between a rank band and the routing channel next to it.
    pub channel_buffer: f64,
    pub orientation: Orientation,
    /// When `false` only the seeded positions are used.
    pub fine_tuning: bool,
    /// Left origin of the widest rank.
    pub initial_x: f64,
    pub edge_style: EdgeStyle,
}

impl Default for CoordinateOptions {
    fn default() -> Self {
        Self {
            intra_cell_spacing: 30.0,
            inter_rank_cell_spacing: 100.0,
            parallel_edge_spacing: 10.0,
            max_iterations: 8,
            pref_hoz_edge_sep: 5.0,
            pref_vert_edge_off: 2.0,
            min_edge_jetty: 12.0,
            channel_buffer: 4.0,
            orientation: Orientation::North,
            fine_tuning: true,
            initial_x: 0.0,
            edge_style: EdgeStyle::Polyline,
        }
    }
}

impl CoordinateOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        let spacings = [
            ("intraCellSpacing", self.intra_cell_spacing),
            ("interRankCellSpacing", self.inter_rank_cell_spacing),
            ("parallelEdgeSpacing", self.parallel_edge_spacing),
            ("prefHozEdgeSep", self.pref_hoz_edge_sep),
            ("prefVertEdgeOff", self.pref_vert_edge_off),
            ("minEdgeJetty", self.min_edge_jetty),
            ("channelBuffer", self.channel_buffer),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOption { name, value });
            }
        }
        if !self.initial_x.is_finite() {
            return Err(Error::InvalidOption {
                name: "initialX",
                value: self.initial_x,
            });
        }
        Ok(())
    }
}
