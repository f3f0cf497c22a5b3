//! Layout-run context.
//!
//! Everything that only lives for one invocation (connectivity cache, rank geometry, jetty
//! table, running deltas) is owned by [`CoordinateAssignment`] and handed to each stage by
//! reference.

use crate::config::CoordinateOptions;
use crate::connectivity::Connectivity;
use crate::error::Result;
use crate::facade::GraphFacade;
use crate::finalize::{self, Jetty, JettyTable};
use crate::geometry::Rect;
use crate::median;
use crate::model::{CellId, Hierarchy, VertexId};
use crate::relax;
use crate::result::{Channel, IterationReport, LayoutResult, LayoutStats, RankBand};
use crate::seed;
use crate::straighten;
use tracing::{debug, debug_span};

#[derive(Debug, Clone)]
pub struct CoordinateAssignment {
    pub(crate) options: CoordinateOptions,
    pub(crate) connectivity: Connectivity,
    pub(crate) rank_widths: Vec<f64>,
    /// Layout-space `y` of each rank's centre line.
    pub(crate) rank_y: Vec<f64>,
    pub(crate) widest_rank: usize,
    pub(crate) widest_rank_value: f64,
    pub(crate) current_x_delta: f64,
    pub(crate) rank_bands: Vec<RankBand>,
    pub(crate) channels: Vec<Channel>,
    pub(crate) jetty_positions: JettyTable,
    pub(crate) limit_x: f64,
    pub(crate) vertices: Vec<(VertexId, Rect)>,
    pub(crate) stats: LayoutStats,
}

impl CoordinateAssignment {
    pub fn new(h: &Hierarchy, options: CoordinateOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            connectivity: Connectivity::build(h),
            rank_widths: Vec::new(),
            rank_y: Vec::new(),
            widest_rank: 0,
            widest_rank_value: 0.0,
            current_x_delta: 0.0,
            rank_bands: Vec::new(),
            channels: Vec::new(),
            jetty_positions: JettyTable::default(),
            limit_x: 0.0,
            vertices: Vec::new(),
            stats: LayoutStats::default(),
        })
    }

    /// Runs every stage and commits the result through `facade`.
    pub fn execute<F: GraphFacade>(
        &mut self,
        h: &mut Hierarchy,
        facade: &mut F,
    ) -> Result<LayoutResult> {
        let span = debug_span!(
            "coordinate_assignment",
            ranks = h.rank_count(),
            cells = h.cell_count()
        );
        let _guard = span.enter();

        h.clear_routes();
        self.stats = LayoutStats::default();
        self.current_x_delta = 0.0;

        seed::initial_coords(self, h, facade);

        if self.options.fine_tuning {
            relax::min_node(self, h);
            self.fine_tune(h)?;
        }

        finalize::set_cell_locations(self, h, facade)?;
        Ok(self.result(h))
    }

    fn fine_tune(&mut self, h: &mut Hierarchy) -> Result<()> {
        let mut best_x_delta = f64::INFINITY;
        for iteration in 0..self.options.max_iterations {
            if iteration == 0 {
                self.current_x_delta = median::measure_x_delta(self, h);
            } else {
                median::median_pos(self, h, iteration);
                relax::min_node(self, h);
            }

            // Less total displacement means fewer heavily angled edges.
            let committed = self.current_x_delta < best_x_delta;
            if committed {
                h.commit_trials();
                best_x_delta = self.current_x_delta;
            } else {
                h.restore_committed();
            }
            debug!(iteration, x_delta = self.current_x_delta, committed, "sweep");
            self.stats.iterations.push(IterationReport {
                iteration,
                x_delta: self.current_x_delta,
                committed,
            });

            straighten::min_path(self, h)?;
            self.current_x_delta = 0.0;
        }
        self.stats.best_x_delta = best_x_delta.is_finite().then_some(best_x_delta);
        Ok(())
    }

    fn result(&self, h: &Hierarchy) -> LayoutResult {
        let edges = h
            .chain_ids()
            .filter_map(|id| h.chain(id))
            .flat_map(|chain| chain.routes.iter().flatten().cloned())
            .collect();
        LayoutResult {
            vertices: self.vertices.clone(),
            edges,
            rank_bands: self.rank_bands.clone(),
            channels: self.channels.clone(),
            limit_x: self.limit_x,
            stats: self.stats.clone(),
        }
    }

    pub fn rank_widths(&self) -> &[f64] {
        &self.rank_widths
    }

    pub fn rank_y(&self) -> &[f64] {
        &self.rank_y
    }

    pub fn widest_rank(&self) -> usize {
        self.widest_rank
    }

    pub fn current_x_delta(&self) -> f64 {
        self.current_x_delta
    }

    pub fn rank_bands(&self) -> &[RankBand] {
        &self.rank_bands
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn jetties(&self, chain: CellId) -> Option<&[Jetty]> {
        self.jetty_positions.get(&chain).map(Vec::as_slice)
    }

    pub fn stats(&self) -> &LayoutStats {
        &self.stats
    }
}
