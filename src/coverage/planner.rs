use tracing::{debug, info};

use super::direction::DirectionSpec;
use super::offset::{headland_rings, inner_working_polygon};
use super::path::{CoveragePlan, LineSegmentPath};
use super::sweep::sweep_tracks;
use crate::error::{PlanResult, check_spacing};
use crate::geometry::FieldPolygon;

/// Parameters for one coverage plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Operating width in meters; also the headland and track spacing
    pub width: f64,
    pub headland_passes: usize,
    pub direction: DirectionSpec,
    pub boustrophedon: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            headland_passes: 2,
            direction: DirectionSpec::LongestEdgeParallel,
            boustrophedon: true,
        }
    }
}

impl PlannerConfig {
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_headland_passes(mut self, passes: usize) -> Self {
        self.headland_passes = passes;
        self
    }

    pub fn with_direction(mut self, direction: DirectionSpec) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_boustrophedon(mut self, boustrophedon: bool) -> Self {
        self.boustrophedon = boustrophedon;
        self
    }
}

/// Headland rings followed by interior sweep tracks
#[derive(Debug, Clone, Default)]
pub struct CoveragePlanner {
    config: PlannerConfig,
}

impl CoveragePlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan coverage of `polygon`
    ///
    /// # Algorithm
    /// 1. Resolve the direction against the original boundary
    /// 2. Offset the boundary inward once per headland pass
    /// 3. Emit each ring re-closed, outermost first
    /// 4. Sweep the innermost ring (or the boundary if there is none)
    pub fn plan(&self, polygon: &FieldPolygon) -> PlanResult<CoveragePlan> {
        let (headland, inner, angle) = self.headland(polygon)?;
        let tracks = sweep_tracks(&inner, self.config.width, angle, self.config.boustrophedon)?;

        info!(
            rings = headland.len(),
            tracks = tracks.len(),
            angle,
            "coverage plan ready"
        );
        Ok(CoveragePlan::new(headland, tracks, angle))
    }

    /// Plan with a second interior sweep perpendicular to the first
    ///
    /// Both sweeps run concurrently; the cross tracks follow the primary
    /// tracks in the plan.
    pub fn plan_checkerboard(&self, polygon: &FieldPolygon) -> PlanResult<CoveragePlan> {
        let (headland, inner, angle) = self.headland(polygon)?;
        let width = self.config.width;
        let boustrophedon = self.config.boustrophedon;

        let (primary, cross) = rayon::join(
            || sweep_tracks(&inner, width, angle, boustrophedon),
            || sweep_tracks(&inner, width, angle + 90.0, boustrophedon),
        );

        let mut tracks = primary?;
        let cross = cross?;
        debug!(
            primary = tracks.len(),
            cross = cross.len(),
            "checkerboard sweeps"
        );
        tracks.extend(cross);

        Ok(CoveragePlan::new(headland, tracks, angle))
    }

    fn headland(
        &self,
        polygon: &FieldPolygon,
    ) -> PlanResult<(Vec<LineSegmentPath>, FieldPolygon, f64)> {
        let width = check_spacing(self.config.width)?;
        let angle = self.config.direction.resolve(polygon)?;

        let rings = headland_rings(polygon, width, self.config.headland_passes)?;
        if rings.len() < self.config.headland_passes {
            debug!(
                requested = self.config.headland_passes,
                produced = rings.len(),
                "field interior exhausted before all headland passes"
            );
        }

        let inner = inner_working_polygon(polygon, &rings).clone();
        let paths = rings
            .iter()
            .filter_map(|ring| LineSegmentPath::new(ring.exterior_ring()))
            .collect();

        Ok((paths, inner, angle))
    }
}

/// One-shot planning with explicit parameters
pub fn plan(
    polygon: &FieldPolygon,
    width: f64,
    headland_passes: usize,
    direction: DirectionSpec,
    boustrophedon: bool,
) -> PlanResult<CoveragePlan> {
    let config = PlannerConfig {
        width,
        headland_passes,
        direction,
        boustrophedon,
    };
    CoveragePlanner::new(config).plan(polygon)
}
