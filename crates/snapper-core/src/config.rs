//! Configuration of a [`SnapperFlingBehavior`](crate::SnapperFlingBehavior).

use std::fmt;
use std::rc::Rc;

use snapper_animation::{FloatDecayAnimationSpec, SplineBasedDecaySpec, SpringSpec};

use crate::error::SnapperError;
use crate::geometry::SnapGeometry;
use crate::resolver::ResolverTuning;
use crate::snap_index::SnapIndexFn;
use crate::snap_offsets::{SnapOffsetPolicy, SnapOffsets};

/// Largest distance a fling may travel, computed from the geometry at fling
/// start. Must return a value greater than 0.
pub type MaxFlingDistanceFn = dyn Fn(&SnapGeometry<'_>) -> f32;

/// Allowed difference, in pixels, between the scroll requested from the sink
/// and the scroll it consumed before the fling counts as having hit an edge.
pub const DEFAULT_CONSUMPTION_EPSILON: f32 = 0.5;

/// Default maximum fling distance: unlimited.
pub fn unlimited_fling_distance(_: &SnapGeometry<'_>) -> f32 {
    f32::INFINITY
}

/// Everything that shapes a snapping fling.
///
/// ```
/// use snapper_core::{snap_index, SnapOffsets, SnapperConfig};
///
/// let config = SnapperConfig::default()
///     .with_snap_offset(SnapOffsets::Start)
///     .with_snap_index(snap_index::one_page_at_a_time());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct SnapperConfig {
    pub snap_offset: Rc<dyn SnapOffsetPolicy>,
    pub decay_spec: Rc<dyn FloatDecayAnimationSpec>,
    pub spring_spec: SpringSpec,
    pub maximum_fling_distance: Rc<MaxFlingDistanceFn>,
    pub snap_index: Option<Rc<SnapIndexFn>>,
    /// Hand the fling over to the spring once it is one item away from a
    /// target at least two items from where it started.
    pub fling_then_spring: bool,
    pub tuning: ResolverTuning,
    pub consumption_epsilon: f32,
}

impl SnapperConfig {
    pub fn with_snap_offset(mut self, policy: impl SnapOffsetPolicy + 'static) -> Self {
        self.snap_offset = Rc::new(policy);
        self
    }

    pub fn with_decay_spec(mut self, spec: impl FloatDecayAnimationSpec + 'static) -> Self {
        self.decay_spec = Rc::new(spec);
        self
    }

    pub fn with_spring_spec(mut self, spec: SpringSpec) -> Self {
        self.spring_spec = spec;
        self
    }

    pub fn with_maximum_fling_distance(
        mut self,
        distance: impl Fn(&SnapGeometry<'_>) -> f32 + 'static,
    ) -> Self {
        self.maximum_fling_distance = Rc::new(distance);
        self
    }

    pub fn with_snap_index(
        mut self,
        snap_index: impl Fn(&SnapGeometry<'_>, usize, usize) -> usize + 'static,
    ) -> Self {
        self.snap_index = Some(Rc::new(snap_index));
        self
    }

    pub fn with_fling_then_spring(mut self, enabled: bool) -> Self {
        self.fling_then_spring = enabled;
        self
    }

    pub fn with_tuning(mut self, tuning: ResolverTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_consumption_epsilon(mut self, epsilon: f32) -> Self {
        self.consumption_epsilon = epsilon;
        self
    }

    /// Checks the parts of the configuration that can be checked without a
    /// layout.
    pub fn validate(&self) -> Result<(), SnapperError> {
        if !self.spring_spec.is_valid() {
            return Err(SnapperError::InvalidSpringSpec {
                stiffness: self.spring_spec.stiffness,
                damping_ratio: self.spring_spec.damping_ratio,
            });
        }
        if !(self.consumption_epsilon.is_finite() && self.consumption_epsilon >= 0.0) {
            return Err(SnapperError::InvalidEpsilon(self.consumption_epsilon));
        }
        Ok(())
    }
}

impl Default for SnapperConfig {
    fn default() -> Self {
        Self {
            snap_offset: Rc::new(SnapOffsets::Center),
            decay_spec: Rc::new(SplineBasedDecaySpec::default()),
            spring_spec: SpringSpec::snap_default(),
            maximum_fling_distance: Rc::new(unlimited_fling_distance),
            snap_index: None,
            fling_then_spring: true,
            tuning: ResolverTuning::default(),
            consumption_epsilon: DEFAULT_CONSUMPTION_EPSILON,
        }
    }
}

impl fmt::Debug for SnapperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapperConfig")
            .field("spring_spec", &self.spring_spec)
            .field("snap_index", &self.snap_index.is_some())
            .field("fling_then_spring", &self.fling_then_spring)
            .field("tuning", &self.tuning)
            .field("consumption_epsilon", &self.consumption_epsilon)
            .finish_non_exhaustive()
    }
}
