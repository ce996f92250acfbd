//! One fling, from the first decay frame to the spring coming to rest.

use snapper_animation::{DecayAnimation, SpringAnimation, SpringSpec};

use super::FlingPhase;
use crate::config::SnapperConfig;
use crate::geometry::SnapGeometry;
use crate::layout::{LayoutSource, ScrollSink};
use crate::resolver::FlingDirection;

/// Deltas smaller than this are not sent to the sink.
const MIN_SCROLL_DELTA: f32 = 0.001;

/// The spring's end value is only corrected when the layout disagrees with
/// it by at least this many pixels. Smaller differences come from offsets
/// being rounded to whole pixels.
const RETARGET_THRESHOLD: f32 = 1.0;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Exit {
    /// The spring came to rest, or decay ended on the target snap.
    Settled,
    /// The sink consumed less than requested.
    EdgeReached,
    /// The target was passed and the remaining distance applied at once.
    SnappedBack,
    /// No item is laid out any more.
    LayoutLost,
}

pub(super) enum Tick {
    Running,
    Finished(Exit),
}

enum Motion {
    Decay(DecayAnimation),
    Spring {
        animation: SpringAnimation,
        last_value: f32,
    },
}

pub(super) struct FlingSession {
    initial_index: usize,
    target_index: usize,
    /// Direction of travel of the running phase.
    direction: FlingDirection,
    /// Pixels consumed by the sink so far.
    scrolled: f32,
    residual_velocity: f32,
    motion: Motion,
}

impl FlingSession {
    pub(super) fn decay(
        config: &SnapperConfig,
        initial_velocity: f32,
        initial_index: usize,
        target_index: usize,
    ) -> Self {
        log::debug!(
            "starting decay. velocity: {initial_velocity}, from: {initial_index}, target: {target_index}"
        );
        Self {
            initial_index,
            target_index,
            direction: FlingDirection::of(initial_velocity),
            scrolled: 0.0,
            residual_velocity: initial_velocity,
            motion: Motion::Decay(DecayAnimation::new(
                config.decay_spec.clone(),
                initial_velocity,
            )),
        }
    }

    pub(super) fn spring(
        config: &SnapperConfig,
        geometry: &SnapGeometry<'_>,
        initial_velocity: f32,
        initial_index: usize,
        target_index: usize,
    ) -> Self {
        let (direction, velocity, animation) =
            spring_towards(config.spring_spec, geometry, target_index, initial_velocity);
        log::debug!(
            "starting spring. velocity: {velocity}, from: {initial_index}, target: {target_index}, distance: {}",
            animation.target()
        );
        Self {
            initial_index,
            target_index,
            direction,
            scrolled: 0.0,
            residual_velocity: velocity,
            motion: Motion::Spring {
                animation,
                last_value: 0.0,
            },
        }
    }

    pub(super) fn phase(&self) -> FlingPhase {
        match self.motion {
            Motion::Decay(_) => FlingPhase::Decay,
            Motion::Spring { .. } => FlingPhase::Spring,
        }
    }

    pub(super) fn target_index(&self) -> usize {
        self.target_index
    }

    pub(super) fn residual_velocity(&self) -> f32 {
        self.residual_velocity
    }

    pub(super) fn scrolled(&self) -> f32 {
        self.scrolled
    }

    pub(super) fn tick<L, S>(
        &mut self,
        config: &SnapperConfig,
        layout: &L,
        sink: &S,
        frame_time_nanos: u64,
    ) -> Tick
    where
        L: LayoutSource + ?Sized,
        S: ScrollSink + ?Sized,
    {
        match self.motion {
            Motion::Decay(_) => self.tick_decay(config, layout, sink, frame_time_nanos),
            Motion::Spring { .. } => self.tick_spring(config, layout, sink, frame_time_nanos),
        }
    }

    fn tick_decay<L, S>(
        &mut self,
        config: &SnapperConfig,
        layout: &L,
        sink: &S,
        frame_time_nanos: u64,
    ) -> Tick
    where
        L: LayoutSource + ?Sized,
        S: ScrollSink + ?Sized,
    {
        let Motion::Decay(animation) = &mut self.motion else {
            return Tick::Running;
        };
        let frame = animation.on_frame(frame_time_nanos);
        let consumed = self.scroll(sink, frame.delta);
        self.residual_velocity = frame.velocity;
        log::trace!(
            "decay frame. value: {}, delta: {}, consumed: {consumed}, velocity: {}",
            frame.value,
            frame.delta,
            frame.velocity
        );

        if (frame.delta - consumed).abs() > config.consumption_epsilon {
            log::debug!(
                "decay hit an edge. requested: {}, consumed: {consumed}",
                frame.delta
            );
            return Tick::Finished(Exit::EdgeReached);
        }

        let snapshot = layout.snapshot();
        let geometry = SnapGeometry::new(&snapshot, config.snap_offset.as_ref());
        let Some(remaining) = geometry.tracking_distance_to_index_snap(self.target_index) else {
            return Tick::Finished(Exit::LayoutLost);
        };

        // With only spacing at the snap edge there is no current item, and
        // neither check applies until the next item arrives.
        if let Some(current) = geometry.current_index() {
            if self.snap_back_if_passed(&geometry, current, sink) {
                return Tick::Finished(Exit::SnappedBack);
            }

            if self.should_hand_over(config, current) {
                log::debug!(
                    "one item away from target {}, handing over to spring",
                    self.target_index
                );
                self.start_spring(config.spring_spec, &geometry, frame.velocity);
                return Tick::Running;
            }
        }

        if frame.finished {
            if remaining == 0 {
                return Tick::Finished(Exit::Settled);
            }
            log::debug!("decay ended, springing to target {}", self.target_index);
            self.start_spring(config.spring_spec, &geometry, frame.velocity);
        }
        Tick::Running
    }

    fn tick_spring<L, S>(
        &mut self,
        config: &SnapperConfig,
        layout: &L,
        sink: &S,
        frame_time_nanos: u64,
    ) -> Tick
    where
        L: LayoutSource + ?Sized,
        S: ScrollSink + ?Sized,
    {
        let Motion::Spring {
            animation,
            last_value,
        } = &mut self.motion
        else {
            return Tick::Running;
        };
        let value = animation.on_frame(frame_time_nanos);
        let delta = value - *last_value;
        *last_value = value;
        let velocity = animation.velocity();

        let consumed = self.scroll(sink, delta);
        self.residual_velocity = velocity;
        log::trace!(
            "spring frame. value: {value}, delta: {delta}, consumed: {consumed}, velocity: {velocity}"
        );

        let snapshot = layout.snapshot();
        let geometry = SnapGeometry::new(&snapshot, config.snap_offset.as_ref());
        let Some(remaining) = geometry.tracking_distance_to_index_snap(self.target_index) else {
            return Tick::Finished(Exit::LayoutLost);
        };

        if let Some(current) = geometry.current_index() {
            if self.snap_back_if_passed(&geometry, current, sink) {
                return Tick::Finished(Exit::SnappedBack);
            }
        }

        if (delta - consumed).abs() > config.consumption_epsilon {
            log::debug!("spring hit an edge. requested: {delta}, consumed: {consumed}");
            return Tick::Finished(Exit::EdgeReached);
        }

        // Estimated distances become exact once the target is laid out.
        let remaining = remaining as f32;
        let Motion::Spring {
            animation,
            last_value,
        } = &mut self.motion
        else {
            return Tick::Running;
        };
        let corrected = *last_value + remaining;
        if (corrected - animation.target()).abs() >= RETARGET_THRESHOLD {
            log::trace!(
                "retargeting spring from {} to {corrected}",
                animation.target()
            );
            animation.retarget(corrected);
        }

        if animation.is_finished() {
            Tick::Finished(Exit::Settled)
        } else {
            Tick::Running
        }
    }

    fn start_spring(&mut self, spec: SpringSpec, geometry: &SnapGeometry<'_>, velocity: f32) {
        let (direction, velocity, animation) =
            spring_towards(spec, geometry, self.target_index, velocity);
        self.direction = direction;
        self.residual_velocity = velocity;
        self.motion = Motion::Spring {
            animation,
            last_value: 0.0,
        };
    }

    /// Fling-then-spring: once a long fling is one item short of its target,
    /// the spring finishes the job.
    fn should_hand_over(&self, config: &SnapperConfig, current: usize) -> bool {
        if !config.fling_then_spring || self.initial_index.abs_diff(self.target_index) < 2 {
            return false;
        }
        match self.direction {
            FlingDirection::Forward => current + 1 >= self.target_index,
            FlingDirection::Backward => current <= self.target_index,
            FlingDirection::None => false,
        }
    }

    /// If travel has carried the target past its snap offset, scrolls back
    /// onto it at once.
    fn snap_back_if_passed<S>(
        &mut self,
        geometry: &SnapGeometry<'_>,
        current: usize,
        sink: &S,
    ) -> bool
    where
        S: ScrollSink + ?Sized,
    {
        let passed = match self.direction {
            FlingDirection::Forward => current >= self.target_index,
            FlingDirection::Backward => current < self.target_index,
            FlingDirection::None => false,
        };
        if !passed {
            return false;
        }
        let distance = geometry.distance_to_index_snap(self.target_index);
        if distance != 0 {
            log::debug!(
                "passed target {} (current {current}), snapping back by {distance}",
                self.target_index
            );
            self.scroll(sink, distance as f32);
        }
        true
    }

    fn scroll<S>(&mut self, sink: &S, delta: f32) -> f32
    where
        S: ScrollSink + ?Sized,
    {
        if delta.abs() <= MIN_SCROLL_DELTA {
            return 0.0;
        }
        let consumed = sink.scroll_by(delta);
        self.scrolled += consumed;
        consumed
    }
}

/// A spring from 0 to the target's snap distance. The given velocity is kept
/// only when it already points at the target.
fn spring_towards(
    spec: SpringSpec,
    geometry: &SnapGeometry<'_>,
    target_index: usize,
    velocity: f32,
) -> (FlingDirection, f32, SpringAnimation) {
    let distance = geometry
        .tracking_distance_to_index_snap(target_index)
        .unwrap_or(0) as f32;
    let direction = FlingDirection::of(distance);
    let velocity = if FlingDirection::of(velocity) == direction {
        velocity
    } else {
        0.0
    };
    (
        direction,
        velocity,
        SpringAnimation::new(spec, 0.0, distance, velocity),
    )
}
