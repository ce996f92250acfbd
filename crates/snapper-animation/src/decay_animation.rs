//! Frame-driven sampling of a decay spec.

use std::rc::Rc;

use crate::decay_spec::FloatDecayAnimationSpec;

/// Result of advancing a [`DecayAnimation`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFrame {
    /// Animated value at this frame.
    pub value: f32,
    /// Value change since the previous frame.
    pub delta: f32,
    /// Velocity at this frame.
    pub velocity: f32,
    /// The decay reached its end at this frame.
    pub finished: bool,
}

/// A decay animation started from zero with a given velocity.
///
/// The first frame only pins the start time (delta 0). Play time is measured
/// from there, so results do not depend on when the fling was requested.
pub struct DecayAnimation {
    spec: Rc<dyn FloatDecayAnimationSpec>,
    initial_velocity: f32,
    start_frame_nanos: Option<u64>,
    last_value: f32,
    duration_nanos: i64,
}

impl DecayAnimation {
    pub fn new(spec: Rc<dyn FloatDecayAnimationSpec>, initial_velocity: f32) -> Self {
        let duration_nanos = spec.get_duration_nanos(0.0, initial_velocity);
        Self {
            spec,
            initial_velocity,
            start_frame_nanos: None,
            last_value: 0.0,
            duration_nanos,
        }
    }

    pub fn initial_velocity(&self) -> f32 {
        self.initial_velocity
    }

    /// Where the decay will come to rest.
    pub fn target_value(&self) -> f32 {
        self.spec.get_target_value(0.0, self.initial_velocity)
    }

    pub fn last_value(&self) -> f32 {
        self.last_value
    }

    pub fn on_frame(&mut self, frame_time_nanos: u64) -> DecayFrame {
        let start = *self.start_frame_nanos.get_or_insert(frame_time_nanos);
        let play_time_nanos = frame_time_nanos.saturating_sub(start) as i64;

        // Spline samples are not exactly 0 at t=0; the start frame never moves.
        let value = if play_time_nanos == 0 {
            0.0
        } else {
            self.spec
                .get_value_from_nanos(play_time_nanos, 0.0, self.initial_velocity)
        };
        let velocity = self
            .spec
            .get_velocity_from_nanos(play_time_nanos, 0.0, self.initial_velocity);
        let finished = play_time_nanos >= self.duration_nanos
            || velocity.abs() < self.spec.abs_velocity_threshold();

        let delta = value - self.last_value;
        self.last_value = value;
        DecayFrame {
            value,
            delta,
            velocity: if finished { 0.0 } else { velocity },
            finished,
        }
    }
}

impl std::fmt::Debug for DecayAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecayAnimation")
            .field("initial_velocity", &self.initial_velocity)
            .field("start_frame_nanos", &self.start_frame_nanos)
            .field("last_value", &self.last_value)
            .field("duration_nanos", &self.duration_nanos)
            .finish()
    }
}
