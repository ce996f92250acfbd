//! Damped spring used to finish a snapping fling.
//!
//! The spring works in absolute units (pixels) rather than normalized
//! progress, so its end value can be moved while it is running. The fling
//! orchestrator relies on that to correct estimated distances once the
//! target item is laid out.

/// Largest integration step. Longer frames are subdivided.
const MAX_STEP_NANOS: u64 = 4_000_000;

/// Spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Speed (units/sec) below which the spring may come to rest.
    pub velocity_threshold: f32,
    /// Distance from the end value below which the spring may come to rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_MEDIUM: f32 = 1500.0;

    /// Pixel visibility threshold; the velocity threshold is derived from it
    /// the same way Compose does.
    const VISIBILITY_THRESHOLD: f32 = 0.01;

    pub fn new(stiffness: f32, damping_ratio: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            velocity_threshold: Self::VISIBILITY_THRESHOLD * 62.5,
            position_threshold: Self::VISIBILITY_THRESHOLD,
        }
    }

    /// The spring snapping flings use by default: medium-low stiffness, no
    /// bounce.
    pub fn snap_default() -> Self {
        Self::new(Self::STIFFNESS_MEDIUM_LOW, Self::DAMPING_RATIO_NO_BOUNCY)
    }

    pub fn stiff() -> Self {
        Self::new(Self::STIFFNESS_MEDIUM, Self::DAMPING_RATIO_NO_BOUNCY)
    }

    pub fn bouncy() -> Self {
        Self::new(Self::STIFFNESS_MEDIUM_LOW, Self::DAMPING_RATIO_LOW_BOUNCY)
    }

    pub fn with_thresholds(mut self, position: f32, velocity: f32) -> Self {
        self.position_threshold = position.abs();
        self.velocity_threshold = velocity.abs();
        self
    }

    /// Whether a spring with these parameters can come to rest.
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.stiffness > 0.0
            && self.damping_ratio.is_finite()
            && self.damping_ratio > 0.0
    }

    fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::snap_default()
    }
}

/// A running spring, advanced by frame time.
#[derive(Debug, Clone)]
pub struct SpringAnimation {
    spec: SpringSpec,
    value: f32,
    velocity: f32,
    target: f32,
    last_frame_nanos: Option<u64>,
    at_rest: bool,
}

impl SpringAnimation {
    pub fn new(spec: SpringSpec, initial_value: f32, target: f32, initial_velocity: f32) -> Self {
        let mut spring = Self {
            spec,
            value: initial_value,
            velocity: initial_velocity,
            target,
            last_frame_nanos: None,
            at_rest: false,
        };
        spring.settle_if_at_rest();
        spring
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.at_rest
    }

    /// Moves the end value, keeping position and velocity. Wakes the spring
    /// if the new end value is noticeably different.
    pub fn retarget(&mut self, target: f32) {
        if (self.target - target).abs() > self.spec.position_threshold {
            self.at_rest = false;
        }
        self.target = target;
        self.settle_if_at_rest();
    }

    /// Advances to `frame_time_nanos`. The first frame only records the
    /// start time.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> f32 {
        let last = *self.last_frame_nanos.get_or_insert(frame_time_nanos);
        self.last_frame_nanos = Some(frame_time_nanos);
        self.advance(frame_time_nanos.saturating_sub(last));
        self.value
    }

    /// Integrates `elapsed_nanos` using semi-implicit Euler steps.
    pub fn advance(&mut self, elapsed_nanos: u64) {
        if self.at_rest {
            return;
        }
        let stiffness = self.spec.stiffness;
        let damping = self.spec.damping();
        let mut remaining = elapsed_nanos;
        while remaining > 0 {
            let step_nanos = remaining.min(MAX_STEP_NANOS);
            remaining -= step_nanos;
            let step = step_nanos as f32 / 1_000_000_000.0;

            let force = -stiffness * (self.value - self.target) - damping * self.velocity;
            self.velocity += force * step;
            self.value += self.velocity * step;

            if self.settle_if_at_rest() {
                break;
            }
        }
    }

    fn settle_if_at_rest(&mut self) -> bool {
        let near = (self.value - self.target).abs() < self.spec.position_threshold;
        let slow = self.velocity.abs() < self.spec.velocity_threshold;
        if near && slow {
            self.value = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
        self.at_rest
    }
}

#[cfg(test)]
#[path = "tests/spring_tests.rs"]
mod tests;
