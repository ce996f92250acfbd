//! Decay animation specs used by snapping flings.
//!
//! A decay has no target of its own: it starts with a velocity and slows
//! down until it stops. The distance it covers before stopping is what the
//! snap resolver uses to estimate how far a fling "wants" to travel.
//!
//! Two specs are provided:
//! - [`SplineBasedDecaySpec`], the Android scroller spline (the usual
//!   touch-screen feel).
//! - [`ExponentialDecaySpec`], a simple exponential friction curve which is
//!   easy to reason about in tests.

use std::sync::LazyLock;

// ============================================================================
// Scroller spline
// ============================================================================

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const SPLINE_SAMPLES: usize = 100;

/// Bisection tolerance when inverting the tension curve.
const SOLVE_TOLERANCE: f32 = 1e-5;

/// Distance coefficients of the scroller spline, sampled at even time steps.
struct SplineTable {
    positions: [f32; SPLINE_SAMPLES + 1],
}

/// Finds `x` in `[lower, 1]` such that the tension curve evaluates to `alpha`.
///
/// `lower` is advanced as the search narrows. Samples are requested in
/// increasing `alpha` order so the bound stays valid between calls.
fn solve_tension_curve(alpha: f32, lower: &mut f32) -> f32 {
    let mut upper = 1.0f32;
    loop {
        let x = *lower + (upper - *lower) / 2.0;
        let coef = 3.0 * x * (1.0 - x);
        let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
        if (tx - alpha).abs() < SOLVE_TOLERANCE {
            return x;
        }
        if tx > alpha {
            upper = x;
        } else {
            *lower = x;
        }
    }
}

static SPLINE: LazyLock<SplineTable> = LazyLock::new(|| {
    let mut positions = [0.0f32; SPLINE_SAMPLES + 1];
    let mut lower = 0.0f32;
    for (i, slot) in positions.iter_mut().take(SPLINE_SAMPLES).enumerate() {
        let alpha = i as f32 / SPLINE_SAMPLES as f32;
        let x = solve_tension_curve(alpha, &mut lower);
        let coef = 3.0 * x * (1.0 - x);
        *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }
    positions[SPLINE_SAMPLES] = 1.0;
    SplineTable { positions }
});

/// A sample of the scroller spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Fraction (0.0 to 1.0) of the total fling distance covered so far.
    pub distance_coefficient: f32,
    /// Rate of change of `distance_coefficient` per unit of normalized time.
    pub velocity_coefficient: f32,
}

/// Samples the scroller spline at normalized time `t` (clamped to 0..=1).
pub fn sample_spline(t: f32) -> SplineSample {
    let t = t.clamp(0.0, 1.0);
    let index = (SPLINE_SAMPLES as f32 * t) as usize;
    if index >= SPLINE_SAMPLES {
        return SplineSample {
            distance_coefficient: 1.0,
            velocity_coefficient: 0.0,
        };
    }

    let t_low = index as f32 / SPLINE_SAMPLES as f32;
    let t_high = (index + 1) as f32 / SPLINE_SAMPLES as f32;
    let d_low = SPLINE.positions[index];
    let d_high = SPLINE.positions[index + 1];
    let velocity = (d_high - d_low) / (t_high - t_low);
    SplineSample {
        distance_coefficient: d_low + (t - t_low) * velocity,
        velocity_coefficient: velocity,
    }
}

// ============================================================================
// Fling calculator
// ============================================================================

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `ln(0.78) / ln(0.9)`, the scroller's deceleration exponent.
const DECELERATION_RATE: f64 = 2.358_201_6;

/// Physical deceleration for a screen of the given density.
fn physical_coefficient(density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84
}

/// Distance and duration of one fling, as computed by [`FlingCalculator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingInfo {
    /// Initial velocity in px/sec (signed).
    pub initial_velocity: f32,
    /// Unsigned distance travelled until rest.
    pub distance: f32,
    /// Duration in milliseconds.
    pub duration_ms: i64,
}

impl FlingInfo {
    fn normalized_time(&self, time_ms: i64) -> f32 {
        if self.duration_ms > 0 {
            time_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        }
    }

    /// Signed offset from the fling start at `time_ms`.
    pub fn position(&self, time_ms: i64) -> f32 {
        let sample = sample_spline(self.normalized_time(time_ms));
        self.distance * self.initial_velocity.signum() * sample.distance_coefficient
    }

    /// Signed velocity in px/sec at `time_ms`.
    pub fn velocity(&self, time_ms: i64) -> f32 {
        if self.duration_ms <= 0 {
            return 0.0;
        }
        let sample = sample_spline(self.normalized_time(time_ms));
        sample.velocity_coefficient * self.initial_velocity.signum() * self.distance
            / self.duration_ms as f32
            * 1000.0
    }
}

/// Android scroller fling physics for a given friction and screen density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    /// `ViewConfiguration.getScrollFriction()`.
    pub const DEFAULT_FRICTION: f32 = 0.015;

    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: physical_coefficient(density),
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn deceleration(&self, velocity: f32) -> f64 {
        let friction = (self.friction * self.physical_coefficient) as f64;
        (INFLECTION as f64 * velocity.abs() as f64 / friction).ln()
    }

    /// Fling duration in milliseconds.
    pub fn fling_duration(&self, velocity: f32) -> i64 {
        let l = self.deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as i64
    }

    /// Unsigned distance covered before the fling comes to rest.
    pub fn fling_distance(&self, velocity: f32) -> f32 {
        let l = self.deceleration(velocity);
        let exponent = DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l;
        self.friction * self.physical_coefficient * exponent.exp() as f32
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        FlingInfo {
            initial_velocity: velocity,
            distance: self.fling_distance(velocity),
            duration_ms: self.fling_duration(velocity),
        }
    }
}

// ============================================================================
// Decay specs
// ============================================================================

/// A decay curve over a single float value.
///
/// Implementations are stateless: every query is answered from the initial
/// value and velocity, so a frame-driven animation only has to remember when
/// it started.
pub trait FloatDecayAnimationSpec {
    /// Velocity magnitude below which the decay counts as finished.
    fn abs_velocity_threshold(&self) -> f32;

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Value at which the decay comes to rest.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Projected distance of a decay started from zero, i.e. how far a fling
/// with `velocity` would travel on its own.
pub fn decay_distance(spec: &dyn FloatDecayAnimationSpec, velocity: f32) -> f32 {
    spec.get_target_value(0.0, velocity)
}

/// Spline-based decay matching Android fling behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineBasedDecaySpec {
    calculator: FlingCalculator,
}

impl SplineBasedDecaySpec {
    pub fn new(density: f32) -> Self {
        Self {
            calculator: FlingCalculator::with_density(density),
        }
    }

    pub fn with_calculator(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }
}

impl Default for SplineBasedDecaySpec {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FloatDecayAnimationSpec for SplineBasedDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        0.0
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        if initial_velocity == 0.0 {
            return initial_value;
        }
        let info = self.calculator.fling_info(initial_velocity);
        initial_value + info.position(play_time_nanos / 1_000_000)
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        if initial_velocity == 0.0 {
            return 0.0;
        }
        let info = self.calculator.fling_info(initial_velocity);
        info.velocity(play_time_nanos / 1_000_000)
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        if initial_velocity == 0.0 {
            return 0;
        }
        self.calculator.fling_duration(initial_velocity).max(0) * 1_000_000
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        if initial_velocity == 0.0 {
            return initial_value;
        }
        initial_value + self.calculator.fling_distance(initial_velocity) * initial_velocity.signum()
    }
}

/// Exponential friction decay: `v(t) = v0 * e^(friction * t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecaySpec {
    friction: f32,
    abs_velocity_threshold: f32,
}

impl ExponentialDecaySpec {
    const BASE_FRICTION: f32 = -4.2;

    /// `friction_multiplier` scales the base friction; larger values stop
    /// sooner. The velocity threshold is clamped to a small positive value so
    /// the duration stays finite.
    pub fn new(friction_multiplier: f32, abs_velocity_threshold: f32) -> Self {
        Self {
            friction: friction_multiplier.max(0.0001) * Self::BASE_FRICTION,
            abs_velocity_threshold: abs_velocity_threshold.abs().max(0.0001),
        }
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.abs_velocity_threshold
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let seconds = play_time_nanos as f32 / 1_000_000_000.0;
        initial_value
            + initial_velocity / self.friction * ((self.friction * seconds).exp() - 1.0)
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let seconds = play_time_nanos as f32 / 1_000_000_000.0;
        initial_velocity * (self.friction * seconds).exp()
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        if initial_velocity.abs() <= self.abs_velocity_threshold {
            return 0;
        }
        let seconds =
            (self.abs_velocity_threshold / initial_velocity.abs()).ln() / self.friction;
        (seconds as f64 * 1_000_000_000.0) as i64
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        if initial_velocity.abs() <= self.abs_velocity_threshold {
            return initial_value;
        }
        let remaining = self.abs_velocity_threshold / initial_velocity.abs();
        initial_value - initial_velocity / self.friction
            + initial_velocity / self.friction * remaining
    }
}
