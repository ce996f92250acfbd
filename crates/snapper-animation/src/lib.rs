//! Animation primitives for snapping flings.
//!
//! Decay specs project how far a fling travels and drive the inertial phase;
//! the spring finishes the fling on an exact value.

pub mod decay_animation;
pub mod decay_spec;
pub mod spring;

pub use decay_animation::{DecayAnimation, DecayFrame};
pub use decay_spec::{
    decay_distance, sample_spline, ExponentialDecaySpec, FlingCalculator, FlingInfo,
    FloatDecayAnimationSpec, SplineBasedDecaySpec, SplineSample,
};
pub use spring::{SpringAnimation, SpringSpec};

#[cfg(test)]
#[path = "tests/decay_animation_tests.rs"]
mod decay_animation_tests;
