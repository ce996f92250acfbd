use thiserror::Error;

/// Errors reported when starting a snapping fling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapperError {
    #[error("maximum fling distance must be greater than 0, got {0}")]
    InvalidMaxFlingDistance(f32),

    #[error("snap index {index} is out of range for a list of {item_count} items")]
    TargetIndexOutOfRange { index: usize, item_count: usize },

    #[error("spring needs positive stiffness and damping ratio (stiffness {stiffness}, damping ratio {damping_ratio})")]
    InvalidSpringSpec { stiffness: f32, damping_ratio: f32 },

    #[error("consumption epsilon must be a finite non-negative number, got {0}")]
    InvalidEpsilon(f32),
}
