//! Snapping fling physics for lists of discrete items.
//!
//! Given the current layout of a list and the velocity a fling was released
//! with, [`SnapperFlingBehavior`] picks the item the fling should come to rest
//! on and animates the scroll position onto that item's snap offset.
//!
//! The list is reached through two small traits: [`LayoutSource`] reports
//! what is laid out and [`ScrollSink`] moves the content.

pub mod config;
pub mod error;
pub mod fling;
pub mod frame_clock;
pub mod geometry;
pub mod layout;
pub mod resolver;
pub mod snap_index;
pub mod snap_offsets;

pub use config::{
    unlimited_fling_distance, MaxFlingDistanceFn, SnapperConfig, DEFAULT_CONSUMPTION_EPSILON,
};
pub use error::SnapperError;
pub use fling::{FlingPhase, FlingStatus, SnapperFlingBehavior};
pub use frame_clock::{FixedStepFrameClock, FrameClock};
pub use geometry::SnapGeometry;
pub use layout::{Item, LayoutSnapshot, LayoutSource, ScrollSink, VisibleItems};
pub use resolver::{FlingDirection, ResolverTuning, TargetIndexResolver};
pub use snap_index::SnapIndexFn;
pub use snap_offsets::{SnapOffsetPolicy, SnapOffsets};

pub use snapper_animation::{
    ExponentialDecaySpec, FloatDecayAnimationSpec, SplineBasedDecaySpec, SpringSpec,
};
