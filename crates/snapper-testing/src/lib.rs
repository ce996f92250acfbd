//! Test doubles for exercising snapping flings without a UI toolkit.

pub mod assertions;
pub mod decay;
pub mod fake_list;

pub use assertions::{assert_snapped, snap_state, SnapState};
pub use decay::FixedDistanceDecaySpec;
pub use fake_list::{FakeLazyList, ScrollCall};

pub mod prelude {
    pub use crate::assertions::{assert_snapped, snap_state, SnapState};
    pub use crate::decay::FixedDistanceDecaySpec;
    pub use crate::fake_list::{FakeLazyList, ScrollCall};
}
