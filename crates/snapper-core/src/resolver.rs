//! Picks the item a fling should come to rest on.

use crate::geometry::SnapGeometry;

/// Sign of a velocity or distance along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingDirection {
    /// Toward the list start.
    Backward,
    None,
    /// Toward the list end.
    Forward,
}

impl FlingDirection {
    pub fn of(value: f32) -> Self {
        if value > 0.0 {
            FlingDirection::Forward
        } else if value < 0.0 {
            FlingDirection::Backward
        } else {
            FlingDirection::None
        }
    }
}

/// Feel constants of the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverTuning {
    /// Velocities below this (px/sec) do not fling at all.
    pub min_fling_velocity: f32,
    /// Fraction of an item a fling must travel past the next snap boundary
    /// before it counts as more than a tap.
    pub tap_fraction: f32,
}

impl ResolverTuning {
    pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 0.5;
    pub const DEFAULT_TAP_FRACTION: f32 = 0.5;
}

impl Default for ResolverTuning {
    fn default() -> Self {
        Self {
            min_fling_velocity: Self::DEFAULT_MIN_FLING_VELOCITY,
            tap_fraction: Self::DEFAULT_TAP_FRACTION,
        }
    }
}

/// Converts a fling velocity into a target item index.
#[derive(Debug, Clone, Copy)]
pub struct TargetIndexResolver<'g, 'a> {
    geometry: &'g SnapGeometry<'a>,
    tuning: ResolverTuning,
}

impl<'g, 'a> TargetIndexResolver<'g, 'a> {
    pub fn new(geometry: &'g SnapGeometry<'a>, tuning: ResolverTuning) -> Self {
        Self { geometry, tuning }
    }

    /// Distance the fling would travel, limited to `±max_fling_distance`.
    /// Zero for velocities below the minimum fling velocity.
    pub fn fling_distance(
        &self,
        velocity: f32,
        decay_distance: impl Fn(f32) -> f32,
        max_fling_distance: f32,
    ) -> f32 {
        if velocity.abs() < self.tuning.min_fling_velocity {
            return 0.0;
        }
        decay_distance(velocity).clamp(-max_fling_distance, max_fling_distance)
    }

    /// Resolves the index to settle on, in `0..total_item_count`.
    ///
    /// `None` when no item is current, in which case there is nothing to
    /// snap to.
    pub fn resolve(
        &self,
        velocity: f32,
        decay_distance: impl Fn(f32) -> f32,
        max_fling_distance: f32,
    ) -> Option<usize> {
        let current = self.geometry.current_item()?;
        let Some(per_item) = self.geometry.estimated_distance_per_item() else {
            return Some(current.index);
        };

        let fling_distance = self.fling_distance(velocity, decay_distance, max_fling_distance);
        let forward = velocity > 0.0;
        let threshold = if forward {
            self.geometry.distance_to_index_snap(current.index + 1)
        } else {
            self.geometry.distance_to_index_snap(current.index)
        } as f32;
        let tap_range = per_item * self.tuning.tap_fraction;

        let is_tap = if forward {
            fling_distance < threshold + tap_range
        } else {
            fling_distance > threshold - tap_range
        };

        let target = if is_tap {
            self.nearest_index(current.index) as i64
        } else {
            let items = ((fling_distance - threshold) / per_item).trunc() as i64;
            current.index as i64 + items + i64::from(forward)
        };
        let target = self.geometry.clamp_index(target);

        log::debug!(
            "resolved fling. velocity: {velocity}, fling distance: {fling_distance}, \
             current: {}, threshold: {threshold}, per item: {per_item}, tap: {is_tap}, target: {target}",
            current.index,
        );
        Some(target)
    }

    /// Whichever of `current` and `current + 1` needs less scrolling.
    fn nearest_index(&self, current: usize) -> usize {
        let to_current = self.geometry.distance_to_index_snap(current).abs();
        let to_next = self.geometry.distance_to_index_snap(current + 1).abs();
        if to_current < to_next {
            current
        } else {
            current + 1
        }
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
