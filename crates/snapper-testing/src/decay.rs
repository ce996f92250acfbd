use snapper_animation::FloatDecayAnimationSpec;

/// A decay that always travels `distance` pixels in the direction of the
/// velocity, slowing down linearly over `duration_nanos`.
///
/// Makes fling projections exact, so tests can reason in whole items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDistanceDecaySpec {
    distance: f32,
    duration_nanos: i64,
}

impl FixedDistanceDecaySpec {
    pub const DEFAULT_DURATION_NANOS: i64 = 300_000_000;

    pub fn new(distance: f32) -> Self {
        Self::with_duration(distance, Self::DEFAULT_DURATION_NANOS)
    }

    pub fn with_duration(distance: f32, duration_nanos: i64) -> Self {
        Self {
            distance: distance.abs(),
            duration_nanos: duration_nanos.max(1),
        }
    }

    fn progress(&self, play_time_nanos: i64) -> f32 {
        (play_time_nanos as f32 / self.duration_nanos as f32).clamp(0.0, 1.0)
    }
}

impl FloatDecayAnimationSpec for FixedDistanceDecaySpec {
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
        let remaining = 1.0 - self.progress(play_time_nanos);
        let travelled = self.distance * (1.0 - remaining * remaining);
        initial_value + travelled * initial_velocity.signum()
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
        let seconds = self.duration_nanos as f32 / 1_000_000_000.0;
        let start_speed = 2.0 * self.distance / seconds;
        start_speed * (1.0 - self.progress(play_time_nanos)) * initial_velocity.signum()
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        if initial_velocity == 0.0 {
            0
        } else {
            self.duration_nanos
        }
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        if initial_velocity == 0.0 {
            return initial_value;
        }
        initial_value + self.distance * initial_velocity.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travels_exactly_the_configured_distance() {
        let spec = FixedDistanceDecaySpec::new(150.0);
        let duration = spec.get_duration_nanos(0.0, -10.0);

        assert_eq!(spec.get_target_value(0.0, 900.0), 150.0);
        assert_eq!(spec.get_target_value(0.0, -10.0), -150.0);
        assert_eq!(spec.get_value_from_nanos(duration, 0.0, -10.0), -150.0);
        assert_eq!(spec.get_velocity_from_nanos(duration, 0.0, -10.0), 0.0);
    }

    #[test]
    fn zero_velocity_stays_put() {
        let spec = FixedDistanceDecaySpec::new(150.0);
        assert_eq!(spec.get_duration_nanos(0.0, 0.0), 0);
        assert_eq!(spec.get_value_from_nanos(1_000, 5.0, 0.0), 5.0);
    }
}
