use super::*;

const FRAME_NANOS: u64 = 16_666_667;

fn run_to_rest(spring: &mut SpringAnimation, max_frames: usize) -> Vec<f32> {
    let mut samples = Vec::new();
    let mut frame_time = 0u64;
    for _ in 0..max_frames {
        samples.push(spring.on_frame(frame_time));
        if spring.is_finished() {
            break;
        }
        frame_time += FRAME_NANOS;
    }
    samples
}

#[test]
fn critically_damped_spring_settles_on_target_without_overshoot() {
    let mut spring = SpringAnimation::new(SpringSpec::snap_default(), 0.0, 200.0, 0.0);
    let samples = run_to_rest(&mut spring, 600);

    assert!(spring.is_finished());
    assert_eq!(spring.value(), 200.0);
    assert_eq!(spring.velocity(), 0.0);
    assert!(samples.iter().all(|value| *value <= 200.0 + 0.5));
    assert!(samples.windows(2).all(|pair| pair[1] >= pair[0] - 0.001));
}

#[test]
fn first_frame_does_not_move() {
    let mut spring = SpringAnimation::new(SpringSpec::snap_default(), 0.0, -120.0, 0.0);
    assert_eq!(spring.on_frame(5_000_000), 0.0);
    assert!(spring.on_frame(5_000_000 + FRAME_NANOS) < 0.0);
}

#[test]
fn spring_starting_on_target_is_already_finished() {
    let spring = SpringAnimation::new(SpringSpec::snap_default(), 40.0, 40.0, 0.0);
    assert!(spring.is_finished());
}

#[test]
fn retarget_keeps_position_and_wakes_the_spring() {
    let mut spring = SpringAnimation::new(SpringSpec::stiff(), 0.0, 100.0, 0.0);
    spring.on_frame(0);
    spring.on_frame(FRAME_NANOS);
    spring.on_frame(2 * FRAME_NANOS);
    let before = spring.value();

    spring.retarget(150.0);
    assert_eq!(spring.value(), before);
    assert_eq!(spring.target(), 150.0);

    let mut frame_time = 2 * FRAME_NANOS;
    for _ in 0..600 {
        frame_time += FRAME_NANOS;
        spring.on_frame(frame_time);
        if spring.is_finished() {
            break;
        }
    }
    assert!(spring.is_finished());
    assert_eq!(spring.value(), 150.0);

    spring.retarget(180.0);
    assert!(!spring.is_finished());
}

#[test]
fn bouncy_spring_overshoots_but_still_settles() {
    let mut spring = SpringAnimation::new(SpringSpec::bouncy(), 0.0, 100.0, 2000.0);
    let samples = run_to_rest(&mut spring, 2000);
    assert!(samples.iter().any(|value| *value > 100.0));
    assert!(spring.is_finished());
    assert_eq!(spring.value(), 100.0);
}

#[test]
fn spec_validation_rejects_degenerate_springs() {
    assert!(SpringSpec::snap_default().is_valid());
    assert!(!SpringSpec::new(0.0, 1.0).is_valid());
    assert!(!SpringSpec::new(400.0, 0.0).is_valid());
    assert!(!SpringSpec::new(f32::NAN, 1.0).is_valid());
}
