use flappy_term::entities::LevelDef;
use flappy_term::speed::SpeedRamp;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_level(start_speed: f32, speed_increase: f32) -> LevelDef {
    LevelDef {
        start_speed,
        speed_increase,
        ..LevelDef::default()
    }
}

#[test]
fn start_speed_is_scaled_to_cells() {
    let ramp = SpeedRamp::new(&make_level(20.0, 6.0));
    assert_eq!(ramp.speed(), 10.0);
}

#[test]
fn first_tick_only_records_time() {
    let level = make_level(20.0, 6.0);
    let mut ramp = SpeedRamp::new(&level);
    ramp.tick(&level, 90_000);
    assert_eq!(ramp.speed(), 10.0);
}

#[test]
fn speed_grows_with_elapsed_minutes() {
    let level = make_level(20.0, 6.0);
    let mut ramp = SpeedRamp::new(&level);
    ramp.tick(&level, 0);
    ramp.tick(&level, 60_000);
    // 6 m/s per minute, half a cell per meter
    assert!((ramp.speed() - 13.0).abs() < 1e-3);
}

#[test]
fn rebaseline_skips_time_outside_flight() {
    let level = make_level(20.0, 6.0);
    let mut ramp = SpeedRamp::new(&level);
    ramp.tick(&level, 0);
    ramp.rebaseline();
    ramp.tick(&level, 600_000);
    assert_eq!(ramp.speed(), 10.0);
}

#[test]
fn speed_never_decreases() {
    let level = make_level(16.0, 0.125);
    let mut ramp = SpeedRamp::new(&level);
    let mut rng = StdRng::seed_from_u64(42);
    let mut now = 0;
    let mut last = ramp.speed();

    for _ in 0..1_000 {
        now += rng.gen_range(0..100);
        ramp.tick(&level, now);
        assert!(ramp.speed() >= last);
        last = ramp.speed();
    }
}
