use flappy_term::consts::MAP_HEIGHT;
use flappy_term::entities::LevelDef;
use flappy_term::generator::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Gap implied by the two arm heights.
fn realised_gap(upper: i32, lower: i32) -> i32 {
    MAP_HEIGHT - 4 - upper - lower
}

#[test]
fn first_obstacle_respects_level_ranges() {
    let level = LevelDef::default();
    for seed in 0..200 {
        let mut rng = seeded_rng(seed);
        let o = generate(&mut rng, 131, &level, true, None, 77);

        assert!(o.enabled);
        assert_eq!(o.position, 131);
        assert_eq!(o.last_moved_ms, Some(77));
        assert!((level.min_width..=level.max_width).contains(&o.width));
        assert!(o.upper >= 1 && o.lower >= 1);
        assert!((level.min_gap..=level.max_gap).contains(&realised_gap(o.upper, o.lower)));
    }
}

#[test]
fn arms_always_leave_the_drawn_gap() {
    let levels = [
        LevelDef::default(),
        LevelDef {
            min_gap: 4,
            max_gap: 6,
            min_gap_shift: 2,
            max_gap_shift: 8,
            ..LevelDef::default()
        },
        LevelDef {
            min_gap: 12,
            max_gap: 14,
            min_gap_shift: 0,
            max_gap_shift: 3,
            ..LevelDef::default()
        },
    ];

    for level in &levels {
        for seed in 0..50 {
            let mut rng = seeded_rng(seed);
            let mut previous = None;
            for i in 0..100 {
                let o = generate(&mut rng, i * 30, level, true, previous, 0);
                assert!(o.upper >= 1, "upper arm vanished: {o:?}");
                assert!(o.lower >= 1, "lower arm vanished: {o:?}");
                let gap = realised_gap(o.upper, o.lower);
                assert!(
                    (level.min_gap..=level.max_gap).contains(&gap),
                    "gap {gap} outside {}..={}",
                    level.min_gap,
                    level.max_gap
                );
                previous = Some(o.upper);
            }
        }
    }
}

#[test]
fn chained_obstacles_shift_within_the_window() {
    let level = LevelDef::default();
    for seed in 0..100 {
        let mut rng = seeded_rng(seed);
        let mut previous = generate(&mut rng, 0, &level, true, None, 0).upper;
        for _ in 0..100 {
            let o = generate(&mut rng, 0, &level, true, Some(previous), 0);
            assert!(
                (o.upper - previous).abs() <= level.max_gap_shift,
                "jumped from {previous} to {}",
                o.upper
            );
            previous = o.upper;
        }
    }
}

#[test]
fn fixed_ranges_give_fixed_shape() {
    let level = LevelDef {
        min_width: 4,
        max_width: 4,
        min_gap: 8,
        max_gap: 8,
        ..LevelDef::default()
    };
    let mut rng = seeded_rng(42);
    let o = generate(&mut rng, 50, &level, false, None, 0);
    assert_eq!(o.width, 4);
    assert_eq!(o.upper + o.lower, total_arm_span(8));
    assert!(!o.enabled);
}

#[test]
fn draw_stays_in_inclusive_range() {
    let mut rng = seeded_rng(42);
    let mut seen_min = false;
    let mut seen_max = false;
    for _ in 0..1_000 {
        let v = draw(&mut rng, 3, 5);
        assert!((3..=5).contains(&v));
        seen_min |= v == 3;
        seen_max |= v == 5;
    }
    assert!(seen_min && seen_max);
}
