use flappy_term::config::AssetPaths;
use flappy_term::entities::RunMetrics;
use flappy_term::stats::*;

fn make_metrics(jumps: u32, collisions: u32, passed: u32, streak: u32) -> RunMetrics {
    RunMetrics {
        jumps,
        collisions,
        obstacles_passed: passed,
        highest_streak: streak,
        ..RunMetrics::default()
    }
}

// ── GameStats ─────────────────────────────────────────────────────────────────

#[test]
fn runs_are_folded_into_totals() {
    let mut stats = GameStats::default();
    assert_eq!(stats.average_score(), 0.0);

    stats.record_run(10, &make_metrics(20, 1, 6, 4));
    stats.record_run(30, &make_metrics(50, 3, 12, 9));

    assert_eq!(stats.total_runs, 2);
    assert_eq!(stats.total_score, 40);
    assert_eq!(stats.total_jumps, 70);
    assert_eq!(stats.total_collisions, 4);
    assert_eq!(stats.total_obstacles_passed, 18);
    assert_eq!(stats.best_score, 30);
    assert_eq!(stats.best_streak, 9);
    assert_eq!(stats.average_score(), 20.0);
}

#[test]
fn stats_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let paths = AssetPaths::new(dir.path());

    let mut stats = GameStats::load(&paths.stats());
    assert_eq!(stats, GameStats::default());
    stats.record_run(7, &make_metrics(3, 1, 2, 2));
    stats.save(&paths.stats()).unwrap();

    assert_eq!(GameStats::load(&paths.stats()), stats);
}

// ── HallOfFame ────────────────────────────────────────────────────────────────

#[test]
fn zero_score_never_enters() {
    let mut hof = HallOfFame::new();
    assert!(!hof.qualifies("ana", 1, 0));
    assert!(!hof.submit("ana", 1, 0));
    assert_eq!(hof.best("ana", 1), 0);
}

#[test]
fn only_a_better_score_replaces_the_entry() {
    let mut hof = HallOfFame::new();
    assert!(hof.submit("ana", 1, 12));
    assert!(!hof.submit("ana", 1, 12));
    assert!(!hof.submit("ana", 1, 5));
    assert_eq!(hof.best("ana", 1), 12);
    assert!(hof.submit("ana", 1, 13));
    assert_eq!(hof.best("ana", 1), 13);
}

#[test]
fn entries_are_kept_per_level_and_player() {
    let mut hof = HallOfFame::new();
    hof.submit("ana", 1, 12);
    hof.submit("ana", 2, 3);
    hof.submit("bo", 1, 40);

    assert_eq!(hof.best("ana", 2), 3);
    assert_eq!(hof.best("bo", 2), 0);
    assert_eq!(hof.ranking(1), [("bo", 40), ("ana", 12)]);
    assert!(hof.ranking(3).is_empty());
}

#[test]
fn equal_scores_rank_by_name() {
    let mut hof = HallOfFame::new();
    hof.submit("zed", 1, 9);
    hof.submit("amy", 1, 9);
    assert_eq!(hof.ranking(1), [("amy", 9), ("zed", 9)]);
}

#[test]
fn hall_of_fame_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = AssetPaths::new(dir.path()).hall_of_fame();

    let mut hof = HallOfFame::load(&path);
    hof.submit("ana", 3, 21);
    hof.save(&path).unwrap();

    let back = HallOfFame::load(&path);
    assert_eq!(back.best("ana", 3), 21);
    assert_eq!(back, hof);
}

// ── Saves ─────────────────────────────────────────────────────────────────────

#[test]
fn last_level_is_remembered_per_player() {
    let dir = tempfile::tempdir().unwrap();
    let path = AssetPaths::new(dir.path()).saves();

    let mut saves = Saves::load(&path);
    assert_eq!(saves.last_level("ana"), None);
    saves.set_last_level("ana", 2);
    saves.set_last_level("ana", 3);
    saves.set_last_level("bo", 1);
    saves.save(&path).unwrap();

    let back = Saves::load(&path);
    assert_eq!(back.last_level("ana"), Some(3));
    assert_eq!(back.last_level("bo"), Some(1));
}

#[test]
fn missing_saved_level_falls_back_to_the_first() {
    let mut saves = Saves::default();
    saves.set_last_level("ana", 4);
    saves.set_last_level("bo", 1);

    assert!(!saves.reset_missing("ana", 2)); // not the saved one
    assert_eq!(saves.last_level("ana"), Some(4));

    assert!(saves.reset_missing("ana", 4));
    assert_eq!(saves.last_level("ana"), Some(1));

    // level 1 itself gone: nothing left to continue
    assert!(saves.reset_missing("bo", 1));
    assert_eq!(saves.last_level("bo"), None);
    assert!(!saves.reset_missing("cy", 1));
}
