use std::time::Duration;

use mouse_maze::game::{GameSession, ScoreRules, TickStatus};
use mouse_maze::map::{Direction, Facing};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;
use common::{elbow_level, level, pos, secs, session, walk};

/// Walks the elbow maze to (5, 5), passing over the item at (3, 5).
fn walk_to_corner(session: &mut GameSession) {
    walk(session, &[(Direction::Down, 5), (Direction::Right, 5)]);
}

#[test]
fn test_new_session_state() {
    let session = session(elbow_level());
    let state = session.state();

    assert_that(&state.agent).is_equal_to(pos(0, 0));
    assert_that(&state.facing).is_equal_to(Facing::Right);
    assert_that(&state.level_score).is_equal_to(1000);
    assert_that(&state.total_score).is_equal_to(0);
    assert_that(&state.level).is_equal_to(1);
    assert!(state.alive);
    assert!(!state.item_collected);
}

#[test]
fn test_move_into_wall_is_rejected() {
    let mut session = session(elbow_level());
    walk_to_corner(&mut session);
    assert_that(&session.state().agent).is_equal_to(pos(5, 5));

    assert!(!session.move_agent(Direction::Right));
    assert_that(&session.state().agent).is_equal_to(pos(5, 5));
}

#[test]
fn test_move_off_grid_is_rejected() {
    let mut session = session(elbow_level());
    assert!(!session.move_agent(Direction::Up));
    assert!(!session.move_agent(Direction::Left));
    assert_that(&session.state().agent).is_equal_to(pos(0, 0));
}

#[test]
fn test_moves_are_single_cell() {
    let mut session = session(elbow_level());
    assert!(session.move_agent(Direction::Down));
    assert_that(&session.state().agent).is_equal_to(pos(0, 1));
    assert!(session.move_agent(Direction::Up));
    assert_that(&session.state().agent).is_equal_to(pos(0, 0));
}

#[test]
fn test_facing_follows_horizontal_moves() {
    let mut session = session(elbow_level());
    walk(&mut session, &[(Direction::Down, 5), (Direction::Right, 2)]);
    assert_that(&session.state().facing).is_equal_to(Facing::Right);

    assert!(session.move_agent(Direction::Left));
    assert_that(&session.state().facing).is_equal_to(Facing::Left);

    // Vertical moves keep the last horizontal facing
    assert!(session.move_agent(Direction::Left));
    assert!(session.move_agent(Direction::Up));
    assert_that(&session.state().facing).is_equal_to(Facing::Left);
}

#[test]
fn test_level_score_decays_per_whole_second() {
    let mut session = session(elbow_level());

    assert_eq!(session.tick(Duration::from_millis(999)), TickStatus::Running);
    assert_that(&session.state().level_score).is_equal_to(1000);

    session.tick(Duration::from_millis(1500));
    assert_that(&session.state().level_score).is_equal_to(990);

    session.tick(secs(50));
    assert_that(&session.state().level_score).is_equal_to(500);
    assert_that(&session.state().elapsed).is_equal_to(secs(50));
}

#[test]
fn test_level_score_is_zero_at_one_hundred_seconds() {
    let mut session = session(elbow_level());

    assert_eq!(session.tick(Duration::from_millis(99_999)), TickStatus::Running);
    assert_that(&session.state().level_score).is_equal_to(10);

    assert_eq!(session.tick(secs(100)), TickStatus::TimedOut);
    assert_that(&session.state().level_score).is_equal_to(0);
    assert!(!session.state().alive);

    // A dead agent stays put and keeps reporting the time-out
    assert!(!session.move_agent(Direction::Down));
    assert_eq!(session.tick(secs(101)), TickStatus::TimedOut);
}

#[test]
fn test_level_score_stays_in_bounds() {
    let mut session = session(elbow_level());
    for second in 0..150 {
        session.tick(secs(second));
        let score = session.state().level_score;
        assert!(score <= 1000, "score {score} above the starting score");
    }
    assert_that(&session.state().level_score).is_equal_to(0);
}

#[test]
fn test_paused_time_is_excluded() {
    let mut paused = session(elbow_level());
    paused.exclude_pause(secs(20));
    paused.tick(secs(30));

    let mut straight = session(elbow_level());
    straight.tick(secs(10));

    assert_that(&paused.state().elapsed).is_equal_to(secs(10));
    assert_eq!(paused.state().level_score, straight.state().level_score);
    assert_that(&paused.state().level_score).is_equal_to(900);
}

#[test]
fn test_item_is_collected_once() {
    let mut session = session(elbow_level());
    assert!(!session.collect_item_if_present());

    walk(&mut session, &[(Direction::Down, 5), (Direction::Right, 3)]);
    assert!(session.collect_item_if_present());
    assert!(session.state().item_collected);
    assert_that(&session.state().total_score).is_equal_to(250);

    assert!(!session.collect_item_if_present());
    assert_that(&session.state().total_score).is_equal_to(250);
}

#[test]
fn test_exit_banks_level_score_once() {
    let mut session = session(elbow_level());
    walk(&mut session, &[(Direction::Down, 2)]);
    assert!(!session.check_exit());

    walk(&mut session, &[(Direction::Down, 1)]);
    session.tick(secs(12));
    assert!(session.check_exit());
    assert_that(&session.state().total_score).is_equal_to(880);

    assert!(!session.check_exit());
    assert_that(&session.state().total_score).is_equal_to(880);
}

#[test]
fn test_advance_resets_level_state() {
    let mut session = session(elbow_level());
    walk(&mut session, &[(Direction::Down, 5), (Direction::Right, 3)]);
    session.collect_item_if_present();
    walk(&mut session, &[(Direction::Left, 3), (Direction::Up, 2)]);
    session.tick(secs(5));
    assert!(session.check_exit());
    let banked = session.state().total_score;
    assert_that(&banked).is_equal_to(250 + 950);

    session.advance(elbow_level(), secs(40));
    let state = session.state();
    assert_that(&state.level).is_equal_to(2);
    assert_that(&state.agent).is_equal_to(pos(0, 0));
    assert_that(&state.level_score).is_equal_to(1000);
    assert_that(&state.total_score).is_equal_to(banked);
    assert!(!state.item_collected);

    // The new level's clock starts at the advance
    session.tick(secs(43));
    assert_that(&session.state().level_score).is_equal_to(970);
}

#[test]
fn test_end_game_folds_level_score() {
    let mut session = session(elbow_level());
    session.tick(secs(30));
    session.end_game();

    assert_that(&session.state().total_score).is_equal_to(700);
    assert_that(&session.state().level_score).is_equal_to(0);
    assert!(!session.state().alive);

    session.end_game();
    assert_that(&session.state().total_score).is_equal_to(700);
}

#[test]
fn test_end_game_after_timeout_adds_nothing() {
    let mut session = session(elbow_level());
    session.tick(secs(100));
    session.end_game();
    assert_that(&session.state().total_score).is_equal_to(0);
}

#[test]
fn test_total_score_never_decreases() {
    let mut session = session(elbow_level());
    let mut last = 0;
    let moves = [Direction::Down; 5].into_iter().chain([Direction::Right; 5]);
    for (second, direction) in moves.enumerate() {
        session.move_agent(direction);
        session.tick(secs(second as u64));
        session.collect_item_if_present();
        session.check_exit();
        let total = session.state().total_score;
        assert!(total >= last);
        last = total;
    }
    assert_that(&last).is_greater_than_or_equal_to(250);
}

#[test]
fn test_custom_rules() {
    let rules = ScoreRules {
        starting_level_score: 100,
        decay_per_second: 25,
        item_bonus: 7,
    };
    let corridor = level(&["..."], pos(1, 0), pos(2, 0));
    let mut session = GameSession::new(corridor, rules, secs(10));

    session.tick(secs(12));
    assert_that(&session.state().level_score).is_equal_to(50);

    assert!(session.move_agent(Direction::Right));
    assert!(session.collect_item_if_present());
    assert_that(&session.state().total_score).is_equal_to(7);

    assert_eq!(session.tick(secs(14)), TickStatus::TimedOut);
}
