use std::time::Duration;

use flappy_game::config::GameConfig;
use flappy_game::entities::PlayField;
use flappy_game::error::GameError;

#[test]
fn defaults_match_the_classic_game() {
    let c = GameConfig::default();
    assert_eq!(c.field, PlayField { width: 432, height: 512 });
    assert_eq!(c.tick_rate, 30);
    assert_eq!(c.obstacles.width, 52);
    assert_eq!(c.obstacles.height, 320);
    assert_eq!(c.obstacles.gap, 110);
    assert_eq!(c.obstacles.speed, 3);
    assert_eq!(c.obstacles.pair_count, 3);
    assert_eq!(c.physics.jump_impulse, -9.0);
    assert_eq!(c.physics.terminal_velocity, 10.0);
    assert!(c.validate().is_ok());
}

#[test]
fn actor_starts_mid_height_by_default() {
    let c = GameConfig::default();
    assert_eq!(c.actor_start(), (50.0, 256.0));
}

#[test]
fn tick_duration_follows_rate() {
    let mut c = GameConfig::default();
    c.tick_rate = 50;
    assert_eq!(c.tick_duration(), Duration::from_millis(20));
}

#[test]
fn empty_document_gives_defaults() {
    let c = GameConfig::from_ron_str("()", "test").unwrap();
    assert_eq!(c, GameConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let text = "(tick_rate: 60, obstacles: (gap: 150), actor: (start_y: Some(100.0)))";
    let c = GameConfig::from_ron_str(text, "test").unwrap();
    assert_eq!(c.tick_rate, 60);
    assert_eq!(c.obstacles.gap, 150);
    assert_eq!(c.obstacles.width, 52);
    assert_eq!(c.actor_start(), (50.0, 100.0));
    assert_eq!(c.physics, GameConfig::default().physics);
}

#[test]
fn malformed_document_is_parse_error() {
    let err = GameConfig::from_ron_str("(tick_rate: \"fast\")", "broken.ron").unwrap_err();
    match err {
        GameError::Parse { origin, .. } => assert_eq!(origin, "broken.ron"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn gap_larger_than_obstacle_is_rejected() {
    let err = GameConfig::from_ron_str("(obstacles: (gap: 400))", "test").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig { field: "obstacles.gap", .. }));
}

#[test]
fn zero_values_are_rejected() {
    let cases: [(&str, &str); 4] = [
        ("(tick_rate: 0)", "tick_rate"),
        ("(obstacles: (pair_count: 0))", "obstacles.pair_count"),
        ("(obstacles: (speed: 0))", "obstacles.speed"),
        ("(field: (width: 0, height: 512))", "field"),
    ];
    for (text, expected) in cases {
        match GameConfig::from_ron_str(text, "test") {
            Err(GameError::InvalidConfig { field, .. }) => assert_eq!(field, expected, "{text}"),
            other => panic!("{text}: expected InvalidConfig, got {other:?}"),
        }
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = GameConfig::load(std::path::Path::new("/nonexistent/flappy.ron")).unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}

#[test]
fn error_messages_name_the_field() {
    let err = GameConfig::from_ron_str("(tick_rate: 0)", "test").unwrap_err();
    assert!(err.to_string().contains("tick_rate"));
}

#[test]
fn actor_start_outside_field_is_rejected() {
    let cases = [
        "(actor: (start_x: -1.0))",
        "(actor: (start_x: 400.0))",
        "(actor: (start_y: Some(-0.5)))",
        "(actor: (start_y: Some(489.0)))",
    ];
    for text in cases {
        match GameConfig::from_ron_str(text, "test") {
            Err(GameError::InvalidConfig { field, .. }) => assert_eq!(field, "actor.start", "{text}"),
            other => panic!("{text}: expected InvalidConfig, got {other:?}"),
        }
    }
}

#[test]
fn actor_start_touching_field_edges_is_accepted() {
    // 398 + 34 = 432 and 488 + 24 = 512
    let text = "(actor: (start_x: 398.0, start_y: Some(488.0)))";
    assert!(GameConfig::from_ron_str(text, "test").is_ok());
    let text = "(actor: (start_x: 0.0, start_y: Some(0.0)))";
    assert!(GameConfig::from_ron_str(text, "test").is_ok());
}
