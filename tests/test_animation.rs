use std::sync::Arc;

use flappy_game::animation::*;
use flappy_game::body::AxisAlignedBody;
use flappy_game::entities::{Action, ActorKind, AnimationTag};
use flappy_game::error::GameError;

fn frames(n: usize) -> Vec<FrameId> {
    (0..n).map(|i| FrameId::new(&format!("bird_{i}"))).collect()
}

fn table_with(n: usize, looping: bool) -> AnimationTable {
    let tags = if looping { vec![AnimationTag::Loop] } else { Vec::new() };
    let mut table = AnimationTable::default();
    table
        .insert(ActorKind::Bird, Action::WingFlap, Animation::new(frames(n), tags))
        .unwrap();
    table
}

fn actor(table: &AnimationTable) -> AnimatedActor {
    AnimatedActor::new(ActorKind::Bird, AxisAlignedBody::new(50.0, 256.0, 34, 24), table).unwrap()
}

// ── Table loading ─────────────────────────────────────────────────────────────

#[test]
fn builtin_table_has_wing_flap_loop() {
    let table = AnimationTable::builtin().unwrap();
    let flap = table.get(ActorKind::Bird, Action::WingFlap).unwrap();
    assert!(flap.is_looping());
    // three frames held five ticks each
    assert_eq!(flap.len(), 15);
    assert_eq!(flap.frames()[0].as_str(), "bird_0");
    assert_eq!(flap.frames()[5].as_str(), "bird_1");
    assert_eq!(flap.frames()[14].as_str(), "bird_2");
}

#[test]
fn builtin_crash_is_not_looping() {
    let table = AnimationTable::builtin().unwrap();
    let crash = table.get(ActorKind::Bird, Action::Crash).unwrap();
    assert!(!crash.is_looping());
    assert_eq!(crash.len(), 3);
}

#[test]
fn missing_required_action_is_rejected_at_load() {
    let text = r#"(actors: { Bird: { Crash: (frames: [(id: "bird_crash")]) } })"#;
    let err = AnimationTable::from_ron_str(text, "test").unwrap_err();
    assert!(matches!(
        err,
        GameError::ConfigurationMissing {
            actor: ActorKind::Bird,
            action: Action::WingFlap
        }
    ));
}

#[test]
fn empty_animation_is_rejected() {
    let text = r#"(actors: { Bird: { WingFlap: (frames: [], tags: [Loop]) } })"#;
    let err = AnimationTable::from_ron_str(text, "test").unwrap_err();
    assert!(matches!(err, GameError::EmptyAnimation { .. }));
}

#[test]
fn unknown_action_name_is_a_parse_error() {
    let text = r#"(actors: { Bird: { Swoop: (frames: [(id: "x")]) } })"#;
    let err = AnimationTable::from_ron_str(text, "test").unwrap_err();
    assert!(matches!(err, GameError::Parse { .. }));
}

#[test]
fn hold_defaults_to_one_tick() {
    let text = r#"(actors: { Bird: { WingFlap: (frames: [(id: "a"), (id: "b", hold: 2)]) } })"#;
    let table = AnimationTable::from_ron_str(text, "test").unwrap();
    let flap = table.get(ActorKind::Bird, Action::WingFlap).unwrap();
    let ids: Vec<&str> = flap.frames().iter().map(|f| f.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "b"]);
    assert!(!flap.is_looping());
}

#[test]
fn empty_table_fails_validation() {
    let err = AnimationTable::default().validate().unwrap_err();
    assert!(matches!(err, GameError::ConfigurationMissing { .. }));
}

// ── Action selection ──────────────────────────────────────────────────────────

#[test]
fn new_actor_plays_wing_flap_from_start() {
    let table = table_with(4, true);
    let a = actor(&table);
    assert_eq!(a.action(), Action::WingFlap);
    assert_eq!(a.frame_index(), 0);
}

#[test]
fn reselecting_same_action_is_noop_unless_forced() {
    let table = table_with(4, true);
    let mut a = actor(&table);
    a.advance_frame(2);

    a.select_action(&table, Action::WingFlap, false).unwrap();
    assert_eq!(a.frame_index(), 2);

    a.select_action(&table, Action::WingFlap, true).unwrap();
    assert_eq!(a.frame_index(), 0);
}

#[test]
fn selecting_new_action_resets_frame() {
    let table = AnimationTable::builtin().unwrap();
    let mut a = actor(&table);
    a.advance_frame(7);
    a.select_action(&table, Action::Crash, false).unwrap();
    assert_eq!(a.action(), Action::Crash);
    assert_eq!(a.frame_index(), 0);
}

#[test]
fn selecting_absent_action_fails_and_keeps_state() {
    let table = table_with(4, true);
    let mut a = actor(&table);
    a.advance_frame(1);
    let err = a.select_action(&table, Action::Crash, false).unwrap_err();
    assert!(matches!(err, GameError::ConfigurationMissing { .. }));
    assert_eq!(a.action(), Action::WingFlap);
    assert_eq!(a.frame_index(), 1);
}

// ── Frame advance ─────────────────────────────────────────────────────────────

#[test]
fn looping_advance_by_len_returns_to_same_index() {
    for n in 1..=9usize {
        let table = table_with(n, true);
        for start in 0..n as i64 {
            for k in -3i64..=3 {
                let mut a = actor(&table);
                a.advance_frame(start);
                a.advance_frame(k * n as i64);
                assert_eq!(a.frame_index() as i64, start, "n={n} start={start} k={k}");
            }
        }
    }
}

#[test]
fn looping_wraps_both_directions() {
    let table = table_with(5, true);
    let mut a = actor(&table);
    a.advance_frame(7);
    assert_eq!(a.frame_index(), 2);
    a.advance_frame(-3);
    assert_eq!(a.frame_index(), 4);
    a.advance_frame(-13);
    assert_eq!(a.frame_index(), 1);
}

#[test]
fn non_looping_clamps_at_end_and_stays() {
    let table = table_with(4, false);
    let mut a = actor(&table);
    a.advance_frame(100);
    assert_eq!(a.frame_index(), 3);
    a.advance_frame(1);
    assert_eq!(a.frame_index(), 3);
}

#[test]
fn non_looping_clamps_at_start_and_stays() {
    let table = table_with(4, false);
    let mut a = actor(&table);
    a.advance_frame(2);
    a.advance_frame(-100);
    assert_eq!(a.frame_index(), 0);
    a.advance_frame(-1);
    assert_eq!(a.frame_index(), 0);
}

#[test]
fn looping_extreme_advance_wraps() {
    let table = table_with(3, true);
    let mut a = actor(&table);
    a.advance_frame(1);
    // i64::MAX leaves remainder 1 modulo 3
    a.advance_frame(i64::MAX);
    assert_eq!(a.frame_index(), 2);
    // i64::MIN leaves remainder 1 modulo 3 as well
    a.advance_frame(i64::MIN);
    assert_eq!(a.frame_index(), 0);
}

#[test]
fn non_looping_extreme_advance_clamps() {
    let table = table_with(3, false);
    let mut a = actor(&table);
    a.advance_frame(2);
    a.advance_frame(i64::MAX);
    assert_eq!(a.frame_index(), 2);
    a.advance_frame(i64::MIN);
    assert_eq!(a.frame_index(), 0);
}

#[test]
fn one_tick_advances_through_builtin_flap() {
    let table = Arc::new(AnimationTable::builtin().unwrap());
    let mut a = actor(&table);
    let mut seen = Vec::new();
    for _ in 0..15 {
        seen.push(a.current_frame_image().frame.as_str().to_string());
        a.advance_frame(1);
    }
    assert_eq!(a.frame_index(), 0);
    assert_eq!(seen.iter().filter(|id| *id == "bird_1").count(), 5);
}

// ── Frame image ───────────────────────────────────────────────────────────────

#[test]
fn frame_image_carries_visual_attributes() {
    let table = table_with(3, true);
    let mut a = actor(&table);
    a.advance_frame(1);
    a.set_rotation(30.0);
    a.set_flip(true);
    a.set_opacity(Some(64));

    let image = a.current_frame_image();
    assert_eq!(image.frame.as_str(), "bird_1");
    assert_eq!(image.rotation, 30.0);
    assert!(image.flip);
    assert_eq!(image.opacity, Some(64));
}

#[test]
fn offset_shifts_center_only() {
    let table = table_with(3, true);
    let mut a = actor(&table);
    a.set_offset((2, -3));
    assert_eq!(a.center(), (69, 265));
    assert_eq!(a.body().rect().left, 50);
}

#[test]
fn place_moves_body_keeping_size() {
    let table = table_with(3, true);
    let mut a = actor(&table);
    a.place(10.5, 20.25);
    assert_eq!(a.body().position(), (10.5, 20.25));
    assert_eq!(a.body().rect().left, 10);
    assert_eq!(a.body().rect().width, 34);
}
