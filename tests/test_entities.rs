use flappy_game::entities::*;

#[test]
fn rect_edges() {
    let r = Rect::new(10, 20, 52, 320);
    assert_eq!(r.right(), 62);
    assert_eq!(r.bottom(), 340);
}

#[test]
fn enums_compare_and_display() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(TextureTag::Upright, TextureTag::Flipped);

    assert_eq!(Action::WingFlap.to_string(), "wing_flap");
    assert_eq!(Action::Crash.to_string(), "crash");
    assert_eq!(ActorKind::Bird.to_string(), "bird");
    assert_eq!(Crash::Obstacle.to_string(), "obstacle");
}

#[test]
fn bird_requires_wing_flap() {
    assert_eq!(ActorKind::Bird.required_actions(), &[Action::WingFlap]);
}
