use space_shooter::entities::*;

#[test]
fn rect_surrounds_is_strict() {
    let r = Rect::new(100, 100, 50, 50);
    assert!(r.surrounds(125, 125));
    assert!(r.surrounds(101, 149));
    assert!(!r.surrounds(100, 125)); // left edge
    assert!(!r.surrounds(150, 125)); // right edge
    assert!(!r.surrounds(125, 100)); // top edge
    assert!(!r.surrounds(125, 150)); // bottom edge
}

#[test]
fn rect_centered() {
    let r = Rect::centered(400, 350, 240, 50);
    assert_eq!(r, Rect::new(280, 325, 240, 50));
}

#[test]
fn enemy_hitbox_is_fifty_square() {
    let e = Enemy { x: 10, y: 20, speed: 2 };
    assert_eq!(e.hitbox(), Rect::new(10, 20, 50, 50));
}

#[test]
fn tick_input_defaults_to_idle() {
    let input = TickInput::default();
    assert!(!input.left && !input.right && !input.fire);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { x: 368, y: 500, speed: 6 },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        level: 1,
        bullet_speed: 6,
        cooldown: 20,
        cooldown_timer: 20,
        status: GameStatus::Playing,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.score = 999;
    cloned.enemies.push(Enemy { x: 5, y: 5, speed: 1 });

    assert_eq!(original.player.x, 368);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
