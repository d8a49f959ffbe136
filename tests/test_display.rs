use space_shooter::assets::{default_dir, Assets};
use space_shooter::compute::new_session;
use space_shooter::display::*;
use space_shooter::entities::GameStatus;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn vp() -> Viewport {
    Viewport::new(80, 24)
}

fn render_to_string(status: GameStatus, vp: &Viewport) -> String {
    let assets = Assets::load(&default_dir()).expect("bundled sprites");
    let mut state = new_session(&mut StdRng::seed_from_u64(7));
    state.score = 3;
    state.status = status;
    let mut buf: Vec<u8> = Vec::new();
    render(&mut buf, &state, &assets, vp).expect("render into buffer");
    String::from_utf8(buf).expect("utf-8 output")
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn viewport_maps_corners_inside_border() {
    let v = vp();
    assert_eq!(v.col(0), 1);
    assert_eq!(v.col(800), 78); // col 79 is the right wall
    assert_eq!(v.row(0), 2);
    assert_eq!(v.row(600), 21); // row 22 is the bottom border
}

#[test]
fn viewport_clamps_out_of_world_positions() {
    let v = vp();
    assert_eq!(v.col(-50), 1);
    assert_eq!(v.col(5000), 78);
    assert_eq!(v.row(-1), 2);
    assert_eq!(v.row(601), 21);
}

#[test]
fn viewport_is_monotonic() {
    let v = vp();
    let cols: Vec<u16> = (0..=800).step_by(10).map(|x| v.col(x)).collect();
    assert!(cols.windows(2).all(|w| w[0] <= w[1]));
}

// ── Restart button ────────────────────────────────────────────────────────────

#[test]
fn restart_button_covers_its_centre() {
    let v = vp();
    let button = restart_button_cells(&v);
    assert_eq!(button, CellRect { col: 29, row: 12, w: 23, h: 2 });
    assert!(button.contains(v.col(400), v.row(350)));
}

#[test]
fn restart_button_rejects_far_clicks() {
    let button = restart_button_cells(&vp());
    assert!(!button.contains(0, 0));
    assert!(!button.contains(79, 23));
    assert!(!button.contains(28, 12)); // just left
    assert!(!button.contains(52, 12)); // just right (half-open)
}

#[test]
fn restart_button_fits_label_on_narrow_terminal() {
    let button = restart_button_cells(&Viewport::new(20, 8));
    assert!(button.w >= 16);
    assert!(button.h >= 1);
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_playing_shows_hud() {
    let out = render_to_string(GameStatus::Playing, &vp());
    assert!(out.contains("Score: 3  Level: 1"));
    assert!(!out.contains("Game Over!"));
}

#[test]
fn render_playing_draws_starfield_first() {
    let out = render_to_string(GameStatus::Playing, &vp());
    let stars = out.find('·').expect("background drawn");
    let hud = out.find("Score:").expect("hud drawn");
    assert!(hud < stars);
    // Enemies come after the background.
    let enemy = out.find('▼').expect("enemy drawn");
    assert!(stars < enemy);
}

#[test]
fn render_game_over_hides_starfield() {
    let out = render_to_string(GameStatus::GameOver, &vp());
    assert!(!out.contains('·'));
}

#[test]
fn render_game_over_shows_button() {
    let out = render_to_string(GameStatus::GameOver, &vp());
    assert!(out.contains("Game Over! You Lost!"));
    assert!(out.contains("Restart Game"));
    assert!(out.contains("Final Score: 3"));
}

#[test]
fn render_survives_tiny_terminal() {
    let tiny = Viewport::new(3, 2);
    render_to_string(GameStatus::Playing, &tiny);
    render_to_string(GameStatus::GameOver, &tiny);
}
