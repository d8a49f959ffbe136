/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use log::{debug, info, warn};
use rand::Rng;

use crate::entities::{Bullet, Enemy, GameState, GameStatus, Player, TickInput};

// ── World & tuning constants ─────────────────────────────────────────────────

pub const WORLD_WIDTH: i32 = 800;
pub const WORLD_HEIGHT: i32 = 600;

pub const PLAYER_SIZE: i32 = 64;
pub const PLAYER_SPEED: i32 = 6;
/// Horizontal offset from the player's left edge to where bullets appear.
pub const MUZZLE_OFFSET: i32 = 27;

pub const START_BULLET_SPEED: i32 = 6;

pub const START_COOLDOWN: u32 = 20;
pub const MIN_COOLDOWN: u32 = 5;

pub const ENEMY_COUNT: usize = 6;
/// An enemy whose `y` exceeds this ends the session.
pub const ENEMY_BREACH_Y: i32 = WORLD_HEIGHT - Enemy::SIZE;

/// Every this many points the difficulty goes up.
pub const MILESTONE: u32 = 5;

// ── Constructors ─────────────────────────────────────────────────────────────

fn start_player() -> Player {
    Player {
        x: WORLD_WIDTH / 2 - PLAYER_SIZE / 2,
        y: WORLD_HEIGHT - 100,
        speed: PLAYER_SPEED,
    }
}

/// A freshly spawned enemy somewhere near the top of the screen.
/// `bonus` is added on top of the random base speed of 1–3.
pub fn spawn_enemy(rng: &mut impl Rng, bonus: i32) -> Enemy {
    Enemy {
        x: rng.gen_range(50..=WORLD_WIDTH - 50),
        y: rng.gen_range(50..=150),
        speed: rng.gen_range(1..=3) + bonus,
    }
}

/// Build the state for a brand-new session.
pub fn new_session(rng: &mut impl Rng) -> GameState {
    GameState {
        player: start_player(),
        bullets: Vec::new(),
        enemies: (0..ENEMY_COUNT).map(|_| spawn_enemy(rng, 0)).collect(),
        score: 0,
        level: 1,
        bullet_speed: START_BULLET_SPEED,
        cooldown: START_COOLDOWN,
        cooldown_timer: START_COOLDOWN,
        status: GameStatus::Playing,
    }
}

/// Throw away the current session and start over.  Valid from any status.
pub fn restart(rng: &mut impl Rng) -> GameState {
    info!("restarting session");
    new_session(rng)
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let new_x = (state.player.x - state.player.speed).max(0);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let new_x = (state.player.x + state.player.speed).min(WORLD_WIDTH - PLAYER_SIZE);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a bullet from the muzzle.  A no-op while the cooldown timer runs.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.cooldown_timer > 0 {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: state.player.x + MUZZLE_OFFSET,
        y: state.player.y,
    });
    GameState {
        bullets,
        cooldown_timer: state.cooldown,
        ..state.clone()
    }
}

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Level up: faster bullets, shorter cooldown (never below `MIN_COOLDOWN`)
/// and every live enemy descends one pixel per tick faster.
pub fn increase_difficulty(state: &GameState) -> GameState {
    let level = state.level + 1;
    let bullet_speed = state.bullet_speed + 1;
    let cooldown = state.cooldown.saturating_sub(2).max(MIN_COOLDOWN);
    info!(
        "level {} reached: bullet speed {}, cooldown {}",
        level, bullet_speed, cooldown
    );
    GameState {
        enemies: state
            .enemies
            .iter()
            .map(|e| Enemy { speed: e.speed + 1, ..e.clone() })
            .collect(),
        level,
        bullet_speed,
        cooldown,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A finished session is returned unchanged; only [`restart`] leaves it.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    // ── 1. Input ─────────────────────────────────────────────────────────────
    let mut next = state.clone();
    if input.left {
        next = move_player_left(&next);
    }
    if input.right {
        next = move_player_right(&next);
    }
    if input.fire {
        next = player_shoot(&next);
    }

    // ── 2. Move bullets, drop those past the top edge ────────────────────────
    let bullets: Vec<Bullet> = next
        .bullets
        .iter()
        .map(|b| Bullet { y: b.y - next.bullet_speed, ..b.clone() })
        .filter(|b| b.y > 0)
        .collect();

    // ── 3. Move enemies; one past the bottom ends the session ────────────────
    let enemies: Vec<Enemy> = next
        .enemies
        .iter()
        .map(|e| Enemy { y: e.y + e.speed, ..e.clone() })
        .collect();

    let breach = enemies.iter().find(|e| e.y > ENEMY_BREACH_Y).map(|e| e.x);
    if let Some(x) = breach {
        warn!("enemy breached the bottom at x={} (score {})", x, next.score);
        return GameState {
            bullets,
            enemies,
            status: GameStatus::GameOver,
            ..next
        };
    }

    // ── 4. Collision: bullets ↔ enemies ──────────────────────────────────────
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let hit = enemies.iter().enumerate().position(|(ei, enemy)| {
            !killed_enemies.contains(&ei) && enemy.hitbox().surrounds(bullet.x, bullet.y)
        });
        if let Some(ei) = hit {
            killed_enemies.push(ei);
            used_bullets.push(bi);
        }
    }

    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b)
        .collect();

    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e)
        .collect();

    let mut next = GameState { bullets, enemies, ..next };

    // Kills are scored one at a time so each milestone fires exactly once
    // and replacements pick up the level current at their spawn.
    for _ in &killed_enemies {
        next.score += 1;
        debug!("score: {}", next.score);

        let bonus = (next.level / 2) as i32;
        next.enemies.push(spawn_enemy(rng, bonus));

        if next.score % MILESTONE == 0 {
            next = increase_difficulty(&next);
        }
    }

    // ── 5. Cooldown ──────────────────────────────────────────────────────────
    next.cooldown_timer = next.cooldown_timer.saturating_sub(1);

    next
}
