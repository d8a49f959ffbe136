/// All game entity types — pure data, no logic.
///
/// Positions are in world pixels on a virtual 800×600 screen with the
/// origin at the top-left corner.  The display layer scales them down to
/// terminal cells.

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Rectangle of size `w`×`h` centred on (`cx`, `cy`).
    pub const fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    /// True when the point lies strictly inside the rectangle; points on
    /// the edges do not count.
    pub fn surrounds(&self, px: i32, py: i32) -> bool {
        self.x < px && px < self.x + self.w && self.y < py && py < self.y + self.h
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Pixels moved per tick while a direction key is held.
    pub speed: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    /// Pixels descended per tick.
    pub speed: i32,
}

impl Enemy {
    pub const SIZE: i32 = 50;

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, Self::SIZE, Self::SIZE)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Keys held during one tick, sampled by the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Everything one play session owns.  Cloneable so pure update functions
/// can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Starts at 1 and goes up once per score milestone.
    pub level: u32,
    /// Pixels a bullet rises per tick.
    pub bullet_speed: i32,
    /// Ticks the cooldown timer is reset to after each shot.
    pub cooldown: u32,
    /// Ticks left before the next shot is allowed; firing needs 0.
    pub cooldown_timer: u32,
    pub status: GameStatus,
}
