/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world-pixel state into terminal commands through a [`Viewport`].

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::{Assets, Sprite};
use crate::compute::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{GameState, GameStatus, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_STARS: Color = Color::DarkGrey;
const C_BUTTON_BG: Color = Color::Rgb { r: 0, g: 128, b: 255 };
const C_BUTTON_FG: Color = Color::White;

const GAME_OVER_TEXT: &str = "Game Over! You Lost!";
const RESTART_LABEL: &str = "Restart Game";

/// Restart button in world pixels, centred just below the middle.
pub const RESTART_BUTTON: Rect = Rect::centered(WORLD_WIDTH / 2, WORLD_HEIGHT / 2 + 50, 240, 50);

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world pixels onto the bordered play field of a terminal.
///
/// Layout: row 0 HUD, row 1 top border, rows 2..h-2 play field,
/// row h-2 bottom border, row h-1 controls hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Rectangle in terminal cells.  `contains` is half-open.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub w: u16,
    pub h: u16,
}

impl CellRect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.col && col < self.col + self.w && row >= self.row && row < self.row + self.h
    }
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Viewport { width, height }
    }

    fn field_cols(&self) -> i32 {
        (self.width as i32 - 2).max(1)
    }

    fn field_rows(&self) -> i32 {
        (self.height as i32 - 4).max(1)
    }

    /// Terminal column for world `x`, clamped into the play field.
    pub fn col(&self, x: i32) -> u16 {
        let c = x.clamp(0, WORLD_WIDTH) * self.field_cols() / WORLD_WIDTH;
        (1 + c.min(self.field_cols() - 1)) as u16
    }

    /// Terminal row for world `y`, clamped into the play field.
    pub fn row(&self, y: i32) -> u16 {
        let r = y.clamp(0, WORLD_HEIGHT) * self.field_rows() / WORLD_HEIGHT;
        (2 + r.min(self.field_rows() - 1)) as u16
    }

    /// Last column a sprite may draw into (exclusive).
    fn right_edge(&self) -> u16 {
        self.width.saturating_sub(1)
    }

    /// Last row a sprite may draw into (exclusive).
    fn bottom_edge(&self) -> u16 {
        self.height.saturating_sub(2)
    }
}

/// Cells covered by the restart button.  Never narrower than its label
/// plus padding, nor shorter than one row.
pub fn restart_button_cells(vp: &Viewport) -> CellRect {
    let b = RESTART_BUTTON;
    let mapped_w = vp.col(b.x + b.w).saturating_sub(vp.col(b.x));
    let mapped_h = vp.row(b.y + b.h).saturating_sub(vp.row(b.y));
    let w = mapped_w.max(RESTART_LABEL.chars().count() as u16 + 4);
    let h = mapped_h.max(1);
    let cx = vp.col(b.x + b.w / 2);
    let cy = vp.row(b.y + b.h / 2);
    CellRect {
        col: cx.saturating_sub(w / 2),
        row: cy.saturating_sub(h / 2),
        w,
        h,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whichever status the session is in.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    vp: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, vp)?;
    draw_hud(out, state)?;

    match state.status {
        GameStatus::Playing => {
            draw_background(out, &assets.background, vp)?;
            for enemy in &state.enemies {
                draw_sprite(out, &assets.enemy, enemy.x, enemy.y, C_ENEMY, vp)?;
            }
            for bullet in &state.bullets {
                draw_sprite(out, &assets.bullet, bullet.x, bullet.y, C_BULLET, vp)?;
            }
            draw_sprite(out, &assets.player, state.player.x, state.player.y, C_PLAYER, vp)?;
        }
        GameStatus::GameOver => draw_game_over(out, state, vp)?,
    }
    draw_controls_hint(out, state, vp)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.width as usize;
    let h = vp.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Score: {}  Level: {}", state.score, state.level)))?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// Tile `tile` across the whole play field, wrapping in both directions.
fn draw_background<W: Write>(out: &mut W, tile: &Sprite, vp: &Viewport) -> std::io::Result<()> {
    let tile_w = tile.width();
    if tile_w == 0 || tile.height() == 0 {
        return Ok(());
    }
    let cols = vp.right_edge().saturating_sub(1) as usize;

    out.queue(style::SetForegroundColor(C_STARS))?;
    for row in 2..vp.bottom_edge() {
        let src = &tile.rows[(row as usize - 2) % tile.height()];
        let line: String = src
            .chars()
            .chain(std::iter::repeat(' '))
            .take(tile_w)
            .cycle()
            .take(cols)
            .collect();
        out.queue(cursor::MoveTo(1, row))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw `sprite` with its top-left corner at world (`x`, `y`), clipped to
/// the play field.
fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    x: i32,
    y: i32,
    color: Color,
    vp: &Viewport,
) -> std::io::Result<()> {
    let col = vp.col(x);
    let top = vp.row(y);
    let room = vp.right_edge().saturating_sub(col) as usize;

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.rows.iter().enumerate() {
        let row = top + i as u16;
        if row >= vp.bottom_edge() {
            break;
        }
        let clipped: String = line.chars().take(room).collect();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &GameState,
    vp: &Viewport,
) -> std::io::Result<()> {
    let hint = match state.status {
        GameStatus::Playing => "← → / A D : Move   SPACE : Shoot   Q : Quit",
        GameStatus::GameOver => "Click Restart (or R)   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, vp.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    let button = restart_button_cells(vp);
    let cx = vp.width / 2;

    let title_row = vp.row(WORLD_HEIGHT / 2 - 50);
    let col = cx.saturating_sub(GAME_OVER_TEXT.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, title_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(GAME_OVER_TEXT))?;

    let score_line = format!("Final Score: {}", state.score);
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, title_row + 1))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    // Button background
    out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
    for r in 0..button.h {
        out.queue(cursor::MoveTo(button.col, button.row + r))?;
        out.queue(Print(" ".repeat(button.w as usize)))?;
    }

    let label_w = RESTART_LABEL.chars().count() as u16;
    let label_col = button.col + button.w.saturating_sub(label_w) / 2;
    let label_row = button.row + button.h / 2;
    out.queue(cursor::MoveTo(label_col, label_row))?;
    out.queue(style::SetForegroundColor(C_BUTTON_FG))?;
    out.queue(Print(RESTART_LABEL))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;

    Ok(())
}
