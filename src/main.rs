use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::process;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::thread_rng;

use space_shooter::assets::{self, Assets};
use space_shooter::compute::{new_session, restart, tick};
use space_shooter::display::{self, restart_button_cells, Viewport};
use space_shooter::entities::{GameState, GameStatus, TickInput};
use space_shooter::{GameError, Result};

const WINDOW_TITLE: &str = "AI Space Shooter";

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// What the drained events asked for, beyond held keys.
#[derive(Default)]
struct FrameRequests {
    quit: bool,
    restart: bool,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we keep
/// a `key_frame` map recording the frame of the last press/repeat event for
/// every key.  Each frame the keys that are still "fresh" become the
/// `TickInput` for the simulation.  On keyboard-enhancement terminals
/// (kitty protocol) releases remove keys immediately; elsewhere keys expire
/// after `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(out: &mut W, assets: &Assets) -> Result<()> {
    let mut rng = thread_rng();
    let mut state: GameState = new_session(&mut rng);
    info!("session started with {} enemies", state.enemies.len());

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (width, height) = terminal::size()?;
        let vp = Viewport::new(width, height);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut requests = FrameRequests::default();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                requests.quit = true;
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                requests.quit = true;
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => requests.restart = true,
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if restart_button_cells(&vp).contains(column, row) {
                        requests.restart = true;
                    }
                }
                _ => {}
            }
        }

        if requests.quit {
            info!("quit at score {} level {}", state.score, state.level);
            return Ok(());
        }

        match state.status {
            GameStatus::Playing => {
                let input = TickInput {
                    left: any_held(
                        &key_frame,
                        &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                        frame,
                    ),
                    right: any_held(
                        &key_frame,
                        &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                        frame,
                    ),
                    fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
                };
                state = tick(&state, &input, &mut rng);
            }
            GameStatus::GameOver => {
                if requests.restart {
                    state = restart(&mut rng);
                    key_frame.clear();
                }
            }
        }

        display::render(out, &state, assets, &vp)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    // Assets are checked before the terminal is touched so the message
    // lands on a normal screen.
    let assets = match Assets::load(&assets::default_dir()) {
        Ok(assets) => assets,
        Err(GameError::MissingAsset { name, .. }) => {
            eprintln!("Error: {} not found!", name);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&assets) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(assets: &Assets) -> Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(WINDOW_TITLE))?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = game_loop(&mut out, assets);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
