/// Sprite assets — small text-art files loaded once at startup.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{GameError, Result};

/// A multi-line block of characters drawn with its top-left corner at the
/// entity's position.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rows: Vec<String>,
}

impl Sprite {
    /// Parse sprite text, dropping trailing blank lines.
    pub fn parse(text: &str) -> Self {
        let mut rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        Sprite { rows }
    }

    /// Width in terminal columns.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub enemy: Sprite,
    pub bullet: Sprite,
    /// Starfield tiled behind the play field.
    pub background: Sprite,
}

pub const PLAYER_FILE: &str = "player.txt";
pub const ENEMY_FILE: &str = "enemy.txt";
pub const BULLET_FILE: &str = "bullet.txt";
pub const BACKGROUND_FILE: &str = "background.txt";

/// The `assets/` directory shipped next to the crate manifest.
pub fn default_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn load_sprite(dir: &Path, name: &str) -> Result<Sprite> {
    let path = dir.join(name);
    if !path.exists() {
        warn!("missing asset {}", path.display());
        return Err(GameError::MissingAsset {
            name: name.to_string(),
            path,
        });
    }
    let sprite = Sprite::parse(&fs::read_to_string(&path)?);
    debug!(
        "loaded {} ({}x{})",
        name,
        sprite.width(),
        sprite.height()
    );
    Ok(sprite)
}

impl Assets {
    /// Load every required sprite from `dir`.  The first missing file aborts.
    pub fn load(dir: &Path) -> Result<Assets> {
        Ok(Assets {
            player: load_sprite(dir, PLAYER_FILE)?,
            enemy: load_sprite(dir, ENEMY_FILE)?,
            bullet: load_sprite(dir, BULLET_FILE)?,
            background: load_sprite(dir, BACKGROUND_FILE)?,
        })
    }
}
