//! Playfield geometry, physics tuning and process configuration.
//!
//! All gameplay numbers are in playfield pixels and per-tick units; the
//! physics step is fixed-timestep, so nothing here depends on frame time.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const BOARD_WIDTH: i32 = 750;
pub const BOARD_HEIGHT: i32 = 250;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_X: i32 = 50;
pub const PLAYER_WIDTH: i32 = 88;
pub const PLAYER_HEIGHT: i32 = 94;

/// Resting y of the player: its feet touch the bottom of the playfield.
pub const GROUND_Y: i32 = BOARD_HEIGHT - PLAYER_HEIGHT;

/// Added to the vertical velocity every physics tick (positive = down).
pub const GRAVITY: i32 = 1;

/// Velocity set by an accepted jump.
pub const JUMP_VELOCITY: i32 = -17;

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// Pixels an obstacle moves left per physics tick.
pub const OBSTACLE_SPEED: i32 = 12;
pub const OBSTACLE_SPAWN_X: i32 = 700;
pub const OBSTACLE_HEIGHT: i32 = 70;
pub const OBSTACLE_Y: i32 = BOARD_HEIGHT - OBSTACLE_HEIGHT;

// ── Scoring & overlay ─────────────────────────────────────────────────────────

pub const SCORE_PER_TICK: u32 = 1;

/// Baseline position of the score / game-over text.
pub const TEXT_X: i32 = 10;
pub const TEXT_Y: i32 = 35;

// ── Timers ────────────────────────────────────────────────────────────────────

/// 1000 / 60 ms, truncated, like a millisecond-resolution 60 Hz timer.
pub const PHYSICS_PERIOD: Duration = Duration::from_millis(1000 / 60);
pub const SPAWN_PERIOD: Duration = Duration::from_millis(1500);

// ── Environment ───────────────────────────────────────────────────────────────

pub const ASSETS_ENV_VAR: &str = "DINO_ASSETS";
pub const LOG_FILE_ENV_VAR: &str = "DINO_LOG_FILE";
pub const LOG_FILTER_ENV_VAR: &str = "DINO_LOG";

pub const DEFAULT_ASSET_DIR: &str = "assets";
pub const DEFAULT_LOG_FILE: &str = "dino_runner.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Directory holding the sprite text files.
    pub asset_dir: PathBuf,
    /// Where the tracing subscriber writes; stderr is unusable while the
    /// alternate screen is active.
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            log_file: env::temp_dir().join(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `DINO_ASSETS` and `DINO_LOG_FILE`.
    /// Empty variables count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            asset_dir: non_empty(ASSETS_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_dir),
            log_file: non_empty(LOG_FILE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}
