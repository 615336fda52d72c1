//! Sprite assets and the pose → sprite lookup table.
//!
//! A sprite is a small text file: the first line is the intrinsic pixel
//! size (`88x94`), every following line is one row of glyph art. The art is
//! stretched over the entity's rectangle at draw time, so its row and
//! column counts are independent of the pixel size.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{OBSTACLE_HEIGHT, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::entities::{CactusKind, DinoPose, SpriteId};
use crate::error::SpriteError;

/// Glyph used to fill a placeholder sprite.
pub const PLACEHOLDER_GLYPH: &str = "█";

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Intrinsic width in playfield pixels.
    pub width: i32,
    /// Intrinsic height in playfield pixels.
    pub height: i32,
    pub rows: Vec<String>,
    /// True when the asset failed to load and this stands in for it.
    pub placeholder: bool,
}

impl Sprite {
    /// Solid block of the given intrinsic size.
    pub fn placeholder(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            rows: vec![PLACEHOLDER_GLYPH.to_string()],
            placeholder: true,
        }
    }

    /// Number of glyph columns in the widest row.
    pub fn columns(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }
}

// ── Asset table ───────────────────────────────────────────────────────────────

pub const ALL_SPRITES: [SpriteId; 6] = [
    SpriteId::Dino(DinoPose::Running),
    SpriteId::Dino(DinoPose::Jumping),
    SpriteId::Dino(DinoPose::Dead),
    SpriteId::Cactus(CactusKind::Small),
    SpriteId::Cactus(CactusKind::Large),
    SpriteId::Cactus(CactusKind::Cluster),
];

/// File name of a sprite inside the asset directory.
pub fn asset_name(id: SpriteId) -> &'static str {
    match id {
        SpriteId::Dino(DinoPose::Running) => "dino-run.txt",
        SpriteId::Dino(DinoPose::Jumping) => "dino-jump.txt",
        SpriteId::Dino(DinoPose::Dead) => "dino-dead.txt",
        SpriteId::Cactus(CactusKind::Small) => "cactus1.txt",
        SpriteId::Cactus(CactusKind::Large) => "cactus2.txt",
        SpriteId::Cactus(CactusKind::Cluster) => "cactus3.txt",
    }
}

/// Intrinsic size the shipped art has. Placeholders use it so that a
/// missing file never changes obstacle hitboxes.
pub fn default_size(id: SpriteId) -> (i32, i32) {
    match id {
        SpriteId::Dino(_) => (PLAYER_WIDTH, PLAYER_HEIGHT),
        SpriteId::Cactus(CactusKind::Small) => (34, OBSTACLE_HEIGHT),
        SpriteId::Cactus(CactusKind::Large) => (69, OBSTACLE_HEIGHT),
        SpriteId::Cactus(CactusKind::Cluster) => (102, OBSTACLE_HEIGHT),
    }
}

// ── Parsing & loading ─────────────────────────────────────────────────────────

/// Parse sprite text. `path` is only used for error messages.
pub fn parse_sprite(path: &Path, text: &str) -> Result<Sprite, SpriteError> {
    let mut lines = text.lines();
    let header = lines
        .by_ref()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| SpriteError::MissingHeader { path: path.to_path_buf() })?;

    let bad_header = || SpriteError::BadHeader {
        path: path.to_path_buf(),
        header: header.to_string(),
    };
    let (w, h) = header.trim().split_once(|c: char| c == 'x' || c == 'X').ok_or_else(bad_header)?;
    let width: i32 = w.trim().parse().map_err(|_| bad_header())?;
    let height: i32 = h.trim().parse().map_err(|_| bad_header())?;
    if width <= 0 || height <= 0 {
        return Err(bad_header());
    }

    let mut rows: Vec<String> = lines.map(|l| l.trim_end().to_string()).collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    if rows.iter().all(|r| r.trim().is_empty()) {
        return Err(SpriteError::EmptyArt { path: path.to_path_buf() });
    }

    Ok(Sprite {
        width,
        height,
        rows,
        placeholder: false,
    })
}

pub fn load_sprite(path: &Path) -> Result<Sprite, SpriteError> {
    let text = fs::read_to_string(path).map_err(|source| SpriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sprite(path, &text)
}

// ── Sprite sheet ──────────────────────────────────────────────────────────────

/// Every sprite the game draws, keyed by `SpriteId`. Always complete:
/// anything that failed to load is a placeholder.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    sprites: HashMap<SpriteId, Sprite>,
}

impl SpriteSheet {
    /// Load all sprites from `dir`. Never fails; a broken asset is logged
    /// and replaced by a placeholder of its default size.
    pub fn load(dir: &Path) -> Self {
        let mut sprites = HashMap::new();
        let mut missing = 0;
        for id in ALL_SPRITES {
            let path: PathBuf = dir.join(asset_name(id));
            let sprite = match load_sprite(&path) {
                Ok(sprite) => sprite,
                Err(err) => {
                    warn!(sprite = ?id, error = %err, "sprite failed to load, using placeholder");
                    missing += 1;
                    let (w, h) = default_size(id);
                    Sprite::placeholder(w, h)
                }
            };
            sprites.insert(id, sprite);
        }
        info!(dir = %dir.display(), missing, "sprite sheet loaded");
        Self { sprites }
    }

    /// Sheet made only of placeholders; used when no assets are wanted.
    pub fn placeholders() -> Self {
        let sprites = ALL_SPRITES
            .iter()
            .map(|&id| {
                let (w, h) = default_size(id);
                (id, Sprite::placeholder(w, h))
            })
            .collect();
        Self { sprites }
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        // Both constructors insert every id in ALL_SPRITES.
        &self.sprites[&id]
    }

    /// Replace one entry, e.g. to try alternative art.
    pub fn insert(&mut self, id: SpriteId, sprite: Sprite) {
        self.sprites.insert(id, sprite);
    }

    pub fn placeholder_count(&self) -> usize {
        self.sprites.values().filter(|s| s.placeholder).count()
    }
}
