//! All game entity types: pure data, no logic.

// ── Sprite identifiers ────────────────────────────────────────────────────────

/// Animation state of the dinosaur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DinoPose {
    Running,
    Jumping,
    Dead,
}

/// The three cactus variants. Each has its own sprite width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CactusKind {
    Small,
    Large,
    Cluster,
}

impl CactusKind {
    pub const ALL: [CactusKind; 3] = [CactusKind::Small, CactusKind::Large, CactusKind::Cluster];
}

/// What an entity currently looks like. Resolved to image data through
/// `SpriteSheet`; entities never hold the image itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Dino(DinoPose),
    Cactus(CactusKind),
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in playfield pixels. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Player or obstacle.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub rect: Rect,
    pub sprite: SpriteId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Entity,
    /// Vertical velocity of the player in pixels per tick (negative = up).
    pub velocity_y: i32,
    /// Spawn order; only ever filtered, never reordered.
    pub obstacles: Vec<Entity>,
    pub score: u32,
    pub status: GameStatus,
    /// Physics ticks run since the last start/restart.
    pub frame: u64,
}
