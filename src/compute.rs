//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, the sprite sheet and an RNG handle) and
//! returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{
    GRAVITY, GROUND_Y, JUMP_VELOCITY, OBSTACLE_HEIGHT, OBSTACLE_SPAWN_X, OBSTACLE_SPEED,
    OBSTACLE_Y, PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_X, SCORE_PER_TICK,
};
use crate::entities::{CactusKind, DinoPose, Entity, GameState, GameStatus, Rect, SpriteId};
use crate::sprites::SpriteSheet;

// ── Constructors ─────────────────────────────────────────────────────────────

fn fresh_player() -> Entity {
    Entity {
        rect: Rect::new(PLAYER_X, GROUND_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
        sprite: SpriteId::Dino(DinoPose::Running),
    }
}

/// Build the initial game state: running, player on the ground, no cacti.
pub fn init_state() -> GameState {
    GameState {
        player: fresh_player(),
        velocity_y: 0,
        obstacles: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

pub fn on_ground(state: &GameState) -> bool {
    state.player.rect.y == GROUND_Y
}

/// Strict separating-axis overlap test. Boxes that only share an edge
/// do not collide.
pub fn collision(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Start a jump. Ignored mid-air and after game over.
pub fn jump(state: &GameState) -> GameState {
    if state.status != GameStatus::Running || !on_ground(state) {
        return state.clone();
    }
    GameState {
        player: Entity {
            sprite: SpriteId::Dino(DinoPose::Jumping),
            ..state.player.clone()
        },
        velocity_y: JUMP_VELOCITY,
        ..state.clone()
    }
}

/// Back to a fresh run. Only meaningful from `GameOver`; a running game is
/// returned unchanged.
pub fn restart(state: &GameState) -> GameState {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    info!(final_score = state.score, "restarting run");
    init_state()
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Add one cactus at the right edge. The variant is uniform over
/// `CactusKind::ALL`; its hitbox width is the sprite's intrinsic width.
pub fn spawn_obstacle(state: &GameState, sprites: &SpriteSheet, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }
    let kind = CactusKind::ALL[rng.gen_range(0..CactusKind::ALL.len())];
    let sprite = SpriteId::Cactus(kind);
    let width = sprites.get(sprite).width;
    debug!(?kind, width, frame = state.frame, "spawning obstacle");

    let mut obstacles = state.obstacles.clone();
    obstacles.push(Entity {
        rect: Rect::new(OBSTACLE_SPAWN_X, OBSTACLE_Y, width, OBSTACLE_HEIGHT),
        sprite,
    });
    GameState {
        obstacles,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one physics tick.  A finished game is
/// returned unchanged.
pub fn tick(state: &GameState) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }

    // ── 1. Gravity & landing ─────────────────────────────────────────────────
    let mut player = state.player.clone();
    let mut velocity_y = state.velocity_y + GRAVITY;
    player.rect.y += velocity_y;
    if player.rect.y > GROUND_Y {
        player.rect.y = GROUND_Y;
        velocity_y = 0;
        player.sprite = SpriteId::Dino(DinoPose::Running);
    }

    // ── 2. Scroll obstacles, drop the ones fully past the left edge ─────────
    let obstacles: Vec<Entity> = state
        .obstacles
        .iter()
        .map(|o| Entity {
            rect: Rect {
                x: o.rect.x - OBSTACLE_SPEED,
                ..o.rect
            },
            ..o.clone()
        })
        .filter(|o| o.rect.right() >= 0)
        .collect();

    // ── 3. Collision ─────────────────────────────────────────────────────────
    let hit = obstacles.iter().find(|o| collision(&player.rect, &o.rect));
    let status = match hit {
        Some(obstacle) => {
            player.sprite = SpriteId::Dino(DinoPose::Dead);
            info!(
                score = state.score.saturating_add(SCORE_PER_TICK),
                obstacle = ?obstacle.sprite,
                "collision, game over"
            );
            GameStatus::GameOver
        }
        None => GameStatus::Running,
    };

    // ── 4. Score: one point per survived tick, including the fatal one ──────
    GameState {
        player,
        velocity_y,
        obstacles,
        score: state.score.saturating_add(SCORE_PER_TICK),
        status,
        frame: state.frame + 1,
    }
}
