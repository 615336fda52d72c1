//! The running game: state plus the timers and randomness that drive it.
//!
//! `compute` holds the pure transitions; `Game` decides when they run.
//! The host feeds it the current time and key presses from one thread.

use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::compute::{init_state, jump, restart, spawn_obstacle, tick};
use crate::entities::{GameState, GameStatus};
use crate::scheduler::{Scheduler, TickKind};
use crate::sprites::SpriteSheet;

/// What the single action key did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Jumped,
    Restarted,
    /// Mid-air press; nothing changed.
    Ignored,
}

/// Work done by one `update` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub physics_ticks: u32,
    pub spawns: u32,
    /// True when this update ended the run.
    pub game_over: bool,
}

impl TickReport {
    /// Whether the playfield needs repainting.
    pub fn changed(&self) -> bool {
        self.physics_ticks > 0 || self.spawns > 0
    }
}

pub struct Game<R: Rng> {
    state: GameState,
    sprites: SpriteSheet,
    scheduler: Scheduler,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Fresh run with both tickers started at `now`.
    pub fn new(sprites: SpriteSheet, rng: R, now: Instant) -> Self {
        Self::with_scheduler(sprites, rng, Scheduler::default(), now)
    }

    pub fn with_scheduler(sprites: SpriteSheet, rng: R, mut scheduler: Scheduler, now: Instant) -> Self {
        scheduler.start(now);
        info!("run started");
        Self {
            state: init_state(),
            sprites,
            scheduler,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Run every ticker event due at `now`, oldest first. Stops both tickers
    /// on the tick that ends the run.
    pub fn update(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        while let Some(kind) = self.scheduler.poll(now) {
            match kind {
                TickKind::Physics => {
                    self.state = tick(&self.state);
                    report.physics_ticks += 1;
                }
                TickKind::Spawn => {
                    let before = self.state.obstacles.len();
                    self.state = spawn_obstacle(&self.state, &self.sprites, &mut self.rng);
                    if self.state.obstacles.len() > before {
                        report.spawns += 1;
                    }
                }
            }
            if self.state.status == GameStatus::GameOver {
                self.scheduler.stop();
                report.game_over = true;
                info!(score = self.state.score, ticks = self.state.frame, "run ended");
                break;
            }
        }
        report
    }

    /// Jump while running, restart after game over.
    pub fn on_jump_or_restart_key(&mut self, now: Instant) -> KeyOutcome {
        match self.state.status {
            GameStatus::Running => {
                let next = jump(&self.state);
                let jumped = next != self.state;
                self.state = next;
                if jumped {
                    KeyOutcome::Jumped
                } else {
                    KeyOutcome::Ignored
                }
            }
            GameStatus::GameOver => {
                self.state = restart(&self.state);
                self.scheduler.start(now);
                KeyOutcome::Restarted
            }
        }
    }
}
