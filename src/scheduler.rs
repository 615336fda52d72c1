//! Periodic tickers polled by the host event loop.
//!
//! Nothing here sleeps or spawns threads: the host asks for the next
//! deadline, waits however it likes, then calls `poll` with the current
//! time. All state lives on the caller's thread.

use std::time::{Duration, Instant};

use crate::config::{PHYSICS_PERIOD, SPAWN_PERIOD};

/// A fixed-rate timer that can be stopped and restarted.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// A stopped ticker.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// First firing one full period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Fire once if due. Missed periods are coalesced: when the poll is
    /// late by more than a period, the next firing is rescheduled from `now`
    /// instead of replaying every missed one.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    Physics,
    Spawn,
}

/// The game's two timers: the 60 Hz physics tick and the obstacle spawner.
#[derive(Clone, Debug)]
pub struct Scheduler {
    physics: Ticker,
    spawn: Ticker,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(PHYSICS_PERIOD, SPAWN_PERIOD)
    }
}

impl Scheduler {
    /// Both tickers start stopped.
    pub fn new(physics_period: Duration, spawn_period: Duration) -> Self {
        Self {
            physics: Ticker::new(physics_period),
            spawn: Ticker::new(spawn_period),
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.physics.start(now);
        self.spawn.start(now);
    }

    pub fn stop(&mut self) {
        self.physics.stop();
        self.spawn.stop();
    }

    pub fn is_running(&self) -> bool {
        self.physics.is_running() || self.spawn.is_running()
    }

    pub fn physics(&self) -> &Ticker {
        &self.physics
    }

    pub fn spawn(&self) -> &Ticker {
        &self.spawn
    }

    /// Earliest pending deadline, `None` when both tickers are stopped.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.physics.next_due(), self.spawn.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Pop the earliest due event. Physics wins ties.
    pub fn poll(&mut self, now: Instant) -> Option<TickKind> {
        let physics_due = self.physics.next_due().filter(|&d| d <= now);
        let spawn_due = self.spawn.next_due().filter(|&d| d <= now);
        match (physics_due, spawn_due) {
            (Some(p), Some(s)) if s < p => {
                self.spawn.fire(now);
                Some(TickKind::Spawn)
            }
            (Some(_), _) => {
                self.physics.fire(now);
                Some(TickKind::Physics)
            }
            (None, Some(_)) => {
                self.spawn.fire(now);
                Some(TickKind::Spawn)
            }
            (None, None) => None,
        }
    }
}
