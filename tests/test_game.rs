use std::time::{Duration, Instant};

use dino_runner::config::*;
use dino_runner::entities::*;
use dino_runner::game::{Game, KeyOutcome, TickReport};
use dino_runner::scheduler::{Scheduler, TickKind, Ticker};
use dino_runner::sprites::SpriteSheet;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn new_game(start: Instant) -> Game<StdRng> {
    Game::new(SpriteSheet::placeholders(), StdRng::seed_from_u64(7), start)
}

/// Step the game one physics period at a time, returning the new clock.
fn advance(game: &mut Game<StdRng>, mut now: Instant, ticks: u32) -> (Instant, TickReport) {
    let mut total = TickReport::default();
    for _ in 0..ticks {
        now += PHYSICS_PERIOD;
        let r = game.update(now);
        total.physics_ticks += r.physics_ticks;
        total.spawns += r.spawns;
        total.game_over |= r.game_over;
    }
    (now, total)
}

// ── Ticker ────────────────────────────────────────────────────────────────────

#[test]
fn ticker_starts_stopped() {
    let mut t = Ticker::new(Duration::from_millis(10));
    assert!(!t.is_running());
    assert!(!t.fire(Instant::now() + Duration::from_secs(5)));
}

#[test]
fn ticker_fires_once_per_period() {
    let t0 = Instant::now();
    let mut t = Ticker::new(Duration::from_millis(10));
    t.start(t0);
    assert!(!t.fire(t0 + Duration::from_millis(9)));
    assert!(t.fire(t0 + Duration::from_millis(10)));
    assert!(!t.fire(t0 + Duration::from_millis(15)));
    assert!(t.fire(t0 + Duration::from_millis(20)));
    assert_eq!(t.next_due(), Some(t0 + Duration::from_millis(30)));
}

#[test]
fn ticker_keeps_fixed_rate_when_slightly_late() {
    let t0 = Instant::now();
    let mut t = Ticker::new(Duration::from_millis(10));
    t.start(t0);
    assert!(t.fire(t0 + Duration::from_millis(13)));
    // Next deadline stays on the 10 ms grid
    assert_eq!(t.next_due(), Some(t0 + Duration::from_millis(20)));
}

#[test]
fn ticker_coalesces_missed_periods() {
    let t0 = Instant::now();
    let mut t = Ticker::new(Duration::from_millis(10));
    t.start(t0);
    let late = t0 + Duration::from_millis(55);
    assert!(t.fire(late));
    assert!(!t.fire(late));
    assert_eq!(t.next_due(), Some(late + Duration::from_millis(10)));
}

#[test]
fn ticker_stop_and_restart() {
    let t0 = Instant::now();
    let mut t = Ticker::new(Duration::from_millis(10));
    t.start(t0);
    t.stop();
    assert!(!t.is_running());
    assert!(!t.fire(t0 + Duration::from_millis(100)));
    let t1 = t0 + Duration::from_millis(100);
    t.start(t1);
    assert_eq!(t.next_due(), Some(t1 + Duration::from_millis(10)));
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[test]
fn scheduler_orders_events_by_deadline() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(Duration::from_millis(10), Duration::from_millis(25));
    s.start(t0);
    assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(10)));

    let mut kinds = Vec::new();
    let mut now = t0;
    for _ in 0..3 {
        now += Duration::from_millis(10);
        while let Some(k) = s.poll(now) {
            kinds.push(k);
        }
    }
    // At 30 ms the spawn (due 25 ms) is older than the physics tick (due 30 ms)
    assert_eq!(
        kinds,
        vec![
            TickKind::Physics,
            TickKind::Physics,
            TickKind::Spawn,
            TickKind::Physics
        ]
    );
}

#[test]
fn scheduler_physics_wins_ties() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(Duration::from_millis(10), Duration::from_millis(10));
    s.start(t0);
    let now = t0 + Duration::from_millis(10);
    assert_eq!(s.poll(now), Some(TickKind::Physics));
    assert_eq!(s.poll(now), Some(TickKind::Spawn));
    assert_eq!(s.poll(now), None);
}

#[test]
fn scheduler_stopped_has_no_deadline() {
    let t0 = Instant::now();
    let mut s = Scheduler::default();
    assert!(!s.is_running());
    assert_eq!(s.next_deadline(), None);
    s.start(t0);
    assert!(s.is_running());
    assert_eq!(s.physics().period(), PHYSICS_PERIOD);
    assert_eq!(s.spawn().period(), SPAWN_PERIOD);
    s.stop();
    assert_eq!(s.next_deadline(), None);
    assert_eq!(s.poll(t0 + Duration::from_secs(10)), None);
}

// ── Game ──────────────────────────────────────────────────────────────────────

#[test]
fn new_game_is_running_with_tickers() {
    let t0 = Instant::now();
    let game = new_game(t0);
    assert_eq!(game.state().status, GameStatus::Running);
    assert_eq!(game.state().score, 0);
    assert!(game.scheduler().is_running());
    assert_eq!(game.next_deadline(), Some(t0 + PHYSICS_PERIOD));
}

#[test]
fn update_before_deadline_does_nothing() {
    let t0 = Instant::now();
    let mut game = new_game(t0);
    let r = game.update(t0 + Duration::from_millis(1));
    assert!(!r.changed());
    assert_eq!(game.state().score, 0);
}

#[test]
fn ten_physics_ticks_score_ten() {
    let t0 = Instant::now();
    let mut game = new_game(t0);
    let (_, r) = advance(&mut game, t0, 10);
    assert_eq!(r.physics_ticks, 10);
    assert_eq!(r.spawns, 0);
    assert_eq!(game.state().score, 10);
    assert_eq!(game.state().status, GameStatus::Running);
}

#[test]
fn spawner_runs_on_its_own_period() {
    let t0 = Instant::now();
    let mut game = new_game(t0);
    let mut now = t0;
    // Jump continuously so nothing can hit the player before the spawn
    let mut spawned_at = None;
    for i in 0..200u32 {
        game.on_jump_or_restart_key(now);
        now += PHYSICS_PERIOD;
        let r = game.update(now);
        if r.spawns > 0 {
            spawned_at = Some(i + 1);
            break;
        }
    }
    // 1500 ms / 16 ms: the spawn fires on the 94th physics period, just
    // before that period's physics tick moves it once
    assert_eq!(spawned_at, Some(94));
    let o = &game.state().obstacles[0];
    assert_eq!(o.rect.x, OBSTACLE_SPAWN_X - OBSTACLE_SPEED);
    assert_eq!(o.rect.width, game.sprites().get(o.sprite).width);
}

#[test]
fn jump_key_only_accepted_on_ground() {
    let t0 = Instant::now();
    let mut game = new_game(t0);
    assert_eq!(game.on_jump_or_restart_key(t0), KeyOutcome::Jumped);
    assert_eq!(game.state().velocity_y, JUMP_VELOCITY);

    let (now, _) = advance(&mut game, t0, 3);
    let v = game.state().velocity_y;
    assert!(game.state().player.rect.y < GROUND_Y);
    assert_eq!(game.on_jump_or_restart_key(now), KeyOutcome::Ignored);
    assert_eq!(game.state().velocity_y, v);
}

#[test]
fn collision_stops_tickers_and_freezes_score() {
    let t0 = Instant::now();
    let mut game = new_game(t0);

    // Stand still until the first cactus arrives
    let mut now = t0;
    let mut ended = false;
    for _ in 0..400 {
        now += PHYSICS_PERIOD;
        if game.update(now).game_over {
            ended = true;
            break;
        }
    }
    assert!(ended, "first cactus should reach the idle player");
    assert_eq!(game.state().status, GameStatus::GameOver);
    assert_eq!(game.state().player.sprite, SpriteId::Dino(DinoPose::Dead));
    assert!(!game.scheduler().is_running());
    assert_eq!(game.next_deadline(), None);

    let score = game.state().score;
    let (_, r) = advance(&mut game, now, 200);
    assert!(!r.changed());
    assert_eq!(game.state().score, score);
}

#[test]
fn restart_key_resets_and_resumes() {
    let t0 = Instant::now();
    let mut game = new_game(t0);
    let mut now = t0;
    while game.state().status == GameStatus::Running {
        now += PHYSICS_PERIOD;
        game.update(now);
    }
    assert!(game.state().score > 0);

    assert_eq!(game.on_jump_or_restart_key(now), KeyOutcome::Restarted);
    let s = game.state();
    assert_eq!(s.score, 0);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.player.rect.y, GROUND_Y);
    assert_eq!(s.velocity_y, 0);
    assert_eq!(s.status, GameStatus::Running);
    assert_eq!(s.player.sprite, SpriteId::Dino(DinoPose::Running));
    assert!(game.scheduler().is_running());
    assert_eq!(game.next_deadline(), Some(now + PHYSICS_PERIOD));

    let (_, r) = advance(&mut game, now, 5);
    assert_eq!(r.physics_ticks, 5);
    assert_eq!(game.state().score, 5);
}
