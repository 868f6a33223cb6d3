//! Snake engine: heading gate and tick scheduling
//!
//! The gate latches at most one heading between ticks; the tick loop reads
//! the latched heading exactly once per tick, so several key presses
//! between ticks coalesce into the latest legal one. The fixed-period
//! timer starts on `start`, stops on game over and re-anchors on restart.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clock::Millis;
use crate::consts::{MAX_CATCHUP_TICKS, SNAKE_START_LENGTH};
use crate::event::GameEvent;
use crate::input::Direction;
use crate::settings::SnakeSettings;

use super::food::place_food;
use super::tick::tick;

/// One snake-game instance: owned state plus explicit transition/query
/// surface
pub struct SnakeEngine {
    settings: SnakeSettings,
    rng: Pcg32,
    /// Body cells, head first
    segments: Vec<IVec2>,
    food: IVec2,
    /// Heading latched for the next tick
    heading: Direction,
    score: u32,
    high_score: u32,
    game_over: bool,
    running: bool,
    next_tick_at: Millis,
    last_accepted: Option<Millis>,
    events: Vec<GameEvent>,
}

impl SnakeEngine {
    /// Build an initialized engine; the timer starts on `start`.
    /// `high_score` comes from the caller's persistence collaborator.
    pub fn new(settings: SnakeSettings, seed: u64, high_score: u32) -> Self {
        let mut engine = Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            segments: Vec::new(),
            food: IVec2::ZERO,
            heading: Direction::Right,
            score: 0,
            high_score,
            game_over: false,
            running: false,
            next_tick_at: 0,
            last_accepted: None,
            events: Vec::new(),
        };
        engine.reinitialize();
        engine
    }

    /// Three segments in a horizontal line at the grid center, body
    /// extending left; fixed initial food cell
    fn reinitialize(&mut self) {
        let center = self.settings.grid_size / 2;
        self.segments = (0..SNAKE_START_LENGTH)
            .map(|i| IVec2::new(center - i, center))
            .collect();
        self.food = IVec2::new(self.settings.grid_size / 4, self.settings.grid_size / 4);
        self.heading = Direction::Right;
        self.score = 0;
        self.game_over = false;
        self.last_accepted = None;
    }

    /// Anchor the tick timer and begin simulating
    pub fn start(&mut self, now: Millis) {
        self.running = true;
        self.next_tick_at = now + self.settings.tick_ms;
    }

    /// Fresh snake, food and score; the high score and RNG stream survive
    pub fn restart(&mut self, now: Millis) {
        self.reinitialize();
        self.start(now);
        log::info!("snake game restarted");
    }

    /// Heading gate: latches the requested heading unless it reverses the
    /// currently latched one or arrives inside the cooldown. Returns
    /// whether the heading was accepted.
    pub fn submit_direction(&mut self, dir: Direction, now: Millis) -> bool {
        if !self.running || self.game_over {
            return false;
        }
        if let Some(last) = self.last_accepted {
            if now.saturating_sub(last) < self.settings.heading_cooldown_ms {
                return false;
            }
        }
        if dir == self.heading.reverse() {
            return false;
        }
        self.heading = dir;
        self.last_accepted = Some(now);
        true
    }

    /// Run every tick that has come due. Bounded catch-up: if the caller
    /// fell far behind, the backlog is dropped instead of replayed.
    pub fn poll(&mut self, now: Millis) {
        if !self.running {
            return;
        }
        let mut steps = 0;
        while self.running && now >= self.next_tick_at {
            self.step();
            self.next_tick_at += self.settings.tick_ms;
            steps += 1;
            if steps >= MAX_CATCHUP_TICKS {
                if now >= self.next_tick_at {
                    self.next_tick_at = now + self.settings.tick_ms;
                }
                break;
            }
        }
    }

    /// One tick: read the latched heading, advance, handle capture
    fn step(&mut self) {
        let outcome = tick(
            &self.segments,
            self.food,
            self.heading,
            self.settings.grid_size,
        );
        if outcome.collided {
            self.game_over = true;
            self.running = false;
            self.events.push(GameEvent::GameOver);
            log::info!("snake game over at score {}", self.score);
            return;
        }
        self.segments = outcome.segments;
        if outcome.ate {
            self.score += 1;
            self.events.push(GameEvent::FoodEaten { score: self.score });
            if self.score > self.high_score {
                self.high_score = self.score;
                self.events.push(GameEvent::NewHighScore { score: self.score });
            }
            self.food = place_food(
                &mut self.rng,
                self.settings.grid_size,
                &self.segments,
                self.food,
            );
        }
    }

    /// Deadline of the next tick while running, for the scheduling shell
    pub fn next_deadline(&self) -> Option<Millis> {
        self.running.then_some(self.next_tick_at)
    }

    pub fn segments(&self) -> &[IVec2] {
        &self.segments
    }

    pub fn food(&self) -> IVec2 {
        self.food
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Take all pending side-effect signals
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, segments: Vec<IVec2>, food: IVec2, heading: Direction) {
        self.segments = segments;
        self.food = food;
        self.heading = heading;
    }
}
