use glam::Vec2;

use crate::config::Tuning;
use crate::ecs::components::{Cupcake, Position};
use crate::ecs::systems::falling;
use crate::geom::Rect;
use crate::input::Held;
use crate::mode::MinigamePhase;
use crate::timer::Accumulator;
use crate::util::rng::range_px;

/// Cupcake sprite aspect ratio (height / width).
const CUPCAKE_ASPECT: f32 = 466.0 / 348.0;

/// Falling-cupcake collection minigame.
///
/// The character moves directly under the held keys; cupcakes spawn on a
/// fixed cadence and fall faster every `speed_interval`. Too many misses
/// ends the run until it is toggled off.
pub struct CupcakeRun {
    active: bool,
    game_over: bool,
    collected: u32,
    missed: u32,
    highest_score: u32,
    fall_speed: f32,
    spawn_timer: Accumulator,
    speed_timer: Accumulator,
    world: hecs::World,
    removed: Vec<hecs::Entity>,

    initial_fall_speed: f32,
    speed_increment: f32,
    character_speed: f32,
    max_missed: u32,
    arena: Vec2,
    margin: f32,
    cupcake_size: Vec2,
}

impl CupcakeRun {
    pub fn new(t: &Tuning) -> Self {
        Self {
            active: false,
            game_over: false,
            collected: 0,
            missed: 0,
            highest_score: 0,
            fall_speed: t.fall_speed,
            spawn_timer: Accumulator::new(t.cupcake_spawn_delay_ms),
            speed_timer: Accumulator::new(t.speed_interval_ms),
            world: hecs::World::new(),
            removed: Vec::new(),
            initial_fall_speed: t.fall_speed,
            speed_increment: t.speed_increment,
            character_speed: t.character_speed,
            max_missed: t.max_missed,
            arena: t.arena(),
            margin: t.cupcake_margin,
            cupcake_size: Vec2::new(t.cupcake_width, (t.cupcake_width * CUPCAKE_ASPECT).floor()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    pub fn highest_score(&self) -> u32 {
        self.highest_score
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn phase(&self) -> Option<MinigamePhase> {
        match (self.active, self.game_over) {
            (false, _) => None,
            (true, false) => Some(MinigamePhase::Active),
            (true, true) => Some(MinigamePhase::GameOver),
        }
    }

    /// Top-left corners of every cupcake in flight.
    pub fn cupcakes(&self) -> Vec<Vec2> {
        self.world
            .query::<(&Position, &Cupcake)>()
            .iter()
            .map(|(_, (p, _))| p.0)
            .collect()
    }

    pub fn cupcake_size(&self) -> Vec2 {
        self.cupcake_size
    }

    /// Enter or leave the minigame. Leaving resets the run and parks the
    /// character at `center`. Returns whether the game is now active.
    pub fn toggle(&mut self, character: &mut Rect, center: Vec2) -> bool {
        self.active = !self.active;
        self.game_over = false;
        if self.active {
            log::info!("Cupcake run started");
        } else {
            self.reset();
            character.set_center(center);
            log::info!("Cupcake run ended, high score {}", self.highest_score);
        }
        self.active
    }

    /// Clear cupcakes, counters and difficulty. The high score survives.
    pub fn reset(&mut self) {
        self.world.clear();
        self.collected = 0;
        self.missed = 0;
        self.fall_speed = self.initial_fall_speed;
        self.spawn_timer.reset();
        self.speed_timer.reset();
        self.active = false;
        self.game_over = false;
    }

    /// Advance one frame of `dt` ms. No-op unless active and not over.
    pub fn update(
        &mut self,
        dt: f32,
        held: Held,
        character: &mut Rect,
        rng: &mut fastrand::Rng,
    ) {
        if !self.active || self.game_over {
            return;
        }

        // Character: direct movement, no momentum, kept fully on screen.
        let step = held.axis() * self.character_speed * dt;
        character.pos += step;
        let max = (self.arena - character.size).max(Vec2::ZERO);
        character.pos = character.pos.clamp(Vec2::ZERO, max);

        if self.spawn_timer.accumulate(dt) {
            self.spawn(rng);
        }

        if self.speed_timer.accumulate(dt) {
            self.fall_speed += self.speed_increment;
            log::debug!("Cupcakes now fall at {} px/s", self.fall_speed);
        }

        let out = falling::advance(
            &mut self.world,
            self.fall_speed,
            dt,
            character,
            self.arena.y,
            &mut self.removed,
        );

        self.collected += out.collected;
        if self.collected > self.highest_score {
            self.highest_score = self.collected;
        }
        self.missed += out.missed;
        if self.missed >= self.max_missed {
            self.game_over = true;
            log::info!(
                "Cupcake run over: {} collected, {} missed",
                self.collected,
                self.missed
            );
        }
    }

    fn spawn(&mut self, rng: &mut fastrand::Rng) {
        let x = range_px(rng, self.margin, self.arena.x - self.margin - self.cupcake_size.x);
        let pos = Vec2::new(x, -self.cupcake_size.y);
        falling::spawn(&mut self.world, pos, self.cupcake_size);
        log::debug!("Cupcake spawned at x={x}");
    }
}
