pub mod driver;

use chrono::Utc;
use glam::Vec2;

use crate::animal::Animal;
use crate::config::Tuning;
use crate::cupcake::CupcakeRun;
use crate::error::SimError;
use crate::feeding::FoodPool;
use crate::geom::Rect;
use crate::input::{ClickTracker, Command, InputSnapshot, PointerEvent};
use crate::launch::BoundedBody;
use crate::mode::{ModeCoordinator, ModeEvent, ModeState};
use crate::save::{SaveRecord, SAVE_VERSION};
use crate::setup::PetSetup;
use crate::vitals::VitalsSim;

/// Notable things that happened during a frame, for audio/UI collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSignal {
    /// Double press on the pet.
    PetPoked,
    Fed,
    FoodPlaced,
    LaunchStarted,
    LaunchStopped,
    LaunchEnded,
    CooldownEnded,
    MinigameStarted,
    MinigameEnded,
    MinigameOver,
}

/// The main play scene: one pet, its food, play mode and the cupcake game.
pub struct GameScene {
    tuning: Tuning,
    animal: Animal,
    body: BoundedBody,
    mode: ModeCoordinator,
    food: FoodPool,
    cupcakes: CupcakeRun,
    clicks: ClickTracker,
    rng: fastrand::Rng,
}

impl GameScene {
    /// New session from character setup.
    pub fn new(setup: &PetSetup, tuning: Tuning) -> Self {
        let mode = ModeCoordinator::new(
            setup.playtime,
            tuning.playtime_cooldown_ms,
            vitals(&tuning),
        );
        let food = FoodPool::new(setup.food_quantity, &tuning);
        Self::assemble(setup.animal(), mode, food, tuning)
    }

    /// Rebuild a session from a save record.
    pub fn from_record(record: &SaveRecord, tuning: Tuning) -> Self {
        let animal = Animal::restore(
            record.name.clone(),
            record.age,
            record.hunger_level,
            record.boredom_level,
        );
        let mode = ModeCoordinator::restore(
            record.playtime,
            tuning.playtime_cooldown_ms,
            vitals(&tuning),
            record.in_cooldown,
            record.cooldown_timer,
        );
        let food = FoodPool::restore(record.quantity, record.remaining, record.cooldown, &tuning);
        Self::assemble(animal, mode, food, tuning)
    }

    fn assemble(animal: Animal, mode: ModeCoordinator, food: FoodPool, tuning: Tuning) -> Self {
        let mut body = BoundedBody::new(tuning.arena(), tuning.launch_margin);
        body.set_position(Rect::centered(tuning.arena_center(), tuning.pet_size()));
        Self {
            body,
            mode,
            food,
            cupcakes: CupcakeRun::new(&tuning),
            clicks: ClickTracker::new(tuning.double_click_ms, tuning.double_click_radius),
            rng: fastrand::Rng::new(),
            animal,
            tuning,
        }
    }

    /// Replace the RNG, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    pub fn snapshot(&self) -> SaveRecord {
        SaveRecord {
            version: SAVE_VERSION,
            name: self.animal.name.clone(),
            age: self.animal.age,
            hunger_level: self.animal.hunger(),
            boredom_level: self.animal.boredom(),
            quantity: self.food.capacity(),
            remaining: self.food.remaining(),
            cooldown: self.food.cooldown_remaining(),
            playtime: self.mode.playtime,
            playtime_remaining: self.mode.playtime_remaining(),
            in_cooldown: self.mode.in_cooldown(),
            cooldown_timer: self.mode.cooldown_timer(),
            timestamp: Utc::now(),
        }
    }

    pub fn animal(&self) -> &Animal {
        &self.animal
    }

    pub fn coordinator(&self) -> &ModeCoordinator {
        &self.mode
    }

    pub fn food(&self) -> &FoodPool {
        &self.food
    }

    pub fn cupcakes(&self) -> &CupcakeRun {
        &self.cupcakes
    }

    pub fn mode(&self) -> ModeState {
        ModeState::from_parts(self.mode.activity(), self.cupcakes.phase())
    }

    pub fn pet_rect(&self) -> Rect {
        self.body
            .position()
            .unwrap_or_else(|| Rect::centered(self.tuning.arena_center(), self.tuning.pet_size()))
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn is_moving(&self) -> bool {
        self.body.is_moving()
    }

    /// Apply this frame's discrete input. `Back` is only handled here when it
    /// leaves the minigame; returns whether it was consumed.
    pub fn handle_input(&mut self, input: &InputSnapshot, signals: &mut Vec<SceneSignal>) -> bool {
        let mut back_consumed = false;

        for &event in &input.pointer_events {
            if let PointerEvent::Press(p) = event {
                if self.clicks.press(p) && self.pet_rect().contains(p) {
                    signals.push(SceneSignal::PetPoked);
                    continue;
                }
            }
            if !self.cupcakes.is_active() {
                let pet = self.pet_rect();
                if self.food.handle_pointer(event, &pet, &mut self.animal) {
                    signals.push(SceneSignal::Fed);
                }
            }
        }

        for &command in &input.commands {
            match command {
                Command::ToggleMinigame => self.toggle_minigame(signals),
                Command::ToggleLaunch => self.toggle_launch(signals),
                Command::SpawnFood => {
                    if !self.cupcakes.is_active() && self.food.spawn_food(&mut self.rng)
                    {
                        signals.push(SceneSignal::FoodPlaced);
                    }
                }
                Command::Back => {
                    if self.cupcakes.is_active() {
                        self.toggle_minigame(signals);
                        back_consumed = true;
                    }
                }
                Command::Save => {}
            }
        }

        back_consumed
    }

    /// Enter the minigame if play and cooldown allow it, or leave it.
    pub fn toggle_minigame(&mut self, signals: &mut Vec<SceneSignal>) {
        if !self.cupcakes.is_active() && !self.mode.can_enter_minigame() {
            return;
        }
        let center = self.tuning.arena_center();
        let mut rect = self.pet_rect();
        let now_active = self.cupcakes.toggle(&mut rect, center);
        self.body.set_position(rect);
        self.body.velocity = Vec2::ZERO;
        signals.push(if now_active {
            SceneSignal::MinigameStarted
        } else {
            SceneSignal::MinigameEnded
        });
    }

    /// Start or stop play mode. Ignored during the minigame. Stopping parks
    /// the pet in the arena center.
    pub fn toggle_launch(&mut self, signals: &mut Vec<SceneSignal>) {
        if self.cupcakes.is_active() {
            return;
        }
        let was_playing = self.mode.launch_mode();
        let playing = self.mode.toggle_launch();
        if playing {
            signals.push(SceneSignal::LaunchStarted);
        } else if was_playing {
            self.body.recenter(self.tuning.arena_center());
            signals.push(SceneSignal::LaunchStopped);
        }
    }

    /// Advance the scene by `dt` ms. Outside the minigame the order is body,
    /// mode and vitals, food refill, then the pointer reaction.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        signals: &mut Vec<SceneSignal>,
    ) -> Result<(), SimError> {
        self.clicks.advance(dt);

        if self.cupcakes.is_active() {
            let was_over = self.cupcakes.game_over();
            let mut rect = self.pet_rect();
            self.cupcakes.update(dt, input.held, &mut rect, &mut self.rng);
            self.body.set_position(rect);
            if !was_over && self.cupcakes.game_over() {
                signals.push(SceneSignal::MinigameOver);
            }
            return Ok(());
        }

        if self.mode.launch_mode() {
            self.body.update(&mut self.animal, &mut self.rng)?;
        }

        match self
            .mode
            .update(dt, self.body.is_moving(), &mut self.animal, &mut self.rng)
        {
            ModeEvent::LaunchEnded => {
                self.body.recenter(self.tuning.arena_center());
                signals.push(SceneSignal::LaunchEnded);
            }
            ModeEvent::CooldownEnded => signals.push(SceneSignal::CooldownEnded),
            ModeEvent::None => {}
        }

        self.food.update(dt);
        self.chase_pointer(input.pointer);
        Ok(())
    }

    /// During play a resting pet is relaunched when the pointer touches it,
    /// and flees the pointer when it comes close.
    fn chase_pointer(&mut self, pointer: Vec2) {
        if !self.mode.launch_mode() {
            return;
        }
        let rect = self.pet_rect();
        if !self.body.is_moving() && rect.contains(pointer) {
            self.body.launch(&mut self.rng);
        }
        if rect.center().distance(pointer) < self.tuning.mouse_proximity_threshold {
            self.body.flee(pointer, self.tuning.flee_speed);
        }
    }
}

fn vitals(t: &Tuning) -> VitalsSim {
    VitalsSim::new(t.boredom_interval_ms, t.hunger_interval_ms, t.age_interval_ms)
}
