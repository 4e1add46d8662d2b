use crate::animal::Animal;
use crate::timer::Accumulator;
use crate::util::rng::range_f32;

/// Random growth applied to hunger or boredom when their timer fires.
const NEED_GROWTH_MIN: f32 = 0.25;
const NEED_GROWTH_MAX: f32 = 1.25;
/// Boredom relieved per second while the pet is moving.
const MOTION_RELIEF_PER_SEC: f32 = 0.2;

/// Hunger/boredom drift and aging, driven by frame deltas in milliseconds.
#[derive(Debug, Clone)]
pub struct VitalsSim {
    boredom_timer: Accumulator,
    hunger_timer: Accumulator,
    age_timer: Accumulator,
}

impl VitalsSim {
    pub fn new(boredom_interval: f32, hunger_interval: f32, age_interval: f32) -> Self {
        Self {
            boredom_timer: Accumulator::new(boredom_interval),
            hunger_timer: Accumulator::new(hunger_interval),
            age_timer: Accumulator::new(age_interval),
        }
    }

    /// Passive growth of boredom then hunger.
    pub fn accumulate_needs(&mut self, animal: &mut Animal, dt: f32, rng: &mut fastrand::Rng) {
        if self.boredom_timer.accumulate(dt) {
            animal.add_boredom(range_f32(rng, NEED_GROWTH_MIN, NEED_GROWTH_MAX));
        }
        if self.hunger_timer.accumulate(dt) {
            animal.add_hunger(range_f32(rng, NEED_GROWTH_MIN, NEED_GROWTH_MAX));
        }
    }

    /// Continuous boredom relief while the pet is on the move.
    pub fn relieve_by_motion(&self, animal: &mut Animal, dt: f32, is_moving: bool) {
        if is_moving {
            animal.add_boredom(-MOTION_RELIEF_PER_SEC * dt / 1000.0);
        }
    }

    /// Returns true when the pet had a birthday this call.
    pub fn advance_age(&mut self, animal: &mut Animal, dt: f32) -> bool {
        if self.age_timer.accumulate(dt) {
            animal.age = animal.age.saturating_add(1);
            log::info!("{} is now {}", animal.name, animal.age);
            return true;
        }
        false
    }
}
