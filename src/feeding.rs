use glam::Vec2;

use crate::animal::Animal;
use crate::config::Tuning;
use crate::geom::Rect;
use crate::input::PointerEvent;
use crate::timer::Countdown;
use crate::util::rng::range_px;

/// A draggable food portion on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodItem {
    pub rect: Rect,
    pub dragging: bool,
    /// Grab point relative to the top-left corner.
    offset: Vec2,
}

impl FoodItem {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            dragging: false,
            offset: Vec2::ZERO,
        }
    }

    /// Press grabs, motion drags, release drops. Returns true on drop.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press(p) => {
                if self.rect.contains(p) {
                    self.dragging = true;
                    self.offset = self.rect.pos - p;
                }
                false
            }
            PointerEvent::Motion(p) => {
                if self.dragging {
                    self.rect.pos = p + self.offset;
                }
                false
            }
            PointerEvent::Release(_) => {
                if self.dragging {
                    self.dragging = false;
                    return true;
                }
                false
            }
        }
    }
}

/// Food portions with a refill cooldown once they run out.
pub struct FoodPool {
    capacity: u32,
    remaining: u32,
    cooldown: Countdown,
    pub cooldown_duration: f32,
    pub hunger_decrease: f32,
    item: Option<FoodItem>,
    arena: Vec2,
    margin: f32,
    food_size: f32,
}

impl FoodPool {
    pub fn new(capacity: u32, t: &Tuning) -> Self {
        Self {
            capacity,
            remaining: capacity,
            cooldown: Countdown::idle(),
            cooldown_duration: t.food_cooldown_ms,
            hunger_decrease: t.hunger_decrease,
            item: None,
            arena: t.arena(),
            margin: t.food_margin,
            food_size: t.food_size,
        }
    }

    /// Rebuild from saved values. An empty pool with no cooldown running
    /// restarts the refill cooldown so it cannot stay empty forever.
    pub fn restore(capacity: u32, remaining: u32, cooldown_ms: f32, t: &Tuning) -> Self {
        let mut pool = Self::new(capacity, t);
        pool.remaining = remaining.min(capacity);
        if cooldown_ms > 0.0 {
            pool.cooldown.start(cooldown_ms);
        } else if pool.remaining == 0 && capacity > 0 {
            pool.cooldown.start(pool.cooldown_duration);
        }
        pool
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown.remaining()
    }

    pub fn item(&self) -> Option<&FoodItem> {
        self.item.as_ref()
    }

    /// Place one portion at a random spot. Only one portion may be out at a
    /// time, and none during cooldown or when the pool is empty.
    pub fn spawn_food(&mut self, rng: &mut fastrand::Rng) -> bool {
        if self.item.is_some() || self.cooldown.is_running() || self.remaining == 0 {
            return false;
        }
        let x = range_px(rng, self.margin, self.arena.x - self.margin - self.food_size);
        let y = range_px(rng, self.margin, self.arena.y - self.margin - self.food_size);
        self.item = Some(FoodItem::new(Rect::new(x, y, self.food_size, self.food_size)));
        log::debug!("Food placed at ({x}, {y})");
        true
    }

    /// Route a pointer event to the food item. Dropping it onto `pet` feeds
    /// the animal. Returns true if the animal was fed.
    pub fn handle_pointer(&mut self, event: PointerEvent, pet: &Rect, animal: &mut Animal) -> bool {
        let Some(item) = &mut self.item else {
            return false;
        };
        if item.handle_pointer(event) && item.rect.overlaps(pet) {
            self.feed(animal);
            return true;
        }
        false
    }

    fn feed(&mut self, animal: &mut Animal) {
        animal.add_hunger(-self.hunger_decrease);
        self.item = None;
        self.remaining = self.remaining.saturating_sub(1);
        log::info!(
            "Fed {}: hunger {:.1}, {} portions left",
            animal.name,
            animal.hunger(),
            self.remaining
        );
        if self.remaining == 0 {
            self.cooldown.start(self.cooldown_duration);
            log::info!("Out of food, refill in {}ms", self.cooldown_duration);
        }
    }

    /// Count the refill cooldown down; refill once it reaches zero.
    pub fn update(&mut self, dt: f32) {
        if self.cooldown.tick(dt) {
            self.remaining = self.capacity;
            log::info!("Food refilled: {} portions", self.capacity);
        }
    }

    pub fn reset(&mut self) {
        self.item = None;
        self.cooldown.clear();
        self.remaining = self.capacity;
    }
}
