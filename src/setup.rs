use crate::animal::Animal;
use crate::config::Tuning;

/// Name given to a pet whose setup name is blank.
const DEFAULT_NAME: &str = "Pet";

/// Choices made on the character setup screen, already held to the
/// configured bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetSetup {
    pub name: String,
    pub age: u32,
    /// Food portions per refill.
    pub food_quantity: u32,
    /// Play session length, seconds.
    pub playtime: u32,
}

impl PetSetup {
    pub fn new(name: &str, age: u32, food_quantity: u32, playtime: u32, t: &Tuning) -> Self {
        let trimmed = name.trim();
        let name: String = if trimmed.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            trimmed.chars().take(t.name_max_len.max(1)).collect()
        };
        // A zero lower bound would leave an empty pool or an instant session.
        let food_lo = t.food_min.max(1);
        let food = food_quantity.clamp(food_lo, t.food_max.max(food_lo));
        let play_lo = t.playtime_min_s.max(1);
        let play = playtime.clamp(play_lo, t.playtime_max_s.max(play_lo));
        if food != food_quantity || play != playtime || name != trimmed {
            log::debug!("Setup adjusted to {name:?}, food {food}, playtime {play}s");
        }
        Self {
            name,
            age,
            food_quantity: food,
            playtime: play,
        }
    }

    pub fn animal(&self) -> Animal {
        Animal::new(self.name.clone(), self.age)
    }
}
