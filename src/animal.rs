/// Upper bound for both vitals.
pub const VITAL_MAX: f32 = 100.0;

/// The simulated pet.
///
/// `hunger` and `boredom` are kept in `[0, 100]` by every mutator, where 0
/// means fully fed / fully entertained.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub name: String,
    pub age: u32,
    hunger: f32,
    boredom: f32,
}

impl Animal {
    /// Fresh pet from character setup, fully fed and entertained.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            hunger: 0.0,
            boredom: 0.0,
        }
    }

    /// Rebuild from saved values. Out-of-range vitals are clamped.
    pub fn restore(name: impl Into<String>, age: u32, hunger: f32, boredom: f32) -> Self {
        let mut a = Self::new(name, age);
        a.set_hunger(hunger);
        a.set_boredom(boredom);
        a
    }

    pub fn hunger(&self) -> f32 {
        self.hunger
    }

    pub fn boredom(&self) -> f32 {
        self.boredom
    }

    pub fn set_hunger(&mut self, v: f32) {
        self.hunger = clamp_vital(v);
    }

    pub fn set_boredom(&mut self, v: f32) {
        self.boredom = clamp_vital(v);
    }

    pub fn add_hunger(&mut self, delta: f32) {
        self.set_hunger(self.hunger + delta);
    }

    pub fn add_boredom(&mut self, delta: f32) {
        self.set_boredom(self.boredom + delta);
    }
}

/// NaN collapses to 0 so a bad save can never poison the vitals.
fn clamp_vital(v: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, VITAL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pet_starts_content() {
        let a = Animal::new("Mochi", 2);
        assert_eq!(a.hunger(), 0.0);
        assert_eq!(a.boredom(), 0.0);
        assert_eq!(a.age, 2);
    }

    #[test]
    fn vitals_saturate() {
        let mut a = Animal::new("Mochi", 0);
        a.add_hunger(250.0);
        assert_eq!(a.hunger(), VITAL_MAX);
        a.add_boredom(-3.0);
        assert_eq!(a.boredom(), 0.0);
    }

    #[test]
    fn restore_clamps_out_of_range_values() {
        let a = Animal::restore("Kuromi", 4, 140.0, f32::NAN);
        assert_eq!(a.hunger(), 100.0);
        assert_eq!(a.boredom(), 0.0);
    }
}
