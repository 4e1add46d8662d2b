use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay tunables. All durations are milliseconds, distances are pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Host frame rate; the launch body moves once per frame.
    pub fps: u32,

    /// Launch body inset from the arena edges.
    pub launch_margin: f32,
    /// Size of the pet's hitbox.
    pub pet_size: [f32; 2],
    /// Launch session cooldown.
    pub playtime_cooldown_ms: f32,
    /// Pointer distance at which the launched pet runs away.
    pub mouse_proximity_threshold: f32,
    /// Speed the pet flees the pointer with, per frame.
    pub flee_speed: f32,

    pub age_interval_ms: f32,
    pub boredom_interval_ms: f32,
    pub hunger_interval_ms: f32,

    pub food_cooldown_ms: f32,
    pub food_margin: f32,
    pub food_size: f32,
    pub hunger_decrease: f32,

    pub cupcake_spawn_delay_ms: f32,
    /// Character speed in pixels per millisecond.
    pub character_speed: f32,
    /// Initial fall speed in pixels per second.
    pub fall_speed: f32,
    pub speed_interval_ms: f32,
    pub speed_increment: f32,
    pub cupcake_margin: f32,
    pub cupcake_width: f32,
    pub max_missed: u32,

    pub double_click_ms: f32,
    pub double_click_radius: f32,

    /// Character setup bounds. Playtime is in seconds.
    pub name_max_len: usize,
    pub food_min: u32,
    pub food_max: u32,
    pub playtime_min_s: u32,
    pub playtime_max_s: u32,

    pub save_dir: PathBuf,
    pub max_saves: usize,
    /// How long the headless host runs, in simulated seconds.
    pub run_seconds: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            fps: 60,
            launch_margin: 20.0,
            pet_size: [96.0, 96.0],
            playtime_cooldown_ms: 30_000.0,
            mouse_proximity_threshold: 120.0,
            flee_speed: 15.0,
            age_interval_ms: 60_000.0,
            boredom_interval_ms: 1000.0,
            hunger_interval_ms: 1000.0,
            food_cooldown_ms: 90_000.0,
            food_margin: 50.0,
            food_size: 64.0,
            hunger_decrease: 20.0,
            cupcake_spawn_delay_ms: 3000.0,
            character_speed: 0.5,
            fall_speed: 200.0,
            speed_interval_ms: 10_000.0,
            speed_increment: 50.0,
            cupcake_margin: 50.0,
            cupcake_width: 60.0,
            max_missed: 5,
            double_click_ms: 300.0,
            double_click_radius: 10.0,
            name_max_len: 10,
            food_min: 1,
            food_max: 100,
            playtime_min_s: 5,
            playtime_max_s: 180,
            save_dir: PathBuf::from("saves"),
            max_saves: 5,
            run_seconds: 180.0,
        }
    }
}

impl Tuning {
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    pub fn arena_center(&self) -> Vec2 {
        self.arena() * 0.5
    }

    pub fn pet_size(&self) -> Vec2 {
        Vec2::from(self.pet_size)
    }

    /// Milliseconds per host frame.
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.fps.max(1) as f32
    }
}

/// Read tuning overrides from a JSON file. Missing keys keep their defaults;
/// an unreadable or malformed file yields the defaults.
pub fn load_tuning(path: &Path) -> Tuning {
    match fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<Tuning>(&s) {
            Ok(t) => {
                log::info!("Loaded tuning from {}", path.display());
                t
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning file {}: {e}", path.display());
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read tuning file {}: {e}", path.display());
            Tuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_overrides_only_named_keys() {
        let t: Tuning = serde_json::from_str(r#"{ "fps": 30, "max_saves": 3 }"#).unwrap();
        assert_eq!(t.fps, 30);
        assert_eq!(t.max_saves, 3);
        assert_eq!(t.playtime_cooldown_ms, 30_000.0);
        assert_eq!(t.food_cooldown_ms, 90_000.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let t = load_tuning(Path::new("/definitely/not/here/tuning.json"));
        assert_eq!(t.fps, 60);
        assert_eq!(t.arena_center(), Vec2::new(400.0, 300.0));
    }
}
