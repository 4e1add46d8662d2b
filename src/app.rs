use std::path::Path;

use glam::Vec2;
use instant::Instant;

use crate::config::{load_tuning, Tuning};
use crate::input::{Command, Held, InputSnapshot, PointerEvent};
use crate::save::SaveStore;
use crate::scene::driver::Session;
use crate::scene::GameScene;
use crate::setup::PetSetup;
use crate::timer::Accumulator;

/// How often to log frame timing (wall-clock seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// How often to log the pet's vitals (simulated ms).
const STATS_LOG_INTERVAL_MS: f32 = 10_000.0;
/// How often the autopilot makes a decision (simulated ms).
const THINK_INTERVAL_MS: f32 = 1000.0;
/// Longest the autopilot stays in the cupcake game (simulated ms).
const MINIGAME_TIME_MS: f32 = 20_000.0;
/// Pointer parked off-arena so it never spooks the pet.
const POINTER_PARK: Vec2 = Vec2::new(-500.0, -500.0);

const DEFAULT_PET: &str = "Mochi";
const DEFAULT_FOOD: u32 = 3;
const DEFAULT_PLAYTIME_S: u32 = 20;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

/// Wall-clock cost of the simulation, logged against simulated time.
struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    sim_ms_since_log: f64,
    wall_sum: f64,
    wall_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            sim_ms_since_log: 0.0,
            wall_sum: 0.0,
            wall_max: 0.0,
            frames_since_log: 0,
        }
    }

    /// `wall` is seconds spent on the frame, `sim_ms` the time it simulated.
    fn record_frame(&mut self, wall: f64, sim_ms: f32) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.sim_ms_since_log += f64::from(sim_ms);
        self.wall_sum += wall;
        self.wall_max = self.wall_max.max(wall);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed < FPS_LOG_INTERVAL {
            return;
        }
        let sim_s = self.sim_ms_since_log / 1000.0;
        log::info!(
            "Simulated {:.1}s in {:.2}s ({:.0}x realtime) | frame avg {:.1}us, worst {:.1}us | {} frames total",
            sim_s,
            elapsed,
            sim_s / elapsed,
            self.wall_sum / f64::from(self.frames_since_log) * 1e6,
            self.wall_max * 1e6,
            self.frame_count,
        );
        self.last_log_time = Instant::now();
        self.sim_ms_since_log = 0.0;
        self.wall_sum = 0.0;
        self.wall_max = 0.0;
        self.frames_since_log = 0;
    }
}

// ---------------------------------------------------------------------------
// Autopilot
// ---------------------------------------------------------------------------

/// Scripted player standing in for a human at the keyboard and mouse.
struct Autopilot {
    rng: fastrand::Rng,
    think: Accumulator,
    clock: f32,
    minigame_until: f32,
}

impl Autopilot {
    fn new(rng: fastrand::Rng) -> Self {
        Self {
            rng,
            think: Accumulator::new(THINK_INTERVAL_MS),
            clock: 0.0,
            minigame_until: 0.0,
        }
    }

    fn next_input(&mut self, dt: f32, game: &GameScene) -> InputSnapshot {
        self.clock += dt;
        let pet = game.pet_rect();
        let mut input = InputSnapshot::idle(POINTER_PARK);

        if game.cupcakes().is_active() {
            input.held = self.steer(game);
            if game.cupcakes().game_over() || self.clock >= self.minigame_until {
                input.commands.push(Command::Back);
            }
            return input;
        }

        // Drag any food out onto the pet straight away.
        if let Some(item) = game.food().item() {
            let grab = item.rect.center();
            return input
                .with_pointer(PointerEvent::Press(grab))
                .with_pointer(PointerEvent::Motion(pet.center()))
                .with_pointer(PointerEvent::Release(pet.center()));
        }

        let coordinator = game.coordinator();
        if coordinator.launch_mode() {
            // Nudge a resting pet so the session stays lively.
            if !game.is_moving() {
                input.pointer = pet.center();
            }
            return input;
        }

        if !self.think.accumulate(dt) {
            return input;
        }

        let animal = game.animal();
        if animal.hunger() > 50.0 && game.food().remaining() > 0 {
            input.commands.push(Command::SpawnFood);
        } else if animal.boredom() > 30.0 && coordinator.can_enter_minigame() {
            if self.rng.bool() {
                input.commands.push(Command::ToggleLaunch);
            } else {
                self.minigame_until = self.clock + MINIGAME_TIME_MS;
                input.commands.push(Command::ToggleMinigame);
            }
        }
        input
    }

    /// Chase the lowest cupcake horizontally.
    fn steer(&self, game: &GameScene) -> Held {
        let half = game.cupcakes().cupcake_size() * 0.5;
        let target = game
            .cupcakes()
            .cupcakes()
            .into_iter()
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|p| p.x + half.x);
        let x = game.pet_rect().center().x;
        match target {
            Some(tx) if tx < x - 4.0 => Held {
                left: true,
                ..Held::default()
            },
            Some(tx) if tx > x + 4.0 => Held {
                right: true,
                ..Held::default()
            },
            _ => Held::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Host loop
// ---------------------------------------------------------------------------

fn open_session(tuning: &Tuning) -> Session {
    let store = SaveStore::new(tuning.save_dir.clone(), tuning.max_saves);
    if let Some(slot) = store.recent().into_iter().next() {
        match Session::load(&slot, tuning.clone()) {
            Ok(session) => return session,
            Err(e) => log::warn!("Could not resume {slot}: {e}, starting a new pet"),
        }
    }
    log::info!("New pet: {DEFAULT_PET}");
    let setup = PetSetup::new(DEFAULT_PET, 0, DEFAULT_FOOD, DEFAULT_PLAYTIME_S, tuning);
    Session::new_game(&setup, tuning.clone())
}

fn log_vitals(game: &GameScene) {
    let a = game.animal();
    log::info!(
        "{} | age {} | hunger {:.1} | boredom {:.1} | {:?} | food {}/{} | best cupcakes {}",
        a.name,
        a.age,
        a.hunger(),
        a.boredom(),
        game.mode(),
        game.food().remaining(),
        game.food().capacity(),
        game.cupcakes().highest_score(),
    );
}

/// Entry point: run the simulation headless at a fixed frame rate, then save.
/// The first argument, if any, is a JSON tuning file.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning(Path::new(&path)),
        None => Tuning::default(),
    };

    let frame_ms = tuning.frame_ms();
    let frames = (tuning.run_seconds * 1000.0 / frame_ms).ceil() as u64;
    let mut session = open_session(&tuning);
    let mut pilot = Autopilot::new(fastrand::Rng::new());
    let mut stats = FrameStats::new();
    let mut vitals_log = Accumulator::new(STATS_LOG_INTERVAL_MS);

    log::info!(
        "Running {} frames at {:.2}ms ({}s simulated)",
        frames,
        frame_ms,
        tuning.run_seconds
    );

    for _ in 0..frames {
        let start = Instant::now();
        let input = pilot.next_input(frame_ms, session.game());
        let report = session.frame(frame_ms, &input)?;
        for signal in &report.signals {
            log::debug!("{signal:?}");
        }
        if vitals_log.accumulate(frame_ms) {
            log_vitals(session.game());
        }
        stats.record_frame(start.elapsed().as_secs_f64(), frame_ms);
    }

    log_vitals(session.game());
    let path = session.save()?;
    log::info!("Session saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_stats_track_simulated_and_wall_time() {
        let mut stats = FrameStats::new();
        stats.record_frame(0.002, 16.0);
        stats.record_frame(0.005, 16.0);
        stats.record_frame(0.001, 16.0);
        assert_eq!(stats.frame_count, 3);
        assert_eq!(stats.sim_ms_since_log, 48.0);
        assert_eq!(stats.wall_max, 0.005);
        assert!((stats.wall_sum - 0.008).abs() < 1e-12);
    }
}
