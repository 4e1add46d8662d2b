use std::path::PathBuf;

use crate::config::Tuning;
use crate::error::{SaveError, SimError};
use crate::input::{Command, InputSnapshot};
use crate::save::SaveStore;
use crate::setup::PetSetup;

use super::{GameScene, SceneSignal};

/// Which top-level scene is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Playing,
    /// Pause menu: the simulation is frozen, saving is available.
    Paused,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transition {
    #[default]
    Stay,
    To(SceneKind),
}

/// Result of one driven frame.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub signals: Vec<SceneSignal>,
    pub transition: Transition,
    pub saved: Option<PathBuf>,
}

/// Owns the game scene, the pause menu and the save store.
pub struct Session {
    scene: SceneKind,
    game: GameScene,
    store: SaveStore,
}

impl Session {
    pub fn new(game: GameScene, store: SaveStore) -> Self {
        Self {
            scene: SceneKind::Playing,
            game,
            store,
        }
    }

    /// Start a fresh pet.
    pub fn new_game(setup: &PetSetup, tuning: Tuning) -> Self {
        let store = SaveStore::new(tuning.save_dir.clone(), tuning.max_saves);
        let game = GameScene::new(setup, tuning);
        Self::new(game, store)
    }

    /// Resume the pet stored in `slot`.
    pub fn load(slot: &str, tuning: Tuning) -> Result<Self, SaveError> {
        let store = SaveStore::new(tuning.save_dir.clone(), tuning.max_saves);
        let record = store.load(slot)?;
        let game = GameScene::from_record(&record, tuning);
        Ok(Self::new(game, store))
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    pub fn game(&self) -> &GameScene {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameScene {
        &mut self.game
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn save(&self) -> Result<PathBuf, SaveError> {
        self.store.save(&self.game.snapshot())
    }

    /// Drive one frame of `dt` ms.
    pub fn frame(&mut self, dt: f32, input: &InputSnapshot) -> Result<FrameReport, SimError> {
        let mut report = FrameReport::default();
        let transition = match self.scene {
            SceneKind::Playing => self.frame_playing(dt, input, &mut report)?,
            SceneKind::Paused => self.frame_paused(input, &mut report),
        };
        if let Transition::To(next) = transition {
            log::info!("Scene {:?} -> {:?}", self.scene, next);
            self.scene = next;
        }
        report.transition = transition;
        Ok(report)
    }

    fn frame_playing(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        report: &mut FrameReport,
    ) -> Result<Transition, SimError> {
        let back_consumed = self.game.handle_input(input, &mut report.signals);
        self.game.update(dt, input, &mut report.signals)?;

        let wants_pause = input.commands.contains(&Command::Back) && !back_consumed;
        Ok(if wants_pause {
            Transition::To(SceneKind::Paused)
        } else {
            Transition::Stay
        })
    }

    fn frame_paused(&mut self, input: &InputSnapshot, report: &mut FrameReport) -> Transition {
        let mut transition = Transition::Stay;
        for command in &input.commands {
            match command {
                Command::Save => match self.save() {
                    Ok(path) => report.saved = Some(path),
                    Err(e) => log::warn!("Save failed: {e}"),
                },
                Command::Back => transition = Transition::To(SceneKind::Playing),
                _ => {}
            }
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const FAR: Vec2 = Vec2::new(-1000.0, -1000.0);

    fn new_game(name: &str, food: u32, playtime: u32, t: Tuning) -> Session {
        Session::new_game(&PetSetup::new(name, 0, food, playtime, &t), t)
    }

    fn tuning(tag: &str) -> Tuning {
        Tuning {
            save_dir: std::env::temp_dir().join(format!(
                "petpal-session-{tag}-{}-{}",
                std::process::id(),
                fastrand::u64(..)
            )),
            ..Tuning::default()
        }
    }

    #[test]
    fn back_pauses_and_pause_freezes_simulation() {
        let mut s = new_game("Mochi", 3, 5, tuning("pause"));
        let report = s
            .frame(16.0, &InputSnapshot::idle(FAR).with_command(Command::Back))
            .unwrap();
        assert_eq!(report.transition, Transition::To(SceneKind::Paused));
        assert_eq!(s.scene(), SceneKind::Paused);

        for _ in 0..1000 {
            s.frame(50.0, &InputSnapshot::idle(FAR)).unwrap();
        }
        assert_eq!(s.game().animal().hunger(), 0.0);
        assert_eq!(s.game().animal().age, 0);

        s.frame(16.0, &InputSnapshot::idle(FAR).with_command(Command::Back))
            .unwrap();
        assert_eq!(s.scene(), SceneKind::Playing);
    }

    #[test]
    fn back_in_minigame_exits_it_without_pausing() {
        let mut s = new_game("Mochi", 3, 5, tuning("minigame"));
        s.frame(0.0, &InputSnapshot::idle(FAR).with_command(Command::ToggleMinigame))
            .unwrap();
        assert!(s.game().cupcakes().is_active());
        let report = s
            .frame(16.0, &InputSnapshot::idle(FAR).with_command(Command::Back))
            .unwrap();
        assert_eq!(report.transition, Transition::Stay);
        assert!(report.signals.contains(&SceneSignal::MinigameEnded));
        assert_eq!(s.scene(), SceneKind::Playing);
    }

    #[test]
    fn save_from_pause_then_load() {
        let t = tuning("save");
        let dir = t.save_dir.clone();
        let mut s = new_game("Sir Whisk", 4, 7, t.clone());
        s.game_mut()
            .update(5000.0, &InputSnapshot::idle(FAR), &mut Vec::new())
            .unwrap();
        s.frame(0.0, &InputSnapshot::idle(FAR).with_command(Command::Back))
            .unwrap();
        let report = s
            .frame(0.0, &InputSnapshot::idle(FAR).with_command(Command::Save))
            .unwrap();
        let path = report.saved.unwrap();
        assert!(path.ends_with("Sir_Whisk.json"));

        let loaded = Session::load("Sir_Whisk.json", t).unwrap();
        assert_eq!(loaded.scene(), SceneKind::Playing);
        assert_eq!(loaded.game().animal().name, "Sir Whisk");
        assert_eq!(
            loaded.game().animal().hunger(),
            s.game().animal().hunger()
        );
        assert_eq!(loaded.game().food().capacity(), 4);
        assert_eq!(loaded.game().coordinator().playtime, 7);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn loading_missing_slot_fails() {
        assert!(matches!(
            Session::load("ghost.json", tuning("ghost")),
            Err(SaveError::NotFound(_))
        ));
    }
}
