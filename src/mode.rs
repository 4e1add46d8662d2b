use crate::animal::Animal;
use crate::vitals::VitalsSim;

/// Activity the pet is engaged in, excluding the cupcake minigame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Idle,
    /// Play session; milliseconds of playtime left.
    Launch { remaining_ms: f32 },
    /// Rest after a play session; milliseconds left.
    Cooldown { remaining_ms: f32 },
}

/// Minigame sub-state as seen from outside the cupcake engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigamePhase {
    Active,
    GameOver,
}

/// What the pet is doing right now. Exactly one variant holds at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeState {
    Idle,
    Launch { remaining_ms: f32 },
    Cooldown { remaining_ms: f32 },
    Minigame { phase: MinigamePhase },
}

impl ModeState {
    /// Compose the coordinator's activity with the minigame flag.
    pub fn from_parts(activity: Activity, minigame: Option<MinigamePhase>) -> Self {
        match (minigame, activity) {
            (Some(phase), _) => ModeState::Minigame { phase },
            (None, Activity::Idle) => ModeState::Idle,
            (None, Activity::Launch { remaining_ms }) => ModeState::Launch { remaining_ms },
            (None, Activity::Cooldown { remaining_ms }) => ModeState::Cooldown { remaining_ms },
        }
    }
}

/// Transition reported by `ModeCoordinator::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    None,
    /// Playtime ran out; the caller should park the pet in the arena center.
    LaunchEnded,
    /// Cooldown elapsed; play is available again.
    CooldownEnded,
}

/// Arbitrates Idle / Launch / Cooldown and decides which vitals run per tick.
pub struct ModeCoordinator {
    activity: Activity,
    /// Configured playtime in seconds.
    pub playtime: u32,
    /// Cooldown loaded after every play session.
    pub cooldown_duration: f32,
    vitals: VitalsSim,
}

impl ModeCoordinator {
    pub fn new(playtime: u32, cooldown_duration: f32, vitals: VitalsSim) -> Self {
        Self {
            activity: Activity::Idle,
            playtime,
            cooldown_duration,
            vitals,
        }
    }

    /// Rebuild from saved values. A saved cooldown wins over everything else;
    /// play sessions are never resumed.
    pub fn restore(
        playtime: u32,
        cooldown_duration: f32,
        vitals: VitalsSim,
        in_cooldown: bool,
        cooldown_timer: f32,
    ) -> Self {
        let mut m = Self::new(playtime, cooldown_duration, vitals);
        if in_cooldown && cooldown_timer > 0.0 {
            m.activity = Activity::Cooldown {
                remaining_ms: cooldown_timer,
            };
        }
        m
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn launch_mode(&self) -> bool {
        matches!(self.activity, Activity::Launch { .. })
    }

    pub fn in_cooldown(&self) -> bool {
        matches!(self.activity, Activity::Cooldown { .. })
    }

    pub fn playtime_remaining(&self) -> f32 {
        match self.activity {
            Activity::Launch { remaining_ms } => remaining_ms,
            _ => 0.0,
        }
    }

    pub fn cooldown_timer(&self) -> f32 {
        match self.activity {
            Activity::Cooldown { remaining_ms } => remaining_ms,
            _ => 0.0,
        }
    }

    /// Flip Idle <-> Launch. Rejected (returns false, no change) during
    /// cooldown. Otherwise returns whether play is now active.
    pub fn toggle_launch(&mut self) -> bool {
        match self.activity {
            Activity::Cooldown { .. } => false,
            Activity::Idle => {
                let remaining_ms = self.playtime as f32 * 1000.0;
                self.activity = Activity::Launch { remaining_ms };
                log::info!("Play started: {}s", self.playtime);
                true
            }
            Activity::Launch { .. } => {
                self.activity = Activity::Idle;
                log::info!("Play stopped early");
                false
            }
        }
    }

    pub fn can_enter_minigame(&self) -> bool {
        matches!(self.activity, Activity::Idle)
    }

    /// Advance timers by `dt` ms. Call once per frame, outside the minigame.
    pub fn update(
        &mut self,
        dt: f32,
        is_moving: bool,
        animal: &mut Animal,
        rng: &mut fastrand::Rng,
    ) -> ModeEvent {
        match self.activity {
            Activity::Launch { remaining_ms } => {
                let left = remaining_ms - dt;
                if left <= 0.0 {
                    self.activity = Activity::Cooldown {
                        remaining_ms: self.cooldown_duration,
                    };
                    log::info!("Play over, cooling down for {}ms", self.cooldown_duration);
                    return ModeEvent::LaunchEnded;
                }
                self.activity = Activity::Launch { remaining_ms: left };
                ModeEvent::None
            }
            Activity::Cooldown { remaining_ms } => {
                let left = remaining_ms - dt;
                let event = if left <= 0.0 {
                    self.activity = Activity::Idle;
                    log::info!("Cooldown over");
                    ModeEvent::CooldownEnded
                } else {
                    self.activity = Activity::Cooldown { remaining_ms: left };
                    ModeEvent::None
                };
                // Vitals still drift while resting, but the pet does not age.
                self.vitals.accumulate_needs(animal, dt, rng);
                event
            }
            Activity::Idle => {
                self.vitals.accumulate_needs(animal, dt, rng);
                self.vitals.relieve_by_motion(animal, dt, is_moving);
                self.vitals.advance_age(animal, dt);
                ModeEvent::None
            }
        }
    }
}
