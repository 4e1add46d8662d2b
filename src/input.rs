use glam::Vec2;

/// Directional keys currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Held {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Held {
    /// Unnormalized movement direction; opposite keys cancel out.
    pub fn axis(self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.up {
            d.y -= 1.0;
        }
        if self.down {
            d.y += 1.0;
        }
        if self.left {
            d.x -= 1.0;
        }
        if self.right {
            d.x += 1.0;
        }
        d
    }
}

/// Discrete pointer events, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Vec2),
    Motion(Vec2),
    Release(Vec2),
}

/// UI-level requests. Buttons and key bindings live in the host; the core
/// only sees what was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleLaunch,
    SpawnFood,
    ToggleMinigame,
    /// Escape: leaves the minigame, or toggles the pause menu.
    Back,
    Save,
}

/// Everything the host observed since the previous frame.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub held: Held,
    pub pointer: Vec2,
    pub pointer_events: Vec<PointerEvent>,
    pub commands: Vec<Command>,
}

impl InputSnapshot {
    pub fn idle(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn with_command(mut self, c: Command) -> Self {
        self.commands.push(c);
        self
    }

    pub fn with_pointer(mut self, e: PointerEvent) -> Self {
        self.pointer_events.push(e);
        self
    }
}

/// Detects double presses: two presses within a time window and a small radius.
pub struct ClickTracker {
    window_ms: f32,
    radius: f32,
    /// Elapsed time since tracking started (accumulated).
    elapsed: f32,
    last_press: Option<(f32, Vec2)>,
}

impl ClickTracker {
    pub fn new(window_ms: f32, radius: f32) -> Self {
        Self {
            window_ms,
            radius,
            elapsed: 0.0,
            last_press: None,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Register a press. Returns true if it completes a double press; the
    /// pair is then consumed so a third press starts over.
    pub fn press(&mut self, pos: Vec2) -> bool {
        if let Some((t, p)) = self.last_press {
            if self.elapsed - t < self.window_ms && p.distance(pos) < self.radius {
                self.last_press = None;
                return true;
            }
        }
        self.last_press = Some((self.elapsed, pos));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let held = Held {
            up: true,
            down: true,
            left: false,
            right: true,
        };
        assert_eq!(held.axis(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn double_press_needs_time_and_proximity() {
        let mut c = ClickTracker::new(300.0, 10.0);
        assert!(!c.press(Vec2::new(10.0, 10.0)));
        c.advance(100.0);
        assert!(c.press(Vec2::new(12.0, 10.0)));
        // Consumed: the next press is a first press again.
        assert!(!c.press(Vec2::new(12.0, 10.0)));
        c.advance(400.0);
        assert!(!c.press(Vec2::new(12.0, 10.0)));
        c.advance(50.0);
        assert!(!c.press(Vec2::new(40.0, 10.0)));
    }
}
