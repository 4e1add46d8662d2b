use glam::Vec2;

use crate::animal::Animal;
use crate::error::SimError;
use crate::geom::Rect;
use crate::util::rng::{angle_deg, jitter, range_f32};

/// Launch speed range, pixels per frame.
const LAUNCH_SPEED_MIN: f32 = 20.0;
const LAUNCH_SPEED_MAX: f32 = 30.0;
/// Max random rotation applied on each wall bounce, degrees.
const BOUNCE_SPREAD_DEG: f32 = 20.0;
/// Boredom relieved per wall bounce.
const BOUNCE_RELIEF_MIN: f32 = 0.75;
const BOUNCE_RELIEF_MAX: f32 = 1.25;
/// Per-frame random velocity drift amplitude.
const DRIFT: f32 = 0.2;
/// Damping multiplier applied on frames without a bounce.
const DAMPING: f32 = 0.98;
/// Below this speed the body is snapped to rest.
const REST_SPEED: f32 = 0.5;

/// Which arena edge a bounce hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// The pet token during play mode: bounces around the arena and relieves
/// boredom every time it hits a wall.
///
/// Motion is per frame, not per millisecond. A faster host frame rate makes
/// the pet move faster; `update` deliberately takes no `dt`.
#[derive(Debug, Clone)]
pub struct BoundedBody {
    position: Option<Rect>,
    pub velocity: Vec2,
    pub margin: f32,
    arena: Vec2,
}

impl BoundedBody {
    pub fn new(arena: Vec2, margin: f32) -> Self {
        Self {
            position: None,
            velocity: Vec2::ZERO,
            margin,
            arena,
        }
    }

    pub fn set_position(&mut self, rect: Rect) {
        self.position = Some(rect);
    }

    pub fn position(&self) -> Option<Rect> {
        self.position
    }

    /// Kick the body off in a random direction.
    pub fn launch(&mut self, rng: &mut fastrand::Rng) {
        let angle = angle_deg(rng, 0.0, 360.0);
        let speed = range_f32(rng, LAUNCH_SPEED_MIN, LAUNCH_SPEED_MAX);
        self.velocity = Vec2::from_angle(angle) * speed;
        log::debug!("Launched at {:.1} px/frame", speed);
    }

    /// Advance one frame. Requires a position.
    pub fn update(
        &mut self,
        animal: &mut Animal,
        rng: &mut fastrand::Rng,
    ) -> Result<(Rect, Vec2), SimError> {
        let mut pos = self
            .position
            .ok_or(SimError::InvalidState("position must be set before update"))?;

        pos.pos += self.velocity;

        let lo = Vec2::splat(self.margin);
        let hi = self.arena - Vec2::splat(self.margin);
        let mut bounced = false;

        // Edges are checked independently; a corner hit bounces twice.
        if pos.left() < lo.x {
            pos.set_left(lo.x);
            self.bounce(Edge::Left, animal, rng);
            bounced = true;
        }
        if pos.right() > hi.x {
            pos.set_right(hi.x);
            self.bounce(Edge::Right, animal, rng);
            bounced = true;
        }
        if pos.top() < lo.y {
            pos.set_top(lo.y);
            self.bounce(Edge::Top, animal, rng);
            bounced = true;
        }
        if pos.bottom() > hi.y {
            pos.set_bottom(hi.y);
            self.bounce(Edge::Bottom, animal, rng);
            bounced = true;
        }

        self.velocity += jitter(rng, DRIFT);

        if !bounced {
            self.velocity *= DAMPING;
        }

        if self.velocity.length_squared() < REST_SPEED * REST_SPEED {
            self.velocity = Vec2::ZERO;
        }

        self.position = Some(pos);
        Ok((pos, self.velocity))
    }

    fn bounce(&mut self, edge: Edge, animal: &mut Animal, rng: &mut fastrand::Rng) {
        match edge {
            Edge::Left | Edge::Right => self.velocity.x = -self.velocity.x,
            Edge::Top | Edge::Bottom => self.velocity.y = -self.velocity.y,
        }
        let spread = angle_deg(rng, -BOUNCE_SPREAD_DEG, BOUNCE_SPREAD_DEG);
        self.velocity = Vec2::from_angle(spread).rotate(self.velocity);

        if animal.boredom() > 0.0 {
            let relief = range_f32(rng, BOUNCE_RELIEF_MIN, BOUNCE_RELIEF_MAX);
            animal.add_boredom(-relief);
        }
        log::debug!("Bounce off {:?}, boredom now {:.2}", edge, animal.boredom());
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.length() > REST_SPEED
    }

    /// Point the body away from `from` at a fixed speed.
    pub fn flee(&mut self, from: Vec2, speed: f32) {
        let Some(rect) = self.position else {
            return;
        };
        let away = rect.center() - from;
        if away.length_squared() > 0.0 {
            self.velocity = away.normalize() * speed;
        }
    }

    /// Park the body at `center` with zero velocity.
    pub fn recenter(&mut self, center: Vec2) {
        if let Some(rect) = &mut self.position {
            rect.set_center(center);
        }
        self.velocity = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> BoundedBody {
        let mut b = BoundedBody::new(Vec2::new(800.0, 600.0), 20.0);
        b.set_position(Rect::centered(Vec2::new(400.0, 300.0), Vec2::splat(96.0)));
        b
    }

    #[test]
    fn update_without_position_is_invalid_state() {
        let mut b = BoundedBody::new(Vec2::new(800.0, 600.0), 20.0);
        let mut a = Animal::new("Mochi", 0);
        let mut rng = fastrand::Rng::with_seed(1);
        let err = b.update(&mut a, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::InvalidState(_)));
    }

    #[test]
    fn launch_speed_in_range() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut b = body();
        for _ in 0..200 {
            b.launch(&mut rng);
            let s = b.velocity.length();
            assert!((19.99..30.01).contains(&s), "speed {s}");
        }
    }

    #[test]
    fn position_stays_inside_margins() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut a = Animal::new("Mochi", 0);
        let mut b = body();
        for round in 0..20 {
            b.launch(&mut rng);
            for _ in 0..300 {
                let (r, _) = b.update(&mut a, &mut rng).unwrap();
                assert!(r.left() >= 20.0 - 1e-3, "round {round}: left {}", r.left());
                assert!(r.right() <= 780.0 + 1e-3);
                assert!(r.top() >= 20.0 - 1e-3);
                assert!(r.bottom() <= 580.0 + 1e-3);
            }
        }
    }

    #[test]
    fn bounces_relieve_boredom_without_going_negative() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut a = Animal::new("Mochi", 0);
        a.set_boredom(5.0);
        let mut b = body();
        // Park against the left wall heading into it.
        let mut r = b.position().unwrap();
        r.set_left(21.0);
        b.set_position(r);
        b.velocity = Vec2::new(-25.0, 0.0);
        b.update(&mut a, &mut rng).unwrap();
        assert!(a.boredom() <= 5.0 - 0.75 + 1e-4);
        assert!(b.velocity.x > 0.0);

        for _ in 0..50 {
            b.launch(&mut rng);
            for _ in 0..100 {
                b.update(&mut a, &mut rng).unwrap();
            }
        }
        assert_eq!(a.boredom(), 0.0);
    }

    #[test]
    fn rest_is_reached_and_stable() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut a = Animal::new("Mochi", 0);
        let mut b = body();
        b.launch(&mut rng);
        let mut ticks = 0;
        while b.is_moving() && ticks < 50_000 {
            b.update(&mut a, &mut rng).unwrap();
            ticks += 1;
        }
        assert!(!b.is_moving(), "never came to rest");
        assert_eq!(b.velocity, Vec2::ZERO);
        for _ in 0..500 {
            let (_, v) = b.update(&mut a, &mut rng).unwrap();
            assert_eq!(v, Vec2::ZERO);
        }
    }

    #[test]
    fn flee_and_recenter() {
        let mut b = body();
        b.flee(Vec2::new(300.0, 300.0), 15.0);
        assert!((b.velocity - Vec2::new(15.0, 0.0)).length() < 1e-4);
        b.recenter(Vec2::new(100.0, 100.0));
        assert_eq!(b.velocity, Vec2::ZERO);
        assert_eq!(b.position().unwrap().center(), Vec2::new(100.0, 100.0));
    }
}
