use glam::Vec2;

use crate::ecs::components::{Cupcake, Hitbox, Position};
use crate::geom::Rect;

/// What happened to falling cupcakes during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallOutcome {
    pub collected: u32,
    pub missed: u32,
}

/// Spawn a cupcake with its top-left at `pos`.
pub fn spawn(world: &mut hecs::World, pos: Vec2, size: Vec2) -> hecs::Entity {
    world.spawn((Position(pos), Hitbox(size), Cupcake))
}

/// Move every cupcake down by `fall_speed` px/s over `dt` ms. Cupcakes that
/// touch `catcher` are collected; ones whose top passes `floor` are missed.
/// Both are despawned.
pub fn advance(
    world: &mut hecs::World,
    fall_speed: f32,
    dt: f32,
    catcher: &Rect,
    floor: f32,
    removed: &mut Vec<hecs::Entity>,
) -> FallOutcome {
    let mut outcome = FallOutcome::default();
    removed.clear();

    for (entity, (pos, hitbox, _)) in world.query_mut::<(&mut Position, &Hitbox, &Cupcake)>() {
        pos.0.y += fall_speed * (dt / 1000.0);

        let rect = Rect {
            pos: pos.0,
            size: hitbox.0,
        };
        if rect.overlaps(catcher) {
            outcome.collected += 1;
            removed.push(entity);
        } else if rect.top() > floor {
            outcome.missed += 1;
            removed.push(entity);
        }
    }

    for &entity in removed.iter() {
        // Entities were just yielded by the query, so they are alive.
        let _ = world.despawn(entity);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(world: &hecs::World) -> usize {
        world.query::<&Cupcake>().iter().count()
    }

    #[test]
    fn collects_on_overlap_and_misses_past_floor() {
        let mut world = hecs::World::new();
        let mut removed = Vec::new();
        let size = Vec2::new(60.0, 80.0);
        spawn(&mut world, Vec2::new(100.0, 390.0), size);
        spawn(&mut world, Vec2::new(500.0, 595.0), size);
        spawn(&mut world, Vec2::new(300.0, 0.0), size);

        let catcher = Rect::new(80.0, 480.0, 96.0, 96.0);
        // 200 px/s for 100ms = 20px.
        let out = advance(&mut world, 200.0, 100.0, &catcher, 600.0, &mut removed);
        assert_eq!(out, FallOutcome { collected: 1, missed: 1 });
        assert_eq!(count(&world), 1);
    }
}
