use glam::Vec2;

/// Top-left corner in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Collision box size in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Hitbox(pub Vec2);

/// Marks a falling cupcake.
#[derive(Debug, Clone, Copy)]
pub struct Cupcake;
