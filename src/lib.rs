//! Virtual pet simulation core: vital stats, a bouncy play mode with a
//! cooldown, drag-and-drop feeding and a falling-cupcake minigame.

pub mod animal;
pub mod app;
pub mod config;
pub mod cupcake;
pub mod ecs;
pub mod error;
pub mod feeding;
pub mod geom;
pub mod input;
pub mod launch;
pub mod mode;
pub mod save;
pub mod scene;
pub mod setup;
pub mod timer;
pub mod util;
pub mod vitals;
