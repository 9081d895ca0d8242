//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module stays host agnostic:
//! - Time comes in as milliseconds from the caller's clock
//! - Obstacle randomness comes from a seeded RNG only
//! - Collisions resolve against the obstacle list in its given order
//! - Drawing goes through the `Canvas` trait, never a concrete surface

pub mod body;
pub mod collision;
pub mod commands;
pub mod direction;
pub mod game;
pub mod geometry;
pub mod obstacles;
pub mod rhino;
pub mod skier;
pub mod timer;

pub use body::Body;
pub use collision::{CollisionChain, CollisionRule, Resolution};
pub use commands::{Command, KeyBindings, PlayGate};
pub use direction::Direction;
pub use game::Game;
pub use geometry::{Rect, intersects};
pub use obstacles::{Obstacle, ObstacleField, ObstacleKind, ObstacleList, ObstacleSource};
pub use rhino::{Rhino, RhinoState};
pub use skier::{Skier, SkierState};
pub use timer::{TimerHandle, schedule_once};
