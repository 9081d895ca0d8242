//! Ski Chase - an endless downhill skiing arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (skier, rhino, collisions, commands, game loop)
//! - `assets`: Sprite identifiers and the sprite size atlas
//! - `renderer`: Drawing contract consumed by the simulation
//! - `platform`: Clock and keyboard normalization for the host
//! - `settings`: Runtime configuration

pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{Sprite, SpriteAtlas, SpriteSizes};
pub use error::{AssetLookupError, InputError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Skier speed at the start of a run and after recovering from a crash
    pub const SKIER_STARTING_SPEED: f32 = 5.0;
    /// Fixed step for discrete left/right/up moves (not frame based)
    pub const SKIER_STEP: f32 = SKIER_STARTING_SPEED;

    /// Delay between jump animation frames (ms)
    pub const JUMP_FRAME_MS: u64 = 150;
    /// Delay between rhino animation frames (ms)
    pub const RHINO_FRAME_MS: u64 = 250;

    /// Rhino defaults
    pub const RHINO_SPEED: f32 = 6.0;
    pub const RHINO_START_X: f32 = -500.0;
    pub const RHINO_START_Y: f32 = -2000.0;

    /// Frames between difficulty increases
    pub const DIFFICULTY_INTERVAL_FRAMES: u64 = 600;
    /// Speed added to skier and rhino at each difficulty increase
    pub const DIFFICULTY_SPEED_INCREMENT: f32 = 2.0;

    /// Default viewport size
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;
}
