//! Sprite identifiers and the sprite size atlas
//!
//! Image decoding belongs to the host. The simulation only needs each
//! sprite's pixel dimensions to center draws and compute bounds.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::AssetLookupError;

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sprite {
    SkierCrash,
    SkierLeft,
    SkierLeftDown,
    SkierDown,
    SkierRightDown,
    SkierRight,
    SkierJump1,
    SkierJump2,
    SkierJump3,
    SkierJump4,
    SkierJump5,
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
    JumpRamp,
    Rhino,
    RhinoRun1,
    RhinoRun2,
    RhinoEat1,
    RhinoEat2,
    RhinoEat3,
    RhinoEat4,
    RhinoCelebrate1,
    RhinoCelebrate2,
}

impl Sprite {
    pub const ALL: [Sprite; 25] = [
        Sprite::SkierCrash,
        Sprite::SkierLeft,
        Sprite::SkierLeftDown,
        Sprite::SkierDown,
        Sprite::SkierRightDown,
        Sprite::SkierRight,
        Sprite::SkierJump1,
        Sprite::SkierJump2,
        Sprite::SkierJump3,
        Sprite::SkierJump4,
        Sprite::SkierJump5,
        Sprite::Tree,
        Sprite::TreeCluster,
        Sprite::Rock1,
        Sprite::Rock2,
        Sprite::JumpRamp,
        Sprite::Rhino,
        Sprite::RhinoRun1,
        Sprite::RhinoRun2,
        Sprite::RhinoEat1,
        Sprite::RhinoEat2,
        Sprite::RhinoEat3,
        Sprite::RhinoEat4,
        Sprite::RhinoCelebrate1,
        Sprite::RhinoCelebrate2,
    ];

    /// Image identifier used by the host's asset loader
    pub fn name(&self) -> &'static str {
        match self {
            Sprite::SkierCrash => "skierCrash",
            Sprite::SkierLeft => "skierLeft",
            Sprite::SkierLeftDown => "skierLeftDown",
            Sprite::SkierDown => "skierDown",
            Sprite::SkierRightDown => "skierRightDown",
            Sprite::SkierRight => "skierRight",
            Sprite::SkierJump1 => "skierJump1",
            Sprite::SkierJump2 => "skierJump2",
            Sprite::SkierJump3 => "skierJump3",
            Sprite::SkierJump4 => "skierJump4",
            Sprite::SkierJump5 => "skierJump5",
            Sprite::Tree => "tree",
            Sprite::TreeCluster => "treeCluster",
            Sprite::Rock1 => "rock1",
            Sprite::Rock2 => "rock2",
            Sprite::JumpRamp => "jumpRamp",
            Sprite::Rhino => "rhino",
            Sprite::RhinoRun1 => "rhinoRun1",
            Sprite::RhinoRun2 => "rhinoRun2",
            Sprite::RhinoEat1 => "rhinoEat1",
            Sprite::RhinoEat2 => "rhinoEat2",
            Sprite::RhinoEat3 => "rhinoEat3",
            Sprite::RhinoEat4 => "rhinoEat4",
            Sprite::RhinoCelebrate1 => "rhinoCelebrate1",
            Sprite::RhinoCelebrate2 => "rhinoCelebrate2",
        }
    }
}

/// Source of sprite dimensions
pub trait SpriteSizes {
    fn sprite_size(&self, sprite: Sprite) -> Result<Vec2, AssetLookupError>;
}

/// One entry of a sprite manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteEntry {
    pub name: Sprite,
    pub url: String,
    pub width: f32,
    pub height: f32,
}

/// Built-in manifest: (sprite, url, width, height)
const BUILTIN_MANIFEST: [(Sprite, &str, f32, f32); 25] = [
    (Sprite::SkierCrash, "img/skier_crash.png", 30.0, 31.0),
    (Sprite::SkierLeft, "img/skier_left.png", 34.0, 30.0),
    (Sprite::SkierLeftDown, "img/skier_left_down.png", 27.0, 32.0),
    (Sprite::SkierDown, "img/skier_down.png", 24.0, 34.0),
    (Sprite::SkierRightDown, "img/skier_right_down.png", 27.0, 32.0),
    (Sprite::SkierRight, "img/skier_right.png", 34.0, 30.0),
    (Sprite::SkierJump1, "img/skier_jump_1.png", 30.0, 34.0),
    (Sprite::SkierJump2, "img/skier_jump_2.png", 30.0, 35.0),
    (Sprite::SkierJump3, "img/skier_jump_3.png", 32.0, 36.0),
    (Sprite::SkierJump4, "img/skier_jump_4.png", 32.0, 34.0),
    (Sprite::SkierJump5, "img/skier_jump_5.png", 30.0, 34.0),
    (Sprite::Tree, "img/tree_1.png", 28.0, 54.0),
    (Sprite::TreeCluster, "img/tree_cluster.png", 66.0, 64.0),
    (Sprite::Rock1, "img/rock_1.png", 23.0, 22.0),
    (Sprite::Rock2, "img/rock_2.png", 32.0, 21.0),
    (Sprite::JumpRamp, "img/jump_ramp.png", 48.0, 32.0),
    (Sprite::Rhino, "img/rhino_default.png", 54.0, 36.0),
    (Sprite::RhinoRun1, "img/rhino_run_left.png", 60.0, 36.0),
    (Sprite::RhinoRun2, "img/rhino_run_left_2.png", 60.0, 36.0),
    (Sprite::RhinoEat1, "img/rhino_eat_1.png", 56.0, 40.0),
    (Sprite::RhinoEat2, "img/rhino_eat_2.png", 58.0, 42.0),
    (Sprite::RhinoEat3, "img/rhino_eat_3.png", 60.0, 44.0),
    (Sprite::RhinoEat4, "img/rhino_eat_4.png", 58.0, 42.0),
    (Sprite::RhinoCelebrate1, "img/rhino_celebrate_1.png", 56.0, 48.0),
    (Sprite::RhinoCelebrate2, "img/rhino_celebrate_2.png", 56.0, 48.0),
];

/// Registry of sprite dimensions, filled once at startup
#[derive(Debug, Clone, Default)]
pub struct SpriteAtlas {
    sizes: HashMap<Sprite, Vec2>,
}

impl SpriteAtlas {
    /// Create an empty atlas
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
        }
    }

    /// Atlas with the dimensions of the stock image set
    pub fn builtin() -> Self {
        let mut atlas = Self::new();
        for (sprite, _url, width, height) in BUILTIN_MANIFEST {
            atlas.register(sprite, Vec2::new(width, height));
        }
        atlas
    }

    /// Build an atlas from a JSON manifest
    pub fn from_manifest_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<SpriteEntry> = serde_json::from_str(json)?;
        let mut atlas = Self::new();
        for entry in entries {
            atlas.register(entry.name, Vec2::new(entry.width, entry.height));
        }
        log::info!("Loaded {} sprite sizes from manifest", atlas.sizes.len());
        Ok(atlas)
    }

    /// Atlas from the manifest file at `path`, or the built-in sizes when
    /// there is no path or the file cannot be used
    pub fn load(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        let atlas = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_manifest_json(&json).map_err(|e| e.to_string()));
        match atlas {
            Ok(atlas) => atlas,
            Err(e) => {
                log::warn!("Cannot use sprite manifest {}: {}, using built-in sizes", path, e);
                Self::builtin()
            }
        }
    }

    /// Built-in manifest entries, for hosts that load images by URL
    pub fn builtin_manifest() -> Vec<SpriteEntry> {
        BUILTIN_MANIFEST
            .iter()
            .map(|&(name, url, width, height)| SpriteEntry {
                name,
                url: url.to_string(),
                width,
                height,
            })
            .collect()
    }

    pub fn register(&mut self, sprite: Sprite, size: Vec2) {
        self.sizes.insert(sprite, size);
    }

    /// Sprites the game may draw that have no registered size
    pub fn missing(&self) -> Vec<Sprite> {
        Sprite::ALL
            .iter()
            .copied()
            .filter(|sprite| !self.sizes.contains_key(sprite))
            .collect()
    }
}

impl SpriteSizes for SpriteAtlas {
    fn sprite_size(&self, sprite: Sprite) -> Result<Vec2, AssetLookupError> {
        self.sizes
            .get(&sprite)
            .copied()
            .ok_or(AssetLookupError::MissingSprite { sprite })
    }
}
