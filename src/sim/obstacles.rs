//! Obstacles and the sources that supply them
//!
//! The simulation only reads the live obstacle list once per frame and asks
//! the source to repopulate around the moving viewport. `ObstacleField` is
//! the default seeded source; `ObstacleList` is a fixed, ordered list.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::geometry::Rect;
use crate::assets::{Sprite, SpriteAtlas, SpriteSizes};
use crate::error::AssetLookupError;
use crate::renderer::Canvas;

/// Obstacle type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
    JumpRamp,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Tree,
        ObstacleKind::TreeCluster,
        ObstacleKind::Rock1,
        ObstacleKind::Rock2,
        ObstacleKind::JumpRamp,
    ];

    pub fn sprite(self) -> Sprite {
        match self {
            ObstacleKind::Tree => Sprite::Tree,
            ObstacleKind::TreeCluster => Sprite::TreeCluster,
            ObstacleKind::Rock1 => Sprite::Rock1,
            ObstacleKind::Rock2 => Sprite::Rock2,
            ObstacleKind::JumpRamp => Sprite::JumpRamp,
        }
    }

    pub fn is_ramp(self) -> bool {
        self == ObstacleKind::JumpRamp
    }

    /// Trees stay fatal even for an airborne skier
    pub fn is_jumpable(self) -> bool {
        !matches!(self, ObstacleKind::Tree | ObstacleKind::TreeCluster)
    }
}

/// A placed obstacle. Obstacles never move, so bounds are fixed at placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub body: Body,
    pub bounds: Rect,
}

impl Obstacle {
    /// Place an obstacle at `position`. The collision box spans the sprite
    /// width and runs from the sprite top down to the position (the base).
    pub fn new(
        kind: ObstacleKind,
        position: Vec2,
        sizes: &dyn SpriteSizes,
    ) -> Result<Self, AssetLookupError> {
        let size = sizes.sprite_size(kind.sprite())?;
        let bounds = Rect::new(
            position.x - size.x / 2.0,
            position.y - size.y / 2.0,
            position.x + size.x / 2.0,
            position.y,
        );
        Ok(Self {
            kind,
            body: Body::new(position, kind.sprite()),
            bounds,
        })
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        sizes: &dyn SpriteSizes,
    ) -> Result<(), AssetLookupError> {
        self.body.draw(canvas, sizes)
    }
}

/// Owner of the live obstacles
pub trait ObstacleSource {
    /// Obstacles currently in the world, in collision-check order
    fn live_obstacles(&self) -> &[Obstacle];
    /// Add/remove obstacles after the viewport moved from `previous` to `viewport`
    fn repopulate(&mut self, viewport: &Rect, previous: &Rect);
    /// Start over for a new run
    fn reset(&mut self);
}

/// Fixed obstacle list with deterministic ordering
#[derive(Debug, Clone, Default)]
pub struct ObstacleList {
    obstacles: Vec<Obstacle>,
}

impl ObstacleList {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}

impl ObstacleSource for ObstacleList {
    fn live_obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn repopulate(&mut self, _viewport: &Rect, _previous: &Rect) {}

    fn reset(&mut self) {}
}

/// Minimum spacing between obstacle positions on each axis
pub const DISTANCE_BETWEEN_OBSTACLES: f32 = 50.0;
/// Obstacle-free band below the skier's start position
pub const STARTING_OBSTACLE_GAP: f32 = 100.0;
/// Viewport area per initial obstacle is this value squared
pub const STARTING_OBSTACLE_REDUCER: f32 = 300.0;
/// One-in-N chance of placing new obstacles on a frame
pub const NEW_OBSTACLE_CHANCE: u32 = 8;
/// Give up on a placement after this many crowded positions
const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

/// Seeded, procedurally populated obstacle field
#[derive(Debug, Clone)]
pub struct ObstacleField {
    seed: u64,
    rng: Pcg32,
    atlas: SpriteAtlas,
    viewport_size: Vec2,
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new(seed: u64, viewport_size: Vec2, atlas: SpriteAtlas) -> Self {
        let mut field = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            atlas,
            viewport_size,
            obstacles: Vec::new(),
        };
        field.place_initial_obstacles();
        field
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Scatter the opening obstacles below the start position
    pub fn place_initial_obstacles(&mut self) {
        let w = self.viewport_size.x;
        let h = self.viewport_size.y;
        let count = ((w / STARTING_OBSTACLE_REDUCER) * (h / STARTING_OBSTACLE_REDUCER)).ceil() as usize;

        let min_x = -w / 2.0;
        let max_x = w / 2.0;
        let min_y = STARTING_OBSTACLE_GAP;
        let max_y = (h / 2.0).max(min_y);

        for _ in 0..count {
            self.place_random_obstacle(min_x, max_x, min_y, max_y);
        }

        self.obstacles
            .sort_by(|a, b| a.position().y.total_cmp(&b.position().y));
        log::debug!("Placed {} initial obstacles", self.obstacles.len());
    }

    fn place_random_obstacle(&mut self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) {
        let Some(position) = self.open_position(min_x, max_x, min_y, max_y) else {
            return;
        };
        let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];

        match Obstacle::new(kind, position, &self.atlas) {
            Ok(obstacle) => self.obstacles.push(obstacle),
            Err(e) => log::warn!("Skipping obstacle placement: {}", e),
        }
    }

    /// Random position at least `DISTANCE_BETWEEN_OBSTACLES` from every
    /// existing obstacle on at least one axis
    fn open_position(&mut self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Option<Vec2> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = self.rng.random_range(min_x as i32..=max_x as i32) as f32;
            let y = self.rng.random_range(min_y as i32..=max_y as i32) as f32;

            let crowded = self.obstacles.iter().any(|o| {
                let p = o.position();
                (x - p.x).abs() < DISTANCE_BETWEEN_OBSTACLES
                    && (y - p.y).abs() < DISTANCE_BETWEEN_OBSTACLES
            });
            if !crowded {
                return Some(Vec2::new(x, y));
            }
        }
        None
    }
}

impl ObstacleSource for ObstacleField {
    fn live_obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn repopulate(&mut self, viewport: &Rect, previous: &Rect) {
        // Drop obstacles well above the viewport; the skier never climbs back
        let cutoff = viewport.top - self.viewport_size.y;
        self.obstacles.retain(|o| o.position().y >= cutoff);

        if !self.rng.random_ratio(1, NEW_OBSTACLE_CHANCE) {
            return;
        }

        if viewport.left < previous.left {
            self.place_random_obstacle(viewport.left, viewport.left, viewport.top, viewport.bottom);
        } else if viewport.right > previous.right {
            self.place_random_obstacle(viewport.right, viewport.right, viewport.top, viewport.bottom);
        }

        if viewport.top < previous.top {
            self.place_random_obstacle(viewport.left, viewport.right, viewport.top, viewport.top);
        } else if viewport.bottom > previous.bottom {
            self.place_random_obstacle(
                viewport.left,
                viewport.right,
                viewport.bottom,
                viewport.bottom,
            );
        }
    }

    fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.obstacles.clear();
        self.place_initial_obstacles();
    }
}
