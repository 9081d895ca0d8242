//! The pursuing rhino
//!
//! Runs straight at the skier every frame until their bounds overlap, then
//! eats the skier and celebrates. Running -> Eating -> Celebrating, with no
//! way back. After the catch the state and frame are derived purely from the
//! time elapsed since the catch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::geometry::Rect;
use super::skier::Skier;
use crate::assets::{Sprite, SpriteSizes};
use crate::consts::RHINO_FRAME_MS;
use crate::error::AssetLookupError;
use crate::renderer::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RhinoState {
    Running,
    Eating,
    Celebrating,
}

const RUN_FRAMES: [Sprite; 2] = [Sprite::RhinoRun1, Sprite::RhinoRun2];
const EAT_FRAMES: [Sprite; 4] = [
    Sprite::RhinoEat1,
    Sprite::RhinoEat2,
    Sprite::RhinoEat3,
    Sprite::RhinoEat4,
];
const CELEBRATE_FRAMES: [Sprite; 2] = [Sprite::RhinoCelebrate1, Sprite::RhinoCelebrate2];

impl RhinoState {
    pub fn frames(self) -> &'static [Sprite] {
        match self {
            RhinoState::Running => &RUN_FRAMES,
            RhinoState::Eating => &EAT_FRAMES,
            RhinoState::Celebrating => &CELEBRATE_FRAMES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rhino {
    body: Body,
    speed: f32,
    frame_interval_ms: u64,
    state: RhinoState,
    frame: usize,
    last_frame_at_ms: Option<u64>,
    caught_at_ms: Option<u64>,
}

impl Rhino {
    pub fn new(position: Vec2, speed: f32) -> Self {
        Self {
            body: Body::new(position, Sprite::Rhino),
            speed,
            frame_interval_ms: RHINO_FRAME_MS,
            state: RhinoState::Running,
            frame: 0,
            last_frame_at_ms: None,
            caught_at_ms: None,
        }
    }

    pub fn with_frame_interval(mut self, frame_interval_ms: u64) -> Self {
        self.frame_interval_ms = frame_interval_ms.max(1);
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn state(&self) -> RhinoState {
        self.state
    }

    #[inline]
    pub fn sprite(&self) -> Sprite {
        self.body.sprite
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn has_caught_skier(&self) -> bool {
        self.caught_at_ms.is_some()
    }

    /// Difficulty ramp
    pub fn increase_speed(&mut self, amount: f32) {
        self.speed += amount;
    }

    pub fn bounds(&self, sizes: &dyn SpriteSizes) -> Result<Rect, AssetLookupError> {
        self.body.bounds(sizes)
    }

    /// One simulation frame. Must run after the skier's update so the rhino
    /// chases this frame's position.
    pub fn update(&mut self, now_ms: u64, skier: &mut Skier, sizes: &dyn SpriteSizes) {
        if let Some(caught_at) = self.caught_at_ms {
            self.feast(now_ms.saturating_sub(caught_at));
            return;
        }

        self.pursue(skier.position());
        self.animate_run(now_ms);
        self.check_if_caught(now_ms, skier, sizes);
    }

    /// Step toward the target at the rhino's speed without overshooting
    fn pursue(&mut self, target: Vec2) {
        let offset = target - self.body.position;
        let distance = offset.length();
        if distance <= self.speed {
            self.body.position = target;
        } else {
            self.body.position += offset / distance * self.speed;
        }
    }

    fn animate_run(&mut self, now_ms: u64) {
        match self.last_frame_at_ms {
            None => self.last_frame_at_ms = Some(now_ms),
            Some(last) if now_ms.saturating_sub(last) >= self.frame_interval_ms => {
                self.frame = (self.frame + 1) % RUN_FRAMES.len();
                self.last_frame_at_ms = Some(now_ms);
            }
            Some(_) => {}
        }
        self.body.sprite = RUN_FRAMES[self.frame];
    }

    fn check_if_caught(&mut self, now_ms: u64, skier: &mut Skier, sizes: &dyn SpriteSizes) {
        let (rhino_bounds, skier_bounds) = match (self.bounds(sizes), skier.bounds(sizes)) {
            (Ok(r), Ok(s)) => (r, s),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Skipping rhino catch check: {}", e);
                return;
            }
        };

        if rhino_bounds.intersects(&skier_bounds) {
            self.catch(now_ms, skier);
        }
    }

    fn catch(&mut self, now_ms: u64, skier: &mut Skier) {
        log::info!("Rhino caught the skier at {}", skier.position());
        self.caught_at_ms = Some(now_ms);
        skier.die();
        self.feast(0);
    }

    /// Eating frames play once, then celebration frames loop
    fn feast(&mut self, elapsed_ms: u64) {
        let step = (elapsed_ms / self.frame_interval_ms) as usize;
        if step < EAT_FRAMES.len() {
            self.state = RhinoState::Eating;
            self.frame = step;
        } else {
            self.state = RhinoState::Celebrating;
            self.frame = (step - EAT_FRAMES.len()) % CELEBRATE_FRAMES.len();
        }
        self.body.sprite = self.state.frames()[self.frame];
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        sizes: &dyn SpriteSizes,
    ) -> Result<(), AssetLookupError> {
        self.body.draw(canvas, sizes)
    }
}
