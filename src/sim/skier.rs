//! The player-controlled skier
//!
//! State machine: Skiing -> Crashed (unresolved collision) -> Skiing
//! (directional recovery), and Skiing/Crashed -> Dead (caught by the rhino,
//! terminal). Jumping and animation are orthogonal to the main state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{CollisionChain, Resolution};
use super::direction::Direction;
use super::geometry::Rect;
use super::obstacles::Obstacle;
use super::timer::{TimerHandle, schedule_once};
use crate::assets::{Sprite, SpriteSizes};
use crate::consts::{JUMP_FRAME_MS, SKIER_STARTING_SPEED, SKIER_STEP};
use crate::error::AssetLookupError;
use crate::renderer::Canvas;

/// Main skier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkierState {
    Skiing,
    Crashed,
    Dead,
}

/// Sprite sequences the skier can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Jump,
}

const JUMP_FRAMES: [Sprite; 5] = [
    Sprite::SkierJump1,
    Sprite::SkierJump2,
    Sprite::SkierJump3,
    Sprite::SkierJump4,
    Sprite::SkierJump5,
];

impl AnimationKind {
    pub fn frames(self) -> &'static [Sprite] {
        match self {
            AnimationKind::Jump => &JUMP_FRAMES,
        }
    }
}

/// An animation in progress; `frame` is the next frame to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub frame: usize,
}

/// Deferred permission to show the next animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReady;

#[derive(Debug, Clone)]
pub struct Skier {
    body: Body,
    state: SkierState,
    direction: Direction,
    speed: f32,
    jumping: bool,
    animation: Option<Animation>,
    frame_gate: Option<TimerHandle<FrameReady>>,
    frame_delay_ms: u64,
    collision_chain: CollisionChain,
}

impl Skier {
    /// A skier facing downhill at the starting speed
    pub fn new(position: Vec2) -> Self {
        Self {
            body: Body::new(position, Direction::Down.sprite()),
            state: SkierState::Skiing,
            direction: Direction::Down,
            speed: SKIER_STARTING_SPEED,
            jumping: false,
            animation: None,
            frame_gate: None,
            frame_delay_ms: JUMP_FRAME_MS,
            collision_chain: CollisionChain::default(),
        }
    }

    /// Override the delay between animation frames
    pub fn with_frame_delay(mut self, frame_delay_ms: u64) -> Self {
        self.frame_delay_ms = frame_delay_ms;
        self
    }

    /// Replace the collision rules
    pub fn with_collision_chain(mut self, chain: CollisionChain) -> Self {
        self.collision_chain = chain;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn state(&self) -> SkierState {
        self.state
    }

    #[inline]
    pub fn sprite(&self) -> Sprite {
        self.body.sprite
    }

    pub fn animation(&self) -> Option<Animation> {
        self.animation
    }

    pub fn is_skiing(&self) -> bool {
        self.state == SkierState::Skiing
    }

    pub fn is_crashed(&self) -> bool {
        self.state == SkierState::Crashed
    }

    pub fn is_dead(&self) -> bool {
        self.state == SkierState::Dead
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Face a new heading and show its sprite
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.body.sprite = direction.sprite();
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Difficulty ramp
    pub fn increase_speed(&mut self, amount: f32) {
        self.speed += amount;
    }

    // Discrete steps used by commands while facing fully sideways. They use the
    // fixed starting speed, not the current frame speed.

    pub fn move_left(&mut self) {
        self.body.position.x -= SKIER_STEP;
    }

    pub fn move_right(&mut self) {
        self.body.position.x += SKIER_STEP;
    }

    pub fn move_up(&mut self) {
        self.body.position.y -= SKIER_STEP;
    }

    /// One simulation frame: animate, move, then resolve collisions.
    /// Only a skiing skier updates.
    pub fn update(&mut self, now_ms: u64, obstacles: &[Obstacle], sizes: &dyn SpriteSizes) {
        if !self.is_skiing() {
            return;
        }

        self.animate(now_ms);
        self.travel();
        self.check_if_hit_obstacle(obstacles, sizes);
    }

    /// Advance the current animation if its frame gate has opened
    fn animate(&mut self, now_ms: u64) {
        if let Some(gate) = self.frame_gate.as_mut() {
            if gate.poll(now_ms).is_none() {
                return;
            }
            self.frame_gate = None;
        }

        // A gate that fires after its animation already ended is a no-op
        let Some(animation) = self.animation else {
            return;
        };

        match animation.kind.frames().get(animation.frame) {
            Some(&sprite) => {
                self.body.sprite = sprite;
                self.animation = Some(Animation {
                    frame: animation.frame + 1,
                    ..animation
                });
                self.frame_gate = Some(schedule_once(FrameReady, self.frame_delay_ms, now_ms));
            }
            None => self.end_jump(),
        }
    }

    /// Per-frame movement along the current heading. Fully sideways headings
    /// do not move here; they only move through discrete commands.
    fn travel(&mut self) {
        let diagonal = self.speed / std::f32::consts::SQRT_2;
        let delta = match self.direction {
            Direction::LeftDown => Vec2::new(-diagonal, diagonal),
            Direction::Down => Vec2::new(0.0, self.speed),
            Direction::RightDown => Vec2::new(diagonal, diagonal),
            Direction::Left | Direction::Right => Vec2::ZERO,
        };
        self.body.position += delta;
    }

    /// Collision box: full sprite width, from half the height above the
    /// center to a quarter below it, so a crashed skier sits inside the
    /// obstacle rather than above it.
    pub fn bounds(&self, sizes: &dyn SpriteSizes) -> Result<Rect, AssetLookupError> {
        let size = self.body.size(sizes)?;
        let p = self.body.position;
        Ok(Rect::new(
            p.x - size.x / 2.0,
            p.y - size.y / 2.0,
            p.x + size.x / 2.0,
            p.y + size.y / 4.0,
        ))
    }

    /// First overlapping obstacle in list order decides; later ones are ignored
    fn check_if_hit_obstacle(&mut self, obstacles: &[Obstacle], sizes: &dyn SpriteSizes) {
        let bounds = match self.bounds(sizes) {
            Ok(bounds) => bounds,
            Err(e) => {
                log::warn!("Skipping skier collision check: {}", e);
                return;
            }
        };

        let Some(obstacle) = obstacles.iter().find(|o| bounds.intersects(&o.bounds)) else {
            return;
        };

        match self.collision_chain.resolve(obstacle.kind, self.jumping) {
            Resolution::Crash => {
                log::debug!("Skier crashed into {:?} at {}", obstacle.kind, self.position());
                self.crash();
            }
            Resolution::Launch => self.jump(),
            Resolution::Pass => {}
        }
    }

    /// Start a jump. Ignored while crashed or dead, and while facing sideways.
    pub fn jump(&mut self) {
        if !self.is_skiing() || !self.direction.is_downhill() {
            return;
        }
        if !self.jumping {
            log::debug!("Skier jumping at {}", self.position());
        }
        self.jumping = true;
        self.animation = Some(Animation {
            kind: AnimationKind::Jump,
            frame: 0,
        });
    }

    fn end_jump(&mut self) {
        self.jumping = false;
        self.animation = None;
        self.body.sprite = self.direction.sprite();
    }

    /// Stop dead in the obstacle. Any jump in progress is abandoned.
    pub fn crash(&mut self) {
        self.state = SkierState::Crashed;
        self.speed = 0.0;
        self.jumping = false;
        self.animation = None;
        self.body.sprite = Sprite::SkierCrash;
    }

    /// Back to skiing at the starting speed, facing `direction`
    pub fn recover_from_crash(&mut self, direction: Direction) {
        self.state = SkierState::Skiing;
        self.speed = SKIER_STARTING_SPEED;
        self.set_direction(direction);
    }

    /// Terminal: the skier stops and is no longer drawn
    pub fn die(&mut self) {
        self.state = SkierState::Dead;
        self.speed = 0.0;
        self.jumping = false;
        self.animation = None;
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        sizes: &dyn SpriteSizes,
    ) -> Result<(), AssetLookupError> {
        if self.is_dead() {
            return Ok(());
        }
        self.body.draw(canvas, sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteAtlas;
    use crate::renderer::RecordingCanvas;
    use crate::sim::collision::CollisionRule;
    use crate::sim::obstacles::ObstacleKind;
    use proptest::prelude::*;

    fn atlas() -> SpriteAtlas {
        SpriteAtlas::builtin()
    }

    fn obstacle(kind: ObstacleKind, position: Vec2) -> Obstacle {
        Obstacle::new(kind, position, &atlas()).unwrap()
    }

    #[test]
    fn test_moves_down_at_speed() {
        let mut skier = Skier::new(Vec2::ZERO);
        skier.update(0, &[], &atlas());

        assert_eq!(skier.position(), Vec2::new(0.0, 5.0));
        assert_eq!(skier.state(), SkierState::Skiing);
        assert_eq!(skier.sprite(), Sprite::SkierDown);
    }

    #[test]
    fn test_diagonal_speed_matches_straight_speed() {
        for dir in [Direction::LeftDown, Direction::RightDown] {
            let mut skier = Skier::new(Vec2::ZERO);
            skier.set_direction(dir);
            skier.update(0, &[], &atlas());

            let moved = skier.position();
            assert!((moved.length() - 5.0).abs() < 1e-4);
            assert!((moved.x.abs() - moved.y).abs() < 1e-4);
            assert!(moved.y > 0.0);
        }
    }

    #[test]
    fn test_sideways_heading_is_parked() {
        for dir in [Direction::Left, Direction::Right] {
            let mut skier = Skier::new(Vec2::new(3.0, 4.0));
            skier.set_direction(dir);
            skier.update(0, &[], &atlas());
            assert_eq!(skier.position(), Vec2::new(3.0, 4.0));
        }
    }

    #[test]
    fn test_discrete_steps_use_starting_speed() {
        let mut skier = Skier::new(Vec2::ZERO);
        skier.set_speed(20.0);
        skier.move_left();
        skier.move_up();
        assert_eq!(skier.position(), Vec2::new(-5.0, -5.0));
        skier.move_right();
        skier.move_right();
        assert_eq!(skier.position(), Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_bounds_bottom_is_quarter_below_center() {
        let skier = Skier::new(Vec2::new(100.0, 100.0));
        // skierDown is 24x34
        assert_eq!(
            skier.bounds(&atlas()).unwrap(),
            Rect::new(88.0, 83.0, 112.0, 108.5)
        );
    }

    #[test]
    fn test_jump_only_when_facing_downhill() {
        for dir in Direction::ALL {
            let mut skier = Skier::new(Vec2::ZERO);
            skier.set_direction(dir);
            skier.jump();
            assert_eq!(skier.is_jumping(), dir.is_downhill(), "{dir:?}");
        }
    }

    #[test]
    fn test_jump_ignored_while_crashed() {
        let mut skier = Skier::new(Vec2::ZERO);
        skier.crash();
        skier.jump();
        assert!(!skier.is_jumping());
        assert!(skier.animation().is_none());
    }

    #[test]
    fn test_jump_animation_is_paced_by_frame_gate() {
        let atlas = atlas();
        let mut skier = Skier::new(Vec2::ZERO);
        skier.jump();

        skier.update(0, &[], &atlas);
        assert_eq!(skier.sprite(), Sprite::SkierJump1);

        // Gate still closed: many ticks, same frame
        for now in [16, 50, 100, 149] {
            skier.update(now, &[], &atlas);
            assert_eq!(skier.sprite(), Sprite::SkierJump1);
        }

        let expected = [
            (150, Sprite::SkierJump2),
            (300, Sprite::SkierJump3),
            (450, Sprite::SkierJump4),
            (600, Sprite::SkierJump5),
        ];
        for (now, sprite) in expected {
            skier.update(now, &[], &atlas);
            assert_eq!(skier.sprite(), sprite);
            assert!(skier.is_jumping());
        }

        skier.update(750, &[], &atlas);
        assert!(!skier.is_jumping());
        assert!(skier.animation().is_none());
        assert_eq!(skier.sprite(), Sprite::SkierDown);
    }

    #[test]
    fn test_stale_frame_gate_is_a_no_op() {
        let atlas = atlas();
        let mut skier = Skier::new(Vec2::ZERO);
        skier.jump();
        skier.update(0, &[], &atlas);

        // Jump abandoned by a crash while the gate is pending
        skier.crash();
        skier.recover_from_crash(Direction::Down);

        skier.update(200, &[], &atlas);
        assert!(!skier.is_jumping());
        assert_eq!(skier.sprite(), Sprite::SkierDown);
        assert_eq!(skier.state(), SkierState::Skiing);
    }

    #[test]
    fn test_crash_and_recover() {
        let mut skier = Skier::new(Vec2::ZERO);
        skier.set_direction(Direction::RightDown);
        skier.crash();
        assert_eq!(skier.state(), SkierState::Crashed);
        assert_eq!(skier.speed(), 0.0);
        assert_eq!(skier.sprite(), Sprite::SkierCrash);

        // Crashed skier does not move
        let before = skier.position();
        skier.update(0, &[], &atlas());
        assert_eq!(skier.position(), before);

        skier.recover_from_crash(Direction::Left);
        assert_eq!(skier.state(), SkierState::Skiing);
        assert_eq!(skier.speed(), SKIER_STARTING_SPEED);
        assert_eq!(skier.direction(), Direction::Left);
        assert_eq!(skier.sprite(), Sprite::SkierLeft);
    }

    #[test]
    fn test_dead_skier_is_inert_and_invisible() {
        let atlas = atlas();
        let mut skier = Skier::new(Vec2::new(1.0, 2.0));
        skier.die();
        assert!(skier.is_dead());
        assert_eq!(skier.speed(), 0.0);

        skier.set_speed(10.0);
        skier.jump();
        skier.update(0, &[], &atlas);
        assert_eq!(skier.position(), Vec2::new(1.0, 2.0));
        assert!(!skier.is_jumping());

        let mut canvas = RecordingCanvas::new();
        skier.draw(&mut canvas, &atlas).unwrap();
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn test_hitting_tree_crashes() {
        let atlas = atlas();
        let mut skier = Skier::new(Vec2::ZERO);
        skier.set_direction(Direction::LeftDown);

        let step = 5.0 / std::f32::consts::SQRT_2;
        let tree = obstacle(ObstacleKind::Tree, Vec2::new(-step, step));
        skier.update(0, &[tree], &atlas);

        assert_eq!(skier.state(), SkierState::Crashed);
        assert_eq!(skier.speed(), 0.0);
        assert_eq!(skier.sprite(), Sprite::SkierCrash);
    }

    #[test]
    fn test_ramp_launches_jump() {
        let atlas = atlas();
        let mut skier = Skier::new(Vec2::ZERO);
        let ramp = obstacle(ObstacleKind::JumpRamp, Vec2::new(0.0, 10.0));

        skier.update(0, &[ramp], &atlas);
        assert!(skier.is_skiing());
        assert!(skier.is_jumping());
    }

    #[test]
    fn test_airborne_skier_clears_rock_but_not_tree() {
        let atlas = atlas();

        let mut skier = Skier::new(Vec2::ZERO);
        skier.jump();
        skier.update(0, &[obstacle(ObstacleKind::Rock1, Vec2::new(0.0, 10.0))], &atlas);
        assert!(skier.is_skiing());

        let mut skier = Skier::new(Vec2::ZERO);
        skier.jump();
        skier.update(0, &[obstacle(ObstacleKind::Tree, Vec2::new(0.0, 10.0))], &atlas);
        assert!(skier.is_crashed());
    }

    #[test]
    fn test_first_overlapping_obstacle_wins() {
        let atlas = atlas();
        let ramp = obstacle(ObstacleKind::JumpRamp, Vec2::new(0.0, 10.0));
        let rock = obstacle(ObstacleKind::Rock2, Vec2::new(0.0, 12.0));

        let mut skier = Skier::new(Vec2::ZERO);
        skier.update(0, &[ramp.clone(), rock.clone()], &atlas);
        assert!(skier.is_skiing());

        let mut skier = Skier::new(Vec2::ZERO);
        skier.update(0, &[rock, ramp], &atlas);
        assert!(skier.is_crashed());
    }

    #[test]
    fn test_custom_chain_without_ramp_rule() {
        let atlas = atlas();
        let mut skier =
            Skier::new(Vec2::ZERO).with_collision_chain(CollisionChain::new(vec![CollisionRule::Jump]));
        skier.update(0, &[obstacle(ObstacleKind::JumpRamp, Vec2::new(0.0, 10.0))], &atlas);
        assert!(skier.is_crashed());
    }

    #[test]
    fn test_missing_sprite_skips_collision_but_still_moves() {
        let mut sizes = SpriteAtlas::new();
        sizes.register(Sprite::Tree, Vec2::new(28.0, 54.0));
        let tree = Obstacle::new(ObstacleKind::Tree, Vec2::new(0.0, 10.0), &sizes).unwrap();

        let mut skier = Skier::new(Vec2::ZERO);
        skier.update(0, &[tree], &sizes);
        assert_eq!(skier.position(), Vec2::new(0.0, 5.0));
        assert!(skier.is_skiing());
    }

    proptest! {
        #[test]
        fn prop_diagonal_displacement_equals_speed(speed in 0.1f32..50.0) {
            let mut skier = Skier::new(Vec2::ZERO);
            skier.set_speed(speed);
            skier.set_direction(Direction::RightDown);
            skier.update(0, &[], &SpriteAtlas::builtin());
            prop_assert!((skier.position().length() - speed).abs() < speed * 1e-4);
        }
    }
}
