//! Frame-driven game loop
//!
//! One `tick` per display refresh. While the play gate is closed the loop
//! only redraws a static frame around the skier. Otherwise the order is
//! fixed: viewport, obstacle repopulation, skier, rhino, render, difficulty.

use super::commands::{KeyBindings, PlayGate};
use super::geometry::Rect;
use super::obstacles::{ObstacleField, ObstacleSource};
use super::rhino::Rhino;
use super::skier::Skier;
use crate::assets::SpriteAtlas;
use crate::error::{AssetLookupError, InputError};
use crate::renderer::Canvas;
use crate::settings::Settings;

/// Complete game state for a single run
pub struct Game<O: ObstacleSource = ObstacleField> {
    settings: Settings,
    atlas: SpriteAtlas,
    skier: Skier,
    rhino: Rhino,
    obstacles: O,
    bindings: KeyBindings,
    gate: PlayGate,
    viewport: Option<Rect>,
    frame_count: u64,
}

impl Game<ObstacleField> {
    /// Game over a seeded procedural obstacle field
    pub fn with_field(settings: Settings, atlas: SpriteAtlas, seed: u64) -> Self {
        let field = ObstacleField::new(seed, settings.viewport_size(), atlas.clone());
        Self::new(settings, atlas, field)
    }
}

impl<O: ObstacleSource> Game<O> {
    pub fn new(settings: Settings, atlas: SpriteAtlas, obstacles: O) -> Self {
        let gate = PlayGate::new(settings.autostart);
        let skier = new_skier(&settings);
        let rhino = new_rhino(&settings);
        Self {
            settings,
            atlas,
            skier,
            rhino,
            obstacles,
            bindings: KeyBindings::default(),
            gate,
            viewport: None,
            frame_count: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn skier(&self) -> &Skier {
        &self.skier
    }

    pub fn rhino(&self) -> &Rhino {
        &self.rhino
    }

    pub fn obstacles(&self) -> &O {
        &self.obstacles
    }

    pub fn is_playing(&self) -> bool {
        self.gate.is_playing()
    }

    /// Frames simulated since the run started
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Viewport of the last rendered frame
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// The run is over once the rhino has eaten the skier
    pub fn is_over(&self) -> bool {
        self.skier.is_dead()
    }

    /// Advance one frame and render it
    pub fn tick(&mut self, now_ms: u64, canvas: &mut dyn Canvas) {
        let viewport = self.compute_viewport();

        if !self.gate.is_playing() {
            self.viewport = Some(viewport);
            self.draw(canvas);
            return;
        }

        let previous = self.viewport.unwrap_or(viewport);
        self.obstacles.repopulate(&viewport, &previous);
        self.viewport = Some(viewport);

        // Skier first so the rhino chases this frame's position
        self.skier
            .update(now_ms, self.obstacles.live_obstacles(), &self.atlas);
        self.rhino.update(now_ms, &mut self.skier, &self.atlas);

        self.draw(canvas);

        self.frame_count += 1;
        self.advance_difficulty();
    }

    fn compute_viewport(&self) -> Rect {
        Rect::centered(self.skier.position(), self.settings.viewport_size())
    }

    fn advance_difficulty(&mut self) {
        let interval = self.settings.difficulty_interval_frames;
        if interval == 0 || self.frame_count % interval != 0 {
            return;
        }

        let increment = self.settings.difficulty_speed_increment;
        self.skier.increase_speed(increment);
        self.rhino.increase_speed(increment);
        log::info!(
            "Difficulty up at frame {}: skier speed {}, rhino speed {}",
            self.frame_count,
            self.skier.speed(),
            self.rhino.speed()
        );
    }

    /// Skier, then rhino, then obstacles. A failed draw is skipped.
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear();
        if let Some(viewport) = self.viewport {
            canvas.set_draw_offset(viewport.top_left());
        }

        report_draw("skier", self.skier.draw(canvas, &self.atlas));
        report_draw("rhino", self.rhino.draw(canvas, &self.atlas));
        for obstacle in self.obstacles.live_obstacles() {
            report_draw("obstacle", obstacle.draw(canvas, &self.atlas));
        }
    }

    /// Dispatch a normalized key token
    pub fn handle_key(&mut self, token: &str) -> Result<bool, InputError> {
        let was_playing = self.gate.is_playing();
        let handled = self
            .bindings
            .dispatch(token, &mut self.skier, &mut self.gate)?;

        if self.gate.take_restart_request() {
            self.restart();
        } else if was_playing != self.gate.is_playing() {
            log::info!(
                "Game {}",
                if self.gate.is_playing() { "started" } else { "paused" }
            );
        }
        Ok(handled)
    }

    /// Fresh skier, rhino, obstacles and difficulty; play resumes
    pub fn restart(&mut self) {
        self.skier = new_skier(&self.settings);
        self.rhino = new_rhino(&self.settings);
        self.obstacles.reset();
        self.viewport = None;
        self.frame_count = 0;
        self.gate.set_playing(true);
        log::info!("Game restarted");
    }
}

fn new_skier(settings: &Settings) -> Skier {
    Skier::new(glam::Vec2::ZERO).with_frame_delay(settings.jump_frame_ms)
}

fn new_rhino(settings: &Settings) -> Rhino {
    Rhino::new(settings.rhino_start, settings.rhino_speed)
        .with_frame_interval(settings.rhino_frame_ms)
}

fn report_draw(what: &str, result: Result<(), AssetLookupError>) {
    if let Err(e) = result {
        log::warn!("Skipping {} draw: {}", what, e);
    }
}
