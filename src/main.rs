//! Ski Chase entry point
//!
//! Native headless host: runs the simulation against a recording canvas,
//! feeding a scripted key sequence until the rhino catches the skier or the
//! frame limit is reached. `--realtime` paces frames with the system clock;
//! `--frames N` changes the frame limit.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use ski_chase::platform::{Clock, ManualClock, SystemClock, normalize_key};
    use ski_chase::renderer::RecordingCanvas;
    use ski_chase::sim::Game;
    use ski_chase::{Settings, SpriteAtlas};

    /// Display refresh interval (~60 Hz)
    const FRAME_MS: u64 = 16;
    const DEFAULT_MAX_FRAMES: u64 = 20_000;

    /// (frame, key, ctrl) presses replayed by the host
    const SCRIPT: &[(u64, &str, bool)] = &[
        (90, "ArrowRight", false),
        (150, " ", false),
        (240, "ArrowLeft", false),
        (241, "ArrowLeft", false),
        (300, "ArrowDown", false),
        (360, " ", false),
        (420, "Escape", false),
        (480, "ArrowLeft", false),
        (540, "ArrowRight", false),
    ];

    struct Options {
        realtime: bool,
        max_frames: u64,
    }

    fn parse_args() -> Options {
        let mut options = Options {
            realtime: false,
            max_frames: DEFAULT_MAX_FRAMES,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--realtime" => options.realtime = true,
                "--frames" => match args.next().map(|n| n.parse()) {
                    Some(Ok(n)) => options.max_frames = n,
                    _ => log::warn!("--frames needs a number, keeping {}", options.max_frames),
                },
                other => log::warn!("Ignoring unknown argument: {}", other),
            }
        }
        options
    }

    pub fn run() {
        env_logger::init();
        log::info!("Ski Chase (native) starting...");

        let options = parse_args();
        let settings = Settings::load();

        let atlas = SpriteAtlas::load(settings.sprite_manifest.as_deref());
        let missing = atlas.missing();
        if !missing.is_empty() {
            log::warn!("Sprites without a registered size: {:?}", missing);
        }

        let seed = settings.obstacle_seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        log::info!("Game initialized with seed: {}", seed);

        let mut game = Game::with_field(settings, atlas, seed);
        if !game.is_playing() {
            press(&mut game, "s", false);
        }

        let frames = if options.realtime {
            let clock = SystemClock::new();
            let sleep = || std::thread::sleep(Duration::from_millis(FRAME_MS));
            play(&mut game, &clock, &sleep, options.max_frames)
        } else {
            let clock = ManualClock::new(0);
            let advance = || clock.advance(FRAME_MS);
            play(&mut game, &clock, &advance, options.max_frames)
        };

        let skier = game.skier();
        if game.is_over() {
            log::info!(
                "Caught by the rhino after {} frames, {:.0} units downhill",
                frames,
                skier.position().y
            );
        } else {
            log::info!(
                "Stopped after {} frames, {:.0} units downhill, skier {:?}",
                frames,
                skier.position().y,
                skier.state()
            );
        }
    }

    fn press(game: &mut Game, key: &str, ctrl: bool) {
        let token = normalize_key(key, ctrl);
        if let Err(e) = game.handle_key(&token) {
            log::warn!("Ignoring key: {}", e);
        }
    }

    /// Drive the game until it ends or `max_frames` host frames pass
    fn play(game: &mut Game, clock: &dyn Clock, next_frame: &dyn Fn(), max_frames: u64) -> u64 {
        let mut canvas = RecordingCanvas::new();
        let mut script = SCRIPT.iter().peekable();

        let mut frame = 0;
        while frame < max_frames && !game.is_over() {
            while let Some(&(_, key, ctrl)) = script.next_if(|(at, _, _)| *at <= frame) {
                press(game, key, ctrl);
            }

            game.tick(clock.now_ms(), &mut canvas);
            log::trace!("Frame {}: {} draw calls", frame, canvas.calls().len());

            next_frame();
            frame += 1;
        }
        frame
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Game` directly; nothing to do here
}
