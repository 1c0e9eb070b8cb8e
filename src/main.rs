//! Turtle Invaders entry point
//!
//! Headless driver: schedules ticks, feeds input, and hands frames to a
//! renderer. Usage: `turtle-invaders [settings.json] [--realtime]`.

use std::time::Duration;

use turtle_invaders::Settings;
use turtle_invaders::platform::{
    Clock, FrameTimer, InputEvent, InputState, ManualClock, MonotonicClock,
};
use turtle_invaders::renderer::{Frame, LogRenderer, Renderer};
use turtle_invaders::sim::{GameState, tick};
use turtle_invaders::sprites::SpriteSet;

/// Drives one session until it ends, quits, or runs out of ticks
struct Driver {
    settings: Settings,
    sprites: SpriteSet,
    state: GameState,
    input: InputState,
    renderer: LogRenderer,
}

impl Driver {
    fn new(settings: Settings) -> Self {
        let sprites = SpriteSet::resolve(&settings.assets_dir);
        let state = GameState::new(settings.seed);
        let mut input = InputState::new();
        if settings.autopilot {
            input.set_autopilot(Some(settings.difficulty));
        } else {
            input.apply(InputEvent::SelectDifficulty(settings.difficulty));
        }
        log::info!("Game initialized with seed: {}", settings.seed);
        Self {
            settings,
            sprites,
            state,
            input,
            renderer: LogRenderer::new(),
        }
    }

    /// Run ticks; `wait` is called between ticks and advances `clock`
    fn run<C: Clock>(&mut self, clock: &mut C, mut wait: impl FnMut(&mut C)) -> Frame {
        let mut timer = FrameTimer::new(&*clock);
        let mut frame = Frame::capture(&self.state, &self.sprites);

        for _ in 0..self.settings.max_ticks {
            wait(clock);
            let dt = timer.lap(&*clock);
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input, dt);

            frame = Frame::capture(&self.state, &self.sprites);
            self.renderer.present(&frame);

            if self.state.quit_requested {
                log::info!("Quit requested");
                break;
            }
            if self.state.phase.is_finished() {
                break;
            }
        }

        log::info!(
            "Stopped after {} ticks in {:?}",
            self.renderer.frames(),
            self.state.phase
        );
        frame
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Turtle Invaders (headless) starting...");

    let mut settings_path = None;
    let mut realtime = false;
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            realtime = true;
        } else {
            settings_path = Some(arg);
        }
    }
    let settings = settings_path.map(Settings::load_from).unwrap_or_default();
    let step = settings.tick_secs();
    let mut driver = Driver::new(settings);

    let frame = if realtime {
        let interval = Duration::from_secs_f32(step);
        driver.run(&mut MonotonicClock::new(), |_| std::thread::sleep(interval))
    } else {
        driver.run(&mut ManualClock::default(), |clock| clock.advance(f64::from(step)))
    };

    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize final frame: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is driven by the embedding page
}
