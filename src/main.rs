//! Mouse Catcher entry point
//!
//! Native builds have no window yet: this runs a headless autopilot session
//! on an in-process frame queue and reports how it went.
//!
//! Usage: `mouse-catcher [settings.json]`

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use mouse_catcher::audio::LogAudio;
use mouse_catcher::consts::TICK_MS;
use mouse_catcher::platform::FrameQueue;
use mouse_catcher::present::LogFrames;
use mouse_catcher::sim::{MoveKey, autopilot};
use mouse_catcher::{Game, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Mouse Catcher (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = settings.seed_or_clock();
    let settings = Settings {
        seed: Some(seed),
        ..settings
    };

    let frames = Rc::new(RefCell::new(FrameQueue::new()));
    let renderer = Rc::new(RefCell::new(LogFrames::new(seed)));
    let mut game = Game::new(&settings)
        .with_audio(LogAudio)
        .with_renderer(renderer.clone())
        .with_scheduler(frames.clone());

    game.start();

    let mut now = 0.0;
    let mut frame_count = 0u64;
    while frame_count < settings.demo_frames {
        let next = frames.borrow_mut().next_due();
        let Some(handle) = next else {
            break;
        };

        let snap = game.snapshot();
        let wanted = autopilot::desired_keys(&snap.cat, &snap.mice);
        for key in MoveKey::ALL {
            if wanted.contains(&key) {
                game.key_down(key);
            } else {
                game.key_up(key);
            }
        }

        now += f64::from(TICK_MS);
        game.on_frame(handle, now);
        frame_count += 1;
    }

    let snap = game.snapshot();
    if snap.is_game_over {
        log::info!("Game over after {:.1}s", now / 1000.0);
    } else {
        log::info!("Frame limit reached after {:.1}s", now / 1000.0);
    }
    println!(
        "seed {} | score {} | level {} | lives {} | frames presented {}",
        seed,
        snap.score,
        snap.level,
        snap.lives,
        renderer.borrow().frames()
    );

    game.dispose();
    ExitCode::SUCCESS
}
