//! Game loop orchestrator
//!
//! Owns the simulation state, the held-key set and the external
//! collaborators. Hosts drive it with `on_frame`/`tick` once per display
//! refresh and read it back through `snapshot`.

use crate::audio::{AudioManager, AudioSink, NullAudio};
use crate::platform::{FrameHandle, FrameScheduler};
use crate::present::{FrameSink, NullFrames};
use crate::settings::{AudioSettings, Settings};
use crate::sim::{self, GameConfig, GameEvent, GamePhase, GameSnapshot, GameState, InputState, MoveKey};

pub struct Game {
    state: GameState,
    input: InputState,
    /// Difficulty every new run starts from
    initial: GameConfig,
    audio_settings: AudioSettings,
    audio: AudioManager,
    renderer: Box<dyn FrameSink>,
    scheduler: Option<Box<dyn FrameScheduler>>,
    pending_frame: Option<FrameHandle>,
    /// Events from the most recent tick
    last_events: Vec<GameEvent>,
    disposed: bool,
}

impl Game {
    /// Create an idle game with silent collaborators and no scheduler
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed_or_clock();
        log::info!("Game created with seed {}", seed);
        Self {
            state: GameState::new(settings.difficulty.clone(), seed),
            input: InputState::new(),
            initial: settings.difficulty.clone(),
            audio_settings: settings.audio.clone(),
            audio: AudioManager::new(Box::new(NullAudio), &settings.audio),
            renderer: Box::new(NullFrames),
            scheduler: None,
            pending_frame: None,
            last_events: Vec::new(),
            disposed: false,
        }
    }

    pub fn with_audio(mut self, sink: impl AudioSink + 'static) -> Self {
        self.audio = AudioManager::new(Box::new(sink), &self.audio_settings);
        self
    }

    pub fn with_renderer(mut self, renderer: impl FrameSink + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    /// Begin a fresh run. Also a hard reset when called mid-game.
    pub fn start(&mut self) {
        if self.disposed {
            log::warn!("start() after dispose ignored");
            return;
        }
        self.cancel_pending_frame();

        if self.state.phase == GamePhase::Playing {
            log::info!("start() while playing: resetting run");
        }
        self.state.reset(&self.initial);
        self.last_events.clear();
        self.audio.start_background_loop();
        log::info!(
            "Run started: {} lives, {} points per level",
            self.state.lives,
            self.initial.level_up_score
        );

        self.schedule_next_frame();
    }

    /// Stop the current run and start a new one
    pub fn restart(&mut self) {
        if self.disposed {
            log::warn!("restart() after dispose ignored");
            return;
        }
        self.cancel_pending_frame();
        self.audio.stop_background_loop();
        self.start();
    }

    /// Advance one fixed step. `now_ms` is the host's monotonic frame time.
    pub fn tick(&mut self, now_ms: f64) {
        if self.disposed || !self.state.is_playing() {
            return;
        }

        sim::tick(&mut self.state, &self.input, now_ms);
        self.dispatch_events();
        self.present();

        if self.state.is_playing() {
            self.schedule_next_frame();
        }
    }

    /// Scheduler callback. Frames that were cancelled or superseded are
    /// dropped so a stale callback can never touch a freshly reset run.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) {
        if self.pending_frame != Some(handle) {
            log::debug!("Ignoring stale frame {:?}", handle);
            return;
        }
        self.pending_frame = None;
        self.tick(now_ms);
    }

    /// Freeze a running game
    pub fn pause(&mut self) {
        if self.disposed || self.state.phase != GamePhase::Playing {
            return;
        }
        self.cancel_pending_frame();
        self.state.phase = GamePhase::Paused;
        self.audio.stop_background_loop();
        log::info!("Paused at score {}", self.state.score);
    }

    pub fn resume(&mut self) {
        if self.disposed || self.state.phase != GamePhase::Paused {
            return;
        }
        self.state.phase = GamePhase::Playing;
        self.audio.start_background_loop();
        log::info!("Resumed");
        self.schedule_next_frame();
    }

    pub fn key_down(&mut self, key: MoveKey) {
        self.input.key_down(key);
        // First key press doubles as the user gesture that unlocks audio
        if self.state.is_playing() && !self.disposed {
            self.audio.start_background_loop();
        }
    }

    pub fn key_up(&mut self, key: MoveKey) {
        self.input.key_up(key);
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Events produced by the most recent tick
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Volume and mute controls
    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Halt scheduling and release collaborators. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_pending_frame();
        self.audio.release();
        self.renderer.release();
        self.disposed = true;
        log::info!("Game disposed");
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    fn dispatch_events(&mut self) {
        self.last_events = std::mem::take(&mut self.state.events);
        for event in &self.last_events {
            match *event {
                GameEvent::MouseCaught { pos, .. } => {
                    self.audio.play_catch();
                    if let Err(e) = self.renderer.catch_effect(pos) {
                        log::warn!("Catch effect failed: {}", e);
                    }
                }
                GameEvent::LifeLost { .. } => self.audio.play_life_lost(),
                GameEvent::GameOver { .. } => self.audio.stop_background_loop(),
                GameEvent::MouseSpawned { .. } | GameEvent::LevelUp { .. } => {}
            }
        }
    }

    fn present(&mut self) {
        let snapshot = self.state.snapshot();
        if let Err(e) = self.renderer.present(&snapshot) {
            log::warn!("Render failed: {}", e);
        }
    }

    fn schedule_next_frame(&mut self) {
        if self.pending_frame.is_some() {
            return;
        }
        if let Some(scheduler) = self.scheduler.as_mut() {
            self.pending_frame = Some(scheduler.request_frame());
        }
    }

    fn cancel_pending_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            if let Some(scheduler) = self.scheduler.as_mut() {
                scheduler.cancel_frame(handle);
            }
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.dispose();
    }
}
