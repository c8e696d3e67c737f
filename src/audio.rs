//! Audio collaborator boundary
//!
//! The game only fires cues; how they sound is up to the sink. Sink failures
//! are logged and dropped here so a missing audio device never stalls a tick.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::SinkError;
use crate::settings::AudioSettings;

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Cat caught a mouse
    Catch,
    /// A mouse got away
    LifeLost,
}

/// Whatever actually makes noise. Calls are fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, volume: f32) -> Result<(), SinkError>;
    fn start_background_loop(&mut self, volume: f32) -> Result<(), SinkError>;
    fn stop_background_loop(&mut self) -> Result<(), SinkError>;
    /// Free device handles. Called at most once.
    fn release(&mut self) {}
}

impl<T: AudioSink> AudioSink for Rc<RefCell<T>> {
    fn play(&mut self, cue: AudioCue, volume: f32) -> Result<(), SinkError> {
        self.borrow_mut().play(cue, volume)
    }

    fn start_background_loop(&mut self, volume: f32) -> Result<(), SinkError> {
        self.borrow_mut().start_background_loop(volume)
    }

    fn stop_background_loop(&mut self) -> Result<(), SinkError> {
        self.borrow_mut().stop_background_loop()
    }

    fn release(&mut self) {
        self.borrow_mut().release();
    }
}

/// Silent sink for hosts without audio
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue, _volume: f32) -> Result<(), SinkError> {
        Ok(())
    }

    fn start_background_loop(&mut self, _volume: f32) -> Result<(), SinkError> {
        Ok(())
    }

    fn stop_background_loop(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue, volume: f32) -> Result<(), SinkError> {
        log::debug!("♪ {:?} at volume {:.2}", cue, volume);
        Ok(())
    }

    fn start_background_loop(&mut self, volume: f32) -> Result<(), SinkError> {
        log::info!("♪ background loop on (volume {:.2})", volume);
        Ok(())
    }

    fn stop_background_loop(&mut self) -> Result<(), SinkError> {
        log::info!("♪ background loop off");
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    background_playing: bool,
    released: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, settings: &AudioSettings) -> Self {
        Self {
            sink,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            background_playing: false,
            released: false,
        }
    }

    /// Manager that drops every cue
    pub fn silent() -> Self {
        Self::new(Box::new(NullAudio), &AudioSettings::default())
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set background loop volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective cue volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn is_background_playing(&self) -> bool {
        self.background_playing
    }

    /// Play a one-shot cue
    pub fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 || self.released {
            return;
        }
        if let Err(e) = self.sink.play(cue, vol) {
            log::warn!("Audio cue {:?} failed: {}", cue, e);
        }
    }

    pub fn play_catch(&mut self) {
        self.play(AudioCue::Catch);
    }

    pub fn play_life_lost(&mut self) {
        self.play(AudioCue::LifeLost);
    }

    /// Start the looping background track unless it is already running
    pub fn start_background_loop(&mut self) {
        if self.background_playing || self.released {
            return;
        }
        match self.sink.start_background_loop(self.effective_music_volume()) {
            Ok(()) => self.background_playing = true,
            Err(e) => log::warn!("Background loop failed to start: {}", e),
        }
    }

    pub fn stop_background_loop(&mut self) {
        if !self.background_playing {
            return;
        }
        // Considered stopped even if the sink complains
        self.background_playing = false;
        if let Err(e) = self.sink.stop_background_loop() {
            log::warn!("Background loop failed to stop: {}", e);
        }
    }

    /// Stop everything and hand the device back. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.stop_background_loop();
        self.sink.release();
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail: bool,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue, _volume: f32) -> Result<(), SinkError> {
            self.calls.push(format!("{:?}", cue));
            if self.fail {
                Err(SinkError::Unavailable("no device".into()))
            } else {
                Ok(())
            }
        }

        fn start_background_loop(&mut self, _volume: f32) -> Result<(), SinkError> {
            self.calls.push("start".into());
            if self.fail {
                Err(SinkError::Unavailable("no device".into()))
            } else {
                Ok(())
            }
        }

        fn stop_background_loop(&mut self) -> Result<(), SinkError> {
            self.calls.push("stop".into());
            Ok(())
        }

        fn release(&mut self) {
            self.calls.push("release".into());
        }
    }

    fn manager(fail: bool) -> (AudioManager, Rc<RefCell<Recorder>>) {
        let rec = Rc::new(RefCell::new(Recorder {
            fail,
            ..Default::default()
        }));
        let mgr = AudioManager::new(Box::new(rec.clone()), &AudioSettings::default());
        (mgr, rec)
    }

    #[test]
    fn test_background_loop_started_once() {
        let (mut mgr, rec) = manager(false);
        mgr.start_background_loop();
        mgr.start_background_loop();
        assert!(mgr.is_background_playing());
        mgr.stop_background_loop();
        mgr.stop_background_loop();
        assert_eq!(rec.borrow().calls, vec!["start", "stop"]);
    }

    #[test]
    fn test_muted_drops_cues() {
        let (mut mgr, rec) = manager(false);
        mgr.set_muted(true);
        mgr.play_catch();
        assert!(rec.borrow().calls.is_empty());
        mgr.set_muted(false);
        mgr.play_catch();
        mgr.play_life_lost();
        assert_eq!(rec.borrow().calls, vec!["Catch", "LifeLost"]);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let (mut mgr, rec) = manager(true);
        mgr.play_catch();
        mgr.start_background_loop();
        assert!(!mgr.is_background_playing());
        assert_eq!(rec.borrow().calls, vec!["Catch", "start"]);
    }

    #[test]
    fn test_release_is_idempotent() {
        let (mut mgr, rec) = manager(false);
        mgr.start_background_loop();
        mgr.release();
        mgr.release();
        mgr.play_catch();
        mgr.start_background_loop();
        assert_eq!(rec.borrow().calls, vec!["start", "stop", "release"]);
    }
}
