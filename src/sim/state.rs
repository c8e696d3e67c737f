//! Game state and core simulation types
//!
//! The simulation owns the canonical mouse list; everything handed to the
//! outside world goes through [`GameSnapshot`].

use std::fmt;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet; never re-entered once left
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Lives exhausted
    GameOver,
}

/// Identifier of a live mouse, unique among the mice of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MouseId(pub u64);

impl fmt::Display for MouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut n = self.0;
        let mut buf = [0u8; 13];
        let mut i = buf.len();
        loop {
            i -= 1;
            buf[i] = DIGITS[(n % 36) as usize];
            n /= 36;
            if n == 0 {
                break;
            }
        }
        // Only ASCII digits were written
        f.write_str(std::str::from_utf8(&buf[i..]).map_err(|_| fmt::Error)?)
    }
}

/// The player-steered cat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub pos: Vec3,
    /// Yaw in radians, for presentation
    pub facing: f32,
}

impl Default for Cat {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, CAT_HEIGHT, 0.0),
            facing: 0.0,
        }
    }
}

/// A mouse roaming the garden
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mouse {
    pub id: MouseId,
    pub pos: Vec3,
    /// Units per second; only x and z are used
    pub vel: Vec3,
    pub time_to_live_ms: f32,
    pub caught: bool,
}

impl Mouse {
    pub fn new(id: MouseId, pos: Vec3, vel: Vec3, time_to_live_ms: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            time_to_live_ms,
            caught: false,
        }
    }
}

/// Difficulty tunables. Ratcheted during a run, restored on every start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_lives: u32,
    /// Minimum gap between spawn attempts
    pub mouse_spawn_rate_ms: f64,
    /// Full width of the per-axis velocity range
    pub mouse_speed: f32,
    pub mouse_lifespan_ms: f32,
    /// Score needed per level
    pub level_up_score: u32,
    pub max_mice_on_screen: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_lives: 3,
            mouse_spawn_rate_ms: 2000.0,
            mouse_speed: 2.0,
            mouse_lifespan_ms: 5000.0,
            level_up_score: 10,
            max_mice_on_screen: 8,
        }
    }
}

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    MouseSpawned { id: MouseId },
    MouseCaught { id: MouseId, pos: Vec3 },
    LifeLost { id: MouseId },
    LevelUp { level: u32 },
    GameOver { score: u32 },
}

/// Immutable copy of the game handed to hosts and renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub is_playing: bool,
    pub is_game_over: bool,
    pub is_paused: bool,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub cat: Cat,
    /// Live mice in spawn order
    pub mice: Vec<Mouse>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub cat: Cat,
    /// Live mice in spawn order
    pub mice: Vec<Mouse>,
    /// Current (ratcheted) tunables
    pub config: GameConfig,
    /// Timestamp of the last gated spawn attempt
    pub last_spawn_ms: f64,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl GameState {
    /// Create an idle game with the given tunables and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: config.max_lives,
            level: 1,
            cat: Cat::default(),
            mice: Vec::new(),
            config,
            last_spawn_ms: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Full reset into `Playing`. The RNG stream carries on so consecutive
    /// runs differ, but every previous mouse id is forgotten.
    pub fn reset(&mut self, initial: &GameConfig) {
        self.config = initial.clone();
        self.score = 0;
        self.lives = initial.max_lives;
        self.level = 1;
        self.cat = Cat::default();
        self.mice.clear();
        self.events.clear();
        self.last_spawn_ms = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether `id` belongs to a live mouse
    pub fn has_mouse(&self, id: MouseId) -> bool {
        self.mice.iter().any(|m| m.id == id)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            is_playing: self.is_playing(),
            is_game_over: self.is_game_over(),
            is_paused: self.phase == GamePhase::Paused,
            score: self.score,
            lives: self.lives,
            level: self.level,
            cat: self.cat,
            mice: self.mice.clone(),
        }
    }
}
