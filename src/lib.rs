//! Mouse Catcher - a garden cat-and-mouse arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, catches, difficulty)
//! - `game`: Orchestrator that drives the simulation and its collaborators
//! - `audio`: Audio collaborator boundary (fire-and-forget cues)
//! - `present`: Render collaborator boundary and presentation-side helpers
//! - `platform`: Frame scheduling primitives
//! - `settings`: Data-driven tunables and preferences

pub mod audio;
pub mod game;
pub mod platform;
pub mod present;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Settings, SettingsError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed logical step per tick, in milliseconds (nominal 60 Hz)
    pub const TICK_MS: f32 = 16.0;

    /// Mice bounce off this half-extent on both ground axes
    pub const MOUSE_BOUND: f32 = 8.0;
    /// Mice appear on a circle of this radius around the origin
    pub const SPAWN_RADIUS: f32 = 8.0;
    /// Hover height mice are spawned at
    pub const MOUSE_HEIGHT: f32 = 0.2;

    /// Cat is clamped to this half-extent (looser than the mouse bound)
    pub const CAT_BOUND: f32 = 9.0;
    /// Cat movement per tick per held direction
    pub const CAT_STEP: f32 = 0.15;
    /// Resting height of the cat body
    pub const CAT_HEIGHT: f32 = 0.8;

    /// Planar distance below which the cat catches a mouse
    pub const CATCH_RADIUS: f32 = 1.2;

    /// Difficulty ratchet limits
    pub const MIN_SPAWN_RATE_MS: f64 = 800.0;
    pub const SPAWN_RATE_STEP_MS: f64 = 100.0;
    pub const MAX_MOUSE_SPEED: f32 = 4.0;
    pub const MOUSE_SPEED_STEP: f32 = 0.2;
    pub const MAX_MICE_CAP: u32 = 12;
}

/// Project a world position onto the ground plane (x, z)
#[inline]
pub fn ground(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Euclidean distance on the ground plane; height is ignored
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    ground(a).distance(ground(b))
}
