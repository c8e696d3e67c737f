//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order of the mouse list)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod lifecycle;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Catch, detect_catches};
pub use input::{InputState, MoveKey};
pub use lifecycle::{check_game_over, escalate, level_for_score, reap};
pub use motion::{advance, move_cat};
pub use spawn::try_spawn;
pub use state::{Cat, GameConfig, GameEvent, GamePhase, GameSnapshot, GameState, Mouse, MouseId};
pub use tick::tick;
