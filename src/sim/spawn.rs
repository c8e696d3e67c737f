//! Mouse spawning
//!
//! The minimum-interval gate lives in the tick; this module only decides
//! whether a spawn is allowed and what the new mouse looks like.

use glam::Vec3;
use rand::Rng;

use super::state::{GameConfig, GameState, Mouse, MouseId};
use crate::consts::*;

/// Spawn a mouse on the spawn circle, if the game is running and below the cap.
///
/// The new mouse is pushed onto `state.mice` and also returned.
pub fn try_spawn(state: &mut GameState) -> Option<Mouse> {
    if !state.is_playing() || state.mice.len() as u32 >= state.config.max_mice_on_screen {
        return None;
    }

    let id = fresh_id(state);
    let mouse = spawn_mouse(id, &state.config, &mut state.rng);
    state.mice.push(mouse);
    Some(mouse)
}

/// Build a mouse at a random point on the spawn circle with a random heading
pub fn spawn_mouse<R: Rng>(id: MouseId, config: &GameConfig, rng: &mut R) -> Mouse {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let pos = Vec3::new(
        angle.cos() * SPAWN_RADIUS,
        MOUSE_HEIGHT,
        angle.sin() * SPAWN_RADIUS,
    );
    let vel = Vec3::new(
        (rng.random::<f32>() - 0.5) * config.mouse_speed,
        0.0,
        (rng.random::<f32>() - 0.5) * config.mouse_speed,
    );
    Mouse::new(id, pos, vel, config.mouse_lifespan_ms)
}

/// Draw a random id that no live mouse is using
fn fresh_id(state: &mut GameState) -> MouseId {
    loop {
        let id = MouseId(state.rng.random());
        if !state.has_mouse(id) {
            return id;
        }
    }
}
