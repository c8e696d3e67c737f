//! Fixed timestep simulation tick
//!
//! Advances the game by one 16ms step. Wall-clock time is only used for
//! the spawn gate; all motion uses the fixed step.

use super::collision::detect_catches;
use super::input::InputState;
use super::lifecycle::{check_game_over, escalate, reap};
use super::motion::{advance, move_cat};
use super::spawn::try_spawn;
use super::state::{GameEvent, GameState};
use crate::consts::TICK_MS;

/// Advance the game state by one fixed timestep.
///
/// Order matters: catches use post-move positions, and the game-over check
/// sees lives lost during this same tick. Does nothing unless playing.
pub fn tick(state: &mut GameState, input: &InputState, now_ms: f64) {
    if !state.is_playing() {
        return;
    }

    state.time_ticks += 1;

    move_cat(&mut state.cat, input);
    advance(&mut state.mice, TICK_MS);

    for catch in detect_catches(state.cat.pos, &mut state.mice) {
        state.score += 1;
        log::debug!("Caught mouse {} (score {})", catch.id, state.score);
        state.events.push(GameEvent::MouseCaught {
            id: catch.id,
            pos: catch.pos,
        });
    }

    reap(state, TICK_MS);
    escalate(state);

    if now_ms - state.last_spawn_ms > state.config.mouse_spawn_rate_ms {
        if let Some(mouse) = try_spawn(state) {
            log::debug!("Spawned mouse {} at {:?}", mouse.id, mouse.pos);
            state.events.push(GameEvent::MouseSpawned { id: mouse.id });
        }
        state.last_spawn_ms = now_ms;
    }

    check_game_over(state);
}
