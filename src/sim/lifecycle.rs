//! Mouse lifetimes, difficulty ratchet and the game-over transition

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Count down lifetimes and drop finished mice.
///
/// Caught mice leave without penalty even if their time also ran out this
/// tick. Uncaught mice whose time is up cost a life each.
pub fn reap(state: &mut GameState, dt_ms: f32) {
    let mut lost = Vec::new();
    state.mice.retain_mut(|mouse| {
        mouse.time_to_live_ms -= dt_ms;
        if mouse.caught {
            return false;
        }
        if mouse.time_to_live_ms <= 0.0 {
            lost.push(mouse.id);
            return false;
        }
        true
    });

    for id in lost {
        state.lives = state.lives.saturating_sub(1);
        log::debug!("Mouse {} escaped, {} lives left", id, state.lives);
        state.events.push(GameEvent::LifeLost { id });
    }
}

/// Level for a given score: one level per `level_up_score` points, from 1
#[inline]
pub fn level_for_score(score: u32, level_up_score: u32) -> u32 {
    score / level_up_score.max(1) + 1
}

/// Raise the level from the score and tighten the tunables once per level
/// gained. Levels never go down within a run.
pub fn escalate(state: &mut GameState) {
    let new_level = level_for_score(state.score, state.config.level_up_score);
    while state.level < new_level {
        state.level += 1;
        let config = &mut state.config;
        config.mouse_spawn_rate_ms =
            (config.mouse_spawn_rate_ms - SPAWN_RATE_STEP_MS).max(MIN_SPAWN_RATE_MS);
        config.mouse_speed = (config.mouse_speed + MOUSE_SPEED_STEP).min(MAX_MOUSE_SPEED);
        config.max_mice_on_screen = (config.max_mice_on_screen + 1).min(MAX_MICE_CAP);

        log::info!(
            "Level {}: spawn every {}ms, speed {:.1}, up to {} mice",
            state.level,
            config.mouse_spawn_rate_ms,
            config.mouse_speed,
            config.max_mice_on_screen
        );
        state.events.push(GameEvent::LevelUp { level: state.level });
    }
}

/// End the run once lives are gone. Returns true on the transition.
pub fn check_game_over(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.lives > 0 {
        return false;
    }
    state.phase = GamePhase::GameOver;
    log::info!("Game over with score {} at level {}", state.score, state.level);
    state.events.push(GameEvent::GameOver { score: state.score });
    true
}
