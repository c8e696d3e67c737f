//! Motion and containment
//!
//! Mice integrate their velocity and bounce off the square bound; the cat
//! steps by a fixed amount per held key and is clamped to a looser square.

use super::input::{InputState, MoveKey};
use super::state::{Cat, Mouse};
use crate::consts::*;

/// Advance every uncaught mouse by `dt_ms` of simulated time.
///
/// Reflection is a hard flip: the offending velocity component is negated
/// and the coordinate pinned to the bound. Each axis is handled on its own.
pub fn advance(mice: &mut [Mouse], dt_ms: f32) {
    let dt = dt_ms * 0.001;
    for mouse in mice.iter_mut().filter(|m| !m.caught) {
        mouse.pos.x += mouse.vel.x * dt;
        mouse.pos.z += mouse.vel.z * dt;

        if mouse.pos.x.abs() > MOUSE_BOUND {
            mouse.vel.x = -mouse.vel.x;
            mouse.pos.x = MOUSE_BOUND.copysign(mouse.pos.x);
        }
        if mouse.pos.z.abs() > MOUSE_BOUND {
            mouse.vel.z = -mouse.vel.z;
            mouse.pos.z = MOUSE_BOUND.copysign(mouse.pos.z);
        }
    }
}

/// Step the cat once according to the held keys, then clamp it.
///
/// Diagonals are deliberately not normalized.
pub fn move_cat(cat: &mut Cat, input: &InputState) {
    if input.is_held(MoveKey::Up) {
        cat.pos.z -= CAT_STEP;
    }
    if input.is_held(MoveKey::Down) {
        cat.pos.z += CAT_STEP;
    }
    if input.is_held(MoveKey::Left) {
        cat.pos.x -= CAT_STEP;
        cat.facing = std::f32::consts::FRAC_PI_2;
    }
    if input.is_held(MoveKey::Right) {
        cat.pos.x += CAT_STEP;
        cat.facing = -std::f32::consts::FRAC_PI_2;
    }

    cat.pos.x = cat.pos.x.clamp(-CAT_BOUND, CAT_BOUND);
    cat.pos.z = cat.pos.z.clamp(-CAT_BOUND, CAT_BOUND);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::MouseId;
    use glam::Vec3;
    use proptest::prelude::*;

    fn mouse(pos: Vec3, vel: Vec3) -> Mouse {
        Mouse::new(MouseId(1), pos, vel, 5000.0)
    }

    #[test]
    fn test_integrates_per_second_velocity() {
        let mut mice = [mouse(Vec3::new(0.0, 0.2, 0.0), Vec3::new(2.0, 0.0, -1.0))];
        advance(&mut mice, 500.0);
        assert!((mice[0].pos.x - 1.0).abs() < 1e-6);
        assert!((mice[0].pos.z + 0.5).abs() < 1e-6);
        assert_eq!(mice[0].pos.y, 0.2);
    }

    #[test]
    fn test_reflects_off_bound() {
        let mut mice = [mouse(Vec3::new(8.0, 0.2, 0.0), Vec3::new(3.0, 0.0, 0.0))];
        advance(&mut mice, 1000.0);
        assert_eq!(mice[0].pos.x, 8.0);
        assert_eq!(mice[0].vel.x, -3.0);
    }

    #[test]
    fn test_reflects_both_axes_in_corner() {
        let mut mice = [mouse(Vec3::new(-7.9, 0.2, 7.9), Vec3::new(-1.0, 0.0, 1.0))];
        advance(&mut mice, 1000.0);
        assert_eq!(mice[0].pos.x, -8.0);
        assert_eq!(mice[0].pos.z, 8.0);
        assert_eq!(mice[0].vel.x, 1.0);
        assert_eq!(mice[0].vel.z, -1.0);
    }

    #[test]
    fn test_caught_mice_do_not_move() {
        let mut m = mouse(Vec3::new(1.0, 0.2, 1.0), Vec3::new(1.0, 0.0, 1.0));
        m.caught = true;
        let mut mice = [m];
        advance(&mut mice, 16.0);
        assert_eq!(mice[0].pos, Vec3::new(1.0, 0.2, 1.0));
    }

    #[test]
    fn test_cat_moves_and_faces() {
        let mut cat = Cat::default();
        let mut input = InputState::new();
        input.key_down(MoveKey::Left);
        move_cat(&mut cat, &input);
        assert!((cat.pos.x + CAT_STEP).abs() < 1e-6);
        assert_eq!(cat.facing, std::f32::consts::FRAC_PI_2);

        input.key_up(MoveKey::Left);
        input.key_down(MoveKey::Right);
        input.key_down(MoveKey::Up);
        move_cat(&mut cat, &input);
        assert!(cat.pos.x.abs() < 1e-6);
        assert!((cat.pos.z + CAT_STEP).abs() < 1e-6);
        assert_eq!(cat.facing, -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut cat = Cat::default();
        let mut input = InputState::new();
        input.key_down(MoveKey::Down);
        input.key_down(MoveKey::Right);
        move_cat(&mut cat, &input);
        assert!((cat.pos.x - CAT_STEP).abs() < 1e-6);
        assert!((cat.pos.z - CAT_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_cat_clamped() {
        let mut cat = Cat::default();
        cat.pos.x = 8.95;
        cat.pos.z = -8.95;
        let mut input = InputState::new();
        input.key_down(MoveKey::Right);
        input.key_down(MoveKey::Up);
        move_cat(&mut cat, &input);
        assert_eq!(cat.pos.x, CAT_BOUND);
        assert_eq!(cat.pos.z, -CAT_BOUND);
    }

    proptest! {
        #[test]
        fn prop_mice_stay_in_bounds(
            x in -8.0f32..=8.0,
            z in -8.0f32..=8.0,
            vx in -4.0f32..4.0,
            vz in -4.0f32..4.0,
            dt in 0.0f32..2000.0,
        ) {
            let mut mice = [mouse(Vec3::new(x, 0.2, z), Vec3::new(vx, 0.0, vz))];
            let pre_x = x + vx * (dt * 0.001);
            advance(&mut mice, dt);
            prop_assert!(mice[0].pos.x.abs() <= MOUSE_BOUND);
            prop_assert!(mice[0].pos.z.abs() <= MOUSE_BOUND);
            if pre_x.abs() > MOUSE_BOUND {
                prop_assert_eq!(mice[0].pos.x.abs(), MOUSE_BOUND);
                prop_assert_eq!(mice[0].vel.x, -vx);
            }
        }
    }
}
