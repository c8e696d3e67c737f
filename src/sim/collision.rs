//! Catch detection
//!
//! A catch is plain planar proximity between the cat and a mouse. Height
//! never matters, so a hovering mouse is caught the same as a grounded one.

use glam::Vec3;

use super::state::{Mouse, MouseId};
use crate::consts::CATCH_RADIUS;
use crate::planar_distance;

/// A mouse caught this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catch {
    pub id: MouseId,
    /// Where the mouse was when caught (for visual effects)
    pub pos: Vec3,
}

/// Whether a mouse at `mouse_pos` is within reach of a cat at `cat_pos`
#[inline]
pub fn within_reach(cat_pos: Vec3, mouse_pos: Vec3) -> bool {
    planar_distance(cat_pos, mouse_pos) < CATCH_RADIUS
}

/// Flag every uncaught mouse within reach as caught and report each one.
///
/// Every match in the same tick counts; there is no one-catch limit.
pub fn detect_catches(cat_pos: Vec3, mice: &mut [Mouse]) -> Vec<Catch> {
    let mut catches = Vec::new();
    for mouse in mice.iter_mut().filter(|m| !m.caught) {
        if within_reach(cat_pos, mouse.pos) {
            mouse.caught = true;
            catches.push(Catch {
                id: mouse.id,
                pos: mouse.pos,
            });
        }
    }
    catches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse_at(id: u64, x: f32, z: f32) -> Mouse {
        Mouse::new(MouseId(id), Vec3::new(x, 0.2, z), Vec3::ZERO, 5000.0)
    }

    #[test]
    fn test_catch_threshold_is_strict() {
        let cat = Vec3::new(0.0, 0.8, 0.0);
        let mut mice = [mouse_at(1, 1.2, 0.0), mouse_at(2, 1.19, 0.0)];
        let catches = detect_catches(cat, &mut mice);
        assert_eq!(catches.len(), 1);
        assert_eq!(catches[0].id, MouseId(2));
        assert!(!mice[0].caught);
        assert!(mice[1].caught);
    }

    #[test]
    fn test_height_is_ignored() {
        let cat = Vec3::new(0.0, 0.8, 0.0);
        let mut mice = [Mouse::new(
            MouseId(1),
            Vec3::new(0.5, 50.0, 0.5),
            Vec3::ZERO,
            5000.0,
        )];
        assert_eq!(detect_catches(cat, &mut mice).len(), 1);
    }

    #[test]
    fn test_multiple_catches_same_tick() {
        let cat = Vec3::new(2.0, 0.8, 2.0);
        let mut mice = [
            mouse_at(1, 2.5, 2.0),
            mouse_at(2, 7.0, 7.0),
            mouse_at(3, 2.0, 1.5),
        ];
        let catches = detect_catches(cat, &mut mice);
        let ids: Vec<_> = catches.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![MouseId(1), MouseId(3)]);
        assert_eq!(catches[1].pos, Vec3::new(2.0, 0.2, 1.5));
    }

    #[test]
    fn test_already_caught_not_reported_twice() {
        let cat = Vec3::ZERO;
        let mut mice = [mouse_at(1, 0.1, 0.1)];
        assert_eq!(detect_catches(cat, &mut mice).len(), 1);
        assert!(detect_catches(cat, &mut mice).is_empty());
    }
}
