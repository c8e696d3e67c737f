//! Idle/demo mode - the computer plays the cat
//!
//! Produces the movement keys a player would hold this tick. Used by the
//! headless binary and by soak tests; gameplay never depends on it.

use glam::Vec2;

use super::input::MoveKey;
use super::state::{Cat, Mouse};
use crate::ground;

/// How far ahead (seconds) to lead a moving mouse
const LEAD_SECS: f32 = 0.3;
/// Don't jitter once this close on an axis
const DEAD_ZONE: f32 = 0.1;

/// Pick the mouse to chase: the one that will escape first, breaking ties
/// toward the nearest.
pub fn pick_target<'a>(cat: &Cat, mice: &'a [Mouse]) -> Option<&'a Mouse> {
    let cat_pos = ground(cat.pos);
    mice.iter().filter(|m| !m.caught).min_by(|a, b| {
        let urgency_a = a.time_to_live_ms + ground(a.pos).distance(cat_pos) * 250.0;
        let urgency_b = b.time_to_live_ms + ground(b.pos).distance(cat_pos) * 250.0;
        urgency_a
            .partial_cmp(&urgency_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Keys to hold this tick to close in on the chosen mouse
pub fn desired_keys(cat: &Cat, mice: &[Mouse]) -> Vec<MoveKey> {
    let Some(target) = pick_target(cat, mice) else {
        return Vec::new();
    };

    let aim = ground(target.pos) + Vec2::new(target.vel.x, target.vel.z) * LEAD_SECS;
    let delta = aim - ground(cat.pos);

    let mut keys = Vec::with_capacity(2);
    if delta.x > DEAD_ZONE {
        keys.push(MoveKey::Right);
    } else if delta.x < -DEAD_ZONE {
        keys.push(MoveKey::Left);
    }
    if delta.y > DEAD_ZONE {
        keys.push(MoveKey::Down);
    } else if delta.y < -DEAD_ZONE {
        keys.push(MoveKey::Up);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::MouseId;
    use glam::Vec3;

    fn mouse(id: u64, x: f32, z: f32, ttl: f32) -> Mouse {
        Mouse::new(MouseId(id), Vec3::new(x, 0.2, z), Vec3::ZERO, ttl)
    }

    #[test]
    fn test_no_mice_no_keys() {
        assert!(desired_keys(&Cat::default(), &[]).is_empty());
    }

    #[test]
    fn test_heads_toward_target() {
        let mice = [mouse(1, 5.0, -5.0, 3000.0)];
        let keys = desired_keys(&Cat::default(), &mice);
        assert_eq!(keys, vec![MoveKey::Right, MoveKey::Up]);
    }

    #[test]
    fn test_prefers_mouse_about_to_escape() {
        let mice = [mouse(1, 1.0, 1.0, 4000.0), mouse(2, -6.0, 0.0, 200.0)];
        let target = pick_target(&Cat::default(), &mice).unwrap();
        assert_eq!(target.id, MouseId(2));
    }
}
