//! Held movement keys
//!
//! Level-triggered only: a key counts every tick it is down. Key events
//! mutate the set between ticks; the tick samples it once at its start.

use std::collections::HashSet;

/// Logical movement key, independent of the physical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [MoveKey::Up, MoveKey::Down, MoveKey::Left, MoveKey::Right];

    /// Map a DOM-style key code (WASD or arrows) to a movement key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(MoveKey::Up),
            "KeyS" | "ArrowDown" => Some(MoveKey::Down),
            "KeyA" | "ArrowLeft" => Some(MoveKey::Left),
            "KeyD" | "ArrowRight" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<MoveKey>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not already held
    pub fn key_down(&mut self, key: MoveKey) -> bool {
        self.held.insert(key)
    }

    /// Returns true if the key was held
    pub fn key_up(&mut self, key: MoveKey) -> bool {
        self.held.remove(&key)
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(MoveKey::from_code("KeyW"), Some(MoveKey::Up));
        assert_eq!(MoveKey::from_code("ArrowUp"), Some(MoveKey::Up));
        assert_eq!(MoveKey::from_code("KeyS"), Some(MoveKey::Down));
        assert_eq!(MoveKey::from_code("ArrowLeft"), Some(MoveKey::Left));
        assert_eq!(MoveKey::from_code("KeyD"), Some(MoveKey::Right));
        assert_eq!(MoveKey::from_code("Space"), None);
    }

    #[test]
    fn test_held_set() {
        let mut input = InputState::new();
        assert!(!input.any_held());
        assert!(input.key_down(MoveKey::Left));
        assert!(!input.key_down(MoveKey::Left));
        assert!(input.is_held(MoveKey::Left));
        assert!(input.key_up(MoveKey::Left));
        assert!(!input.key_up(MoveKey::Left));
        assert!(!input.is_held(MoveKey::Left));
    }
}
