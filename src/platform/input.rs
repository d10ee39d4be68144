//! Keyboard input mapping

use crate::sim::Direction;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }

    /// Steering direction for arrow keys
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Enter | Key::Escape => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_key_name("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_key_name(" "), None);
        assert_eq!(Key::from_key_name("arrowleft"), None);
    }

    #[test]
    fn test_only_arrows_steer() {
        assert_eq!(Key::Down.direction(), Some(Direction::Down));
        assert_eq!(Key::Enter.direction(), None);
        assert_eq!(Key::Escape.direction(), None);
    }
}
