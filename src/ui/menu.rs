//! Main menu and mode selector

use crate::platform::Key;
use crate::sim::GameMode;

/// Which list the menu is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuScreen {
    #[default]
    Main,
    ModeSelect,
}

/// Entries on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainOption {
    PlayGame,
    HighScores,
    Quit,
}

impl MainOption {
    pub const ALL: [MainOption; 3] = [MainOption::PlayGame, MainOption::HighScores, MainOption::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MainOption::PlayGame => "Play Game",
            MainOption::HighScores => "High Scores",
            MainOption::Quit => "Quit",
        }
    }
}

/// What a confirmed menu choice asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    HighScores,
    Quit,
    Mode(GameMode),
}

#[derive(Debug, Clone, Default)]
pub struct Menu {
    pub screen: MenuScreen,
    pub selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries on the current screen
    pub fn option_count(&self) -> usize {
        match self.screen {
            MenuScreen::Main => MainOption::ALL.len(),
            MenuScreen::ModeSelect => GameMode::ALL.len(),
        }
    }

    /// Labels on the current screen, in display order
    pub fn labels(&self) -> Vec<&'static str> {
        match self.screen {
            MenuScreen::Main => MainOption::ALL.iter().map(|o| o.label()).collect(),
            MenuScreen::ModeSelect => GameMode::ALL.iter().map(|m| m.name()).collect(),
        }
    }

    /// Description of the highlighted mode (mode selector only)
    pub fn selected_description(&self) -> Option<&'static str> {
        match self.screen {
            MenuScreen::Main => None,
            MenuScreen::ModeSelect => GameMode::ALL.get(self.selected).map(|m| m.description()),
        }
    }

    pub fn handle_input(&mut self, key: Key) -> Option<MenuSelection> {
        let count = self.option_count();
        match key {
            Key::Up => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            Key::Down => {
                self.selected = (self.selected + 1) % count;
                None
            }
            Key::Enter => self.confirm(),
            Key::Escape => {
                if self.screen == MenuScreen::ModeSelect {
                    self.screen = MenuScreen::Main;
                    self.selected = 0;
                }
                None
            }
            Key::Left | Key::Right => None,
        }
    }

    fn confirm(&mut self) -> Option<MenuSelection> {
        match self.screen {
            MenuScreen::Main => match MainOption::ALL.get(self.selected)? {
                MainOption::PlayGame => {
                    self.screen = MenuScreen::ModeSelect;
                    self.selected = 0;
                    None
                }
                MainOption::HighScores => Some(MenuSelection::HighScores),
                MainOption::Quit => Some(MenuSelection::Quit),
            },
            MenuScreen::ModeSelect => GameMode::ALL
                .get(self.selected)
                .map(|&mode| MenuSelection::Mode(mode)),
        }
    }

    /// Back to the main screen, first entry
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_down_three_up_one() {
        let mut menu = Menu::new();
        for _ in 0..3 {
            menu.handle_input(Key::Down);
        }
        menu.handle_input(Key::Up);
        assert_eq!(menu.selected, 2);
    }

    #[test]
    fn test_play_game_opens_mode_select() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle_input(Key::Enter), None);
        assert_eq!(menu.screen, MenuScreen::ModeSelect);
        assert_eq!(menu.selected, 0);
        assert_eq!(menu.labels()[0], "Prison Yard");
        assert_eq!(
            menu.selected_description(),
            Some("Classic mode with walls - Don't crash!")
        );

        menu.handle_input(Key::Up);
        assert_eq!(
            menu.handle_input(Key::Enter),
            Some(MenuSelection::Mode(GameMode::MongooseInfested))
        );
    }

    #[test]
    fn test_main_options_emit() {
        let mut menu = Menu::new();
        menu.handle_input(Key::Down);
        assert_eq!(menu.handle_input(Key::Enter), Some(MenuSelection::HighScores));
        menu.handle_input(Key::Down);
        assert_eq!(menu.handle_input(Key::Enter), Some(MenuSelection::Quit));
        assert_eq!(menu.screen, MenuScreen::Main);
    }

    #[test]
    fn test_escape_returns_to_main() {
        let mut menu = Menu::new();
        menu.handle_input(Key::Enter);
        menu.handle_input(Key::Down);
        menu.handle_input(Key::Down);
        assert_eq!(menu.handle_input(Key::Escape), None);
        assert_eq!(menu.screen, MenuScreen::Main);
        assert_eq!(menu.selected, 0);

        // Escape on main is a no-op
        menu.handle_input(Key::Down);
        menu.handle_input(Key::Escape);
        assert_eq!(menu.selected, 1);
    }

    #[test]
    fn test_side_keys_ignored() {
        let mut menu = Menu::new();
        menu.handle_input(Key::Down);
        assert_eq!(menu.handle_input(Key::Left), None);
        assert_eq!(menu.handle_input(Key::Right), None);
        assert_eq!(menu.selected, 1);
    }

    proptest! {
        #[test]
        fn prop_navigation_is_cyclic(downs in 0usize..50, ups in 0usize..50, mode_select in any::<bool>()) {
            let mut menu = Menu::new();
            if mode_select {
                menu.handle_input(Key::Enter);
            }
            let n = menu.option_count();
            for _ in 0..downs {
                menu.handle_input(Key::Down);
            }
            for _ in 0..ups {
                menu.handle_input(Key::Up);
            }
            prop_assert_eq!(menu.selected, (downs + n * 50 - ups) % n);
        }
    }
}
