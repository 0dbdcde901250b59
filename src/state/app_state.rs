//! Application state definitions

use chrono::NaiveDate;

use super::calendar_state::CalendarState;
use super::record_tabs::RecordTabsState;

/// Current screen in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    Home,
    #[default]
    Calendar,
    Library,
    MyPage,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Home, Screen::Calendar, Screen::Library, Screen::MyPage];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Calendar => "CALENDAR",
            Self::Library => "LIBRARY",
            Self::MyPage => "MY PAGE",
        }
    }

    /// Screen bound to a number key, 1-based
    pub fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            1 => Some(Self::Home),
            2 => Some(Self::Calendar),
            3 => Some(Self::Library),
            4 => Some(Self::MyPage),
            _ => None,
        }
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_screen: Screen,

    // Calendar
    pub calendar: CalendarState,

    // Daily records
    pub records: RecordTabsState,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_screen: Screen::default(),
            calendar: CalendarState::new(today),
            records: RecordTabsState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screens_bind_to_number_keys() {
        assert_eq!(Screen::from_digit(1), Some(Screen::Home));
        assert_eq!(Screen::from_digit(2), Some(Screen::Calendar));
        assert_eq!(Screen::from_digit(4), Some(Screen::MyPage));
        assert_eq!(Screen::from_digit(5), None);
        assert_eq!(Screen::from_digit(0), None);
    }

    #[test]
    fn test_labels_match_tab_bar_order() {
        let labels: Vec<&str> = Screen::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["HOME", "CALENDAR", "LIBRARY", "MY PAGE"]);
    }
}
