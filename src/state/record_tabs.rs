//! Daily record tab selection

use serde::{Deserialize, Serialize};

/// Record category shown under the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordTab {
    #[default]
    Diet,
    Exercise,
    Body,
}

impl RecordTab {
    pub const ALL: [RecordTab; 3] = [RecordTab::Diet, RecordTab::Exercise, RecordTab::Body];

    pub fn label(self) -> &'static str {
        match self {
            RecordTab::Diet => "Diet",
            RecordTab::Exercise => "Exercise",
            RecordTab::Body => "Body",
        }
    }

    pub fn next(self) -> Self {
        match self {
            RecordTab::Diet => RecordTab::Exercise,
            RecordTab::Exercise => RecordTab::Body,
            RecordTab::Body => RecordTab::Diet,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordTabsState {
    pub selected: RecordTab,
}

impl RecordTabsState {
    pub fn new(selected: RecordTab) -> Self {
        Self { selected }
    }

    pub fn select(&mut self, tab: RecordTab) {
        self.selected = tab;
    }

    pub fn next_tab(&mut self) {
        self.selected = self.selected.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all_tabs() {
        let mut state = RecordTabsState::default();
        assert_eq!(state.selected, RecordTab::Diet);
        state.next_tab();
        assert_eq!(state.selected, RecordTab::Exercise);
        state.next_tab();
        assert_eq!(state.selected, RecordTab::Body);
        state.next_tab();
        assert_eq!(state.selected, RecordTab::Diet);
    }

    #[test]
    fn test_select_jumps_directly() {
        let mut state = RecordTabsState::default();
        state.select(RecordTab::Body);
        assert_eq!(state.selected, RecordTab::Body);
    }

    #[test]
    fn test_labels_match_tab_order() {
        let labels: Vec<&str> = RecordTab::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Diet", "Exercise", "Body"]);
    }
}
