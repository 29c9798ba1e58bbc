use crate::records::{OddsBoard, OddsRecord};

/// Which widget receives plain keystrokes on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
}

/// Runtime UI state shared by the router, the bootstrapper, and the
/// dashboard screen. Handlers receive this explicitly; there is no
/// module-level mutable state anywhere in the crate.
pub struct AppState {
    board: OddsBoard,
    search: String,
    selected_league: String,
    auto_refresh: bool,
    focus: Focus,
    filter_generation: u64,
}

impl AppState {
    pub fn new(records: Vec<OddsRecord>, auto_refresh: bool) -> Self {
        Self {
            board: OddsBoard::new(records),
            search: String::new(),
            selected_league: "all".to_string(),
            auto_refresh,
            focus: Focus::Table,
            filter_generation: 0,
        }
    }

    pub fn board(&self) -> &OddsBoard {
        &self.board
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected_league(&self) -> &str {
        &self.selected_league
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
    }

    pub fn toggle_auto_refresh(&mut self) -> bool {
        self.auto_refresh = !self.auto_refresh;
        self.auto_refresh
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Bumped on every filter run; the dashboard uses it to notice when the
    /// visible rows changed underneath its cursor.
    pub fn filter_generation(&self) -> u64 {
        self.filter_generation
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.refilter();
    }

    pub fn pop_search_char(&mut self) {
        if self.search.pop().is_some() {
            self.refilter();
        }
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.refilter();
    }

    pub fn select_league(&mut self, league: impl Into<String>) {
        self.selected_league = league.into();
        self.refilter();
    }

    pub fn replace_records(&mut self, records: Vec<OddsRecord>) {
        self.board.replace(records);
        self.refilter();
    }

    pub fn refilter(&mut self) {
        self.board.apply_filter(&self.search, &self.selected_league);
        self.filter_generation += 1;
    }
}
