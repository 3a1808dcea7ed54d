use std::collections::VecDeque;

use chrono::Local;

use crate::colors::ColorMap;
use crate::dataset::{Dataset, TeamRecord};
use crate::error::ConfigurationError;
use crate::filter::{FilteredView, filter_dataset};
use crate::selection::Selection;
use crate::views::{DashboardViews, derive_views};

pub const APP_TITLE: &str = "IPL Teams Interactive Dashboard";
pub const APP_INTRO: &str = "This dashboard provides an interactive and visually appealing \
    overview of all IPL teams and their key statistics.";
pub const SIDEBAR_TITLE: &str = "Team Selection";
pub const SIDEBAR_PROMPT: &str = "Select IPL Teams to View Stats:";

const MAX_LOGS: usize = 200;

pub struct AppState {
    dataset: Dataset,
    colors: ColorMap,
    selection: Selection,
    filtered: FilteredView,
    views: Result<DashboardViews, ConfigurationError>,
    /// Sidebar cursor, an index into the dataset.
    pub cursor: usize,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    /// Starts with every team selected.
    pub fn new(dataset: Dataset, colors: ColorMap) -> Self {
        let selection = Selection::all(&dataset);
        let filtered = filter_dataset(&dataset, &selection);
        let views = derive_views(&filtered, &colors);
        let mut state = Self {
            dataset,
            colors,
            selection,
            filtered,
            views,
            cursor: 0,
            help_overlay: false,
            logs: VecDeque::new(),
        };
        state.push_log(format!("[INFO] Loaded {} teams", state.dataset.len()));
        for warning in state.dataset.consistency_warnings() {
            state.push_log(format!("[WARN] {warning}"));
        }
        if let Err(err) = &state.views {
            let msg = format!("[ERROR] {err}");
            state.push_log(msg);
        }
        state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filtered(&self) -> &FilteredView {
        &self.filtered
    }

    pub fn views(&self) -> Result<&DashboardViews, &ConfigurationError> {
        self.views.as_ref()
    }

    pub fn cursor_team(&self) -> Option<&TeamRecord> {
        self.dataset.records().get(self.cursor)
    }

    pub fn cursor_next(&mut self) {
        let total = self.dataset.len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % total;
    }

    pub fn cursor_prev(&mut self) {
        let total = self.dataset.len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if self.cursor == 0 {
            total - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn toggle_cursor(&mut self) {
        let Some(name) = self.cursor_team().map(|r| r.name.clone()) else {
            return;
        };
        let selected = self.selection.toggle(&name);
        let verb = if selected { "Added" } else { "Removed" };
        self.push_log(format!("[INFO] {verb} {name}"));
        self.refresh();
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::all(&self.dataset);
        self.push_log("[INFO] Selected all teams");
        self.refresh();
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::none();
        self.push_log("[INFO] Cleared team selection");
        self.refresh();
    }

    /// Replaces the selection wholesale, as a multiselect control emits it.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.refresh();
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn refresh(&mut self) {
        self.filtered = filter_dataset(&self.dataset, &self.selection);
        self.views = derive_views(&self.filtered, &self.colors);
        if let Err(err) = &self.views {
            let msg = format!("[ERROR] {err}");
            self.push_log(msg);
        }
    }
}
