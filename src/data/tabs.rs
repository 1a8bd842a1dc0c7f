//! Tab store: one chart session per opened file plus the active-tab pointer.
//!
//! Every update addressed by [`TabId`] is a silent no-op when the tab no
//! longer exists; a file load may complete after the user closed its tab.

use std::fmt;

use crate::data::interaction::{self, ViewEvent, ZoomSettings};
use crate::data::series::Series;
use crate::data::view::{ViewState, ViewStatePatch};

/// Tab identifier: the source file path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub String);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TabId {
    fn from(s: &str) -> Self {
        TabId(s.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub display_name: String,
    pub x_column_name: String,
    pub series: Vec<Series>,
    pub view_state: ViewState,
}

impl Tab {
    pub fn new(path: &str, series: Vec<Series>, x_column_name: impl Into<String>) -> Self {
        let view_state = ViewState::for_series(&series);
        Self {
            id: TabId(path.to_string()),
            display_name: display_name_for(path),
            x_column_name: x_column_name.into(),
            series,
            view_state,
        }
    }
}

/// Final path segment after the last `/` or `\`, or `"Untitled"` when empty.
pub fn display_name_for(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or_default();
    if name.is_empty() {
        "Untitled".to_string()
    } else {
        name.to_string()
    }
}

/// Ordered collection of tabs.
#[derive(Clone, Debug, Default)]
pub struct TabStore {
    tabs: Vec<Tab>,
    active: Option<TabId>,
}

impl TabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tab for `path` and make it active.
    ///
    /// Re-opening a path that already has a tab replaces that tab's data and
    /// view state in place, keeping ids unique.
    pub fn open_tab(&mut self, path: &str, series: Vec<Series>, x_column_name: &str) -> TabId {
        let tab = Tab::new(path, series, x_column_name);
        let id = tab.id.clone();
        match self.tabs.iter_mut().find(|t| t.id == id) {
            Some(existing) => {
                tracing::debug!(tab = %id, "reloading already open tab");
                *existing = tab;
            }
            None => {
                tracing::debug!(tab = %id, series = tab.series.len(), "opening tab");
                self.tabs.push(tab);
            }
        }
        self.active = Some(id.clone());
        id
    }

    /// Remove a tab. When it was active, the preceding tab (or the first
    /// remaining one) becomes active.
    pub fn close_tab(&mut self, id: &TabId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.tabs.remove(index);
        tracing::debug!(tab = %id, "closed tab");
        if self.active.as_ref() == Some(id) {
            self.active = self
                .tabs
                .get(index.saturating_sub(1))
                .or_else(|| self.tabs.first())
                .map(|t| t.id.clone());
        }
    }

    pub fn set_active(&mut self, id: &TabId) {
        if self.index_of(id).is_some() {
            self.active = Some(id.clone());
        }
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&TabId> {
        self.active.as_ref()
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Merge `patch` into the tab's view state. Returns `false` for an unknown id.
    pub fn update_view_state(&mut self, id: &TabId, patch: &ViewStatePatch) -> bool {
        match self.get_mut(id) {
            Some(tab) => {
                tab.view_state = tab.view_state.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Replace the tab's view state wholesale. Returns `false` for an unknown id.
    pub fn replace_view_state(&mut self, id: &TabId, view_state: ViewState) -> bool {
        match self.get_mut(id) {
            Some(tab) => {
                tab.view_state = view_state;
                true
            }
            None => false,
        }
    }

    /// Fold an interaction event into the tab's view state.
    pub fn dispatch(&mut self, id: &TabId, event: &ViewEvent) -> bool {
        self.dispatch_with(id, event, &ZoomSettings::default())
    }

    pub fn dispatch_with(&mut self, id: &TabId, event: &ViewEvent, zoom: &ZoomSettings) -> bool {
        let Some(tab) = self.get(id) else {
            return false;
        };
        let next = interaction::reduce_with(&tab.view_state, &tab.series, event, zoom);
        self.replace_view_state(id, next)
    }

    fn get_mut(&mut self, id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| &t.id == id)
    }

    fn index_of(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == id)
    }
}
