//! The viewer application.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`viewer_app`]  | Per-frame UI: menu bar, tabs, toolbar, chart, screenshot export |
//! | [`notices`]     | Transient messages |
//! | [`run`]         | [`run_viewer()`] entry point |
//!
//! [`ViewerApp`] itself holds no egui state and can be driven without a
//! window: open files, apply actions, inspect the tab store.

mod notices;
mod run;
mod viewer_app;

pub use notices::{Notice, Notices};
pub use run::run_viewer;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ViewerConfig;
use crate::controllers::{MenuController, MenuSubscription};
use crate::data::hotkeys::HotkeyName;
use crate::data::interaction::{toolbar_zoom_events, ViewEvent, ZoomDirection};
use crate::data::tabs::{TabId, TabStore};
use crate::data::view::{AxisId, AxisRange, DragMode};
use crate::host::{FileLoader, HostShell, LoadOutcome};
use crate::panels::ChartAction;

/// Text of the notice shown when a file cannot be turned into a chart.
pub const READ_ERROR_NOTICE: &str = "Error reading file content.";

pub struct ViewerApp {
    pub(crate) config: ViewerConfig,
    store: TabStore,
    loader: FileLoader,
    menu: MenuController,
    open_requests: MenuSubscription,
    notices: Notices,
    /// Axes and ranges of the active tab's first panel as last drawn.
    focus_ranges: Vec<(AxisId, AxisRange)>,
    box_zoom_held: bool,
    /// Tab that received the momentary box-zoom press; its release goes there too.
    box_zoom_tab: Option<TabId>,
    /// Target of "Save Settings"; the default config path when `None`.
    settings_path: Option<PathBuf>,
    screenshot_requested: bool,
    chart_rect: Option<eframe::egui::Rect>,
    scheme_applied: bool,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig, host: Arc<dyn HostShell>) -> Self {
        let menu = MenuController::new();
        let open_requests = menu.subscribe_open_csv();
        let notices = Notices::new(Duration::from_secs_f32(config.notice_secs.max(0.5)));
        Self {
            config,
            store: TabStore::new(),
            loader: FileLoader::new(host),
            menu,
            open_requests,
            notices,
            focus_ranges: Vec::new(),
            box_zoom_held: false,
            box_zoom_tab: None,
            settings_path: None,
            screenshot_requested: false,
            chart_rect: None,
            scheme_applied: false,
        }
    }

    pub fn store(&self) -> &TabStore {
        &self.store
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn set_settings_path(&mut self, path: PathBuf) {
        self.settings_path = Some(path);
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Handle to fire the "Open CSV" action from outside the UI.
    pub fn menu_controller(&self) -> MenuController {
        self.menu.clone()
    }

    pub fn set_load_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.loader.set_waker(waker);
    }

    /// Start loading `path`; the tab appears once the load finishes.
    pub fn open_path(&self, path: PathBuf) {
        self.loader.spawn_load(path);
    }

    /// Show the file dialog if "Open CSV" was triggered since the last call.
    pub fn handle_open_requests(&mut self) {
        if !self.open_requests.take_pending() {
            return;
        }
        match self.loader.host().open_file_prompt() {
            Some(path) => self.open_path(path),
            None => tracing::debug!("open dialog cancelled"),
        }
    }

    /// Apply every finished load. Returns how many were handled.
    pub fn drain_loads(&mut self) -> usize {
        let outcomes = self.loader.poll();
        let n = outcomes.len();
        for outcome in outcomes {
            self.finish_load(outcome);
        }
        n
    }

    /// Block until one load finishes (or `timeout` passes) and apply it.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        match self.loader.wait(timeout) {
            Some(outcome) => {
                self.finish_load(outcome);
                true
            }
            None => false,
        }
    }

    fn finish_load(&mut self, outcome: LoadOutcome) {
        let path = outcome.path.to_string_lossy().into_owned();
        match outcome.result {
            Ok(ingested) => {
                tracing::info!(path = %path, series = ingested.series.len(), "file loaded");
                self.store
                    .open_tab(&path, ingested.series, &ingested.x_column_name);
                self.focus_ranges.clear();
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "could not open file");
                self.notices.push(READ_ERROR_NOTICE);
            }
        }
    }

    /// Apply one user action to the store.
    pub fn apply_action(&mut self, action: ChartAction) {
        match action {
            ChartAction::View(event) => self.dispatch_active(&event),
            ChartAction::Zoom(direction) => {
                for event in toolbar_zoom_events(direction, &self.focus_ranges) {
                    self.dispatch_active(&event);
                }
            }
            ChartAction::SavePng => {
                if self.store.active().is_some() {
                    self.screenshot_requested = true;
                }
            }
            ChartAction::OpenCsv => {
                self.menu.trigger_open_csv();
            }
            ChartAction::SaveSettings => self.save_settings(),
            ChartAction::ResetHotkeys => {
                self.config.hotkeys.reset_defaults();
                tracing::info!("hotkeys reset to defaults");
            }
            ChartAction::ActivateTab(id) => {
                self.store.set_active(&id);
                self.focus_ranges.clear();
            }
            ChartAction::CloseTab(id) => {
                let was_active = self.store.active_id() == Some(&id);
                self.store.close_tab(&id);
                if was_active {
                    self.focus_ranges.clear();
                }
            }
        }
    }

    fn dispatch_active(&mut self, event: &ViewEvent) {
        if let Some(id) = self.store.active_id().cloned() {
            self.store.dispatch_with(&id, event, &self.config.zoom);
        }
    }

    /// Actions bound to the hotkeys pressed this frame.
    pub fn actions_for_hotkeys(&self, pressed: &[HotkeyName]) -> Vec<ChartAction> {
        let view = self.store.active().map(|t| &t.view_state);
        pressed
            .iter()
            .filter_map(|name| match name {
                HotkeyName::OpenCsv => Some(ChartAction::OpenCsv),
                HotkeyName::CloseTab => self.store.active_id().cloned().map(ChartAction::CloseTab),
                HotkeyName::SavePng => Some(ChartAction::SavePng),
                HotkeyName::Pan => Some(ChartAction::View(ViewEvent::SetDragMode(DragMode::Pan))),
                HotkeyName::BoxZoom => {
                    Some(ChartAction::View(ViewEvent::SetDragMode(DragMode::BoxZoom)))
                }
                HotkeyName::ZoomIn => Some(ChartAction::Zoom(ZoomDirection::In)),
                HotkeyName::ZoomOut => Some(ChartAction::Zoom(ZoomDirection::Out)),
                HotkeyName::ResetZoom => Some(ChartAction::View(ViewEvent::ResetZoom)),
                HotkeyName::ToggleLayout => view.map(|v| {
                    ChartAction::View(ViewEvent::SetLayoutMode(v.layout_mode.toggled()))
                }),
                HotkeyName::FitToScreen => {
                    view.map(|v| ChartAction::View(ViewEvent::SetFitToScreen(!v.fit_to_screen)))
                }
                HotkeyName::AssignSecondary => Some(ChartAction::View(ViewEvent::AssignSecondaryAxis)),
            })
            .collect()
    }

    /// Track the momentary box-zoom key; only transitions reach the reducer.
    /// The release goes to the tab that saw the press, even if another tab
    /// became active in between.
    pub fn set_box_zoom_held(&mut self, held: bool) {
        if held == self.box_zoom_held {
            return;
        }
        self.box_zoom_held = held;
        let target = if held {
            self.box_zoom_tab = self.store.active_id().cloned();
            self.box_zoom_tab.clone()
        } else {
            self.box_zoom_tab.take()
        };
        if let Some(id) = target {
            self.store
                .dispatch_with(&id, &ViewEvent::MomentaryBoxZoom { held }, &self.config.zoom);
        }
    }

    /// Write the current configuration to the settings path.
    fn save_settings(&mut self) {
        let path = match &self.settings_path {
            Some(p) => Ok(p.clone()),
            None => ViewerConfig::default_path(),
        };
        if let Err(e) = path.and_then(|p| self.config.save_to(&p)) {
            tracing::warn!(error = %e, "could not save settings");
            self.notices.push(format!("Failed to save settings: {e}"));
        }
    }

    pub(crate) fn set_focus_ranges(&mut self, ranges: Vec<(AxisId, AxisRange)>) {
        self.focus_ranges = ranges;
    }
}
