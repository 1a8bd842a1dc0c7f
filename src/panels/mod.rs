//! UI pieces of the viewer window. Each returns what the user asked for as
//! [`ChartAction`]s; the app applies them.

pub mod chart_ui;
pub mod controls_ui;
pub mod tab_bar_ui;
pub mod toolbar_ui;

use crate::data::interaction::{ViewEvent, ZoomDirection};
use crate::data::tabs::TabId;

pub use chart_ui::{ChartResponse, ChartUi};

#[derive(Clone, Debug, PartialEq)]
pub enum ChartAction {
    /// Applied to the active tab through the reducer.
    View(ViewEvent),
    /// Toolbar zoom, resolved against the last drawn ranges.
    Zoom(ZoomDirection),
    SavePng,
    OpenCsv,
    /// Write the current configuration to disk.
    SaveSettings,
    ResetHotkeys,
    ActivateTab(TabId),
    CloseTab(TabId),
}
