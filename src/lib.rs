//! csvchart: a desktop viewer that charts the columns of CSV files.
//!
//! The first column of a file is the shared x-axis and every other column
//! becomes a trace. Traces can be drawn in one combined plot (optionally with
//! a secondary y-axis) or stacked in linked panels.
//!
//! Module layout:
//! - `data`: UI-free core (ingestion, tab store, layout derivation,
//!   interaction reducer, export, hotkeys)
//! - `config`: viewer configuration and YAML persistence
//! - `controllers`: the "Open CSV" menu action subscription
//! - `host`: file dialog, file reads and background loading
//! - `panels`: egui widgets (tab bar, toolbar, layout controls, chart renderer)
//! - `app`: the eframe application and [`run_viewer`]

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod host;
pub mod panels;

pub use app::{run_viewer, ViewerApp};
pub use color_scheme::ColorScheme;
pub use config::ViewerConfig;
pub use controllers::{MenuController, MenuSubscription};
pub use data::ingest::{ingest, Ingested};
pub use data::interaction::{reduce, ViewEvent};
pub use data::layout::{derive_render_spec, RenderSpec};
pub use data::series::{CellValue, Series};
pub use data::tabs::{Tab, TabId, TabStore};
pub use data::view::{AxisId, AxisRange, ViewState, ViewStatePatch};
pub use error::{ConfigError, ExportError, IngestError};
pub use host::{HostShell, NativeHost};
