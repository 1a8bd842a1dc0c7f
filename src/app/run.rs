//! Native window entry point.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;

use super::ViewerApp;
use crate::config::ViewerConfig;
use crate::host::NativeHost;

/// Open the viewer window with `files` queued for loading. Blocks until the
/// window is closed.
///
/// `settings_path` is where "Save Settings" writes; `None` means
/// `~/.csvchart/config.yaml`.
pub fn run_viewer(
    config: ViewerConfig,
    settings_path: Option<PathBuf>,
    files: Vec<PathBuf>,
) -> eframe::Result<()> {
    let title = config.title.clone();
    let [w, h] = config.window_size;
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(egui::vec2(w, h)),
        ..Default::default()
    };

    let mut app = ViewerApp::new(config, Arc::new(NativeHost));
    if let Some(path) = settings_path {
        app.set_settings_path(path);
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            let mut app = app;
            let ctx = cc.egui_ctx.clone();
            app.set_load_waker(move || ctx.request_repaint());
            for file in files {
                app.open_path(file);
            }
            Ok(Box::new(app))
        }),
    )
}
