use std::time::Instant;

use eframe::egui;
use egui_phosphor::regular::FILE_CSV;

use super::ViewerApp;
use crate::color_scheme::ColorScheme;
use crate::data::export::{default_export_name, rgba_from_pixels, save_png};
use crate::data::hotkeys::{detect_hotkey_actions, format_button_tooltip, is_hotkey_held};
use crate::data::layout::derive_render_spec_with;
use crate::data::interaction::ZoomDirection;
use crate::panels::{controls_ui, tab_bar_ui, toolbar_ui, ChartAction, ChartUi};

/// Below this width the toolbar shows icons only.
const COLLAPSE_TOOLBAR_WIDTH: f32 = 720.0;

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.scheme_applied {
            self.config.color_scheme.apply(ctx);
            self.scheme_applied = true;
        }

        self.drain_loads();

        let mut actions: Vec<ChartAction> = Vec::new();
        let pressed = detect_hotkey_actions(&self.config.hotkeys, ctx);
        actions.extend(self.actions_for_hotkeys(&pressed));
        let held = !ctx.wants_keyboard_input()
            && ctx.input(|i| is_hotkey_held(self.config.hotkeys.momentary_box_zoom.as_ref(), i));
        self.set_box_zoom_held(held);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            actions.extend(self.menu_bar(ui, ctx));
        });

        if !self.store().is_empty() {
            egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
                actions.extend(tab_bar_ui::tab_bar(ui, self.store()));
            });
        }

        if let Some(tab) = self.store().active() {
            egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
                let collapsed = ui.available_width() < COLLAPSE_TOOLBAR_WIDTH;
                actions.extend(toolbar_ui::toolbar(
                    ui,
                    &tab.view_state,
                    &self.config.hotkeys,
                    collapsed,
                ));
                actions.extend(controls_ui::layout_controls(ui, tab, &self.config.hotkeys));
            });
        }

        let now = Instant::now();
        self.notices.prune(now);
        if !self.notices.is_empty() {
            egui::TopBottomPanel::bottom("notices").show(ctx, |ui| {
                for notice in self.notices.iter() {
                    ui.colored_label(ui.visuals().error_fg_color, &notice.text);
                }
            });
            if let Some(wait) = self.notices.next_expiry(now) {
                ctx.request_repaint_after(wait);
            }
        }

        let central = egui::CentralPanel::default().show(ctx, |ui| match self.store().active() {
            Some(tab) => {
                let spec = derive_render_spec_with(tab, ui.available_height(), &self.config.layout);
                let chart = ChartUi {
                    id_salt: &tab.id.0,
                    scheme: self.config.color_scheme,
                    wheel: self.config.wheel,
                };
                let rect = ui.max_rect();
                let resp = chart.show(ui, &spec);
                Some((resp, rect))
            }
            None => {
                ui.centered_and_justified(|ui| {
                    let tt = format_button_tooltip("Open CSV", self.config.hotkeys.open_csv.as_ref());
                    if ui
                        .button(format!("{FILE_CSV} Open a CSV file to start"))
                        .on_hover_text(tt)
                        .clicked()
                    {
                        actions.push(ChartAction::OpenCsv);
                    }
                });
                None
            }
        });
        match central.inner {
            Some((resp, rect)) => {
                actions.extend(resp.events.into_iter().map(ChartAction::View));
                self.set_focus_ranges(resp.focus_ranges);
                self.chart_rect = Some(rect);
            }
            None => self.chart_rect = None,
        }

        for action in actions {
            self.apply_action(action);
        }
        self.handle_open_requests();
        self.handle_screenshot(ctx);
    }
}

impl ViewerApp {
    fn menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) -> Vec<ChartAction> {
        let mut actions = Vec::new();
        let hk = self.config.hotkeys.clone();
        let has_tab = self.store().active().is_some();
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open = format!("{FILE_CSV} Open CSV...");
                if ui
                    .button(open)
                    .on_hover_text(format_button_tooltip("Open CSV", hk.open_csv.as_ref()))
                    .clicked()
                {
                    ui.close();
                    actions.push(ChartAction::OpenCsv);
                }
                if ui
                    .add_enabled(has_tab, egui::Button::new("Save PNG..."))
                    .on_hover_text(format_button_tooltip("Save PNG", hk.save_png.as_ref()))
                    .clicked()
                {
                    ui.close();
                    actions.push(ChartAction::SavePng);
                }
                ui.separator();
                if ui
                    .add_enabled(has_tab, egui::Button::new("Close Tab"))
                    .on_hover_text(format_button_tooltip("Close Tab", hk.close_tab.as_ref()))
                    .clicked()
                {
                    ui.close();
                    if let Some(id) = self.store().active_id().cloned() {
                        actions.push(ChartAction::CloseTab(id));
                    }
                }
            });
            ui.menu_button("View", |ui| {
                if ui.add_enabled(has_tab, egui::Button::new("Zoom In")).clicked() {
                    ui.close();
                    actions.push(ChartAction::Zoom(ZoomDirection::In));
                }
                if ui.add_enabled(has_tab, egui::Button::new("Zoom Out")).clicked() {
                    ui.close();
                    actions.push(ChartAction::Zoom(ZoomDirection::Out));
                }
                ui.separator();
                if ui.button("Save Settings").clicked() {
                    ui.close();
                    actions.push(ChartAction::SaveSettings);
                }
                if ui.button("Reset Hotkeys").clicked() {
                    ui.close();
                    actions.push(ChartAction::ResetHotkeys);
                }
                ui.separator();
                ui.label("Color scheme");
                for scheme in ColorScheme::all() {
                    if ui
                        .radio(self.config.color_scheme == *scheme, scheme.label())
                        .clicked()
                    {
                        self.config.color_scheme = *scheme;
                        scheme.apply(ctx);
                        ui.close();
                    }
                }
            });
        });
        actions
    }

    /// Request a viewport capture when asked and save it once it arrives.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if self.screenshot_requested {
            self.screenshot_requested = false;
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }
        let Some(image) = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| {
                if let egui::Event::Screenshot { image, .. } = e {
                    Some(image.clone())
                } else {
                    None
                }
            })
        }) else {
            return;
        };

        let image = match self.chart_rect {
            Some(rect) => image.region(&rect, Some(ctx.pixels_per_point())),
            None => (*image).clone(),
        };
        let [w, h] = image.size;
        let rgba: Vec<u8> = image
            .pixels
            .iter()
            .flat_map(|p| [p.r(), p.g(), p.b(), p.a()])
            .collect();

        let default_name = default_export_name(self.store().active().map(|t| t.display_name.as_str()));
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            tracing::debug!("export cancelled");
            return;
        };
        let result = rgba_from_pixels(w as u32, h as u32, rgba)
            .and_then(|capture| save_png(&path, &capture, &self.config.export));
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "export failed");
            self.notices.push(format!("Failed to export PNG: {e}"));
        }
    }
}
