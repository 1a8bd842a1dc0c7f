use eframe::egui::Ui;
use egui_phosphor::regular::{
    ARROWS_COUNTER_CLOCKWISE, CAMERA, CHART_LINE, HAND, MAGNIFYING_GLASS_MINUS,
    MAGNIFYING_GLASS_PLUS, ROWS, SELECTION,
};

use crate::data::hotkeys::{format_button_tooltip, Hotkeys};
use crate::data::interaction::{ViewEvent, ZoomDirection};
use crate::data::view::{DragMode, LayoutMode, ViewState};
use crate::panels::ChartAction;

/// Drag mode, zoom, reset, export and layout buttons for the active tab.
pub fn toolbar(ui: &mut Ui, view: &ViewState, hk: &Hotkeys, collapsed: bool) -> Vec<ChartAction> {
    let mut actions = Vec::new();
    let label = |icon: &str, text: &str| {
        if collapsed {
            icon.to_string()
        } else {
            format!("{icon} {text}")
        }
    };

    ui.horizontal(|ui| {
        let pan_tt = format_button_tooltip("Pan", hk.pan.as_ref());
        if ui
            .selectable_label(view.drag_mode == DragMode::Pan, label(HAND, "Pan"))
            .on_hover_text(pan_tt)
            .clicked()
        {
            actions.push(ChartAction::View(ViewEvent::SetDragMode(DragMode::Pan)));
        }
        let box_tt = format!(
            "{} (hold {} for a quick zoom)",
            format_button_tooltip("Box Zoom", hk.box_zoom.as_ref()),
            hk.momentary_box_zoom
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        if ui
            .selectable_label(view.drag_mode == DragMode::BoxZoom, label(SELECTION, "Box Zoom"))
            .on_hover_text(box_tt)
            .clicked()
        {
            actions.push(ChartAction::View(ViewEvent::SetDragMode(DragMode::BoxZoom)));
        }

        ui.separator();
        if ui
            .button(label(MAGNIFYING_GLASS_PLUS, "Zoom In"))
            .on_hover_text(format_button_tooltip("Zoom In", hk.zoom_in.as_ref()))
            .clicked()
        {
            actions.push(ChartAction::Zoom(ZoomDirection::In));
        }
        if ui
            .button(label(MAGNIFYING_GLASS_MINUS, "Zoom Out"))
            .on_hover_text(format_button_tooltip("Zoom Out", hk.zoom_out.as_ref()))
            .clicked()
        {
            actions.push(ChartAction::Zoom(ZoomDirection::Out));
        }
        if ui
            .button(label(ARROWS_COUNTER_CLOCKWISE, "Reset"))
            .on_hover_text(format_button_tooltip("Reset Zoom", hk.reset_zoom.as_ref()))
            .clicked()
        {
            actions.push(ChartAction::View(ViewEvent::ResetZoom));
        }

        ui.separator();
        if ui
            .button(label(CAMERA, "Save PNG"))
            .on_hover_text(format_button_tooltip("Save PNG", hk.save_png.as_ref()))
            .clicked()
        {
            actions.push(ChartAction::SavePng);
        }

        ui.separator();
        let next = view.layout_mode.toggled();
        let (icon, text) = match next {
            LayoutMode::Combined => (CHART_LINE, "Combined"),
            LayoutMode::Stacked => (ROWS, "Stacked"),
        };
        if ui
            .button(label(icon, text))
            .on_hover_text(format_button_tooltip(
                &format!("Switch to {} layout", next.label()),
                hk.toggle_layout.as_ref(),
            ))
            .clicked()
        {
            actions.push(ChartAction::View(ViewEvent::SetLayoutMode(next)));
        }
    });
    actions
}
