use eframe::egui::Ui;

use crate::data::hotkeys::{format_button_tooltip, Hotkeys};
use crate::data::interaction::ViewEvent;
use crate::data::tabs::Tab;
use crate::data::view::{AxisSide, LayoutMode};
use crate::panels::ChartAction;

/// Layout radio buttons plus the mode-specific control: the secondary-axis
/// button in combined mode, fit-to-screen in stacked mode.
pub fn layout_controls(ui: &mut Ui, tab: &Tab, hk: &Hotkeys) -> Vec<ChartAction> {
    let mut actions = Vec::new();
    let view = &tab.view_state;
    ui.horizontal(|ui| {
        ui.label("Layout:");
        for mode in [LayoutMode::Combined, LayoutMode::Stacked] {
            if ui.radio(view.layout_mode == mode, mode.label()).clicked() && view.layout_mode != mode {
                actions.push(ChartAction::View(ViewEvent::SetLayoutMode(mode)));
            }
        }
        ui.separator();

        match view.layout_mode {
            LayoutMode::Combined if tab.series.len() > 1 => {
                let second = &tab.series[1].name;
                let assigned = view.side_of(second) == AxisSide::Secondary;
                let tt = format_button_tooltip(
                    &format!("Plot {} against a right-hand axis", second),
                    hk.assign_secondary.as_ref(),
                );
                if ui
                    .add_enabled(!assigned, eframe::egui::Button::new("Assign Y2"))
                    .on_hover_text(tt)
                    .clicked()
                {
                    actions.push(ChartAction::View(ViewEvent::AssignSecondaryAxis));
                }
                if assigned {
                    ui.weak(format!("{} on Y2", second));
                }
            }
            LayoutMode::Combined => {}
            LayoutMode::Stacked => {
                let mut fit = view.fit_to_screen;
                if ui
                    .checkbox(&mut fit, "Fit to screen")
                    .on_hover_text(format_button_tooltip(
                        "Fit all panels into the window",
                        hk.fit_to_screen.as_ref(),
                    ))
                    .changed()
                {
                    actions.push(ChartAction::View(ViewEvent::SetFitToScreen(fit)));
                }
            }
        }
    });
    actions
}
