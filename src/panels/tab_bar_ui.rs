use eframe::egui::{self, Ui};
use egui_phosphor::regular::X;

use crate::data::tabs::TabStore;
use crate::panels::ChartAction;

/// One selectable label per open tab, each with a close button.
pub fn tab_bar(ui: &mut Ui, store: &TabStore) -> Vec<ChartAction> {
    let mut actions = Vec::new();
    egui::ScrollArea::horizontal()
        .id_salt("tab_bar")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let active = store.active_id();
                for tab in store.tabs() {
                    let is_active = active == Some(&tab.id);
                    let resp = ui
                        .selectable_label(is_active, &tab.display_name)
                        .on_hover_text(tab.id.to_string());
                    if resp.clicked() && !is_active {
                        actions.push(ChartAction::ActivateTab(tab.id.clone()));
                    }
                    if ui
                        .small_button(X.to_string())
                        .on_hover_text(format!("Close {}", tab.display_name))
                        .clicked()
                    {
                        actions.push(ChartAction::CloseTab(tab.id.clone()));
                    }
                    ui.separator();
                }
            });
        });
    actions
}
