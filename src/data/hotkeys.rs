#![allow(clippy::match_same_arms)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use eframe::egui;

// Types
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
    CtrlAlt,
    CtrlShift,
    AltShift,
    CtrlAltShift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::CtrlAlt => "Ctrl+Alt",
            Modifier::CtrlShift => "Ctrl+Shift",
            Modifier::AltShift => "Alt+Shift",
            Modifier::CtrlAltShift => "Ctrl+Alt+Shift",
        };
        write!(f, "{}", s)
    }
}

impl Modifier {
    /// Whether every key of this modifier combination is currently held.
    ///
    /// Unlike hotkey matching this does not require the other modifiers to be
    /// released; it is used for wheel bindings.
    pub fn is_held(&self, mods: &egui::Modifiers) -> bool {
        let ctrl = mods.ctrl || mods.command;
        match self {
            Modifier::None => false,
            Modifier::Ctrl => ctrl,
            Modifier::Alt => mods.alt,
            Modifier::Shift => mods.shift,
            Modifier::CtrlAlt => ctrl && mods.alt,
            Modifier::CtrlShift => ctrl && mods.shift,
            Modifier::AltShift => mods.alt && mods.shift,
            Modifier::CtrlAltShift => ctrl && mods.alt && mods.shift,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: char,
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            ' ' => "Space".to_string(),
            other => other.to_string(),
        };

        if self.modifier == Modifier::None {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifier, key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty hotkey".to_string());
        }
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();
        let Some((last, mods)) = parts.split_last() else {
            return Err("invalid hotkey".to_string());
        };
        let ch = match last.to_lowercase().as_str() {
            "space" => ' ',
            _ => last
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .ok_or_else(|| "no key char".to_string())?,
        };
        let mut lowers: Vec<String> = mods.iter().map(|m| m.to_lowercase()).collect();
        for m in lowers.iter_mut() {
            if m == "control" {
                *m = "ctrl".to_string();
            }
        }
        lowers.sort();
        lowers.dedup();
        let modifier = match lowers.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => Modifier::None,
            ["ctrl"] => Modifier::Ctrl,
            ["alt"] => Modifier::Alt,
            ["shift"] => Modifier::Shift,
            ["alt", "ctrl"] => Modifier::CtrlAlt,
            ["ctrl", "shift"] => Modifier::CtrlShift,
            ["alt", "shift"] => Modifier::AltShift,
            ["alt", "ctrl", "shift"] => Modifier::CtrlAltShift,
            other => return Err(format!("unknown modifier combo '{:?}'", other)),
        };
        Ok(Hotkey { modifier, key: ch })
    }
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self { modifier, key }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub open_csv: Option<Hotkey>,
    pub close_tab: Option<Hotkey>,
    pub save_png: Option<Hotkey>,
    pub pan: Option<Hotkey>,
    pub box_zoom: Option<Hotkey>,
    /// Held down for a temporary box zoom, released to return to pan.
    pub momentary_box_zoom: Option<Hotkey>,
    pub zoom_in: Option<Hotkey>,
    pub zoom_out: Option<Hotkey>,
    pub reset_zoom: Option<Hotkey>,
    pub toggle_layout: Option<Hotkey>,
    pub fit_to_screen: Option<Hotkey>,
    pub assign_secondary: Option<Hotkey>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            open_csv: Some(Hotkey::new(Modifier::Ctrl, 'O')),
            close_tab: Some(Hotkey::new(Modifier::Ctrl, 'W')),
            save_png: Some(Hotkey::new(Modifier::None, 'S')),
            pan: Some(Hotkey::new(Modifier::None, 'P')),
            box_zoom: Some(Hotkey::new(Modifier::None, 'B')),
            momentary_box_zoom: Some(Hotkey::new(Modifier::None, 'Z')),
            zoom_in: Some(Hotkey::new(Modifier::None, 'I')),
            zoom_out: Some(Hotkey::new(Modifier::None, 'O')),
            reset_zoom: Some(Hotkey::new(Modifier::None, 'R')),
            toggle_layout: Some(Hotkey::new(Modifier::None, 'L')),
            fit_to_screen: Some(Hotkey::new(Modifier::None, 'F')),
            assign_secondary: Some(Hotkey::new(Modifier::None, '2')),
        }
    }
}

impl Hotkeys {
    pub fn reset_defaults(&mut self) {
        *self = Hotkeys::default();
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyName {
    OpenCsv,
    CloseTab,
    SavePng,
    Pan,
    BoxZoom,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleLayout,
    FitToScreen,
    AssignSecondary,
}

impl HotkeyName {
    pub const ALL: [HotkeyName; 11] = [
        HotkeyName::OpenCsv,
        HotkeyName::CloseTab,
        HotkeyName::SavePng,
        HotkeyName::Pan,
        HotkeyName::BoxZoom,
        HotkeyName::ZoomIn,
        HotkeyName::ZoomOut,
        HotkeyName::ResetZoom,
        HotkeyName::ToggleLayout,
        HotkeyName::FitToScreen,
        HotkeyName::AssignSecondary,
    ];
}

pub fn get_hotkey_for_name(cfg: &Hotkeys, name: HotkeyName) -> Option<&Hotkey> {
    match name {
        HotkeyName::OpenCsv => cfg.open_csv.as_ref(),
        HotkeyName::CloseTab => cfg.close_tab.as_ref(),
        HotkeyName::SavePng => cfg.save_png.as_ref(),
        HotkeyName::Pan => cfg.pan.as_ref(),
        HotkeyName::BoxZoom => cfg.box_zoom.as_ref(),
        HotkeyName::ZoomIn => cfg.zoom_in.as_ref(),
        HotkeyName::ZoomOut => cfg.zoom_out.as_ref(),
        HotkeyName::ResetZoom => cfg.reset_zoom.as_ref(),
        HotkeyName::ToggleLayout => cfg.toggle_layout.as_ref(),
        HotkeyName::FitToScreen => cfg.fit_to_screen.as_ref(),
        HotkeyName::AssignSecondary => cfg.assign_secondary.as_ref(),
    }
}

/// Button tooltip with the bound hotkey appended, e.g. `Reset View [R]`.
pub fn format_button_tooltip(description: &str, hotkey: Option<&Hotkey>) -> String {
    match hotkey {
        Some(hk) => format!("{} [{}]", description, hk),
        None => description.to_string(),
    }
}

pub(crate) fn key_from_char(c: char) -> Option<egui::Key> {
    match c.to_ascii_uppercase() {
        'A' => Some(egui::Key::A),
        'B' => Some(egui::Key::B),
        'C' => Some(egui::Key::C),
        'D' => Some(egui::Key::D),
        'E' => Some(egui::Key::E),
        'F' => Some(egui::Key::F),
        'G' => Some(egui::Key::G),
        'H' => Some(egui::Key::H),
        'I' => Some(egui::Key::I),
        'J' => Some(egui::Key::J),
        'K' => Some(egui::Key::K),
        'L' => Some(egui::Key::L),
        'M' => Some(egui::Key::M),
        'N' => Some(egui::Key::N),
        'O' => Some(egui::Key::O),
        'P' => Some(egui::Key::P),
        'Q' => Some(egui::Key::Q),
        'R' => Some(egui::Key::R),
        'S' => Some(egui::Key::S),
        'T' => Some(egui::Key::T),
        'U' => Some(egui::Key::U),
        'V' => Some(egui::Key::V),
        'W' => Some(egui::Key::W),
        'X' => Some(egui::Key::X),
        'Y' => Some(egui::Key::Y),
        'Z' => Some(egui::Key::Z),
        '0' => Some(egui::Key::Num0),
        '1' => Some(egui::Key::Num1),
        '2' => Some(egui::Key::Num2),
        '3' => Some(egui::Key::Num3),
        '4' => Some(egui::Key::Num4),
        '5' => Some(egui::Key::Num5),
        '6' => Some(egui::Key::Num6),
        '7' => Some(egui::Key::Num7),
        '8' => Some(egui::Key::Num8),
        '9' => Some(egui::Key::Num9),
        ' ' => Some(egui::Key::Space),
        _ => None,
    }
}

fn modifiers_match(mods: &egui::Modifiers, modifier: Modifier) -> bool {
    let ctrl = mods.ctrl || mods.command;
    let alt = mods.alt;
    let shift = mods.shift;
    match modifier {
        Modifier::None => !ctrl && !alt,
        Modifier::Ctrl => ctrl && !alt && !shift,
        Modifier::Alt => alt && !ctrl,
        Modifier::Shift => shift && !ctrl && !alt,
        Modifier::CtrlAlt => ctrl && alt,
        Modifier::CtrlShift => ctrl && shift && !alt,
        Modifier::AltShift => alt && shift && !ctrl,
        Modifier::CtrlAltShift => ctrl && alt && shift,
    }
}

fn is_hotkey_pressed(hk: Option<&Hotkey>, input: &egui::InputState) -> bool {
    let Some(hk) = hk else { return false };
    let Some(key) = key_from_char(hk.key) else {
        return false;
    };
    if !modifiers_match(&input.modifiers, hk.modifier) {
        return false;
    }
    input.key_pressed(key)
}

/// Whether the momentary box-zoom key is currently held down.
pub fn is_hotkey_held(hk: Option<&Hotkey>, input: &egui::InputState) -> bool {
    let Some(hk) = hk else { return false };
    let Some(key) = key_from_char(hk.key) else {
        return false;
    };
    input.key_down(key)
}

/// Actions whose hotkey was pressed this frame, each reported once.
///
/// Nothing is reported while a text field has keyboard focus.
pub fn detect_hotkey_actions(cfg: &Hotkeys, ctx: &egui::Context) -> Vec<HotkeyName> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|input| {
        HotkeyName::ALL
            .iter()
            .copied()
            .filter(|name| is_hotkey_pressed(get_hotkey_for_name(cfg, *name), input))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_binding_ignores_shifted_press() {
        let mods = egui::Modifiers {
            ctrl: true,
            shift: true,
            ..Default::default()
        };
        assert!(!modifiers_match(&mods, Modifier::Ctrl));
        assert!(modifiers_match(&mods, Modifier::CtrlShift));
    }

    #[test]
    fn held_check_tolerates_extra_modifiers() {
        let mods = egui::Modifiers {
            ctrl: true,
            shift: true,
            ..Default::default()
        };
        assert!(Modifier::Shift.is_held(&mods));
        assert!(Modifier::Ctrl.is_held(&mods));
        assert!(!Modifier::Alt.is_held(&mods));
        assert!(!Modifier::None.is_held(&mods));
    }
}
