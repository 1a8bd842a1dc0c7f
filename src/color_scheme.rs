//! Visual themes and the trace palette that goes with each.

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
    /// Blue-grey dark theme.
    Nord,
}

impl ColorScheme {
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Dark, ColorScheme::Light, ColorScheme::Nord]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
            ColorScheme::Nord => "Nord",
        }
    }

    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
            ColorScheme::Light => ctx.set_visuals(Visuals::light()),
            ColorScheme::Nord => {
                let mut v = Visuals::dark();
                let polar0 = Color32::from_rgb(46, 52, 64);
                let polar1 = Color32::from_rgb(59, 66, 82);
                let snow0 = Color32::from_rgb(216, 222, 233);
                v.panel_fill = polar0;
                v.window_fill = polar1;
                v.extreme_bg_color = polar0;
                v.faint_bg_color = polar1;
                v.override_text_color = Some(snow0);
                v.widgets.noninteractive.bg_fill = polar1;
                v.widgets.hovered.bg_fill = Color32::from_rgb(76, 86, 106);
                ctx.set_visuals(v);
            }
        }
        tracing::debug!(scheme = self.label(), "applied color scheme");
    }

    pub fn trace_colors(&self) -> &'static [Color32] {
        const CATEGORY10: [Color32; 8] = [
            Color32::from_rgb(31, 119, 180),
            Color32::from_rgb(255, 127, 14),
            Color32::from_rgb(44, 160, 44),
            Color32::from_rgb(214, 39, 40),
            Color32::from_rgb(148, 103, 189),
            Color32::from_rgb(140, 86, 75),
            Color32::from_rgb(227, 119, 194),
            Color32::from_rgb(127, 127, 127),
        ];
        const SET1: [Color32; 8] = [
            Color32::from_rgb(228, 26, 28),
            Color32::from_rgb(55, 126, 184),
            Color32::from_rgb(77, 175, 74),
            Color32::from_rgb(152, 78, 163),
            Color32::from_rgb(255, 127, 0),
            Color32::from_rgb(166, 86, 40),
            Color32::from_rgb(247, 129, 191),
            Color32::from_rgb(153, 153, 153),
        ];
        const AURORA: [Color32; 8] = [
            Color32::from_rgb(136, 192, 208),
            Color32::from_rgb(191, 97, 106),
            Color32::from_rgb(163, 190, 140),
            Color32::from_rgb(235, 203, 139),
            Color32::from_rgb(180, 142, 173),
            Color32::from_rgb(208, 135, 112),
            Color32::from_rgb(129, 161, 193),
            Color32::from_rgb(94, 129, 172),
        ];
        match self {
            ColorScheme::Dark => &CATEGORY10,
            ColorScheme::Light => &SET1,
            ColorScheme::Nord => &AURORA,
        }
    }

    /// Color of the `index`-th trace, cycling through the palette.
    pub fn trace_color(&self, index: usize) -> Color32 {
        let palette = self.trace_colors();
        palette[index % palette.len()]
    }
}
