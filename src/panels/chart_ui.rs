//! egui_plot renderer for a [`RenderSpec`].
//!
//! Built-in plot zoom and scroll are disabled; every change of the displayed
//! range is reported back as a [`ViewEvent`] and comes back pinned in the
//! next frame's spec. Ranges of auto-ranged axes are computed from the data.

use eframe::egui::{self, Color32, PointerButton, Ui};
use egui_plot::{AxisHints, HPlacement, Legend, Line, Plot, Points};

use crate::color_scheme::ColorScheme;
use crate::config::WheelBindings;
use crate::data::interaction::{ViewEvent, WheelInput};
use crate::data::layout::{AnnotatedTrace, AxisDescriptor, RenderSpec, TraceMode};
use crate::data::view::{AxisId, AxisRange};
use crate::data::x_formatter::{format_value, XDomain};

/// Fraction of the data span added on each side of an auto range.
const AUTO_PADDING: f64 = 0.05;

const MARKER_RADIUS: f32 = 2.5;

/// Scroll distance in points counted as one wheel notch (one zoom step).
const WHEEL_NOTCH: f32 = 50.0;

/// Upper bound on zoom steps taken in a single frame.
const MAX_NOTCHES_PER_FRAME: u32 = 4;

#[derive(Debug, Default)]
pub struct ChartResponse {
    pub events: Vec<ViewEvent>,
    /// Axes of the first panel with the ranges drawn this frame.
    pub focus_ranges: Vec<(AxisId, AxisRange)>,
}

pub struct ChartUi<'a> {
    /// Distinguishes plot memory between tabs.
    pub id_salt: &'a str,
    pub scheme: ColorScheme,
    pub wheel: WheelBindings,
}

struct PreparedTrace {
    name: String,
    color: Color32,
    mode: TraceMode,
    x_axis: AxisId,
    y_axis: AxisId,
    points: Vec<[f64; 2]>,
}

impl PreparedTrace {
    fn new(index: usize, trace: &AnnotatedTrace<'_>, x: &XDomain, scheme: ColorScheme) -> Self {
        let points = x
            .coords
            .iter()
            .zip(trace.y.iter())
            .filter_map(|(x, y)| y.as_f64().filter(|v| v.is_finite()).map(|y| [*x, y]))
            .collect();
        Self {
            name: trace.name.to_string(),
            color: scheme.trace_color(index),
            mode: trace.mode,
            x_axis: trace.x_axis,
            y_axis: trace.y_axis,
            points,
        }
    }
}

/// Linear map between the primary y range and the overlaid secondary one.
#[derive(Copy, Clone, Debug)]
struct Overlay {
    primary: AxisRange,
    secondary: AxisRange,
}

impl Overlay {
    fn to_primary(&self, v: f64) -> f64 {
        self.primary.min + (v - self.secondary.min) / self.secondary.span() * self.primary.span()
    }

    fn to_secondary(&self, p: f64) -> f64 {
        self.secondary.min + (p - self.primary.min) / self.primary.span() * self.secondary.span()
    }
}

/// Everything needed to draw one plot area.
struct Panel<'p> {
    index: usize,
    height: f32,
    /// Axis reported for x changes (the link target for stacked panels).
    x_report: AxisId,
    y_axis: AxisId,
    x_range: AxisRange,
    y_range: AxisRange,
    x_title: &'p str,
    y_title: &'p str,
    show_x_ticks: bool,
    overlay: Option<(AxisId, &'p str, Overlay)>,
    traces: Vec<&'p PreparedTrace>,
}

#[derive(Default)]
struct Gesture {
    moved: bool,
    reset: bool,
    scroll: f32,
    modifiers: egui::Modifiers,
}

impl ChartUi<'_> {
    pub fn show(&self, ui: &mut Ui, spec: &RenderSpec<'_>) -> ChartResponse {
        let mut out = ChartResponse::default();
        ui.heading(&spec.layout.title);

        let x_domain = spec
            .traces
            .first()
            .map(|t| XDomain::from_cells(t.x))
            .unwrap_or_else(|| XDomain::from_cells(&[]));
        let prepared: Vec<PreparedTrace> = spec
            .traces
            .iter()
            .enumerate()
            .map(|(i, t)| PreparedTrace::new(i, t, &x_domain, self.scheme))
            .collect();

        let x_auto = auto_range(prepared.iter().flat_map(|t| t.points.iter().map(|p| p[0])));

        match &spec.layout.grid {
            None => {
                let panel = self.combined_panel(spec, &prepared, x_auto, ui.available_height());
                self.show_panel(ui, spec, &x_domain, panel, &mut out);
            }
            Some(grid) => {
                let rows = grid.rows.max(1) as f32;
                let gap = ui.spacing().item_spacing.y;
                let per_panel = (spec.layout.height / rows - gap).max(60.0);
                let panels: Vec<Panel<'_>> = (0..grid.rows)
                    .map(|i| self.stacked_panel(spec, &prepared, x_auto, i, per_panel))
                    .collect();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for panel in panels {
                            self.show_panel(ui, spec, &x_domain, panel, &mut out);
                        }
                    });
            }
        }
        if prepared.is_empty() {
            ui.label("No data columns to plot.");
        }
        out
    }

    fn combined_panel<'p>(
        &self,
        spec: &'p RenderSpec<'_>,
        prepared: &'p [PreparedTrace],
        x_auto: AxisRange,
        available: f32,
    ) -> Panel<'p> {
        let layout = &spec.layout;
        let on = |axis: AxisId| prepared.iter().filter(move |t| t.y_axis == axis);
        let y_auto = auto_range(on(AxisId::Y).flat_map(|t| t.points.iter().map(|p| p[1])));
        let y_range = resolve(layout.axis(AxisId::Y), spec, y_auto);
        let overlay = layout.axis(AxisId::Y2).map(|d| {
            let auto = auto_range(on(AxisId::Y2).flat_map(|t| t.points.iter().map(|p| p[1])));
            let secondary = resolve(Some(d), spec, auto);
            (
                AxisId::Y2,
                d.title.as_str(),
                Overlay {
                    primary: y_range,
                    secondary,
                },
            )
        });
        Panel {
            index: 0,
            height: layout.height.min(available).max(120.0),
            x_report: AxisId::X,
            y_axis: AxisId::Y,
            x_range: resolve(layout.axis(AxisId::X), spec, x_auto),
            y_range,
            x_title: title_of(layout.axis(AxisId::X)),
            y_title: title_of(layout.axis(AxisId::Y)),
            show_x_ticks: true,
            overlay,
            traces: prepared.iter().collect(),
        }
    }

    fn stacked_panel<'p>(
        &self,
        spec: &'p RenderSpec<'_>,
        prepared: &'p [PreparedTrace],
        x_auto: AxisRange,
        index: usize,
        height: f32,
    ) -> Panel<'p> {
        let layout = &spec.layout;
        let x_axis = AxisId::x_for_panel(index);
        let y_axis = AxisId::y_for_panel(index);
        let x_desc = layout.axis(x_axis);
        let y_desc = layout.axis(y_axis);
        let traces: Vec<&PreparedTrace> = prepared
            .iter()
            .filter(|t| t.x_axis == x_axis && t.y_axis == y_axis)
            .collect();
        let y_auto = auto_range(traces.iter().flat_map(|t| t.points.iter().map(|p| p[1])));
        Panel {
            index,
            height,
            x_report: x_desc.and_then(|d| d.matches).unwrap_or(x_axis),
            y_axis,
            x_range: resolve(x_desc, spec, x_auto),
            y_range: resolve(y_desc, spec, y_auto),
            x_title: title_of(x_desc),
            y_title: title_of(y_desc),
            show_x_ticks: x_desc.map(AxisDescriptor::shows_tick_labels).unwrap_or(true),
            overlay: None,
            traces,
        }
    }

    fn show_panel(
        &self,
        ui: &mut Ui,
        spec: &RenderSpec<'_>,
        x_domain: &XDomain,
        panel: Panel<'_>,
        out: &mut ChartResponse,
    ) {
        let pan = spec.layout.drag_mode == "pan";
        let (x_range, y_range) = (panel.x_range, panel.y_range);

        let mut plot = Plot::new(format!("{}_panel_{}", self.id_salt, panel.index))
            .height(panel.height)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_double_click_reset(false)
            .allow_drag(pan)
            .allow_boxed_zoom(!pan)
            .boxed_zoom_pointer_button(PointerButton::Primary)
            .show_axes([panel.show_x_ticks, true])
            .x_axis_formatter(move |mark, _range| {
                x_domain.format_tick(mark.value, mark.step_size, (x_range.min, x_range.max))
            });
        if !panel.x_title.is_empty() && panel.show_x_ticks {
            plot = plot.x_axis_label(panel.x_title);
        }
        if spec.layout.show_legend {
            plot = plot.legend(Legend::default());
        }
        plot = match panel.overlay {
            Some((_, y2_title, overlay)) => plot.custom_y_axes(vec![
                AxisHints::new_y().label(panel.y_title),
                AxisHints::new_y()
                    .label(y2_title)
                    .placement(HPlacement::Right)
                    .formatter(move |mark, _range| {
                        let step = overlay.secondary.span() / overlay.primary.span() * mark.step_size;
                        format_value(overlay.to_secondary(mark.value), 4, step)
                    }),
            ]),
            None if !panel.y_title.is_empty() => plot.y_axis_label(panel.y_title),
            None => plot,
        };

        let overlay = panel.overlay.map(|(_, _, o)| o);
        let plot_resp = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_range.min..=x_range.max);
            plot_ui.set_plot_bounds_y(y_range.min..=y_range.max);

            for trace in &panel.traces {
                let points: Vec<[f64; 2]> = match overlay {
                    Some(o) if trace.y_axis == AxisId::Y2 => trace
                        .points
                        .iter()
                        .map(|p| [p[0], o.to_primary(p[1])])
                        .collect(),
                    _ => trace.points.clone(),
                };
                if trace.mode.draws_lines() {
                    plot_ui.line(Line::new(&trace.name, points.clone()).color(trace.color));
                }
                if trace.mode.draws_markers() {
                    plot_ui.points(
                        Points::new(&trace.name, points)
                            .color(trace.color)
                            .radius(MARKER_RADIUS),
                    );
                }
            }

            let resp = plot_ui.response();
            let mut gesture = Gesture {
                moved: if pan {
                    resp.dragged_by(PointerButton::Primary)
                } else {
                    resp.drag_stopped_by(PointerButton::Primary)
                },
                reset: resp.double_clicked(),
                ..Default::default()
            };
            if resp.hovered() {
                // Taken here so an enclosing scroll area does not also move.
                let (scroll, modifiers) = resp.ctx.input_mut(|i| {
                    let d = i.raw_scroll_delta;
                    i.raw_scroll_delta = egui::Vec2::ZERO;
                    i.smooth_scroll_delta = egui::Vec2::ZERO;
                    // Shift-wheel arrives as horizontal scroll.
                    (if d.y != 0.0 { d.y } else { d.x }, i.modifiers)
                });
                gesture.scroll = scroll;
                gesture.modifiers = modifiers;
            }
            gesture
        });

        let gesture = plot_resp.inner;
        if gesture.reset {
            out.events.push(ViewEvent::ResetZoom);
        } else if gesture.moved {
            let bounds = plot_resp.transform.bounds();
            let xr = bounds.range_x();
            let yr = bounds.range_y();
            let (new_x, new_y) = (
                AxisRange::new(*xr.start(), *xr.end()),
                AxisRange::new(*yr.start(), *yr.end()),
            );
            out.events.push(ViewEvent::RangeChanged {
                axis: panel.x_report,
                range: new_x,
            });
            out.events.push(ViewEvent::RangeChanged {
                axis: panel.y_axis,
                range: new_y,
            });
            if let (Some((axis, _, o)), true) = (panel.overlay, new_y.span() != 0.0) {
                out.events.push(ViewEvent::RangeChanged {
                    axis,
                    range: AxisRange::new(o.to_secondary(new_y.min), o.to_secondary(new_y.max)),
                });
            }
        } else if gesture.scroll != 0.0 {
            let wheel_id = egui::Id::new((self.id_salt, panel.index, "wheel"));
            let notches = ui.ctx().data_mut(|d| {
                let pending = d.get_temp_mut_or_default::<f32>(wheel_id);
                let (notches, rest) = split_notches(*pending, gesture.scroll);
                *pending = rest;
                notches
            });
            // egui reports wheel-up as positive; zoom-in is a negative delta.
            let delta = -f64::from(notches.signum());
            let modifiers = self.wheel.resolve(&gesture.modifiers);
            for _ in 0..notches.unsigned_abs().min(MAX_NOTCHES_PER_FRAME) {
                out.events.push(ViewEvent::Wheel(WheelInput {
                    delta,
                    modifiers,
                    x: Some((panel.x_report, x_range)),
                    y: Some((panel.y_axis, y_range)),
                }));
                if let Some((axis, _, o)) = panel.overlay {
                    out.events.push(ViewEvent::Wheel(WheelInput {
                        delta,
                        modifiers,
                        x: None,
                        y: Some((axis, o.secondary)),
                    }));
                }
            }
        }

        if panel.index == 0 {
            out.focus_ranges.push((panel.x_report, x_range));
            out.focus_ranges.push((panel.y_axis, y_range));
            if let Some((axis, _, o)) = panel.overlay {
                out.focus_ranges.push((axis, o.secondary));
            }
        }
    }
}

fn title_of(desc: Option<&AxisDescriptor>) -> &str {
    desc.map(|d| d.title.as_str()).unwrap_or("")
}

/// Pinned range of `desc`, following its `matches` link, else `auto`.
fn resolve(desc: Option<&AxisDescriptor>, spec: &RenderSpec<'_>, auto: AxisRange) -> AxisRange {
    let Some(desc) = desc else { return auto };
    let pinned = desc.range.or_else(|| {
        desc.matches
            .and_then(|target| spec.layout.axis(target))
            .and_then(|t| t.range)
    });
    match pinned {
        Some([min, max]) => AxisRange::new(min, max),
        None => auto,
    }
}

/// Whole notches in `pending + scroll`, and the remainder carried to the
/// next frame. Trackpads send many small deltas that add up to one notch.
fn split_notches(pending: f32, scroll: f32) -> (i32, f32) {
    let total = pending + scroll;
    let notches = (total / WHEEL_NOTCH).trunc();
    (notches as i32, total - notches * WHEEL_NOTCH)
}

/// Padded data extent; `(0, 1)` when there is nothing finite to show.
fn auto_range(values: impl Iterator<Item = f64>) -> AxisRange {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return AxisRange::new(0.0, 1.0);
    }
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return AxisRange::new(min - pad, max + pad);
    }
    let pad = (max - min) * AUTO_PADDING;
    AxisRange::new(min - pad, max + pad)
}
