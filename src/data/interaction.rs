//! View interaction reducer.
//!
//! Folds toolbar actions, hotkeys, wheel input and renderer range reports
//! into a new [`ViewState`]. Every transition is total: an event that does
//! not apply to the current state returns an unchanged copy.
//!
//! Zooming scales a range about its midpoint:
//! `(mid - (mid - min) * f, mid + (max - mid) * f)` with `f = 0.8` for zoom-in
//! and `f = 1.25` for zoom-out. Plain `f64` arithmetic, no rounding step, so a
//! zoom-in followed by a zoom-out restores the range up to floating point
//! error only.

use serde::{Deserialize, Serialize};

use crate::data::series::Series;
use crate::data::view::{AxisId, AxisRange, AxisSide, DragMode, LayoutMode, ViewState};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Scale factors for a single zoom step.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            zoom_in_factor: 0.8,
            zoom_out_factor: 1.25,
        }
    }
}

impl ZoomSettings {
    pub fn factor(&self, direction: ZoomDirection) -> f64 {
        match direction {
            ZoomDirection::In => self.zoom_in_factor,
            ZoomDirection::Out => self.zoom_out_factor,
        }
    }
}

/// Which modifiers were held during a wheel event, already mapped from the
/// configured bindings (A restricts to x, B restricts to y).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WheelModifiers {
    pub x_only: bool,
    pub y_only: bool,
}

/// A wheel notch over a plot panel.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelInput {
    /// Negative zooms in, positive zooms out, zero does nothing.
    pub delta: f64,
    pub modifiers: WheelModifiers,
    /// The panel's x-axis and its currently displayed range.
    pub x: Option<(AxisId, AxisRange)>,
    /// The panel's y-axis and its currently displayed range.
    pub y: Option<(AxisId, AxisRange)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    SetLayoutMode(LayoutMode),
    SetDragMode(DragMode),
    /// Key held for a temporary box zoom: down switches to box zoom, up back to pan.
    MomentaryBoxZoom {
        held: bool,
    },
    /// Move the second series to the secondary y-axis (combined mode, 2+ series).
    AssignSecondaryAxis,
    SetFitToScreen(bool),
    /// The renderer reports a new displayed range for one axis.
    RangeChanged {
        axis: AxisId,
        range: AxisRange,
    },
    Zoom {
        direction: ZoomDirection,
        axis: AxisId,
        current: AxisRange,
    },
    ResetZoom,
    Wheel(WheelInput),
}

/// Scale `range` about its midpoint by `factor`.
pub fn scale_range(range: AxisRange, factor: f64) -> AxisRange {
    let mid = range.mid();
    AxisRange::new(
        mid - (mid - range.min) * factor,
        mid + (range.max - mid) * factor,
    )
}

/// Zoom steps for a wheel notch. Routed through [`ViewEvent::Zoom`] like the
/// toolbar buttons.
pub fn wheel_zoom_events(input: &WheelInput) -> Vec<ViewEvent> {
    let direction = if input.delta < 0.0 {
        ZoomDirection::In
    } else if input.delta > 0.0 {
        ZoomDirection::Out
    } else {
        return Vec::new();
    };
    let (zoom_x, zoom_y) = match (input.modifiers.x_only, input.modifiers.y_only) {
        (true, _) => (true, false),
        (false, true) => (false, true),
        (false, false) => (true, true),
    };
    let mut events = Vec::new();
    if zoom_x {
        if let Some((axis, current)) = input.x {
            events.push(ViewEvent::Zoom {
                direction,
                axis,
                current,
            });
        }
    }
    if zoom_y {
        if let Some((axis, current)) = input.y {
            events.push(ViewEvent::Zoom {
                direction,
                axis,
                current,
            });
        }
    }
    events
}

/// Zoom steps for the toolbar zoom buttons applied to every listed axis.
pub fn toolbar_zoom_events(direction: ZoomDirection, axes: &[(AxisId, AxisRange)]) -> Vec<ViewEvent> {
    axes.iter()
        .map(|(axis, current)| ViewEvent::Zoom {
            direction,
            axis: *axis,
            current: *current,
        })
        .collect()
}

/// Apply `event` with the default zoom factors.
pub fn reduce(view: &ViewState, series: &[Series], event: &ViewEvent) -> ViewState {
    reduce_with(view, series, event, &ZoomSettings::default())
}

pub fn reduce_with(
    view: &ViewState,
    series: &[Series],
    event: &ViewEvent,
    zoom: &ZoomSettings,
) -> ViewState {
    match event {
        ViewEvent::SetLayoutMode(mode) => ViewState {
            layout_mode: *mode,
            ..view.clone()
        },
        ViewEvent::SetDragMode(mode) => ViewState {
            drag_mode: *mode,
            ..view.clone()
        },
        ViewEvent::MomentaryBoxZoom { held } => ViewState {
            drag_mode: if *held { DragMode::BoxZoom } else { DragMode::Pan },
            ..view.clone()
        },
        ViewEvent::AssignSecondaryAxis => assign_secondary_axis(view, series),
        ViewEvent::SetFitToScreen(fit) => ViewState {
            fit_to_screen: *fit,
            ..view.clone()
        },
        ViewEvent::RangeChanged { axis, range } => range_changed(view, *axis, *range),
        ViewEvent::Zoom {
            direction,
            axis,
            current,
        } => {
            let next = scale_range(*current, zoom.factor(*direction));
            range_changed(view, *axis, next)
        }
        ViewEvent::ResetZoom => {
            let mut next = view.clone();
            next.axis_ranges.clear();
            next
        }
        ViewEvent::Wheel(input) => wheel_zoom_events(input)
            .iter()
            .fold(view.clone(), |acc, ev| reduce_with(&acc, series, ev, zoom)),
    }
}

fn assign_secondary_axis(view: &ViewState, series: &[Series]) -> ViewState {
    let mut next = view.clone();
    if view.layout_mode != LayoutMode::Combined {
        return next;
    }
    if let Some(second) = series.get(1) {
        next.axis_assignment
            .insert(second.name.clone(), AxisSide::Secondary);
    }
    next
}

fn range_changed(view: &ViewState, axis: AxisId, range: AxisRange) -> ViewState {
    let mut next = view.clone();
    if !range.min.is_finite() || !range.max.is_finite() || range.min == range.max {
        tracing::trace!(%axis, ?range, "ignoring degenerate range");
        return next;
    }
    let range = if range.min > range.max {
        AxisRange::new(range.max, range.min)
    } else {
        range
    };
    next.axis_ranges.insert(axis, range);
    next
}
