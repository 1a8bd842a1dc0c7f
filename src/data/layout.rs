//! Layout derivation: a tab's series plus its view state to a renderable
//! [`RenderSpec`] (annotated traces and an axis/grid layout).
//!
//! The derivation is a pure function. The same tab and height always give an
//! equal spec, and serializing it twice gives byte-identical JSON because
//! every map in the spec is ordered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::series::CellValue;
use crate::data::tabs::Tab;
use crate::data::view::{axis_id_for_panel, AxisId, AxisSide, DragMode, LayoutMode, ViewState};

/// How a trace is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    #[default]
    Lines,
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

impl TraceMode {
    pub fn draws_lines(&self) -> bool {
        matches!(self, TraceMode::Lines | TraceMode::LinesMarkers)
    }

    pub fn draws_markers(&self) -> bool {
        matches!(self, TraceMode::Markers | TraceMode::LinesMarkers)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: f32,
    pub r: f32,
    pub t: f32,
    pub b: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            l: 80.0,
            r: 80.0,
            t: 50.0,
            b: 50.0,
        }
    }
}

/// Constants used by the layout derivation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Height of one stacked panel when not fitting to screen.
    pub panel_height: f32,
    /// Vertical gap between stacked panels, as a fraction of a row.
    pub row_gap: f32,
    pub margin: Margin,
    pub show_legend: bool,
    pub trace_mode: TraceMode,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            panel_height: 240.0,
            row_gap: 0.05,
            margin: Margin::default(),
            show_legend: true,
            trace_mode: TraceMode::Lines,
        }
    }
}

/// One series bound to an axis pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedTrace<'a> {
    pub name: &'a str,
    pub x: &'a [CellValue],
    pub y: &'a [CellValue],
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: TraceMode,
    #[serde(rename = "xaxis")]
    pub x_axis: AxisId,
    #[serde(rename = "yaxis")]
    pub y_axis: AxisId,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisEdge {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisDescriptor {
    #[serde(skip)]
    pub id: AxisId,
    pub title: String,
    pub autorange: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Axis whose displayed range this one always follows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<AxisId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<AxisId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<AxisEdge>,
    #[serde(rename = "showticklabels", skip_serializing_if = "Option::is_none")]
    pub show_tick_labels: Option<bool>,
}

impl AxisDescriptor {
    /// Descriptor titled `title`, pinned to the view state's range for `id` if any.
    fn new(id: AxisId, title: impl Into<String>, view: &ViewState) -> Self {
        let range = view.range_of(id).map(|r| r.as_array());
        Self {
            id,
            title: title.into(),
            autorange: range.is_none(),
            range,
            matches: None,
            overlaying: None,
            side: None,
            show_tick_labels: None,
        }
    }

    pub fn shows_tick_labels(&self) -> bool {
        self.show_tick_labels.unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridDescriptor {
    pub rows: usize,
    pub columns: usize,
    pub pattern: &'static str,
    #[serde(rename = "ygap")]
    pub y_gap: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutDescriptor {
    pub title: String,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
    pub margin: Margin,
    #[serde(rename = "dragmode")]
    pub drag_mode: &'static str,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridDescriptor>,
    /// Axis descriptors keyed by layout key (`xaxis`, `yaxis2`, ...).
    #[serde(flatten)]
    pub axes: BTreeMap<String, AxisDescriptor>,
}

impl LayoutDescriptor {
    pub fn axis(&self, id: AxisId) -> Option<&AxisDescriptor> {
        self.axes.get(&id.layout_key())
    }

    fn insert_axis(&mut self, axis: AxisDescriptor) {
        self.axes.insert(axis.id.layout_key(), axis);
    }
}

/// Derived, never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderSpec<'a> {
    pub traces: Vec<AnnotatedTrace<'a>>,
    pub layout: LayoutDescriptor,
}

impl RenderSpec<'_> {
    /// Number of stacked panels (1 in combined mode, 0 for an empty stacked tab).
    pub fn panel_count(&self) -> usize {
        self.layout.grid.as_ref().map(|g| g.rows).unwrap_or_else(|| {
            usize::from(self.layout.axis(AxisId::X).is_some())
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Derive the render spec with default [`LayoutSettings`].
pub fn derive_render_spec(tab: &Tab, available_height: f32) -> RenderSpec<'_> {
    derive_render_spec_with(tab, available_height, &LayoutSettings::default())
}

pub fn derive_render_spec_with<'a>(
    tab: &'a Tab,
    available_height: f32,
    settings: &LayoutSettings,
) -> RenderSpec<'a> {
    match tab.view_state.layout_mode {
        LayoutMode::Combined => combined(tab, available_height, settings),
        LayoutMode::Stacked => stacked(tab, available_height, settings),
    }
}

fn base_layout(tab: &Tab, height: f32, settings: &LayoutSettings) -> LayoutDescriptor {
    LayoutDescriptor {
        title: format!("Chart for {}", tab.id),
        show_legend: settings.show_legend,
        margin: settings.margin,
        drag_mode: match tab.view_state.drag_mode {
            DragMode::Pan => "pan",
            DragMode::BoxZoom => "zoom",
        },
        height,
        grid: None,
        axes: BTreeMap::new(),
    }
}

fn combined<'a>(tab: &'a Tab, available_height: f32, settings: &LayoutSettings) -> RenderSpec<'a> {
    let view = &tab.view_state;
    let traces = tab
        .series
        .iter()
        .map(|s| AnnotatedTrace {
            name: &s.name,
            x: &s.x,
            y: &s.y,
            kind: "scatter",
            mode: settings.trace_mode,
            x_axis: AxisId::X,
            y_axis: match view.side_of(&s.name) {
                AxisSide::Primary => AxisId::Y,
                AxisSide::Secondary => AxisId::Y2,
            },
        })
        .collect();

    let mut layout = base_layout(tab, available_height, settings);
    layout.insert_axis(AxisDescriptor::new(AxisId::X, tab.x_column_name.as_str(), view));
    layout.insert_axis(AxisDescriptor::new(AxisId::Y, "Value", view));
    if view.has_secondary() {
        let mut y2 = AxisDescriptor::new(AxisId::Y2, "Secondary Value", view);
        y2.overlaying = Some(AxisId::Y);
        y2.side = Some(AxisEdge::Right);
        layout.insert_axis(y2);
    }

    RenderSpec { traces, layout }
}

fn stacked<'a>(tab: &'a Tab, available_height: f32, settings: &LayoutSettings) -> RenderSpec<'a> {
    let view = &tab.view_state;
    let count = tab.series.len();
    if count == 0 {
        return RenderSpec {
            traces: Vec::new(),
            layout: base_layout(tab, available_height, settings),
        };
    }

    let height = if view.fit_to_screen {
        available_height
    } else {
        settings.panel_height * count as f32
    };
    let mut layout = base_layout(tab, height, settings);
    layout.grid = Some(GridDescriptor {
        rows: count,
        columns: 1,
        pattern: "independent",
        y_gap: settings.row_gap,
    });

    let mut traces = Vec::with_capacity(count);
    for (index, s) in tab.series.iter().enumerate() {
        let (x_axis, y_axis) = axis_id_for_panel(index);
        traces.push(AnnotatedTrace {
            name: &s.name,
            x: &s.x,
            y: &s.y,
            kind: "scatter",
            mode: settings.trace_mode,
            x_axis,
            y_axis,
        });

        let is_last = index == count - 1;
        let y_title = if view.fit_to_screen { "" } else { s.name.as_str() };
        layout.insert_axis(AxisDescriptor::new(y_axis, y_title, view));

        let mut x = AxisDescriptor::new(x_axis, tab.x_column_name.as_str(), view);
        x.matches = (index > 0).then_some(AxisId::X);
        x.show_tick_labels = Some(if view.fit_to_screen { is_last } else { true });
        layout.insert_axis(x);
    }

    RenderSpec { traces, layout }
}
