//! Per-tab view state: layout mode, drag mode, secondary-axis assignment,
//! fit-to-screen and pinned axis ranges.
//!
//! [`ViewState`] is a plain value. Transitions never mutate it in place; they
//! build a new value (see [`ViewState::apply`] and [`crate::data::interaction`]).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::data::series::Series;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    Combined,
    Stacked,
}

impl LayoutMode {
    pub fn label(&self) -> &'static str {
        match self {
            LayoutMode::Combined => "Combined",
            LayoutMode::Stacked => "Stacked",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            LayoutMode::Combined => LayoutMode::Stacked,
            LayoutMode::Stacked => LayoutMode::Combined,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragMode {
    #[default]
    Pan,
    BoxZoom,
}

/// Which y-axis a trace is drawn against in combined mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSide {
    #[default]
    Primary,
    Secondary,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum AxisDim {
    X,
    Y,
}

/// Identifier of one plot axis: `x`, `y`, `y2`, `x3`, ...
///
/// `number` is 1-based and 1 is written without a suffix. The combined-mode
/// secondary axis (`y2`) and the y-axis of stacked panel 1 share an id, so a
/// pinned range on one is seen by the other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AxisId {
    dim: AxisDim,
    number: u32,
}

impl AxisId {
    pub const X: AxisId = AxisId {
        dim: AxisDim::X,
        number: 1,
    };
    pub const Y: AxisId = AxisId {
        dim: AxisDim::Y,
        number: 1,
    };
    pub const Y2: AxisId = AxisId {
        dim: AxisDim::Y,
        number: 2,
    };

    pub fn x_for_panel(panel: usize) -> Self {
        Self {
            dim: AxisDim::X,
            number: panel as u32 + 1,
        }
    }

    pub fn y_for_panel(panel: usize) -> Self {
        Self {
            dim: AxisDim::Y,
            number: panel as u32 + 1,
        }
    }

    fn suffix(&self) -> String {
        if self.number == 1 {
            String::new()
        } else {
            self.number.to_string()
        }
    }

    /// Short name used on traces and in `matches` links (`x`, `y2`, ...).
    pub fn name(&self) -> String {
        match self.dim {
            AxisDim::X => format!("x{}", self.suffix()),
            AxisDim::Y => format!("y{}", self.suffix()),
        }
    }

    /// Key of the axis descriptor inside the layout (`xaxis`, `yaxis2`, ...).
    pub fn layout_key(&self) -> String {
        match self.dim {
            AxisDim::X => format!("xaxis{}", self.suffix()),
            AxisDim::Y => format!("yaxis{}", self.suffix()),
        }
    }
}

/// Axis pair owned by stacked panel `panel` (0-based).
///
/// Panel 0 uses the unindexed `x`/`y`; panel `i > 0` uses `x{i+1}`/`y{i+1}`.
pub fn axis_id_for_panel(panel: usize) -> (AxisId, AxisId) {
    (AxisId::x_for_panel(panel), AxisId::y_for_panel(panel))
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AxisId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the short form (`y2`) and the layout key (`yaxis2`)
        let s = s.trim().replacen("axis", "", 1);
        let mut chars = s.chars();
        let dim = match chars.next() {
            Some('x') | Some('X') => AxisDim::X,
            Some('y') | Some('Y') => AxisDim::Y,
            _ => return Err(format!("unknown axis '{}'", s)),
        };
        let rest: String = chars.collect();
        let number = if rest.is_empty() {
            1
        } else {
            rest.parse::<u32>()
                .map_err(|e| format!("invalid axis index '{}': {}", rest, e))?
        };
        if number == 0 {
            return Err(format!("axis index must be >= 1 in '{}'", s));
        }
        Ok(AxisId { dim, number })
    }
}

impl Serialize for AxisId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// A pinned `(min, max)` axis range.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.min, self.max]
    }
}

/// View options of one tab.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub layout_mode: LayoutMode,
    pub drag_mode: DragMode,
    pub axis_assignment: BTreeMap<String, AxisSide>,
    pub fit_to_screen: bool,
    pub axis_ranges: BTreeMap<AxisId, AxisRange>,
}

impl ViewState {
    /// Default view state with every series on the primary axis.
    pub fn for_series(series: &[Series]) -> Self {
        Self {
            axis_assignment: series
                .iter()
                .map(|s| (s.name.clone(), AxisSide::Primary))
                .collect(),
            ..Default::default()
        }
    }

    pub fn side_of(&self, series_name: &str) -> AxisSide {
        self.axis_assignment
            .get(series_name)
            .copied()
            .unwrap_or_default()
    }

    pub fn has_secondary(&self) -> bool {
        self.axis_assignment
            .values()
            .any(|s| *s == AxisSide::Secondary)
    }

    pub fn range_of(&self, axis: AxisId) -> Option<AxisRange> {
        self.axis_ranges.get(&axis).copied()
    }

    /// Merge `patch` into a copy of this state.
    pub fn apply(&self, patch: &ViewStatePatch) -> ViewState {
        let mut next = self.clone();
        if let Some(mode) = patch.layout_mode {
            next.layout_mode = mode;
        }
        if let Some(mode) = patch.drag_mode {
            next.drag_mode = mode;
        }
        if let Some(fit) = patch.fit_to_screen {
            next.fit_to_screen = fit;
        }
        for (name, side) in &patch.axis_assignment {
            next.axis_assignment.insert(name.clone(), *side);
        }
        if patch.clear_axis_ranges {
            next.axis_ranges.clear();
        }
        for (axis, range) in &patch.axis_ranges {
            match range {
                Some(r) => {
                    next.axis_ranges.insert(*axis, *r);
                }
                None => {
                    next.axis_ranges.remove(axis);
                }
            }
        }
        next
    }
}

/// Partial update of a [`ViewState`]. Unset fields are left alone; map fields
/// merge entry-wise (a `None` range removes that axis' pin).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewStatePatch {
    pub layout_mode: Option<LayoutMode>,
    pub drag_mode: Option<DragMode>,
    pub fit_to_screen: Option<bool>,
    pub axis_assignment: BTreeMap<String, AxisSide>,
    /// Applied before `axis_ranges`.
    pub clear_axis_ranges: bool,
    pub axis_ranges: BTreeMap<AxisId, Option<AxisRange>>,
}

impl ViewStatePatch {
    pub fn layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = Some(mode);
        self
    }

    pub fn drag_mode(mut self, mode: DragMode) -> Self {
        self.drag_mode = Some(mode);
        self
    }

    pub fn fit_to_screen(mut self, fit: bool) -> Self {
        self.fit_to_screen = Some(fit);
        self
    }

    pub fn assign(mut self, series_name: impl Into<String>, side: AxisSide) -> Self {
        self.axis_assignment.insert(series_name.into(), side);
        self
    }

    pub fn range(mut self, axis: AxisId, range: Option<AxisRange>) -> Self {
        self.axis_ranges.insert(axis, range);
        self
    }

    pub fn clear_ranges(mut self) -> Self {
        self.clear_axis_ranges = true;
        self
    }
}
