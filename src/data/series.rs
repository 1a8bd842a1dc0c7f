//! Series: one named column of a CSV file plotted against the shared x column.

use std::fmt;

use serde::Serialize;

/// A single CSV cell after numeric coercion.
///
/// Cells that parse as `f64` become [`CellValue::Number`]; everything else is
/// kept verbatim as [`CellValue::Text`] so the renderer can decide how to plot it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Coerce a raw cell. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Number(_) => None,
            CellValue::Text(s) => Some(s.as_str()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One plotted column. All series of a tab share the same `x` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub x: Vec<CellValue>,
    pub y: Vec<CellValue>,
}

impl Series {
    pub fn new(name: impl Into<String>, x: Vec<CellValue>, y: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Build a series from plain numbers (mostly useful in tests and demos).
    pub fn from_numbers(name: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self::new(
            name,
            x.iter().copied().map(CellValue::from).collect(),
            y.iter().copied().map(CellValue::from).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}
