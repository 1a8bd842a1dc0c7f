//! Plot coordinates for x cells and tick label formatting.
//!
//! The first CSV column may hold numbers, timestamps or arbitrary labels.
//! [`XDomain::from_cells`] decides which, maps every cell to a plot
//! coordinate and remembers how to render ticks back.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::data::series::CellValue;

/// How x coordinates relate to the original cells.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    /// Cells are numbers, used as-is.
    Numeric,
    /// Cells are timestamps; coordinates are seconds since the UNIX epoch (UTC).
    Time,
    /// Anything else; coordinates are row indices and ticks show the labels.
    Category(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XDomain {
    pub scale: XScale,
    /// One coordinate per cell.
    pub coords: Vec<f64>,
}

impl XDomain {
    pub fn from_cells(cells: &[CellValue]) -> Self {
        if cells.iter().all(|c| c.as_f64().is_some()) {
            return Self {
                scale: XScale::Numeric,
                coords: cells.iter().filter_map(CellValue::as_f64).collect(),
            };
        }
        let stamps: Option<Vec<f64>> = cells
            .iter()
            .map(|c| c.as_text().and_then(parse_timestamp))
            .collect();
        if let Some(coords) = stamps {
            return Self {
                scale: XScale::Time,
                coords,
            };
        }
        Self {
            scale: XScale::Category(cells.iter().map(|c| c.to_string()).collect()),
            coords: (0..cells.len()).map(|i| i as f64).collect(),
        }
    }

    /// Tick label for `value` given the grid step and the visible range.
    pub fn format_tick(&self, value: f64, step: f64, visible: (f64, f64)) -> String {
        match &self.scale {
            XScale::Numeric => format_value(value, 4, step),
            XScale::Time => format_time(value, visible),
            XScale::Category(labels) => {
                let idx = value.round();
                if (value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            }
        }
    }
}

/// Seconds since the epoch for RFC 3339 and common `YYYY-MM-DD[ HH:MM:SS]` forms.
/// Timestamps without an offset are read as UTC.
pub fn parse_timestamp(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64 / 1000.0);
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis() as f64 / 1000.0);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp() as f64)
}

fn secs_to_utc(secs: f64) -> DateTime<Utc> {
    if !secs.is_finite() {
        return DateTime::<Utc>::UNIX_EPOCH;
    }
    let s = secs.floor() as i64;
    let ns = (((secs - s as f64) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(s, ns).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// `HH:MM:SS`, with the date prepended once the visible range crosses a day
/// and milliseconds appended below one minute of span.
pub fn format_time(value: f64, visible: (f64, f64)) -> String {
    let (lo, hi) = if visible.0 <= visible.1 {
        visible
    } else {
        (visible.1, visible.0)
    };
    let start = secs_to_utc(lo);
    let end = secs_to_utc(hi);
    let dt = secs_to_utc(value);

    let base = if start.date_naive() != end.date_naive() {
        if start.year() != end.year() {
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        } else {
            dt.format("%m-%d %H:%M:%S").to_string()
        }
    } else {
        dt.format("%H:%M:%S").to_string()
    };
    if hi - lo < 60.0 {
        format!("{}.{:03}", base, dt.nanosecond() / 1_000_000)
    } else {
        base
    }
}

/// Fixed decimals, switching to scientific notation when the step is far
/// from unity.
pub fn format_value(v: f64, dec_pl: usize, step: f64) -> String {
    let sci = if step.is_finite() && step != 0.0 {
        let exp = step.abs().log10().floor() as i32;
        exp < -(dec_pl as i32) || exp >= dec_pl as i32
    } else {
        false
    };
    if sci {
        format_scientific(v, dec_pl)
    } else {
        let s = format!("{:.*}", dec_pl, v);
        trim_zeros(&s).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Compact scientific notation like `1.23e5` or `-4.00e-2`.
pub fn format_scientific(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0_f64);
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    let exp = value.abs().log10().floor() as i32;
    let mantissa = value / 10f64.powi(exp);
    if exp == 0 {
        format!("{:.*}", digits, mantissa)
    } else {
        format!("{:.*}e{}", digits, mantissa, exp)
    }
}
