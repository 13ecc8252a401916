/// Display helpers shared by the screens
use std::fmt::Display;

pub const NOT_AVAILABLE: &str = "N/A";

/// Value or `N/A`
pub fn or_na<T: Display>(v: Option<T>) -> String {
    v.map(|x| x.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Fixed-precision float with a unit suffix, or `N/A`
pub fn measure(v: Option<f64>, precision: usize, unit: &str) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.precision$} {unit}").trim_end().to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Empty text renders as `N/A`
pub fn text_or_na(v: Option<&str>) -> String {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub fn active_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

/// `successful / attempted`, `N/A` when either counter is missing
pub fn landings(successful: Option<u32>, attempted: Option<u32>) -> String {
    match (successful, attempted) {
        (Some(s), Some(a)) => format!("{s} / {a}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}
