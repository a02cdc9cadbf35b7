//! Pure display derivations for row fields.
//!
//! Contract (mirrors the page renderer these tables came from):
//! - absent or short inputs render as the empty string, never an error
//! - distances render with exactly one decimal digit
//! - list fields render comma-joined, floats in shortest form

use std::fmt;

/// Element `index` of a two-element pair field. Absent, empty or short
/// pairs render blank.
pub fn split_pair(pair: &[String], index: usize) -> String {
    pair.get(index).cloned().unwrap_or_default()
}

/// One value of an optional from/to distance pair, one-decimal fixed.
/// An empty sequence means "no distance known" and renders blank, not
/// `0.0`; an out-of-range index renders blank as well.
pub fn format_distance(kms: &[f64], index: usize) -> String {
    match kms.get(index) {
        Some(km) => one_decimal(*km),
        None => String::new(),
    }
}

/// One-decimal fixed-point rendering, e.g. `12.34` -> `"12.3"`.
pub fn one_decimal(km: f64) -> String {
    format!("{km:.1}")
}

/// Shortest round-trip rendering of a float, e.g. `84.0` -> `"84"`.
pub fn float_text(v: f64) -> String {
    format!("{v}")
}

/// Comma-joined float list, shortest form per element.
pub fn join_floats(vs: &[f64]) -> String {
    vs.iter()
        .map(|v| float_text(*v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Comma-joined string list.
pub fn join_text(vs: &[String]) -> String {
    vs.join(",")
}

/// Renders an optional value, absent becoming the blank display.
pub fn opt_text<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
