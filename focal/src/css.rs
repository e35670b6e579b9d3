//! CSS directives for rendering a focal point downstream.
//!
//! The picker preview and the host's `<img>` output both express the focal
//! point as percentages, either through `object-position` or through the
//! `--focal-left` / `--focal-top` custom properties.

use crate::meta::FocalPointMeta;
use crate::{FocalPoint, round2};

#[cfg(test)]
#[path = "css_test.rs"]
mod css_test;

/// Custom property carrying the left component.
pub const LEFT_PROPERTY: &str = "--focal-left";
/// Custom property carrying the top component.
pub const TOP_PROPERTY: &str = "--focal-top";

/// Format a fraction as a CSS percentage, e.g. `0.25` → `"25%"`.
#[must_use]
pub fn percent(fraction: f64) -> String {
    format!("{}%", round2(fraction * 100.0))
}

/// `"<left>% <top>%"`, usable as an `object-position` or
/// `background-position` value.
#[must_use]
pub fn object_position(point: FocalPoint) -> String {
    format!("{} {}", percent(point.x), percent(point.y))
}

/// `object-position: <left>% <top>%;`
#[must_use]
pub fn object_position_style(point: FocalPoint) -> String {
    format!("object-position: {};", object_position(point))
}

/// `--focal-left: <left>%; --focal-top: <top>%;`
#[must_use]
pub fn custom_properties_style(point: FocalPoint) -> String {
    format!("{LEFT_PROPERTY}: {}; {TOP_PROPERTY}: {};", percent(point.x), percent(point.y))
}

/// Append a declaration block to an existing inline style.
#[must_use]
pub fn merge_style(existing: Option<&str>, addition: &str) -> String {
    let existing = existing.map_or("", str::trim);
    if existing.is_empty() {
        addition.to_owned()
    } else if existing.ends_with(';') {
        format!("{existing} {addition}")
    } else {
        format!("{existing}; {addition}")
    }
}

/// The inline style for an image with the given metadata, or `None` when the
/// image carries no focal point.
#[must_use]
pub fn image_style(meta: Option<&FocalPointMeta>, existing: Option<&str>) -> Option<String> {
    let point = meta?.point();
    Some(merge_style(existing, &object_position_style(point)))
}
