//! Focal point value model shared by the picker widget and host-side helpers.
//!
//! A focal point is a pair of normalized coordinates in `[0, 1]` with two
//! decimals of precision. The textual form stored in the host's form field is
//! `"<left> <top>"`. Legacy values written as percentages (`"75 25"`) are
//! accepted on parse and normalized; percentages are only produced again at
//! the CSS boundary (see [`css`]).

pub mod css;
pub mod meta;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};


/// The neutral focal point: image centre, equivalent to no custom value.
pub const NEUTRAL: FocalPoint = FocalPoint { x: 0.5, y: 0.5 };

/// Error returned by [`FocalPoint::try_parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The value did not split into exactly two whitespace-separated tokens.
    #[error("expected 2 coordinate tokens, found {0}")]
    TokenCount(usize),
    /// A token was not a finite number.
    #[error("coordinate token is not a finite number: {0:?}")]
    NotNumeric(String),
}

/// A normalized focal point. `x` is the left offset and `y` the top offset,
/// both as fractions of the image size.
///
/// Serde goes through the canonical string form, so a deserialized point is
/// always rounded and within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
}

impl Default for FocalPoint {
    fn default() -> Self {
        NEUTRAL
    }
}

impl FocalPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Parse a stored value, falling back to [`NEUTRAL`] when it is malformed.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Self::try_parse(raw) {
            Ok(point) => point,
            Err(err) => {
                log::debug!("focal point {raw:?} rejected ({err}), using neutral");
                NEUTRAL
            }
        }
    }

    /// Parse a stored value.
    ///
    /// Components above `1` are read as percentages and divided by 100. The
    /// result is rounded to two decimals and clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TokenCount`] unless there are exactly two tokens,
    /// and [`ParseError::NotNumeric`] for a token that is not a finite number.
    pub fn try_parse(raw: &str) -> Result<Self, ParseError> {
        let tokens = raw.split_whitespace().collect::<Vec<_>>();
        let [left, top] = tokens.as_slice() else {
            return Err(ParseError::TokenCount(tokens.len()));
        };
        let x = parse_component(left)?;
        let y = parse_component(top)?;
        Ok(Self { x, y }.clamp())
    }

    /// The canonical `"<x> <y>"` form written back to the host. Components
    /// are clamped to `[0, 1]` and rounded.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Whether this is exactly the neutral value. No tolerance is applied;
    /// values are already rounded to two decimals.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        #[allow(clippy::float_cmp)]
        let neutral = self.x == NEUTRAL.x && self.y == NEUTRAL.y;
        neutral
    }

    /// Clamp both components to `[0, 1]`.
    #[must_use]
    pub fn clamp(self) -> Self {
        Self { x: self.x.clamp(0.0, 1.0), y: self.y.clamp(0.0, 1.0) }
    }

    /// Round both components to two decimals.
    #[must_use]
    pub fn round(self) -> Self {
        Self { x: round2(self.x), y: round2(self.y) }
    }

    /// Left component as a percentage.
    #[must_use]
    pub fn left_percent(&self) -> f64 {
        round2(self.x * 100.0)
    }

    /// Top component as a percentage.
    #[must_use]
    pub fn top_percent(&self) -> f64 {
        round2(self.y * 100.0)
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for FocalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canonical = self.clamp().round();
        write!(f, "{} {}", canonical.x, canonical.y)
    }
}

impl TryFrom<String> for FocalPoint {
    type Error = ParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::try_parse(&raw)
    }
}

impl From<FocalPoint> for String {
    fn from(point: FocalPoint) -> Self {
        point.serialize()
    }
}

impl FromStr for FocalPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

/// Normalize one stored component: percent to fraction, then round.
///
/// Shared with [`meta`], which applies the same rule to numeric metadata.
pub(crate) fn normalize_component(value: f64) -> f64 {
    let value = if value > 1.0 { value / 100.0 } else { value };
    round2(value)
}

fn parse_component(token: &str) -> Result<f64, ParseError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(normalize_component(value)),
        _ => Err(ParseError::NotNumeric(token.to_owned())),
    }
}

/// Round to two decimals. Adding `0.0` folds `-0.0` into `0.0`.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
