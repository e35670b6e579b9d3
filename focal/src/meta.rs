//! Persisted metadata shape: `{ "left": f64, "top": f64 }`.
//!
//! Values are stored as fractions in `[0, 1]`. Older records written as
//! percentages are normalized when read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FocalPoint, NEUTRAL, normalize_component};

#[cfg(test)]
#[path = "meta_test.rs"]
mod meta_test;

/// Error returned when stored metadata cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetaError {
    /// The stored record is not a JSON object.
    #[error("focal point metadata must be an object")]
    NotAnObject,
    /// A field holds something other than a number or numeric string.
    #[error("focal point field `{field}` is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },
}

/// Focal point metadata as persisted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalPointMeta {
    pub left: f64,
    pub top: f64,
}

impl Default for FocalPointMeta {
    fn default() -> Self {
        Self::from(NEUTRAL)
    }
}

impl From<FocalPoint> for FocalPointMeta {
    fn from(point: FocalPoint) -> Self {
        let point = point.round().clamp();
        Self { left: point.x, top: point.y }
    }
}

impl From<FocalPointMeta> for FocalPoint {
    fn from(meta: FocalPointMeta) -> Self {
        meta.point()
    }
}

impl FocalPointMeta {
    /// Read a stored record. Missing or empty fields fall back to the
    /// neutral component.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::NotAnObject`] if `value` is not an object and
    /// [`MetaError::NotNumeric`] if a field cannot be read as a number.
    pub fn from_json(value: &Value) -> Result<Self, MetaError> {
        let Some(record) = value.as_object() else {
            return Err(MetaError::NotAnObject);
        };
        let left = numeric_field(record.get("left"), "left")?;
        let top = numeric_field(record.get("top"), "top")?;
        Ok(Self { left: sanitize(left), top: sanitize(top) })
    }

    /// Build metadata from a submitted form value.
    ///
    /// An empty submission returns `None`: the stored record is left as is.
    /// Malformed submissions resolve to the neutral point.
    #[must_use]
    pub fn from_submitted(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self::from(FocalPoint::parse(raw)))
    }

    /// The sanitized focal point described by this record.
    #[must_use]
    pub fn point(&self) -> FocalPoint {
        FocalPoint::new(sanitize(Some(self.left)), sanitize(Some(self.top)))
    }

    /// The record as stored JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::json!({ "left": self.left, "top": self.top })
    }
}

/// Sanitize one stored component: missing or non-finite becomes `0.5`,
/// percentages become fractions, then round to two decimals and clamp.
#[must_use]
pub fn sanitize(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => normalize_component(v).clamp(0.0, 1.0),
        _ => NEUTRAL.x,
    }
}

fn numeric_field(value: Option<&Value>, field: &'static str) -> Result<Option<f64>, MetaError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| MetaError::NotNumeric { field, value: s.clone() }),
        Some(other) => Err(MetaError::NotNumeric { field, value: other.to_string() }),
    }
}
