//! Picker configuration parsed from the picker element.
//!
//! The host may put a JSON object in the element's `data-focalpoint-config`
//! attribute. Every field is optional; absent fields keep their defaults.
//!
//! ```json
//! { "clickAnimationMs": 150, "selectors": { "reset": ".my-reset" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CLICK_ANIMATION_MS, DEFAULT_DEFERRED_FRAMES, MAX_CLICK_ANIMATION_MS, MIN_CLICK_ANIMATION_MS,
};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid picker config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Selectors for the picker's own children, resolved inside the picker
/// element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub input: String,
    pub handle: String,
    pub preview: String,
    pub reset: String,
    pub landscape: String,
    pub portrait: String,
    /// Image inside the located wrapper.
    pub image: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            input: "[data-focalpoint-input], input".into(),
            handle: "[data-focalpoint-handle]".into(),
            preview: "[data-focalpoint-preview]".into(),
            reset: "[data-focalpoint-reset]".into(),
            landscape: "[data-landscape]".into(),
            portrait: "[data-portrait]".into(),
            image: "img".into(),
        }
    }
}

/// Where to find the image wrapper: the closest ancestor matching `root`,
/// then the first descendant of it matching `wrap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRoot {
    pub root: String,
    pub wrap: String,
}

impl ImageRoot {
    fn new(root: &str, wrap: &str) -> Self {
        Self { root: root.into(), wrap: wrap.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    pub selectors: Selectors,
    /// Tried in order; the first root that is an ancestor of the picker wins.
    pub image_roots: Vec<ImageRoot>,
    /// Marker attribute on a wrapper bound to a picker.
    pub wrap_marker: String,
    /// Attribute on `<body>` while a drag is in progress.
    pub dragging_marker: String,
    /// Class toggled on the preview while a drag is in progress.
    pub preview_visible_class: String,
    pub click_animation_ms: f64,
    pub deferred_frames: u32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            image_roots: vec![
                // Media modal.
                ImageRoot::new(".media-frame-content", ".thumbnail-image"),
                // Classic attachment edit screen.
                ImageRoot::new("#post-body-content", ".wp_attachment_image p"),
            ],
            wrap_marker: "data-fcp-wrap".into(),
            dragging_marker: "data-fcp-dragging".into(),
            preview_visible_class: "is-visible".into(),
            click_animation_ms: DEFAULT_CLICK_ANIMATION_MS,
            deferred_frames: DEFAULT_DEFERRED_FRAMES,
        }
    }
}

impl PickerConfig {
    /// Parse a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `raw` is not a valid config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config.normalized())
    }

    /// Config from the picker element's attribute. Missing or blank uses the
    /// defaults; an invalid value is logged and also uses the defaults.
    #[must_use]
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default picker config");
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.click_animation_ms = if self.click_animation_ms.is_finite() {
            self.click_animation_ms.clamp(MIN_CLICK_ANIMATION_MS, MAX_CLICK_ANIMATION_MS)
        } else {
            DEFAULT_CLICK_ANIMATION_MS
        };
        if self.image_roots.is_empty() {
            self.image_roots = Self::default().image_roots;
        }
        self
    }
}
