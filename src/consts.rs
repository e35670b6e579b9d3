//! Shared constants for the picker crate.

// ── Timing ──────────────────────────────────────────────────────

/// Rendering frames to wait after attach before measuring the image, so the
/// host finishes its own layout pass first.
pub const DEFAULT_DEFERRED_FRAMES: u32 = 2;

/// Duration of the click-to-place handle animation.
pub const DEFAULT_CLICK_ANIMATION_MS: f64 = 200.0;

/// Accepted range for a configured click animation duration.
pub const MIN_CLICK_ANIMATION_MS: f64 = 150.0;
pub const MAX_CLICK_ANIMATION_MS: f64 = 200.0;

// ── DOM contract ────────────────────────────────────────────────

/// Attribute on the picker element holding optional JSON configuration.
pub const CONFIG_ATTRIBUTE: &str = "data-focalpoint-config";

/// Custom property on the preview pointing at the image source.
pub const IMAGE_PROPERTY: &str = "--image";

/// Event raised on the input when a value is committed.
pub const CHANGE_EVENT: &str = "change";
