//! Render sync: the visual state derived from a focal point.
//!
//! A [`RenderFrame`] is computed from the current focal point and the image
//! geometry and contains everything the DOM layer writes: the handle's pixel
//! position, the preview's percentage anchor and whether the reset control is
//! enabled. Nothing here touches the DOM; see [`crate::dom::apply_frame`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use focal::{FocalPoint, css};

use crate::error::PickerError;
use crate::geometry::{Point, Rect};

/// Visual state for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    /// Handle centre in wrapper layout space.
    pub handle: Point,
    /// Focal point shown by the previews.
    pub focal: FocalPoint,
    /// Reset control state: disabled exactly when the value is neutral.
    pub reset_enabled: bool,
}

impl RenderFrame {
    /// Frame with the handle resting on the focal point's pixel position.
    #[must_use]
    pub fn at_rest(focal: FocalPoint, image: &Rect) -> Self {
        Self::with_handle(focal, image.point_at(focal))
    }

    /// Frame with the handle at an explicit position, e.g. mid-drag where the
    /// handle follows the pointer rather than the rounded value.
    #[must_use]
    pub fn with_handle(focal: FocalPoint, handle: Point) -> Self {
        Self { handle, focal, reset_enabled: !focal.is_neutral() }
    }

    /// Reject a frame the DOM cannot render: every coordinate must be
    /// finite.
    ///
    /// # Errors
    ///
    /// [`PickerError::InvalidArgument`] naming the first style property that
    /// would receive a non-finite value.
    pub fn check(&self) -> Result<(), PickerError> {
        let values = [
            ("left", self.handle.x),
            ("top", self.handle.y),
            (css::LEFT_PROPERTY, self.focal.x),
            (css::TOP_PROPERTY, self.focal.y),
        ];
        match values.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((setter, value)) => Err(PickerError::InvalidArgument { setter, value: value.to_string() }),
            None => Ok(()),
        }
    }

    /// Value for the handle's `left` style.
    #[must_use]
    pub fn handle_left(&self) -> String {
        format!("{}px", self.handle.x)
    }

    /// Value for the handle's `top` style.
    #[must_use]
    pub fn handle_top(&self) -> String {
        format!("{}px", self.handle.y)
    }

    /// Value for the preview's `--focal-left` property.
    #[must_use]
    pub fn preview_left(&self) -> String {
        css::percent(self.focal.x)
    }

    /// Value for the preview's `--focal-top` property.
    #[must_use]
    pub fn preview_top(&self) -> String {
        css::percent(self.focal.y)
    }

    /// `background-position` for the landscape and portrait previews.
    #[must_use]
    pub fn background_position(&self) -> String {
        css::object_position(self.focal)
    }
}
