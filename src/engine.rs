//! Picker controller: focal point state and the handle gesture machine.
//!
//! [`PickerCore`] holds everything that does not depend on the browser, so it
//! can be tested natively. DOM events are translated into calls on it by
//! [`crate::widget`], and the returned [`Action`]s are written back to the
//! DOM by [`crate::dom`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use focal::{FocalPoint, NEUTRAL};

use crate::animation::Tween;
use crate::consts::DEFAULT_CLICK_ANIMATION_MS;
use crate::geometry::{Point, Rect};
use crate::input::{Button, InputState, PointerId};
use crate::render::RenderFrame;

/// Side effects returned from input handlers for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write the frame to the handle, previews and reset control.
    Render(RenderFrame),
    /// Write the value into the input without notifying the host.
    WriteValue(String),
    /// Write the value into the input and raise a change notification.
    Commit(String),
    /// Show or hide the preview; a drag started or ended.
    ShowPreview(bool),
    /// Ask for another animation frame.
    RequestFrame,
}

/// Controller state for one picker instance.
#[derive(Debug, Clone)]
pub struct PickerCore {
    /// The current value, always rounded and within `[0, 1]`.
    pub focal: FocalPoint,
    /// The image box in wrapper layout space.
    pub image: Rect,
    /// Handle centre in wrapper layout space.
    pub handle: Point,
    pub input: InputState,
    pub click_animation_ms: f64,
}

impl Default for PickerCore {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_ANIMATION_MS)
    }
}

impl PickerCore {
    #[must_use]
    pub fn new(click_animation_ms: f64) -> Self {
        Self {
            focal: NEUTRAL,
            image: Rect::default(),
            handle: Point::default(),
            input: InputState::Idle,
            click_animation_ms,
        }
    }

    // --- Data inputs ---

    /// Take a value from the host's input (initial read or external change).
    ///
    /// Any gesture in progress is abandoned. A value that is not in canonical
    /// form (legacy percentages, extra whitespace, malformed) is rewritten in
    /// the input without a change notification.
    pub fn load_value(&mut self, raw: &str) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        self.focal = FocalPoint::parse(raw);
        actions.push(Action::Render(self.rest()));

        let canonical = self.focal.serialize();
        if canonical != raw.trim() {
            actions.push(Action::WriteValue(canonical));
        }
        actions
    }

    /// Update the image geometry (first measurement or window resize).
    pub fn set_image(&mut self, image: Rect) -> Vec<Action> {
        let previous = std::mem::replace(&mut self.image, image);
        if self.input.is_idle() {
            return vec![Action::Render(self.rest())];
        }
        match &mut self.input {
            InputState::Idle => {}
            InputState::Dragging { .. } => self.handle = image.contain(self.handle),
            InputState::Animating { tween, target } => {
                tween.from = previous.reproject(tween.from, &image);
                tween.to = image.point_at(*target);
                self.handle = previous.reproject(self.handle, &image);
            }
        }
        vec![Action::Render(self.frame())]
    }

    // --- Input events ---

    /// Pointer pressed on the handle.
    pub fn on_pointer_down(&mut self, pointer_id: PointerId, pointer: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.input.is_dragging() {
            return Vec::new();
        }
        // Grabbing the handle mid-animation stops it where it is.
        self.input = InputState::Dragging { pointer_id, grab: pointer - self.handle, moved: false };
        Vec::new()
    }

    /// Pointer moved anywhere in the window.
    pub fn on_pointer_move(&mut self, pointer_id: PointerId, pointer: Point) -> Vec<Action> {
        let InputState::Dragging { pointer_id: holder, grab, moved } = self.input else {
            return Vec::new();
        };
        if holder != pointer_id {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if !moved {
            actions.push(Action::ShowPreview(true));
        }
        self.input = InputState::Dragging { pointer_id, grab, moved: true };

        self.handle = self.image.contain(pointer - grab);
        if let Some(focal) = self.image.focal_at(self.handle) {
            self.focal = focal;
        }
        actions.push(Action::Render(self.frame()));
        actions.push(Action::WriteValue(self.focal.serialize()));
        actions
    }

    /// Pointer released or cancelled anywhere in the window. Ends a drag held
    /// by that pointer and commits it.
    pub fn on_pointer_up(&mut self, pointer_id: PointerId) -> Vec<Action> {
        let InputState::Dragging { pointer_id: holder, moved, .. } = self.input else {
            return Vec::new();
        };
        if holder != pointer_id {
            return Vec::new();
        }
        self.input = InputState::Idle;
        if !moved {
            return Vec::new();
        }
        vec![Action::ShowPreview(false), Action::Commit(self.focal.serialize())]
    }

    /// Click on the image surface: glide the handle there, then commit.
    pub fn on_click(&mut self, pointer: Point) -> Vec<Action> {
        if self.input.is_dragging() {
            return Vec::new();
        }
        let to = self.image.contain(pointer);
        let target = self.image.focal_at(to).unwrap_or(self.focal);
        self.input = InputState::Animating { tween: Tween::new(self.handle, to, self.click_animation_ms), target };
        vec![Action::RequestFrame]
    }

    /// Animation frame callback with its timestamp.
    pub fn on_frame(&mut self, now_ms: f64) -> Vec<Action> {
        let InputState::Animating { mut tween, target } = self.input else {
            return Vec::new();
        };
        let sample = tween.sample(now_ms);
        self.handle = sample.position;

        if !sample.done {
            self.input = InputState::Animating { tween, target };
            return vec![Action::Render(self.frame()), Action::RequestFrame];
        }

        self.input = InputState::Idle;
        self.focal = target;
        self.handle = self.image.contain(self.handle);
        vec![Action::Render(self.frame()), Action::Commit(self.focal.serialize())]
    }

    /// Reset to the neutral value (double-click on the handle or the reset
    /// button) and commit.
    pub fn reset(&mut self) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        self.focal = NEUTRAL;
        actions.push(Action::Render(self.rest()));
        actions.push(Action::Commit(self.focal.serialize()));
        actions
    }

    /// Abandon any gesture without committing, e.g. on detach.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let was_shown = matches!(self.input, InputState::Dragging { moved: true, .. });
        self.input = InputState::Idle;
        if was_shown { vec![Action::ShowPreview(false)] } else { Vec::new() }
    }

    // --- Queries ---

    /// The frame for the current state.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::with_handle(self.focal, self.handle)
    }

    /// Move the handle onto the focal point's pixel position and return that
    /// frame.
    fn rest(&mut self) -> RenderFrame {
        let frame = RenderFrame::at_rest(self.focal, &self.image);
        self.handle = frame.handle;
        frame
    }

    /// The serialized value.
    #[must_use]
    pub fn value(&self) -> String {
        self.focal.serialize()
    }
}
