//! Input model: pointer buttons and the handle gesture state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up
//! (or between a click and the end of the handle animation). It carries the
//! context needed to keep the handle under the pointer while dragging.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use focal::FocalPoint;

use crate::animation::Tween;
use crate::geometry::Point;

/// DOM `PointerEvent.pointerId`.
pub type PointerId = i32;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch / pen contact).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
    /// Back, forward or any other auxiliary button.
    Other(i16),
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Internal state for the handle gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The handle is held by the pointer.
    Dragging {
        /// The pointer holding the handle. Events from other pointers (a
        /// second finger, a pen) are ignored until it is released.
        pointer_id: PointerId,
        /// Pointer position minus handle centre at pointer-down, so the
        /// handle keeps its offset under the pointer instead of jumping.
        grab: Point,
        /// Whether any pointer-move arrived. A press without movement is not
        /// a drag and commits nothing.
        moved: bool,
    },
    /// The handle is gliding to a clicked position.
    Animating {
        tween: Tween,
        /// Value committed when the glide ends. Kept as a focal point so a
        /// resize mid-glide still lands on the clicked spot.
        target: FocalPoint,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Animating { .. })
    }
}
