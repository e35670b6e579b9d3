//! Focal point picker widget for an image in a media library admin screen.
//!
//! This crate is compiled to WebAssembly and runs in the browser. A picker
//! element holds a text input with the focal point value (`"<x> <y>"`, both
//! in `[0, 1]`), a draggable handle and a preview. On attach the handle is
//! moved over the image being edited and the preview into `<body>`; dragging
//! the handle, clicking the image or resetting updates the input and raises a
//! `change` event for the host form.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`widget`] | The `FocalPointPicker` export, listeners and frame scheduling |
//! | [`engine`] | Testable [`engine::PickerCore`] and its [`engine::Action`]s |
//! | [`lifecycle`] | Attach/detach sequence behind the [`lifecycle::Host`] seam |
//! | [`dom`] | Element lookup, mounting and DOM writes |
//! | [`input`] | Pointer buttons and the gesture state machine |
//! | [`animation`] | Click-to-place tween |
//! | [`geometry`] | Points, the image box and focal/pixel conversion |
//! | [`render`] | Visual state derived from a focal point |
//! | [`config`] | Per-picker JSON configuration |
//! | [`error`] | Attach and runtime errors |
//! | [`consts`] | Shared constants (timings, attribute names) |
//!
//! The value model itself lives in the `focal` crate.

pub mod animation;
pub mod config;
pub mod consts;
pub mod dom;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod render;
pub mod widget;

pub use focal::{FocalPoint, NEUTRAL};
pub use widget::FocalPointPicker;
