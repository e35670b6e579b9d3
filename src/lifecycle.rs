//! Attach/detach lifecycle for one picker instance.
//!
//! ```text
//! Detached ──attach──▶ AwaitingFrames ──frames──▶ (locate) ──▶ Attached
//!                                                    │   ▲
//!                                                    ▼   │ image load (once)
//!                                               AwaitingImage
//! ```
//!
//! Measuring is deferred by a fixed number of rendering frames after attach
//! so the host completes its own layout first. If the image has not decoded
//! by then, mounting waits for its load event. Any failure leaves the picker
//! detached and inert; detach undoes whatever was done.
//!
//! DOM work is behind the [`Host`] trait so the state machine can be driven
//! without a browser.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use crate::error::AttachError;

/// DOM operations the lifecycle needs from its environment.
pub trait Host {
    /// Whether the picker element is still in the document.
    fn is_connected(&self) -> bool;

    /// Find the picker's own children (input, handle, preview).
    ///
    /// # Errors
    ///
    /// [`AttachError::MissingElement`] naming the first child not found.
    fn locate_views(&mut self) -> Result<(), AttachError>;

    /// Find and remember the image wrapper for this picker.
    ///
    /// # Errors
    ///
    /// [`AttachError::MissingImageWrap`] when no configured root matches.
    fn locate_wrap(&mut self) -> Result<(), AttachError>;

    /// Whether the wrapper carries the initialized marker.
    fn wrap_marked(&self) -> bool;

    /// Set or clear the initialized marker on the wrapper.
    fn set_wrap_marked(&mut self, marked: bool);

    /// Find and remember the image inside the wrapper.
    ///
    /// # Errors
    ///
    /// [`AttachError::MissingImage`] when the wrapper holds no image.
    fn locate_image(&mut self) -> Result<(), AttachError>;

    /// Whether the image has finished loading.
    fn image_complete(&self) -> bool;

    /// Move the handle next to the image and the preview to the overlay
    /// layer. Must not move anything if it fails.
    ///
    /// # Errors
    ///
    /// [`AttachError::MissingElement`] when a view cannot be moved.
    fn mount(&mut self) -> Result<(), AttachError>;

    /// Return the handle and preview to the picker element.
    fn unmount(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Detached,
    /// Waiting out the post-attach frames.
    AwaitingFrames { remaining: u32 },
    /// Located and marked; waiting for the image to load.
    AwaitingImage,
    Attached,
}

/// What the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Call [`Lifecycle::on_frame`] on the next animation frame.
    WaitFrame,
    /// Subscribe once to the image's load event and call
    /// [`Lifecycle::on_image_load`].
    WaitImageLoad,
    /// Views are mounted; start the picker.
    Ready,
    /// Nothing to do: already attaching/attached, or a stale callback.
    Idle,
    /// Attach was abandoned; the picker stays inert until attached again.
    Inert(AttachError),
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Phase,
    deferred_frames: u32,
    /// Whether this instance set the wrapper marker and must clear it.
    owns_marker: bool,
}

impl Lifecycle {
    #[must_use]
    pub fn new(deferred_frames: u32) -> Self {
        Self { phase: Phase::Detached, deferred_frames, owns_marker: false }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.phase == Phase::Attached
    }

    /// Start attaching. A no-op unless detached.
    pub fn attach(&mut self, host: &mut impl Host) -> Step {
        if self.phase != Phase::Detached {
            return Step::Idle;
        }
        if self.deferred_frames == 0 {
            return self.locate(host);
        }
        self.phase = Phase::AwaitingFrames { remaining: self.deferred_frames };
        Step::WaitFrame
    }

    /// A rendering frame passed.
    pub fn on_frame(&mut self, host: &mut impl Host) -> Step {
        let Phase::AwaitingFrames { remaining } = self.phase else {
            return Step::Idle;
        };
        if remaining > 1 {
            self.phase = Phase::AwaitingFrames { remaining: remaining - 1 };
            return Step::WaitFrame;
        }
        self.locate(host)
    }

    /// The image finished loading. Only acts while waiting for it.
    pub fn on_image_load(&mut self, host: &mut impl Host) -> Step {
        if self.phase != Phase::AwaitingImage {
            return Step::Idle;
        }
        self.mount(host)
    }

    /// Undo everything attach did. Safe in any phase.
    pub fn detach(&mut self, host: &mut impl Host) {
        if self.phase == Phase::Attached {
            host.unmount();
        }
        self.release_marker(host);
        self.phase = Phase::Detached;
    }

    fn locate(&mut self, host: &mut impl Host) -> Step {
        if !host.is_connected() {
            return self.abort(AttachError::Disconnected);
        }
        if let Err(err) = host.locate_views() {
            return self.abort(err);
        }
        if let Err(err) = host.locate_wrap() {
            return self.abort(err);
        }
        if host.wrap_marked() {
            return self.abort(AttachError::AlreadyInitialized);
        }
        host.set_wrap_marked(true);
        self.owns_marker = true;

        if let Err(err) = host.locate_image() {
            self.release_marker(host);
            return self.abort(err);
        }
        if host.image_complete() {
            self.mount(host)
        } else {
            self.phase = Phase::AwaitingImage;
            Step::WaitImageLoad
        }
    }

    fn mount(&mut self, host: &mut impl Host) -> Step {
        match host.mount() {
            Ok(()) => {
                self.phase = Phase::Attached;
                Step::Ready
            }
            Err(err) => {
                self.release_marker(host);
                self.abort(err)
            }
        }
    }

    fn abort(&mut self, err: AttachError) -> Step {
        self.phase = Phase::Detached;
        Step::Inert(err)
    }

    fn release_marker(&mut self, host: &mut impl Host) {
        if self.owns_marker {
            host.set_wrap_marked(false);
            self.owns_marker = false;
        }
    }
}
