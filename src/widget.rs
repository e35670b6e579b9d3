//! The `FocalPointPicker` export: event wiring and frame scheduling.
//!
//! ```js
//! import init, { FocalPointPicker } from "./focal_point_picker.js";
//! await init();
//! const picker = new FocalPointPicker(document.querySelector(".focalpoint-picker"));
//! picker.attach();
//! ```
//!
//! Event listeners and pending frames are owned by the picker and dropped on
//! [`FocalPointPicker::detach`], which unsubscribes them. Handlers hold weak
//! references so a dropped picker is never kept alive by its listeners.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent, PointerEvent};

use crate::config::PickerConfig;
use crate::consts::{CHANGE_EVENT, CONFIG_ATTRIBUTE};
use crate::dom::{self, DomHost, Views};
use crate::engine::{Action, PickerCore};
use crate::error::{AttachError, PickerError};
use crate::input::Button;
use crate::lifecycle::{Lifecycle, Phase, Step};

/// Install the panic hook and console logger when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
}

pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("logger already installed");
    }
}

struct Inner {
    config: Rc<PickerConfig>,
    host: DomHost,
    lifecycle: Lifecycle,
    core: PickerCore,
    listeners: Vec<EventListener>,
    pending_load: Option<EventListener>,
    pending_frame: Option<AnimationFrame>,
    /// Set while the picker dispatches its own change event.
    committing: Cell<bool>,
}

type Shared = Rc<RefCell<Inner>>;

/// A focal point picker bound to one picker element.
#[wasm_bindgen]
pub struct FocalPointPicker {
    inner: Shared,
}

#[wasm_bindgen]
impl FocalPointPicker {
    /// Bind to a picker element. Configuration is read from its
    /// `data-focalpoint-config` attribute. Nothing is touched until
    /// [`attach`](Self::attach).
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        let config = PickerConfig::from_attribute(element.get_attribute(CONFIG_ATTRIBUTE).as_deref());
        let inner = Inner {
            host: DomHost::new(element, &config),
            lifecycle: Lifecycle::new(config.deferred_frames),
            core: PickerCore::new(config.click_animation_ms),
            config: Rc::new(config),
            listeners: Vec::new(),
            pending_load: None,
            pending_frame: None,
            committing: Cell::new(false),
        };
        Self { inner: Rc::new(RefCell::new(inner)) }
    }

    /// Start attaching: wait the configured frames, locate the image and
    /// mount. Failures leave the picker inert and are logged.
    pub fn attach(&self) {
        advance(&self.inner, |lifecycle, host| lifecycle.attach(host));
    }

    /// Unsubscribe every listener, cancel pending frames and return the views
    /// to the picker element. Safe to call in any state.
    pub fn detach(&self) {
        detach(&self.inner);
    }

    /// Reset to the neutral value and commit.
    ///
    /// # Errors
    ///
    /// Throws if the picker is busy or a DOM write fails.
    pub fn reset(&self) -> Result<(), JsValue> {
        if !self.is_attached() {
            return Ok(());
        }
        drive(&self.inner, PickerCore::reset).map_err(JsValue::from)
    }

    /// The current value in canonical `"<x> <y>"` form.
    #[must_use]
    pub fn value(&self) -> String {
        self.inner.borrow().core.value()
    }

    #[wasm_bindgen(js_name = isAttached)]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().lifecycle.is_attached()
    }
}

impl Drop for FocalPointPicker {
    fn drop(&mut self) {
        detach(&self.inner);
    }
}

// --- Lifecycle ---

fn advance(shared: &Shared, f: impl FnOnce(&mut Lifecycle, &mut DomHost) -> Step) {
    let step = {
        let Ok(mut guard) = shared.try_borrow_mut() else {
            log::warn!("picker busy; attach step dropped");
            return;
        };
        let inner = &mut *guard;
        f(&mut inner.lifecycle, &mut inner.host)
    };
    match step {
        Step::WaitFrame => schedule_frame(shared),
        Step::WaitImageLoad => wait_for_image(shared),
        Step::Ready => {
            if let Err(err) = start_picker(shared) {
                log::error!("failed to start picker: {err}");
                detach(shared);
            }
        }
        Step::Idle => {}
        Step::Inert(err) if err.is_routine() => log::debug!("picker not attached: {err}"),
        Step::Inert(err) => log::warn!("picker not attached: {err}"),
    }
}

fn wait_for_image(shared: &Shared) {
    let Some(image) = shared.borrow().host.image().cloned() else {
        return;
    };
    let weak = Rc::downgrade(shared);
    let listener = EventListener::once(&image, "load", move |_| {
        if let Some(shared) = weak.upgrade() {
            advance(&shared, |lifecycle, host| lifecycle.on_image_load(host));
        }
    });
    shared.borrow_mut().pending_load = Some(listener);
}

fn detach(shared: &Shared) {
    let (actions, views, config) = {
        let Ok(mut guard) = shared.try_borrow_mut() else {
            log::warn!("picker busy; detach skipped");
            return;
        };
        let inner = &mut *guard;
        inner.listeners.clear();
        inner.pending_load = None;
        inner.pending_frame = None;
        let actions = inner.core.cancel_gesture();
        let views = inner.host.views().cloned();
        inner.lifecycle.detach(&mut inner.host);
        (actions, views, Rc::clone(&inner.config))
    };
    if let Some(views) = views {
        if let Err(err) = apply(shared, &views, &config, actions) {
            log::warn!("detach cleanup failed: {err}");
        }
    }
}

/// Subscribe the picker's listeners and render the initial state.
fn start_picker(shared: &Shared) -> Result<(), PickerError> {
    let (views, image) = {
        let inner = shared.borrow();
        let views = inner.host.views().cloned();
        let image = inner.host.image().cloned();
        match (views, image) {
            (Some(views), Some(image)) => (views, image),
            (None, _) => return Err(AttachError::MissingElement("handle").into()),
            (_, None) => return Err(AttachError::MissingImage.into()),
        }
    };

    let window = web_sys::window().ok_or_else(|| PickerError::Dom("no window".into()))?;
    let weak = Rc::downgrade(shared);
    let mut listeners = Vec::new();

    listeners.push(EventListener::new_with_options(
        &views.handle,
        "pointerdown",
        EventListenerOptions::enable_prevent_default(),
        on_pointer(&weak, |inner, event| {
            event.prevent_default();
            let pointer = inner.host.to_local(event.client_x(), event.client_y());
            inner.core.on_pointer_down(event.pointer_id(), pointer, Button::from_dom(event.button()))
        }),
    ));
    listeners.push(EventListener::new(
        &window,
        "pointermove",
        on_pointer(&weak, |inner, event| {
            let pointer = inner.host.to_local(event.client_x(), event.client_y());
            inner.core.on_pointer_move(event.pointer_id(), pointer)
        }),
    ));
    for name in ["pointerup", "pointercancel"] {
        listeners.push(EventListener::new(
            &window,
            name,
            on_pointer(&weak, |inner, event| inner.core.on_pointer_up(event.pointer_id())),
        ));
    }
    listeners.push(EventListener::new(
        &image,
        "click",
        on_mouse(&weak, |inner, event| {
            let pointer = inner.host.to_local(event.client_x(), event.client_y());
            inner.core.on_click(pointer)
        }),
    ));
    listeners.push(EventListener::new(&views.handle, "dblclick", on_event(&weak, |inner, _| inner.core.reset())));
    if let Some(reset) = &views.reset {
        listeners.push(EventListener::new(
            reset,
            "click",
            on_event(&weak, |inner, event| {
                event.prevent_default();
                inner.core.reset()
            }),
        ));
    }
    listeners.push(EventListener::new(
        &views.input,
        CHANGE_EVENT,
        on_event(&weak, |inner, _| {
            if inner.committing.get() {
                return Vec::new();
            }
            let raw = inner.host.views().map(|views| views.input.value()).unwrap_or_default();
            inner.core.load_value(&raw)
        }),
    ));
    listeners.push(EventListener::new(
        &window,
        "resize",
        on_event(&weak, |inner, _| {
            let image = inner.host.measure();
            inner.core.set_image(image)
        }),
    ));

    shared.borrow_mut().listeners = listeners;

    let raw = views.input.value();
    drive_inner(shared, move |inner| {
        let image = inner.host.measure();
        let mut actions = inner.core.set_image(image);
        actions.extend(inner.core.load_value(&raw));
        actions
    })
}

// --- Event plumbing ---

/// Listener callback that runs `f` against the picker and applies the
/// resulting actions.
fn on_event(
    weak: &Weak<RefCell<Inner>>,
    f: impl Fn(&mut Inner, &Event) -> Vec<Action> + 'static,
) -> impl FnMut(&Event) + 'static {
    let weak = weak.clone();
    move |event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Err(err) = drive_inner(&shared, |inner| f(inner, event)) {
            log::error!("{err}");
        }
    }
}

/// Like [`on_event`] for pointer events.
fn on_pointer(
    weak: &Weak<RefCell<Inner>>,
    f: impl Fn(&mut Inner, &PointerEvent) -> Vec<Action> + 'static,
) -> impl FnMut(&Event) + 'static {
    on_event(weak, move |inner, event| match event.dyn_ref::<PointerEvent>() {
        Some(pointer) => f(inner, pointer),
        None => Vec::new(),
    })
}

/// Like [`on_event`] for mouse events. `click` is a `PointerEvent` only in
/// some browsers, so it is read through `MouseEvent`.
fn on_mouse(
    weak: &Weak<RefCell<Inner>>,
    f: impl Fn(&mut Inner, &MouseEvent) -> Vec<Action> + 'static,
) -> impl FnMut(&Event) + 'static {
    on_event(weak, move |inner, event| match event.dyn_ref::<MouseEvent>() {
        Some(pointer) => f(inner, pointer),
        None => Vec::new(),
    })
}

fn drive(shared: &Shared, f: impl FnOnce(&mut PickerCore) -> Vec<Action>) -> Result<(), PickerError> {
    drive_inner(shared, |inner| f(&mut inner.core))
}

/// Run `f` with the picker borrowed, then apply its actions with the borrow
/// released so a synchronous change listener can borrow again.
fn drive_inner(shared: &Shared, f: impl FnOnce(&mut Inner) -> Vec<Action>) -> Result<(), PickerError> {
    let (actions, views, config) = {
        let mut inner = shared.try_borrow_mut().map_err(|_| PickerError::Busy)?;
        let actions = f(&mut *inner);
        let Some(views) = inner.host.views().cloned() else {
            return Ok(());
        };
        (actions, views, Rc::clone(&inner.config))
    };
    apply(shared, &views, &config, actions)
}

fn apply(shared: &Shared, views: &Views, config: &PickerConfig, actions: Vec<Action>) -> Result<(), PickerError> {
    for action in actions {
        match action {
            Action::Render(frame) => dom::apply_frame(views, &frame)?,
            Action::WriteValue(value) => views.input.set_value(&value),
            Action::Commit(value) => {
                shared.borrow().committing.set(true);
                let result = dom::commit_value(&views.input, &value);
                shared.borrow().committing.set(false);
                result?;
            }
            Action::ShowPreview(visible) => dom::show_preview(views, config, visible)?,
            Action::RequestFrame => schedule_frame(shared),
        }
    }
    Ok(())
}

// --- Frames ---

fn schedule_frame(shared: &Shared) {
    let weak = Rc::downgrade(shared);
    let frame = request_animation_frame(move |timestamp| {
        if let Some(shared) = weak.upgrade() {
            on_animation_frame(&shared, timestamp);
        }
    });
    match shared.try_borrow_mut() {
        Ok(mut inner) => inner.pending_frame = Some(frame),
        Err(_) => log::warn!("picker busy; frame dropped"),
    }
}

fn on_animation_frame(shared: &Shared, timestamp: f64) {
    let phase = shared.borrow().lifecycle.phase();
    if matches!(phase, Phase::AwaitingFrames { .. }) {
        advance(shared, |lifecycle, host| lifecycle.on_frame(host));
    } else if let Err(err) = drive(shared, |core| core.on_frame(timestamp)) {
        log::error!("{err}");
    }
}
