//! Browser side of the picker: element lookup, mounting and writes.
//!
//! [`DomHost`] implements [`Host`] so the attach sequence in
//! [`crate::lifecycle`] runs against the real document. The free functions
//! below apply engine [`Action`](crate::engine::Action)s to the views.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventInit, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement};

use focal::css;

use crate::config::{PickerConfig, Selectors};
use crate::consts::{CHANGE_EVENT, IMAGE_PROPERTY};
use crate::error::{AttachError, PickerError};
use crate::geometry::{Point, Rect};
use crate::lifecycle::Host;
use crate::render::RenderFrame;

/// The picker element and its children.
#[derive(Debug, Clone)]
pub struct Views {
    pub root: HtmlElement,
    pub input: HtmlInputElement,
    pub handle: HtmlElement,
    pub preview: HtmlElement,
    pub landscape: Option<HtmlElement>,
    pub portrait: Option<HtmlElement>,
    pub reset: Option<HtmlButtonElement>,
}

impl Views {
    /// Resolve the children of `root`. The input, handle and preview are
    /// required; the preview variants and the reset control are optional.
    ///
    /// # Errors
    ///
    /// [`AttachError::MissingElement`] naming the first required child not
    /// found.
    pub fn find(root: &HtmlElement, selectors: &Selectors) -> Result<Self, AttachError> {
        let input = query::<HtmlInputElement>(root, &selectors.input).ok_or(AttachError::MissingElement("input"))?;
        let handle = query::<HtmlElement>(root, &selectors.handle).ok_or(AttachError::MissingElement("handle"))?;
        let preview = query::<HtmlElement>(root, &selectors.preview).ok_or(AttachError::MissingElement("preview"))?;
        // Variants and reset may have been moved out with the preview on an
        // earlier attach, so look inside the preview as well.
        let landscape = query(root, &selectors.landscape).or_else(|| query(&preview, &selectors.landscape));
        let portrait = query(root, &selectors.portrait).or_else(|| query(&preview, &selectors.portrait));
        let reset = query(root, &selectors.reset);
        Ok(Self { root: root.clone(), input, handle, preview, landscape, portrait, reset })
    }
}

/// [`Host`] backed by the document.
#[derive(Debug)]
pub struct DomHost {
    root: HtmlElement,
    selectors: Selectors,
    image_roots: Vec<(String, String)>,
    wrap_marker: String,
    views: Option<Views>,
    wrap: Option<HtmlElement>,
    image: Option<HtmlImageElement>,
}

impl DomHost {
    #[must_use]
    pub fn new(root: HtmlElement, config: &PickerConfig) -> Self {
        Self {
            root,
            selectors: config.selectors.clone(),
            image_roots: config.image_roots.iter().map(|r| (r.root.clone(), r.wrap.clone())).collect(),
            wrap_marker: config.wrap_marker.clone(),
            views: None,
            wrap: None,
            image: None,
        }
    }

    #[must_use]
    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    #[must_use]
    pub fn views(&self) -> Option<&Views> {
        self.views.as_ref()
    }

    #[must_use]
    pub fn wrap(&self) -> Option<&HtmlElement> {
        self.wrap.as_ref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&HtmlImageElement> {
        self.image.as_ref()
    }

    /// The image box in wrapper layout space, or an empty box before the
    /// image is located.
    #[must_use]
    pub fn measure(&self) -> Rect {
        self.image.as_ref().map_or_else(Rect::default, image_rect)
    }

    /// Convert viewport coordinates to wrapper layout space.
    #[must_use]
    pub fn to_local(&self, client_x: i32, client_y: i32) -> Point {
        let client = Point::new(f64::from(client_x), f64::from(client_y));
        let Some(wrap) = &self.wrap else {
            return client;
        };
        let bounds = wrap.get_bounding_client_rect();
        let origin = Point::new(
            bounds.left() + f64::from(wrap.client_left()),
            bounds.top() + f64::from(wrap.client_top()),
        );
        client - origin
    }
}

impl Host for DomHost {
    fn is_connected(&self) -> bool {
        self.root.is_connected()
    }

    fn locate_views(&mut self) -> Result<(), AttachError> {
        self.views = Some(Views::find(&self.root, &self.selectors)?);
        Ok(())
    }

    fn locate_wrap(&mut self) -> Result<(), AttachError> {
        for (root, wrap) in &self.image_roots {
            let ancestor = match self.root.closest(root) {
                Ok(Some(ancestor)) => ancestor,
                Ok(None) => continue,
                Err(err) => {
                    log::warn!("invalid image root selector {root:?}: {err:?}");
                    continue;
                }
            };
            if let Some(found) = query::<HtmlElement>(&ancestor, wrap) {
                self.wrap = Some(found);
                return Ok(());
            }
        }
        Err(AttachError::MissingImageWrap)
    }

    fn wrap_marked(&self) -> bool {
        self.wrap.as_ref().is_some_and(|wrap| wrap.has_attribute(&self.wrap_marker))
    }

    fn set_wrap_marked(&mut self, marked: bool) {
        let Some(wrap) = &self.wrap else {
            return;
        };
        let result = if marked {
            wrap.set_attribute(&self.wrap_marker, "")
        } else {
            wrap.remove_attribute(&self.wrap_marker)
        };
        if let Err(err) = result {
            log::warn!("failed to update wrapper marker: {err:?}");
        }
    }

    fn locate_image(&mut self) -> Result<(), AttachError> {
        let wrap = self.wrap.as_ref().ok_or(AttachError::MissingImageWrap)?;
        let image = query::<HtmlImageElement>(wrap, &self.selectors.image).ok_or_else(|| {
            log::error!("image wrapper has no image");
            AttachError::MissingImage
        })?;
        self.image = Some(image);
        Ok(())
    }

    fn image_complete(&self) -> bool {
        self.image.as_ref().is_some_and(HtmlImageElement::complete)
    }

    fn mount(&mut self) -> Result<(), AttachError> {
        let views = self.views.as_ref().ok_or(AttachError::MissingElement("handle"))?;
        let wrap = self.wrap.as_ref().ok_or(AttachError::MissingImageWrap)?;
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .ok_or(AttachError::MissingElement("body"))?;
        let image = self.image.as_ref().ok_or(AttachError::MissingImage)?;
        if let Err(err) = set_image_source(views, image) {
            log::warn!("failed to point preview at image: {err}");
            return Err(AttachError::MissingElement("preview"));
        }

        if let Err(err) = wrap.append_child(&views.handle) {
            log::warn!("failed to move handle into image wrapper: {err:?}");
            return Err(AttachError::MissingElement("handle"));
        }
        if let Err(err) = body.append_child(&views.preview) {
            log::warn!("failed to move preview into body: {err:?}");
            if let Err(err) = self.root.append_child(&views.handle) {
                log::warn!("failed to return handle: {err:?}");
            }
            return Err(AttachError::MissingElement("preview"));
        }
        Ok(())
    }

    fn unmount(&mut self) {
        let Some(views) = &self.views else {
            return;
        };
        for node in [&views.handle, &views.preview] {
            if let Err(err) = self.root.append_child(node) {
                log::warn!("failed to return view to picker: {err:?}");
            }
        }
        self.wrap = None;
        self.image = None;
    }
}

// --- Writes ---

/// Write a render frame to the handle, previews and reset control.
///
/// # Errors
///
/// [`PickerError::InvalidArgument`] if the frame holds a non-finite
/// coordinate, [`PickerError::Dom`] if a style write is rejected.
pub fn apply_frame(views: &Views, frame: &RenderFrame) -> Result<(), PickerError> {
    frame.check()?;
    set_style(&views.handle, "left", &frame.handle_left())?;
    set_style(&views.handle, "top", &frame.handle_top())?;
    set_style(&views.preview, css::LEFT_PROPERTY, &frame.preview_left())?;
    set_style(&views.preview, css::TOP_PROPERTY, &frame.preview_top())?;
    let position = frame.background_position();
    for variant in [&views.landscape, &views.portrait].into_iter().flatten() {
        set_style(variant, "background-position", &position)?;
    }
    if let Some(reset) = &views.reset {
        reset.set_disabled(!frame.reset_enabled);
    }
    Ok(())
}

/// Write a value and raise a bubbling change event on the input.
///
/// # Errors
///
/// [`PickerError::Dom`] if the event cannot be created or dispatched.
pub fn commit_value(input: &HtmlInputElement, value: &str) -> Result<(), PickerError> {
    input.set_value(value);
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict(CHANGE_EVENT, &init).map_err(|e| PickerError::dom(&e))?;
    input.dispatch_event(&event).map_err(|e| PickerError::dom(&e))?;
    Ok(())
}

/// Show or hide the preview and mark `<body>` while a drag is in progress.
///
/// # Errors
///
/// [`PickerError::Dom`] if the class list or attribute write is rejected.
pub fn show_preview(views: &Views, config: &PickerConfig, visible: bool) -> Result<(), PickerError> {
    views
        .preview
        .class_list()
        .toggle_with_force(&config.preview_visible_class, visible)
        .map_err(|e| PickerError::dom(&e))?;
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return Ok(());
    };
    let result = if visible {
        body.set_attribute(&config.dragging_marker, "")
    } else {
        body.remove_attribute(&config.dragging_marker)
    };
    result.map_err(|e| PickerError::dom(&e))
}

/// Point the preview's `--image` property at the image source.
///
/// # Errors
///
/// [`PickerError::Dom`] if the style write is rejected.
pub fn set_image_source(views: &Views, image: &HtmlImageElement) -> Result<(), PickerError> {
    let src = match image.current_src() {
        src if src.is_empty() => image.src(),
        src => src,
    };
    set_style(&views.preview, IMAGE_PROPERTY, &format!("url({src:?})"))
}

// --- Helpers ---

fn image_rect(image: &HtmlImageElement) -> Rect {
    Rect::new(
        f64::from(image.offset_left()),
        f64::from(image.offset_top()),
        f64::from(image.offset_width()),
        f64::from(image.offset_height()),
    )
}

fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), PickerError> {
    el.style().set_property(property, value).map_err(|e: JsValue| PickerError::dom(&e))
}

fn query<T: JsCast>(scope: &Element, selector: &str) -> Option<T> {
    match scope.query_selector(selector) {
        Ok(Some(el)) => match el.dyn_into::<T>() {
            Ok(found) => Some(found),
            Err(el) => {
                log::debug!("{selector:?} matched unexpected element <{}>", el.tag_name().to_lowercase());
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            log::warn!("invalid selector {selector:?}: {err:?}");
            None
        }
    }
}
