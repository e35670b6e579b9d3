//! Error types for attaching and driving the picker.

use wasm_bindgen::JsValue;

/// Why an attach attempt left the picker inert.
///
/// None of these are fatal: the host may render the picker before its image
/// exists, and a later attach can succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The picker element left the document before the deferred frames ran.
    #[error("picker element is no longer in the document")]
    Disconnected,
    /// No image wrapper matched any configured root.
    #[error("no image wrapper found for picker")]
    MissingImageWrap,
    /// Another picker already owns the image wrapper.
    #[error("image wrapper is already bound to a picker")]
    AlreadyInitialized,
    /// The wrapper holds no image.
    #[error("no image found in image wrapper")]
    MissingImage,
    /// A required child of the picker element is missing.
    #[error("picker is missing its {0} element")]
    MissingElement(&'static str),
}

impl AttachError {
    /// Whether this is routine (the host re-rendered or detached early)
    /// rather than a markup problem worth a warning.
    #[must_use]
    pub fn is_routine(&self) -> bool {
        matches!(self, Self::Disconnected | Self::AlreadyInitialized)
    }
}

/// Errors raised while driving an attached picker.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// A visual setter received a value it cannot render. This is a
    /// programming error and is thrown to the caller.
    #[error("invalid argument for {setter}: {value}")]
    InvalidArgument { setter: &'static str, value: String },
    /// An event arrived while the picker was already handling one.
    #[error("picker is busy")]
    Busy,
    /// A DOM call failed.
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Attach(#[from] AttachError),
}

impl PickerError {
    /// Wrap a rejected DOM call.
    #[must_use]
    pub fn dom(value: &JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PickerError> for JsValue {
    fn from(err: PickerError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
