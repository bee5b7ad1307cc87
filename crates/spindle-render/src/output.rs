//! Tagged render results.
//!
//! A component's `render` can produce text, a handle to a view that still has
//! to be rendered, or nothing. The transport decides how each tag is written.

use serde::Serialize;

use crate::error::RenderError;
use crate::views::ViewProvider;

/// A named view plus the data it renders with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewHandle {
    /// View name as understood by the [`ViewProvider`]
    pub view: String,
    /// Data passed to the view
    pub data: serde_json::Value,
}

impl ViewHandle {
    /// Creates a handle from any serializable data.
    pub fn new<T: Serialize>(view: impl Into<String>, data: &T) -> Result<Self, RenderError> {
        Ok(Self {
            view: view.into(),
            data: serde_json::to_value(data)?,
        })
    }

    /// Renders the handle through a view provider.
    pub fn render(&self, views: &dyn ViewProvider) -> Result<String, RenderError> {
        views.render(&self.view, &self.data)
    }
}

/// The result of rendering a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RenderOutput {
    /// Final text
    Text(String),
    /// A view still to be rendered by the caller
    Structured(ViewHandle),
    /// No output
    Empty,
}

impl RenderOutput {
    /// Returns true if this is text output.
    pub fn is_text(&self) -> bool {
        matches!(self, RenderOutput::Text(_))
    }

    /// Returns true if this is a view handle.
    pub fn is_structured(&self) -> bool {
        matches!(self, RenderOutput::Structured(_))
    }

    /// Returns true if there is no output.
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutput::Empty)
    }

    /// Returns the text if this is text output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderOutput::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Produces the final string, rendering a view handle if needed.
    ///
    /// `Empty` becomes the empty string.
    pub fn into_string(self, views: &dyn ViewProvider) -> Result<String, RenderError> {
        match self {
            RenderOutput::Text(s) => Ok(s),
            RenderOutput::Structured(handle) => handle.render(views),
            RenderOutput::Empty => Ok(String::new()),
        }
    }
}

impl From<String> for RenderOutput {
    fn from(s: String) -> Self {
        RenderOutput::Text(s)
    }
}

impl From<&str> for RenderOutput {
    fn from(s: &str) -> Self {
        RenderOutput::Text(s.to_string())
    }
}

impl From<ViewHandle> for RenderOutput {
    fn from(handle: ViewHandle) -> Self {
        RenderOutput::Structured(handle)
    }
}

impl<T: Into<RenderOutput>> From<Option<T>> for RenderOutput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RenderOutput::Empty)
    }
}
