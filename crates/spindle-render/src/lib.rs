//! View and template rendering for spindle components.
//!
//! `spindle-render` is the view-provider side of component dispatch. The
//! dispatch engine asks it whether a view exists (to discover template-only
//! components), renders template strings returned by components, and renders
//! named views.
//!
//! # Quick Start
//!
//! ```rust
//! use spindle_render::{TemplateViews, ViewProvider};
//! use serde_json::json;
//!
//! let mut views = TemplateViews::new();
//! views.add_inline("alert", "<div class=\"alert\">{{ message }}</div>");
//!
//! assert!(views.exists("alert"));
//! let html = views.render("alert", &json!({"message": "Saved"})).unwrap();
//! assert_eq!(html, "<div class=\"alert\">Saved</div>");
//! ```
//!
//! # Render Results
//!
//! [`RenderOutput`] tags what a component produced: final text, a
//! [`ViewHandle`] still to be rendered, or nothing.

mod error;
mod output;
pub mod template;
mod views;

pub use error::RenderError;
pub use output::{RenderOutput, ViewHandle};
pub use template::{MiniJinjaEngine, TemplateEngine, TemplateRegistry};
pub use views::{view_path, TemplateViews, ViewProvider};
