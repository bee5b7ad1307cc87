//! Template engine and registry.
//!
//! - [`TemplateEngine`] / [`MiniJinjaEngine`]: compile and render templates
//! - [`TemplateRegistry`]: resolve template names to sources

mod engine;
mod registry;

pub use engine::{register_filters, MiniJinjaEngine, TemplateEngine};
pub use registry::{
    walk_template_dir, RegistryError, ResolvedTemplate, TemplateFile, TemplateRegistry,
    TEMPLATE_EXTENSIONS,
};
