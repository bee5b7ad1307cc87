//! Errors raised while bootstrapping a [`Spindle`](crate::Spindle).

use spindle_dispatch::{ConfigError, RegistrationError};
use spindle_render::template::RegistryError;
use thiserror::Error;

/// Bootstrap failure.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A registration named a type the container does not provide.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A template directory could not be loaded.
    #[error("template error: {0}")]
    Templates(#[from] RegistryError),
}
