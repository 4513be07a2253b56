//! matzip-core: configuration and shared error types for the matzip workspace

pub mod config;
pub mod error;

pub use config::{MatzipConfig, CONFIG_ENV, CONFIG_TEMPLATE};
pub use error::{CoreError, Result};
