//! tt-core - Core library for tabletrace
//!
//! Configuration file parsing (`tabletrace.yml`) and the error types shared
//! by the command line and the HTTP service.

pub mod config;
pub mod error;

pub use config::{Config, ServerConfig};
pub use error::{CoreError, CoreResult};
