//! graphshell core - settings, domain models, collaborator ports
//!
//! This crate holds the pieces shared by every other graphshell crate: the
//! base settings and their per-workspace isolation, the error taxonomy, and
//! the traits through which the external indexing pipeline, table storage
//! and retrieval engine are driven.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod workspace;

pub use config::Settings;
pub use error::{GraphshellError, Result};
pub use workspace::PathResolver;
