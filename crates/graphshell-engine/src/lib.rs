//! graphshell engine - adapters for the external indexing pipeline and
//! retrieval service
//!
//! The indexer is driven as a subprocess that reports progress as JSON lines;
//! the retrieval algorithms are reached over HTTP.

pub mod events;
pub mod http;
pub mod process;

pub use events::IndexerEvent;
pub use http::HttpSearchEngine;
pub use process::ProcessIndexPipeline;
