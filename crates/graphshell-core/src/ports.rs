//! Port trait definitions
//!
//! These traits describe the external collaborators this shell drives. The
//! adapters live in `graphshell-store` and `graphshell-engine`.

pub mod indexing;
pub mod search;
pub mod storage;

pub use indexing::{IndexPipeline, WorkflowCallbacks};
pub use search::{
    BasicSearchTables, DriftSearchTables, GlobalSearchTables, LocalSearchTables, SearchEngine,
};
pub use storage::TableStorage;
