pub mod progress;
pub mod search;
pub mod table;
pub mod workspace;

pub use progress::ProgressEvent;
pub use search::{SearchMode, SearchOptions, SearchResponse};
pub use table::{Row, Table, TableName};
pub use workspace::WorkspaceLayout;
