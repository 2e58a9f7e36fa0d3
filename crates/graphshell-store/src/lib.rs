//! graphshell store - table storage adapters and the result-set loader
//!
//! Storage adapters implement `graphshell_core::ports::TableStorage`; the
//! loader materialises the fixed set of result tables a query session needs.

pub mod file;
pub mod loader;
pub mod memory;

pub use file::FileTableStorage;
pub use loader::{ResultTables, TableLoader, TableStatus};
pub use memory::MemoryTableStorage;
