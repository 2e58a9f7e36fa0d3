//! graphshell retrieval - query dispatch and the interactive session
//!
//! The dispatcher routes one query to one of the four retrieval modes with
//! that mode's table subset; the session drives the prompt loop around it
//! and keeps per-query failures from ending the run.

pub mod dispatcher;
pub mod session;

pub use dispatcher::QueryDispatcher;
pub use session::{
    classify_input, QuerySession, SessionInput, SessionIo, SessionState, SessionSummary,
    EXIT_TOKENS,
};
