//! Interactive query loop.
//!
//! Each turn reads a query, then a mode selector, then runs one retrieval
//! call to completion before prompting again. The loop only ends on an exit
//! token or end of input; retrieval failures are reported and the session
//! returns to `Idle`.

use crate::dispatcher::QueryDispatcher;
use graphshell_core::error::{GraphshellError, Result};
use graphshell_core::models::{SearchMode, SearchResponse};
use graphshell_core::ports::SearchEngine;
use serde::Serialize;
use std::io;

/// Inputs that end the session, compared case-insensitively
pub const EXIT_TOKENS: [&str; 3] = ["exit", "quit", "q"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Exit,
    Empty,
    Query(String),
}

/// Classify one line typed at the query prompt
pub fn classify_input(raw: &str) -> SessionInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        SessionInput::Empty
    } else if EXIT_TOKENS.iter().any(|token| trimmed.eq_ignore_ascii_case(token)) {
        SessionInput::Exit
    } else {
        SessionInput::Query(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Executing,
    Terminated,
}

/// Terminal side of the session
pub trait SessionIo {
    /// Next query line; `None` at end of input
    fn read_query(&mut self) -> io::Result<Option<String>>;

    /// Mode selector for the query just read; `None` at end of input
    fn read_mode(&mut self) -> io::Result<Option<String>>;

    fn running(&mut self, mode: SearchMode, query: &str);

    fn response(&mut self, mode: SearchMode, response: &SearchResponse);

    fn failure(&mut self, mode: SearchMode, error: &GraphshellError);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub answered: usize,
    pub failed: usize,
}

pub struct QuerySession<'a, E: SearchEngine + ?Sized> {
    dispatcher: QueryDispatcher<'a, E>,
    state: SessionState,
    summary: SessionSummary,
}

impl<'a, E: SearchEngine + ?Sized> QuerySession<'a, E> {
    pub fn new(dispatcher: QueryDispatcher<'a, E>) -> Self {
        Self {
            dispatcher,
            state: SessionState::Idle,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run turns until the user exits or input ends
    pub async fn run<IO: SessionIo>(&mut self, io: &mut IO) -> Result<SessionSummary> {
        while self.state != SessionState::Terminated {
            self.turn(io).await?;
        }

        tracing::info!(
            answered = self.summary.answered,
            failed = self.summary.failed,
            "Query session ended"
        );
        Ok(self.summary)
    }

    /// One prompt/answer cycle. Only terminal I/O errors escape.
    pub async fn turn<IO: SessionIo>(&mut self, io: &mut IO) -> Result<SessionState> {
        if self.state == SessionState::Terminated {
            return Ok(self.state);
        }

        let Some(line) = io.read_query()? else {
            self.state = SessionState::Terminated;
            return Ok(self.state);
        };

        let query = match classify_input(&line) {
            SessionInput::Exit => {
                self.state = SessionState::Terminated;
                return Ok(self.state);
            }
            SessionInput::Empty => return Ok(self.state),
            SessionInput::Query(query) => query,
        };

        let Some(selector) = io.read_mode()? else {
            self.state = SessionState::Terminated;
            return Ok(self.state);
        };
        let mode = SearchMode::from_selector(&selector);

        self.state = SessionState::Executing;
        io.running(mode, &query);

        match self.dispatcher.dispatch(mode, &query).await {
            Ok(response) => {
                self.summary.answered += 1;
                io.response(mode, &response);
            }
            Err(e) => {
                self.summary.failed += 1;
                tracing::debug!(mode = %mode, error = %e, "Search failed");
                io.failure(mode, &e);
            }
        }

        self.state = SessionState::Idle;
        Ok(self.state)
    }
}
