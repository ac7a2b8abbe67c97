// crates/triplog-core/src/session.rs

//! Last-query-wins guard for debounced search input.
//!
//! Keystrokes supersede in-flight queries: a result set may only be applied
//! with the token handed out for the *latest* query, so a slow response for
//! an old query can never overwrite newer results.

use crate::ranker::SearchCandidate;

/// Token identifying one query generation. Copyable so it can cross the
/// asynchronous boundary to the geocoding collaborator and back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryToken(u64);

/// Holds the ranker output for the most recent query.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: u64,
    results: Vec<SearchCandidate>,
}

impl SearchSession {
    pub fn new() -> Self {
        SearchSession::default()
    }

    /// Registers a new query, invalidating every token issued before.
    pub fn begin(&mut self) -> QueryToken {
        self.generation += 1;
        QueryToken(self.generation)
    }

    /// Installs `results` if `token` is still the current query; a stale
    /// token is rejected and leaves the session untouched. Returns whether
    /// the results were applied.
    pub fn apply(&mut self, token: QueryToken, results: Vec<SearchCandidate>) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.results = results;
        true
    }

    /// Drops the current results and invalidates outstanding tokens, e.g.
    /// when the search box is cleared.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.results.clear();
    }

    pub fn results(&self) -> &[SearchCandidate] {
        &self.results
    }
}
