//! In-memory collection store with stale-load protection.
//!
//! Every load path goes `begin_load` then fetch then `commit`. Each
//! `begin_load` bumps the endpoint's generation, so a commit carrying a
//! superseded token is rejected and its rows are dropped: a slow response
//! can never overwrite the data of a load that started after it.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::api::Endpoint;

/// Handle for an in-flight load, stamped with the generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    endpoint: Endpoint,
    generation: u64,
}

impl LoadToken {
    /// The endpoint this token was issued for.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }
}

/// Normalized rows from the most recent non-stale fetch per endpoint.
#[derive(Debug, Default)]
pub struct DataStore {
    lists: HashMap<Endpoint, Vec<Value>>,
    generations: HashMap<Endpoint, u64>,
}

impl DataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `endpoint`, superseding any load still in flight.
    pub fn begin_load(&mut self, endpoint: Endpoint) -> LoadToken {
        let generation = self.generations.entry(endpoint).or_insert(0);
        *generation += 1;
        LoadToken {
            endpoint,
            generation: *generation,
        }
    }

    /// Store rows fetched under `token`.
    ///
    /// Returns `false` (storing nothing) when a newer load for the same
    /// endpoint has started since the token was issued. Failed fetches
    /// never reach this point, so prior data survives them untouched.
    pub fn commit(&mut self, token: &LoadToken, rows: Vec<Value>) -> bool {
        if !self.is_current(token) {
            debug!(
                endpoint = %token.endpoint,
                stale = token.generation,
                "Discarding stale response"
            );
            return false;
        }
        self.lists.insert(token.endpoint, rows);
        true
    }

    /// Whether `token` still belongs to the newest load for its endpoint.
    ///
    /// Error paths use this to avoid painting a failure over the output
    /// of a load that superseded them.
    #[must_use]
    pub fn is_current(&self, token: &LoadToken) -> bool {
        let current = self.generations.get(&token.endpoint).copied().unwrap_or(0);
        token.generation == current
    }

    /// Rows cached for `endpoint`, empty when nothing has been fetched yet.
    #[must_use]
    pub fn get(&self, endpoint: Endpoint) -> &[Value] {
        self.lists.get(&endpoint).map_or(&[], Vec::as_slice)
    }

    /// Number of cached rows for `endpoint`.
    #[must_use]
    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.lists.get(&endpoint).map_or(0, Vec::len)
    }
}
