use std::fmt;

use crate::filter::Query;
use crate::gate::{AccessGate, UnlockOutcome};
use crate::model::Snapshot;
use crate::render::{Page, render_page};
use crate::source::{FetchError, SnapshotSource};
use crate::store::TokenStore;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RefreshStatus {
    #[default]
    Idle,
    Loading,
    Updated,
    Failed(FetchError),
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshStatus::Idle => f.write_str("Not loaded"),
            RefreshStatus::Loading => f.write_str("Loading..."),
            RefreshStatus::Updated => f.write_str("Updated"),
            RefreshStatus::Failed(_) => f.write_str("Error loading data"),
        }
    }
}

/// Sequence number of one issued refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    Failed(FetchError),
    /// A newer refresh was issued after this one; the result was dropped.
    Stale,
}

/// Application state: the held snapshot plus everything the view depends on.
#[derive(Debug, Default)]
pub struct Desk {
    snapshot: Option<Snapshot>,
    query: Query,
    show_summaries: bool,
    gate: AccessGate,
    status: RefreshStatus,
    last_issued: u64,
}

impl Desk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn show_summaries(&self) -> bool {
        self.show_summaries
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn status(&self) -> &RefreshStatus {
        &self.status
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.last_issued += 1;
        self.status = RefreshStatus::Loading;
        tracing::debug!(seq = self.last_issued, "refresh issued");
        RefreshTicket(self.last_issued)
    }

    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Snapshot, FetchError>,
        store: &dyn TokenStore,
    ) -> RefreshOutcome {
        if ticket.0 != self.last_issued {
            tracing::debug!(
                seq = ticket.0,
                latest = self.last_issued,
                "discarding stale refresh"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(snapshot) => {
                self.gate
                    .evaluate_with_store(snapshot.access_hash(), store);
                tracing::info!(
                    sources = snapshot.sources.len(),
                    items = snapshot.total_items(),
                    locked = self.gate.is_locked(),
                    "snapshot updated"
                );
                self.snapshot = Some(snapshot);
                self.status = RefreshStatus::Updated;
                RefreshOutcome::Updated
            }
            Err(err) => {
                tracing::warn!("refresh failed: {}", err);
                self.snapshot = None;
                self.status = RefreshStatus::Failed(err.clone());
                RefreshOutcome::Failed(err)
            }
        }
    }

    /// Fetch and apply in one blocking step.
    pub fn refresh(&mut self, source: &dyn SnapshotSource, store: &dyn TokenStore) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = source.fetch();
        self.complete_refresh(ticket, result, store)
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = Query::new(raw);
    }

    pub fn set_show_summaries(&mut self, show: bool) {
        self.show_summaries = show;
    }

    pub fn toggle_summaries(&mut self) -> bool {
        self.show_summaries = !self.show_summaries;
        self.show_summaries
    }

    pub fn try_unlock(&mut self, candidate: &str, store: &mut dyn TokenStore) -> UnlockOutcome {
        self.gate.try_unlock(candidate, store)
    }

    pub fn page(&self) -> Page {
        render_page(
            self.snapshot.as_ref(),
            &self.query,
            self.show_summaries,
            &self.gate,
            &self.status,
        )
    }
}

#[cfg(test)]
#[path = "tests/refresh_tests.rs"]
mod tests;
