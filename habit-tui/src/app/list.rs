//! Paginated, filterable history of logged activities.

use skapi::{FetchOptions, IndexQuery, Page, Record, RecordId, RecordQuery, StartKey};
#[cfg(test)]
use skapi::{DeleteQuery, RecordStore};
use strum::IntoEnumIterator;

use crate::activity::{activities_table, ActivityData, ActivityType};

pub const PAGE_SIZE: u32 = 20;

pub const EMPTY_MESSAGE: &str = "No activities found. Start tracking your habits!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    Type(ActivityType),
}

impl ActivityFilter {
    /// Tag the query is narrowed to, if any.
    pub fn tag(self) -> Option<String> {
        match self {
            ActivityFilter::All => None,
            ActivityFilter::Type(t) => Some(t.tag()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityFilter::All => "All Activities",
            ActivityFilter::Type(t) => t.label(),
        }
    }

    /// `All`, then every type in declaration order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ActivityFilter::All => ActivityType::iter()
                .next()
                .map_or(ActivityFilter::All, ActivityFilter::Type),
            ActivityFilter::Type(t) => {
                let next = t.next();
                if next == ActivityType::default() {
                    ActivityFilter::All
                } else {
                    ActivityFilter::Type(next)
                }
            }
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ActivityFilter::All => ActivityType::iter()
                .last()
                .map_or(ActivityFilter::All, ActivityFilter::Type),
            ActivityFilter::Type(t) if t == ActivityType::default() => ActivityFilter::All,
            ActivityFilter::Type(t) => ActivityFilter::Type(t.previous()),
        }
    }
}

/// Where the next page starts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PagedCursor {
    pub start_key: Option<StartKey>,
    pub end_of_list: bool,
}

impl PagedCursor {
    pub fn has_more(&self) -> bool {
        !self.end_of_list && self.start_key.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fetch page 1 and replace the list.
    Replace,
    /// Fetch the page after the cursor and append.
    Append,
}

/// A fetch that has been started but whose result has not been applied yet.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    pub mode: FetchMode,
    pub query: RecordQuery,
    pub options: FetchOptions,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityList {
    pub records: Vec<Record<ActivityData>>,
    pub filter: ActivityFilter,
    pub cursor: PagedCursor,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
    seq: u64,
    observed: Option<(ActivityFilter, u64)>,
}

impl ActivityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current filter and refresh trigger. Returns `true` when
    /// either changed since the last call (or on the first call), meaning the
    /// list must be fetched again from page 1.
    pub fn observe(&mut self, refresh_trigger: u64) -> bool {
        let current = (self.filter, refresh_trigger);
        if self.observed == Some(current) {
            return false;
        }
        self.observed = Some(current);
        true
    }

    /// Forget what was observed so the next [`ActivityList::observe`] refetches.
    /// The sequence number keeps counting so fetches started before the reset
    /// stay stale.
    pub fn reset(&mut self) {
        let seq = self.seq;
        *self = Self {
            seq,
            ..Self::default()
        };
    }

    pub fn set_filter(&mut self, filter: ActivityFilter) {
        self.filter = filter;
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        self.filter = if forward {
            self.filter.next()
        } else {
            self.filter.previous()
        };
    }

    pub fn can_load_more(&self) -> bool {
        self.cursor.has_more()
    }

    pub fn query(&self) -> RecordQuery {
        let query = RecordQuery::new(activities_table()).with_index(IndexQuery::uploaded_after(0));
        match self.filter.tag() {
            Some(tag) => query.with_tag(tag),
            None => query,
        }
    }

    /// Start a fetch. A `Replace` always starts and supersedes anything in
    /// flight. An `Append` returns `None` when there is nothing more to load
    /// or another fetch is already running.
    pub fn begin_fetch(&mut self, mode: FetchMode) -> Option<FetchTicket> {
        let start_key = match mode {
            FetchMode::Replace => {
                self.cursor = PagedCursor::default();
                None
            }
            FetchMode::Append => {
                if self.loading || !self.cursor.has_more() {
                    return None;
                }
                self.cursor.start_key.clone()
            }
        };

        self.seq += 1;
        self.loading = true;
        self.error = None;

        Some(FetchTicket {
            seq: self.seq,
            mode,
            query: self.query(),
            options: FetchOptions {
                ascending: false,
                limit: PAGE_SIZE,
                start_key,
            },
        })
    }

    /// Apply a finished fetch. Returns `false` when the ticket has been
    /// superseded and the result was dropped.
    pub fn apply_page(&mut self, ticket: FetchTicket, result: skapi::Result<Page<Record>>) -> bool {
        if ticket.seq != self.seq {
            tracing::debug!(
                ticket = ticket.seq,
                current = self.seq,
                "discarding stale activity page"
            );
            return false;
        }
        self.loading = false;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch activities");
                self.error = Some(e.to_string());
                return true;
            }
        };

        let parsed = page.list.into_iter().filter_map(|record| {
            let record_id = record.record_id.clone();
            match record.parse_data::<ActivityData>() {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(%record_id, error = %e, "skipping malformed activity record");
                    None
                }
            }
        });

        match ticket.mode {
            FetchMode::Replace => {
                self.records = parsed.collect();
                self.selected = 0;
            }
            FetchMode::Append => {
                for record in parsed {
                    if !self.records.iter().any(|r| r.record_id == record.record_id) {
                        self.records.push(record);
                    }
                }
            }
        }

        self.cursor = PagedCursor {
            start_key: page.start_key,
            end_of_list: page.end_of_list,
        };
        tracing::debug!(
            count = self.records.len(),
            end_of_list = self.cursor.end_of_list,
            "activity page applied"
        );
        true
    }

    /// Fetch page 1 and replace the list.
    #[cfg(test)]
    pub async fn refresh<S>(&mut self, store: &S)
    where
        S: RecordStore + ?Sized,
    {
        if let Some(ticket) = self.begin_fetch(FetchMode::Replace) {
            let result = store.get_records(&ticket.query, &ticket.options).await;
            self.apply_page(ticket, result);
        }
    }

    /// Fetch the next page and append it. No-op at the end of the list.
    #[cfg(test)]
    pub async fn load_more<S>(&mut self, store: &S)
    where
        S: RecordStore + ?Sized,
    {
        if let Some(ticket) = self.begin_fetch(FetchMode::Append) {
            let result = store.get_records(&ticket.query, &ticket.options).await;
            self.apply_page(ticket, result);
        }
    }

    /// Delete a record. It is removed from the list only once the store
    /// confirms; on failure the error is kept for display.
    #[cfg(test)]
    pub async fn delete<S>(&mut self, store: &S, record_id: &RecordId) -> bool
    where
        S: RecordStore + ?Sized,
    {
        let query = DeleteQuery {
            record_id: record_id.clone(),
        };
        let result = store.delete_records(&query).await;
        self.finish_delete(record_id, result)
    }

    /// Apply the result of deleting `record_id`. The record leaves the list
    /// only when the store confirmed the delete.
    pub fn finish_delete(&mut self, record_id: &RecordId, result: skapi::Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.records.retain(|r| &r.record_id != record_id);
                self.clamp_selection();
                self.error = None;
                tracing::info!(%record_id, "activity deleted");
                true
            }
            Err(e) => {
                tracing::warn!(%record_id, error = %e, "failed to delete activity");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn selected_record(&self) -> Option<&Record<ActivityData>> {
        self.records.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.records.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.records.len() {
            self.selected = self.records.len().saturating_sub(1);
        }
    }
}
