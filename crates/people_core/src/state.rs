use std::collections::HashSet;

use crate::view_model::{ListViewModel, PersonRowView};

pub type PersonId = i64;

/// A person as delivered by the remote provider. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub full_name: String,
}

impl Person {
    pub fn new(id: PersonId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    FirstPage,
    NextPage,
    Refresh,
}

impl FetchKind {
    pub fn is_refresh(self) -> bool {
        matches!(self, FetchKind::Refresh)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenPhase {
    #[default]
    Idle,
    Fetching(FetchKind),
    Populated,
    EmptyNoResults,
    Failed(FetchKind),
}

/// The failure the user is being asked to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRetry {
    pub message: String,
    pub kind: FetchKind,
}

/// Accumulated people plus the id set used to drop repeats across pages.
///
/// Every id in `people` is in `seen_ids` exactly once and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    people: Vec<Person>,
    seen_ids: HashSet<PersonId>,
    phase: ScreenPhase,
    empty_state_visible: bool,
    pending_retry: Option<PendingRetry>,
    // Requests handed to the coordinator and not yet answered.
    outstanding_pages: usize,
    outstanding_refreshes: usize,
    dirty: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ListViewModel {
        ListViewModel {
            rows: self
                .people
                .iter()
                .map(|person| PersonRowView {
                    id: person.id,
                    full_name: person.full_name.clone(),
                })
                .collect(),
            empty_state_visible: self.empty_state_visible,
            phase: self.phase,
            alert: self.pending_retry.as_ref().map(|retry| retry.message.clone()),
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn pending_retry(&self) -> Option<&PendingRetry> {
        self.pending_retry.as_ref()
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_fetch(&mut self, is_refresh: bool) {
        self.enter_fetch(self.kind_for(is_refresh));
    }

    /// Merges a page, returning how many people were appended.
    pub(crate) fn merge_page(&mut self, incoming: Vec<Person>, is_refresh: bool) -> usize {
        self.finish_request(is_refresh);
        if is_refresh {
            self.people.clear();
            self.seen_ids.clear();
        }
        let before = self.people.len();
        for person in incoming {
            if self.seen_ids.insert(person.id) {
                self.people.push(person);
            }
        }
        self.empty_state_visible = self.people.is_empty();
        // A page success does not answer a failed refresh.
        let answered = self
            .pending_retry
            .as_ref()
            .is_some_and(|retry| is_refresh || !retry.kind.is_refresh());
        if answered {
            self.pending_retry = None;
        }
        if self.outstanding_refreshes == 0 {
            self.phase = self.settled_phase();
        }
        self.dirty = true;
        self.people.len() - before
    }

    /// Accounts for a request the coordinator did not dispatch.
    pub(crate) fn skip_request(&mut self, is_refresh: bool) {
        self.finish_request(is_refresh);
        if let ScreenPhase::Fetching(_) = self.phase {
            self.phase = if self.outstanding_refreshes > 0 {
                ScreenPhase::Fetching(FetchKind::Refresh)
            } else if self.outstanding_pages > 0 {
                ScreenPhase::Fetching(self.kind_for(false))
            } else {
                self.settled_phase()
            };
        }
    }

    pub(crate) fn record_failure(&mut self, message: String, is_refresh: bool) -> FetchKind {
        self.finish_request(is_refresh);
        let kind = match self.phase {
            ScreenPhase::Fetching(kind) if kind.is_refresh() == is_refresh => kind,
            _ => self.kind_for(is_refresh),
        };
        if self.outstanding_refreshes == 0 {
            self.phase = ScreenPhase::Failed(kind);
        }
        self.pending_retry = Some(PendingRetry { message, kind });
        kind
    }

    pub(crate) fn take_retry(&mut self) -> Option<PendingRetry> {
        let retry = self.pending_retry.take()?;
        self.enter_fetch(retry.kind);
        Some(retry)
    }

    fn enter_fetch(&mut self, kind: FetchKind) {
        if kind.is_refresh() {
            self.outstanding_refreshes += 1;
        } else {
            self.outstanding_pages += 1;
            // A page request must not hide an outstanding refresh.
            if self.outstanding_refreshes > 0 {
                return;
            }
        }
        self.phase = ScreenPhase::Fetching(kind);
    }

    fn finish_request(&mut self, is_refresh: bool) {
        let outstanding = if is_refresh {
            &mut self.outstanding_refreshes
        } else {
            &mut self.outstanding_pages
        };
        *outstanding = outstanding.saturating_sub(1);
    }

    fn settled_phase(&self) -> ScreenPhase {
        if self.people.is_empty() {
            ScreenPhase::EmptyNoResults
        } else {
            ScreenPhase::Populated
        }
    }

    fn kind_for(&self, is_refresh: bool) -> FetchKind {
        if is_refresh {
            FetchKind::Refresh
        } else if self.people.is_empty() {
            FetchKind::FirstPage
        } else {
            FetchKind::NextPage
        }
    }
}
