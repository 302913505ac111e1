//! The single logical thread of the listing screen.
//!
//! `Session` owns the store, the filters and the detail selection. Network
//! calls run as tasks in a `JoinSet`; their completions come back through
//! `next_event` and are applied here, one at a time.

use crate::models::{DraftField, DraftForm, Property};
use crate::store::{Effect, PropertyStore, StoreError, StoreEvent};
use crate::view::{project, Filters, Projection};
use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Everything the presentation layer can ask for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    EditDraft { field: DraftField, value: String },
    SubmitDraft,
    SetSearch(String),
    SetTypeFilter(String),
    /// Raw id as the user entered it
    ViewDetails(String),
    CloseDetails,
    Refresh,
}

/// Snapshot handed to the renderer
#[derive(Debug)]
pub struct ViewModel<'a> {
    pub projection: Projection,
    pub filters: &'a Filters,
    pub draft: &'a DraftForm,
    pub selected: Option<&'a Property>,
    pub modal_open: bool,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub in_flight: usize,
}

pub struct Session {
    store: PropertyStore,
    filters: Filters,
    selected: Option<Property>,
    tasks: JoinSet<StoreEvent>,
}

impl Session {
    pub fn new(store: PropertyStore) -> Self {
        Self {
            store,
            filters: Filters::default(),
            selected: None,
            tasks: JoinSet::new(),
        }
    }

    /// Issue the initial load
    pub fn start(&mut self) {
        self.spawn_refresh();
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn dispatch(&mut self, intent: Intent) {
        debug!("Intent: {intent:?}");
        match intent {
            Intent::EditDraft { field, value } => self.store.update_draft_field(field, value),
            Intent::SubmitDraft => {
                if let Some(request) = self.store.submit_draft() {
                    self.tasks.spawn(request);
                }
            }
            Intent::SetSearch(search) => self.filters.search = search,
            Intent::SetTypeFilter(type_filter) => self.filters.type_filter = type_filter,
            // Only a card on screen can be opened
            Intent::ViewDetails(raw_id) => {
                let displayed = project(self.store.properties(), &self.filters).displayed;
                match displayed.into_iter().find(|p| p.id.matches(&raw_id)) {
                    Some(property) => self.selected = Some(property),
                    None => warn!("No displayed property with id {raw_id}"),
                }
            }
            Intent::CloseDetails => self.selected = None,
            Intent::Refresh => self.spawn_refresh(),
        }
    }

    /// Wait for the next network completion and apply it. Returns `None` when
    /// nothing is in flight, otherwise the failures the user should see.
    pub async fn next_event(&mut self) -> Option<Vec<StoreError>> {
        let joined = self.tasks.join_next().await?;
        let event = match joined {
            Ok(event) => event,
            Err(e) => {
                error!("Network task aborted: {e}");
                return Some(Vec::new());
            }
        };

        let mut notices = Vec::new();
        for effect in self.store.apply(event) {
            match effect {
                Effect::Refresh => self.spawn_refresh(),
                Effect::Notify(e) => notices.push(e),
            }
        }
        Some(notices)
    }

    /// Recomputed on every call, never cached
    pub fn view(&self) -> ViewModel<'_> {
        ViewModel {
            projection: project(self.store.properties(), &self.filters),
            filters: &self.filters,
            draft: self.store.draft(),
            selected: self.selected.as_ref(),
            modal_open: self.selected.is_some(),
            last_refreshed_at: self.store.last_refreshed_at(),
            in_flight: self.tasks.len(),
        }
    }

    fn spawn_refresh(&mut self) {
        self.tasks.spawn(self.store.refresh());
    }
}
