//! Owns the property list as last fetched and the create-form draft.
//!
//! Network work is split in two halves so that completions can be applied on
//! the owning thread as discrete events: `refresh` and `submit_draft` hand
//! back detached futures, and `apply` folds their results into the store.
//! Nothing here awaits a fetch while holding the store, so any number of
//! fetches may be in flight; whichever response is applied last wins.

use crate::client::PropertyApi;
use crate::models::{DraftField, DraftForm, Property};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Failure taxonomy of the two network operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Logged only; the list stays as it was
    #[error("Error fetching properties: {0:#}")]
    Fetch(anyhow::Error),
    /// Shown to the user; the draft stays as it was
    #[error("Error adding property")]
    Create(anyhow::Error),
}

/// Completion of a network call, delivered back to the store
#[derive(Debug)]
pub enum StoreEvent {
    Fetched {
        seq: u64,
        result: Result<Vec<Property>, StoreError>,
    },
    Created {
        result: Result<(), StoreError>,
    },
}

/// Follow-up work produced by applying an event
#[derive(Debug)]
pub enum Effect {
    /// Start a new fetch
    Refresh,
    /// Surface a failure to the user
    Notify(StoreError),
}

pub struct PropertyStore {
    api: Arc<dyn PropertyApi>,
    properties: Vec<Property>,
    draft: DraftForm,
    last_refreshed_at: Option<DateTime<Utc>>,
    next_seq: u64,
}

impl PropertyStore {
    pub fn new(api: Arc<dyn PropertyApi>) -> Self {
        Self {
            api,
            properties: Vec::new(),
            draft: DraftForm::default(),
            last_refreshed_at: None,
            next_seq: 1,
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    /// Single fetch attempt. No retry, no timeout, no deduplication.
    pub fn refresh(&mut self) -> impl Future<Output = StoreEvent> + Send + 'static {
        let api = Arc::clone(&self.api);
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!("Fetch #{seq} from {}", api.endpoint());

        async move {
            let result = api.list_properties().await.map_err(StoreError::Fetch);
            StoreEvent::Fetched { seq, result }
        }
    }

    /// Last write wins, including while a create request is in flight
    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Send the current draft. The payload is a snapshot: later edits do not
    /// change what is sent. Returns `None` without sending anything while the
    /// description is blank, which the form requires.
    pub fn submit_draft(&self) -> Option<impl Future<Output = StoreEvent> + Send + 'static> {
        if self.draft.description.is_empty() {
            warn!("Not submitting: description is required");
            return None;
        }

        let api = Arc::clone(&self.api);
        let payload = self.draft.to_payload();
        debug!("Submitting new property {:?}", payload.name);

        Some(async move {
            let result = api
                .create_property(&payload)
                .await
                .map_err(StoreError::Create);
            StoreEvent::Created { result }
        })
    }

    /// Fold a completion into the store and return what should happen next
    pub fn apply(&mut self, event: StoreEvent) -> Vec<Effect> {
        match event {
            StoreEvent::Fetched { seq, result } => {
                match result {
                    Ok(properties) => {
                        info!("Fetch #{seq}: loaded {} properties", properties.len());
                        self.properties = properties;
                        self.last_refreshed_at = Some(Utc::now());
                    }
                    Err(e) => error!("Fetch #{seq} failed: {e}"),
                }
                Vec::new()
            }
            StoreEvent::Created { result: Ok(()) } => {
                info!("Property created, reloading list");
                self.draft = DraftForm::default();
                vec![Effect::Refresh]
            }
            StoreEvent::Created { result: Err(e) } => {
                if let StoreError::Create(cause) = &e {
                    warn!("Create failed: {cause:#}");
                }
                vec![Effect::Notify(e)]
            }
        }
    }
}
