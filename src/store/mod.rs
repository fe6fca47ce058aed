//! Marker store
//!
//! Owns the pin collection, the selection and the edit draft, and keeps the
//! persisted copy in step with memory:
//! - `hydrate` loads and validates the persisted value once at startup
//! - `dispatch` runs a command through `MarkerState::apply`
//! - `sync` writes the whole collection (or deletes the key) after every
//!   transition that changed the collection
//!
//! Storage failures never escape: they are logged and memory stays
//! authoritative for the rest of the session.

pub mod state;

pub use state::{Command, EditPolicy, MarkerState, SyncStep, Transition};

use crate::domain::{Annotation, AnnotationField, GeoPoint, Marker, MarkerId};
use crate::storage::KeyValueStore;
use crate::storage::codec;

/// Default key of the persisted collection
pub const DEFAULT_KEY: &str = "markers";

/// What `hydrate` found in storage
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// Nothing stored under the key
    Absent,
    /// Value decoded; `dropped` records failed validation
    Loaded { kept: usize, dropped: usize },
    /// Value was corrupt and has been deleted
    Discarded,
    /// Storage could not be read; nothing was changed in storage
    Unreadable,
}

/// Outcome of the most recent persistence step
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Clean,
    /// Last write or delete failed; memory is ahead of storage
    Failed(String),
}

pub struct MarkerStore<S> {
    storage: S,
    key: String,
    policy: EditPolicy,
    state: MarkerState,
    sync_status: SyncStatus,
}

impl<S: KeyValueStore> MarkerStore<S> {
    pub fn new(storage: S, key: impl Into<String>, policy: EditPolicy) -> Self {
        Self {
            storage,
            key: key.into(),
            policy,
            state: MarkerState::default(),
            sync_status: SyncStatus::Clean,
        }
    }

    pub fn state(&self) -> &MarkerState {
        &self.state
    }

    pub fn markers(&self) -> &[Marker] {
        &self.state.markers
    }

    pub fn selected(&self) -> Option<MarkerId> {
        self.state.selected
    }

    pub fn draft(&self) -> &Annotation {
        &self.state.draft
    }

    pub fn sync_status(&self) -> &SyncStatus {
        &self.sync_status
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Load the persisted collection, replacing the in-memory one
    ///
    /// Never writes the value back. A value that is not a JSON array is
    /// deleted so the next start does not trip over it again.
    pub fn hydrate(&mut self) -> HydrateOutcome {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.state.replace_markers(Vec::new());
                return HydrateOutcome::Absent;
            }
            Err(e) => {
                log::error!("Failed to read stored pins: {e:#}");
                self.state.replace_markers(Vec::new());
                return HydrateOutcome::Unreadable;
            }
        };

        match codec::decode(&raw, &self.policy) {
            Ok(decoded) => {
                let kept = decoded.records.len();
                let dropped = decoded.dropped;
                if dropped > 0 {
                    log::warn!("Dropped {dropped} invalid stored pin(s), kept {kept}");
                }
                self.state.replace_markers(decoded.records);
                log::info!("Loaded {kept} pin(s) from storage");
                HydrateOutcome::Loaded { kept, dropped }
            }
            Err(e) => {
                log::error!("Stored pins are corrupt, discarding them: {e}");
                self.state.replace_markers(Vec::new());
                if let Err(e) = self.storage.remove(&self.key) {
                    log::error!("Failed to delete corrupt pin data: {e:#}");
                }
                HydrateOutcome::Discarded
            }
        }
    }

    /// Run a command and persist the result if the collection changed
    pub fn dispatch(&mut self, command: Command) {
        let Transition { state, sync } =
            std::mem::take(&mut self.state).apply(command, &self.policy);
        self.state = state;
        self.sync(sync);
    }

    /// Persist the collection according to `step`
    ///
    /// Always a full replace of the stored value, never a patch.
    pub fn sync(&mut self, step: SyncStep) {
        let result = match step {
            SyncStep::None => return,
            SyncStep::Replace => codec::encode(&self.state.markers)
                .map_err(anyhow::Error::from)
                .and_then(|raw| self.storage.set(&self.key, &raw)),
            SyncStep::Delete => self.storage.remove(&self.key),
        };

        match result {
            Ok(()) => self.sync_status = SyncStatus::Clean,
            Err(e) => {
                log::warn!("Failed to persist pins, keeping them in memory only: {e:#}");
                self.sync_status = SyncStatus::Failed(e.to_string());
            }
        }
    }

    pub fn add_marker(&mut self, position: GeoPoint, annotation: Annotation) {
        self.dispatch(Command::Add {
            position,
            annotation,
        });
    }

    pub fn update_draft(&mut self, field: AnnotationField) {
        self.dispatch(Command::UpdateDraft(field));
    }

    pub fn save_draft(&mut self) {
        self.dispatch(Command::SaveDraft);
    }

    /// Select the pin currently rendered at `index`
    pub fn select_index(&mut self, index: usize) {
        match self.checked_id_at(index) {
            Some(id) => self.dispatch(Command::Select(id)),
            None => log::warn!(
                "Cannot select pin at index {index}, only {} exist",
                self.state.len()
            ),
        }
    }

    /// Remove the pin currently rendered at `index`
    pub fn remove_index(&mut self, index: usize) {
        match self.checked_id_at(index) {
            Some(id) => self.dispatch(Command::Remove(id)),
            None => log::warn!(
                "Cannot remove pin at index {index}, only {} exist",
                self.state.len()
            ),
        }
    }

    fn checked_id_at(&self, index: usize) -> Option<MarkerId> {
        debug_assert!(
            index < self.state.len(),
            "pin index {index} out of range (len {})",
            self.state.len()
        );
        self.state.id_at(index)
    }
}
