//! Marker state and its transition function
//!
//! `MarkerState::apply` is pure: it consumes the current state and a command
//! and returns the next state together with the persistence step the caller
//! must run. Nothing here touches storage.

use crate::domain::{Annotation, AnnotationField, GeoPoint, Marker, MarkerId};

/// Validation rules applied to incoming edits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditPolicy {
    /// Reject positions outside [-90, 90] x [-180, 180]
    pub enforce_coordinate_range: bool,
    /// Accept costs below zero
    pub allow_negative_cost: bool,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            enforce_coordinate_range: true,
            allow_negative_cost: false,
        }
    }
}

/// State transitions of the marker collection
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Append a new pin at the end of the collection
    Add {
        position: GeoPoint,
        annotation: Annotation,
    },
    /// Select a pin and load its annotation into the draft
    Select(MarkerId),
    /// Merge one field into the draft
    UpdateDraft(AnnotationField),
    /// Write the draft into the selected pin and close the edit
    SaveDraft,
    /// Close the edit without saving
    CancelEdit,
    /// Remove one pin
    Remove(MarkerId),
    /// Remove every pin
    RemoveAll,
}

/// Persistence step owed after a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStep {
    /// Collection unchanged
    None,
    /// Write the full collection under the key
    Replace,
    /// Collection is empty, delete the key
    Delete,
}

impl SyncStep {
    fn for_collection(markers: &[Marker]) -> Self {
        if markers.is_empty() {
            SyncStep::Delete
        } else {
            SyncStep::Replace
        }
    }
}

/// Result of applying a command
#[derive(Debug)]
pub struct Transition {
    pub state: MarkerState,
    pub sync: SyncStep,
}

impl Transition {
    fn unchanged(state: MarkerState) -> Self {
        Self {
            state,
            sync: SyncStep::None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerState {
    pub markers: Vec<Marker>,
    pub selected: Option<MarkerId>,
    pub draft: Annotation,
    next_id: u64,
}

impl MarkerState {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Current render position of a pin
    pub fn index_of(&self, id: MarkerId) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<MarkerId> {
        self.markers.get(index).map(|m| m.id)
    }

    pub fn selected_marker(&self) -> Option<&Marker> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Replace the collection with freshly loaded records
    ///
    /// Ids keep counting from where this state left off so they are never
    /// reused. Selection and draft are reset.
    pub fn replace_markers(&mut self, records: Vec<(GeoPoint, Annotation)>) {
        let markers = records
            .into_iter()
            .map(|(position, annotation)| Marker::new(self.allocate_id(), position, annotation))
            .collect();
        self.markers = markers;
        self.close_edit();
    }

    fn allocate_id(&mut self) -> MarkerId {
        let id = MarkerId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn close_edit(&mut self) {
        self.selected = None;
        self.draft = Annotation::default();
    }

    /// Apply a command, returning the next state and the sync it requires
    pub fn apply(mut self, command: Command, policy: &EditPolicy) -> Transition {
        match command {
            Command::Add {
                position,
                annotation,
            } => {
                if !position.is_valid(policy.enforce_coordinate_range) {
                    log::warn!("Ignoring pin at invalid position {position}");
                    return Transition::unchanged(self);
                }
                if !annotation.is_valid(policy.allow_negative_cost) {
                    log::warn!("Ignoring pin with invalid cost {}", annotation.cost);
                    return Transition::unchanged(self);
                }
                let id = self.allocate_id();
                self.markers.push(Marker::new(id, position, annotation));
                log::debug!("Added pin {id} at {position}");
                Transition {
                    sync: SyncStep::Replace,
                    state: self,
                }
            }
            Command::Select(id) => {
                let Some(annotation) = self.get(id).map(|m| m.annotation.clone()) else {
                    log::warn!("Cannot select unknown pin {id}");
                    return Transition::unchanged(self);
                };
                // Any unsaved draft for the previous selection is dropped here
                self.selected = Some(id);
                self.draft = annotation;
                Transition::unchanged(self)
            }
            Command::UpdateDraft(field) => {
                if !field.is_valid(policy.allow_negative_cost) {
                    log::warn!("Ignoring invalid draft value {field:?}");
                    return Transition::unchanged(self);
                }
                self.draft.merge(field);
                Transition::unchanged(self)
            }
            Command::SaveDraft => {
                let Some(id) = self.selected else {
                    log::warn!("Save requested with no pin selected");
                    return Transition::unchanged(self);
                };
                if !self.draft.is_valid(policy.allow_negative_cost) {
                    log::warn!("Refusing to save draft with invalid cost {}", self.draft.cost);
                    return Transition::unchanged(self);
                }
                let draft = std::mem::take(&mut self.draft);
                self.selected = None;
                let Some(index) = self.index_of(id) else {
                    log::warn!("Selected pin {id} no longer exists, draft discarded");
                    return Transition::unchanged(self);
                };
                self.markers[index].annotation = draft;
                Transition {
                    sync: SyncStep::Replace,
                    state: self,
                }
            }
            Command::CancelEdit => {
                self.close_edit();
                Transition::unchanged(self)
            }
            Command::Remove(id) => {
                let Some(index) = self.index_of(id) else {
                    log::warn!("Cannot remove unknown pin {id}");
                    return Transition::unchanged(self);
                };
                self.markers.remove(index);
                if self.selected == Some(id) {
                    self.close_edit();
                }
                log::debug!("Removed pin {id} (index {index})");
                Transition {
                    sync: SyncStep::for_collection(&self.markers),
                    state: self,
                }
            }
            Command::RemoveAll => {
                self.markers.clear();
                self.close_edit();
                Transition {
                    sync: SyncStep::Delete,
                    state: self,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(state: MarkerState, lat: f64, lng: f64, name: &str) -> MarkerState {
        let t = state.apply(
            Command::Add {
                position: GeoPoint::new(lat, lng),
                annotation: Annotation::new(name, "", 0.0),
            },
            &EditPolicy::default(),
        );
        assert_eq!(t.sync, SyncStep::Replace);
        t.state
    }

    fn apply(state: MarkerState, command: Command) -> Transition {
        state.apply(command, &EditPolicy::default())
    }

    fn names(state: &MarkerState) -> Vec<&str> {
        state
            .markers
            .iter()
            .map(|m| m.annotation.name.as_str())
            .collect()
    }

    #[test]
    fn test_add_appends_last() {
        let mut state = MarkerState::default();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            let before = state.len();
            state = add(state, i as f64, 0.0, name);
            assert_eq!(state.len(), before + 1);
            assert_eq!(state.markers.last().unwrap().annotation.name, *name);
        }
        assert_eq!(names(&state), ["a", "b", "c"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = MarkerState::default();
        state = add(state, 0.0, 0.0, "a");
        let first = state.id_at(0).unwrap();
        state = apply(state, Command::Remove(first)).state;
        state = add(state, 0.0, 0.0, "b");
        assert_ne!(state.id_at(0).unwrap(), first);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let state = MarkerState::default();
        let t = apply(
            state,
            Command::Add {
                position: GeoPoint::new(f64::NAN, 0.0),
                annotation: Annotation::default(),
            },
        );
        assert_eq!(t.sync, SyncStep::None);
        assert!(t.state.is_empty());

        let t = apply(
            t.state,
            Command::Add {
                position: GeoPoint::new(91.0, 0.0),
                annotation: Annotation::default(),
            },
        );
        assert!(t.state.is_empty());

        let t = apply(
            t.state,
            Command::Add {
                position: GeoPoint::new(1.0, 1.0),
                annotation: Annotation::new("", "", -3.0),
            },
        );
        assert!(t.state.is_empty());
    }

    #[test]
    fn test_policy_relaxes_validation() {
        let policy = EditPolicy {
            enforce_coordinate_range: false,
            allow_negative_cost: true,
        };
        let t = MarkerState::default().apply(
            Command::Add {
                position: GeoPoint::new(95.0, 200.0),
                annotation: Annotation::new("refund", "", -12.5),
            },
            &policy,
        );
        assert_eq!(t.sync, SyncStep::Replace);
        assert_eq!(t.state.len(), 1);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut state = MarkerState::default();
        for name in ["a", "b", "c", "d"] {
            state = add(state, 1.0, 1.0, name);
        }
        let original = state.markers.clone();
        let id = state.id_at(1).unwrap();
        let t = apply(state, Command::Remove(id));
        assert_eq!(t.sync, SyncStep::Replace);
        assert_eq!(t.state.len(), original.len() - 1);
        assert_eq!(t.state.markers[0], original[0]);
        assert_eq!(t.state.markers[1..], original[2..]);
    }

    #[test]
    fn test_remove_last_requests_delete() {
        let state = add(MarkerState::default(), 1.0, 1.0, "only");
        let id = state.id_at(0).unwrap();
        let t = apply(state, Command::Remove(id));
        assert_eq!(t.sync, SyncStep::Delete);
        assert!(t.state.is_empty());
    }

    #[test]
    fn test_stale_id_is_a_no_op() {
        let mut state = MarkerState::default();
        state = add(state, 1.0, 1.0, "a");
        state = add(state, 2.0, 2.0, "b");
        let stale = state.id_at(0).unwrap();
        state = apply(state, Command::Remove(stale)).state;

        let before = state.clone();
        let t = apply(state, Command::Remove(stale));
        assert_eq!(t.sync, SyncStep::None);
        assert_eq!(t.state, before);

        let t = apply(t.state, Command::Select(stale));
        assert_eq!(t.state.selected, None);
    }

    #[test]
    fn test_select_loads_draft_and_discards_previous_edit() {
        let mut state = MarkerState::default();
        state = add(state, 1.0, 1.0, "a");
        state = add(state, 2.0, 2.0, "b");
        let (a, b) = (state.id_at(0).unwrap(), state.id_at(1).unwrap());

        state = apply(state, Command::Select(a)).state;
        state = apply(state, Command::UpdateDraft(AnnotationField::Name("edited".into()))).state;
        state = apply(state, Command::Select(b)).state;

        assert_eq!(state.selected, Some(b));
        assert_eq!(state.draft.name, "b");
        assert_eq!(names(&state), ["a", "b"]);
    }

    #[test]
    fn test_update_draft_does_not_touch_collection() {
        let state = add(MarkerState::default(), 1.0, 1.0, "a");
        let id = state.id_at(0).unwrap();
        let state = apply(state, Command::Select(id)).state;
        let t = apply(state, Command::UpdateDraft(AnnotationField::Cost(40.0)));
        assert_eq!(t.sync, SyncStep::None);
        assert_eq!(t.state.draft.cost, 40.0);
        assert_eq!(t.state.markers[0].annotation.cost, 0.0);

        let t = apply(t.state, Command::UpdateDraft(AnnotationField::Cost(-1.0)));
        assert_eq!(t.state.draft.cost, 40.0);
    }

    #[test]
    fn test_save_draft_keeps_position() {
        let mut state = add(MarkerState::default(), 51.5, -0.09, "Tower");
        let id = state.id_at(0).unwrap();
        state = apply(state, Command::Select(id)).state;
        state = apply(
            state,
            Command::UpdateDraft(AnnotationField::Description("castle".into())),
        )
        .state;
        state = apply(state, Command::UpdateDraft(AnnotationField::Cost(33.6))).state;

        let t = apply(state, Command::SaveDraft);
        assert_eq!(t.sync, SyncStep::Replace);
        let marker = &t.state.markers[0];
        assert_eq!(marker.id, id);
        assert_eq!(marker.position, GeoPoint::new(51.5, -0.09));
        assert_eq!(marker.annotation, Annotation::new("Tower", "castle", 33.6));
        assert_eq!(t.state.selected, None);
        assert_eq!(t.state.draft, Annotation::default());
    }

    #[test]
    fn test_save_without_selection_is_a_no_op() {
        let state = add(MarkerState::default(), 1.0, 1.0, "a");
        let before = state.clone();
        let t = apply(state, Command::SaveDraft);
        assert_eq!(t.sync, SyncStep::None);
        assert_eq!(t.state, before);
    }

    #[test]
    fn test_removing_selected_pin_closes_edit() {
        let state = add(MarkerState::default(), 1.0, 1.0, "a");
        let id = state.id_at(0).unwrap();
        let state = apply(state, Command::Select(id)).state;
        let t = apply(state, Command::Remove(id));
        assert_eq!(t.state.selected, None);
        assert_eq!(t.state.draft, Annotation::default());
    }

    #[test]
    fn test_cancel_edit() {
        let state = add(MarkerState::default(), 1.0, 1.0, "a");
        let id = state.id_at(0).unwrap();
        let state = apply(state, Command::Select(id)).state;
        let state = apply(state, Command::UpdateDraft(AnnotationField::Name("x".into()))).state;
        let t = apply(state, Command::CancelEdit);
        assert_eq!(t.sync, SyncStep::None);
        assert_eq!(t.state.selected, None);
        assert_eq!(names(&t.state), ["a"]);
    }

    #[test]
    fn test_remove_all() {
        let mut state = MarkerState::default();
        state = add(state, 1.0, 1.0, "a");
        state = add(state, 2.0, 2.0, "b");
        let t = apply(state, Command::RemoveAll);
        assert_eq!(t.sync, SyncStep::Delete);
        assert!(t.state.is_empty());
    }

    #[test]
    fn test_replace_markers_continues_ids() {
        let mut state = add(MarkerState::default(), 1.0, 1.0, "a");
        let old = state.id_at(0).unwrap();
        state.replace_markers(vec![(GeoPoint::new(3.0, 3.0), Annotation::default())]);
        assert_eq!(state.len(), 1);
        assert_ne!(state.id_at(0).unwrap(), old);
    }
}
