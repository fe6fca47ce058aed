//! Session message handlers
//!
//! Translates map and form events into marker store commands.

use crate::domain::{Annotation, AnnotationField};
use crate::session::messages::{FormMsg, MapMsg, Msg};
use crate::storage::KeyValueStore;
use crate::store::{Command, MarkerStore};

/// Handle a session message, modifying the store
pub fn handle_msg<S: KeyValueStore>(store: &mut MarkerStore<S>, msg: Msg) {
    match msg {
        Msg::Map(msg) => handle_map_msg(store, msg),
        Msg::Form(msg) => handle_form_msg(store, msg),
    }
}

// ============================================================================
// Map handlers
// ============================================================================

fn handle_map_msg<S: KeyValueStore>(store: &mut MarkerStore<S>, msg: MapMsg) {
    match msg {
        MapMsg::MapClicked(position) => {
            // While a pin is being edited its draft belongs to that pin
            let annotation = if store.selected().is_some() {
                Annotation::default()
            } else {
                store.draft().clone()
            };
            store.dispatch(Command::Add {
                position,
                annotation,
            });
        }
        MapMsg::MarkerClicked(id) => store.dispatch(Command::Select(id)),
        MapMsg::RemoveClicked(id) => store.dispatch(Command::Remove(id)),
    }
}

// ============================================================================
// Form handlers
// ============================================================================

fn handle_form_msg<S: KeyValueStore>(store: &mut MarkerStore<S>, msg: FormMsg) {
    match msg {
        FormMsg::NameChanged(name) => store.update_draft(AnnotationField::Name(name)),
        FormMsg::DescriptionChanged(description) => {
            store.update_draft(AnnotationField::Description(description))
        }
        FormMsg::CostChanged(text) => match parse_cost(&text) {
            Some(cost) => store.update_draft(AnnotationField::Cost(cost)),
            None => log::warn!("Ignoring unparsable cost {text:?}"),
        },
        FormMsg::Save => store.save_draft(),
        FormMsg::Cancel => store.dispatch(Command::CancelEdit),
    }
}

/// Parse the text of the cost input; blank means zero
pub fn parse_cost(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|c| c.is_finite())
}
