//! View models handed to the map surface and the edit form
//!
//! The surface draws one pin per `MarkerView` in order, each with its popup,
//! and shows the form only while `MapView::form` is set.

use crate::config::PlannerConfig;
use crate::domain::{GeoPoint, MarkerId};
use crate::store::MarkerState;

#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub name: String,
    pub description: String,
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: MarkerId,
    /// Render order; only valid until the next change
    pub index: usize,
    pub position: GeoPoint,
    pub popup: PopupView,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub editing: MarkerId,
    pub name: String,
    pub description: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub markers: Vec<MarkerView>,
    pub form: Option<FormView>,
}

impl MapView {
    pub fn build(state: &MarkerState, config: &PlannerConfig) -> Self {
        let markers = state
            .markers
            .iter()
            .enumerate()
            .map(|(index, marker)| MarkerView {
                id: marker.id,
                index,
                position: marker.position,
                popup: PopupView {
                    name: marker.annotation.name.clone(),
                    description: marker.annotation.description.clone(),
                    cost: config.format_cost(marker.annotation.cost),
                },
                selected: state.selected == Some(marker.id),
            })
            .collect();

        let form = state.selected_marker().map(|marker| FormView {
            editing: marker.id,
            name: state.draft.name.clone(),
            description: state.draft.description.clone(),
            cost: state.draft.cost,
        });

        Self {
            center: config.map_center,
            zoom: config.map_zoom,
            tile_url: config.tile_url.clone(),
            attribution: config.tile_attribution.clone(),
            markers,
            form,
        }
    }
}
