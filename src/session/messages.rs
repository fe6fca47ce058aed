//! Message types for a map session
//!
//! This module contains:
//! - `Msg` with nested sub-enums, one per event source
//! - `MapMsg` for events reported by the map surface
//! - `FormMsg` for events reported by the pin edit form

use crate::domain::{GeoPoint, MarkerId};

// ============================================================================
// Map Surface Types
// ============================================================================

/// Events reported by the map surface
#[derive(Debug, Clone, PartialEq)]
pub enum MapMsg {
    /// Click on the map background at a geographic position
    MapClicked(GeoPoint),
    /// Click on an existing pin
    MarkerClicked(MarkerId),
    /// Remove control inside a pin's popup
    RemoveClicked(MarkerId),
}

// ============================================================================
// Edit Form Types
// ============================================================================

/// Events reported by the edit form
#[derive(Debug, Clone, PartialEq)]
pub enum FormMsg {
    /// Name text field changed
    NameChanged(String),
    /// Description text field changed
    DescriptionChanged(String),
    /// Raw text of the cost input changed
    CostChanged(String),
    /// Save button
    Save,
    /// Close the form without saving
    Cancel,
}

/// Top-level message for a map session
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Map(MapMsg),
    Form(FormMsg),
}

impl From<MapMsg> for Msg {
    fn from(msg: MapMsg) -> Self {
        Msg::Map(msg)
    }
}

impl From<FormMsg> for Msg {
    fn from(msg: FormMsg) -> Self {
        Msg::Form(msg)
    }
}
