//! Map pins

use super::annotation::Annotation;
use super::geometry::GeoPoint;

/// Stable identifier of a pin for the lifetime of a store
///
/// Ids are never persisted; they are handed out again on every hydrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u64);

impl MarkerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-placed pin with its annotation
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: GeoPoint,
    pub annotation: Annotation,
}

impl Marker {
    pub fn new(id: MarkerId, position: GeoPoint, annotation: Annotation) -> Self {
        Self {
            id,
            position,
            annotation,
        }
    }
}
