//! Wire format of the persisted marker collection
//!
//! The value is a JSON array of records:
//! `{ "lat": number, "lng": number, "note": { "name", "description", "cost" } }`
//!
//! Decoding is lenient per record: a record without numeric `lat`/`lng` is
//! dropped on its own, the rest of the array still loads. Only a value that is
//! not a JSON array at all is treated as corrupt.
//!
//! Elements are split out as raw JSON before any number is converted, so a
//! number too large for `f64` only costs its own record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::value::RawValue;

use crate::domain::{Annotation, GeoPoint, Marker};
use crate::store::EditPolicy;

#[derive(Serialize)]
struct MarkerRecordOut<'a> {
    lat: f64,
    lng: f64,
    note: &'a Annotation,
}

#[derive(Deserialize)]
struct MarkerRecordIn {
    lat: f64,
    lng: f64,
    #[serde(default)]
    note: Value,
}

/// Result of decoding a persisted value
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DecodedMarkers {
    /// Valid records in stored order
    pub records: Vec<(GeoPoint, Annotation)>,
    /// Number of records that failed validation
    pub dropped: usize,
}

/// Encode the full collection, in order
pub fn encode(markers: &[Marker]) -> serde_json::Result<String> {
    let records: Vec<MarkerRecordOut<'_>> = markers
        .iter()
        .map(|m| MarkerRecordOut {
            lat: m.position.lat,
            lng: m.position.lng,
            note: &m.annotation,
        })
        .collect();
    serde_json::to_string(&records)
}

/// Decode a persisted value
///
/// Fails only when `raw` is not a JSON array. Stored costs that break the
/// cost policy load as 0.
pub fn decode(raw: &str, policy: &EditPolicy) -> serde_json::Result<DecodedMarkers> {
    let elements: Vec<Box<RawValue>> = serde_json::from_str(raw)?;
    let mut decoded = DecodedMarkers::default();

    for (index, element) in elements.iter().enumerate() {
        match serde_json::from_str::<MarkerRecordIn>(element.get()) {
            Ok(record) => {
                let position = GeoPoint::new(record.lat, record.lng);
                if !position.is_valid(policy.enforce_coordinate_range) {
                    log::debug!("Dropping record {index}: position {position} out of range");
                    decoded.dropped += 1;
                    continue;
                }
                let annotation = annotation_from_note(&record.note, policy.allow_negative_cost);
                decoded.records.push((position, annotation));
            }
            Err(e) => {
                log::debug!("Dropping record {index}: {e}");
                decoded.dropped += 1;
            }
        }
    }

    Ok(decoded)
}

/// Build an annotation from a stored `note`
///
/// Older revisions stored the note as a bare string; that text becomes the
/// description. Missing or mistyped fields fall back to defaults, and so does
/// a cost the policy would not accept from the edit form.
fn annotation_from_note(note: &Value, allow_negative_cost: bool) -> Annotation {
    match note {
        Value::Object(fields) => {
            let text = |key: &str| {
                fields
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            let cost = fields
                .get("cost")
                .and_then(Value::as_f64)
                .filter(|c| c.is_finite() && (allow_negative_cost || *c >= 0.0))
                .unwrap_or(0.0);
            Annotation {
                name: text("name"),
                description: text("description"),
                cost,
            }
        }
        Value::String(legacy) => Annotation {
            description: legacy.clone(),
            ..Annotation::default()
        },
        _ => Annotation::default(),
    }
}
