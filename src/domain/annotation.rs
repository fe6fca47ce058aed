//! Annotation types attached to map pins
//!
//! An annotation is the user-editable part of a pin: what the place is called,
//! a free-form description and the expected cost of the visit.

use serde::{Deserialize, Serialize};

/// Name, description and cost of a pin
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub description: String,
    pub cost: f64,
}

impl Annotation {
    pub fn new(name: impl Into<String>, description: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cost,
        }
    }

    /// Merge a single edited field into this annotation
    pub fn merge(&mut self, field: AnnotationField) {
        match field {
            AnnotationField::Name(name) => self.name = name,
            AnnotationField::Description(description) => self.description = description,
            AnnotationField::Cost(cost) => self.cost = cost,
        }
    }

    /// Check the cost against the configured sign policy
    pub fn is_valid(&self, allow_negative_cost: bool) -> bool {
        cost_allowed(self.cost, allow_negative_cost)
    }
}

/// One field of an annotation, as produced by the edit form
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationField {
    Name(String),
    Description(String),
    Cost(f64),
}

impl AnnotationField {
    pub fn is_valid(&self, allow_negative_cost: bool) -> bool {
        match self {
            AnnotationField::Cost(cost) => cost_allowed(*cost, allow_negative_cost),
            AnnotationField::Name(_) | AnnotationField::Description(_) => true,
        }
    }
}

fn cost_allowed(cost: f64, allow_negative: bool) -> bool {
    cost.is_finite() && (allow_negative || cost >= 0.0)
}
