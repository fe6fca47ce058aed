//! Pure domain types with minimal dependencies
//!
//! Types here do no I/O and know nothing about storage or rendering.

pub mod annotation;
pub mod geometry;
pub mod marker;

pub use annotation::*;
pub use geometry::*;
pub use marker::*;
