//! Travel planner: pins on a map, annotated with a name, description and cost,
//! kept in a persisted key-value store between sessions.

pub mod config;
pub mod domain;
pub mod pages;
pub mod session;
pub mod storage;
pub mod store;
pub mod surface;
pub mod view;
