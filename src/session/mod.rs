//! Map session event handling
//!
//! This module contains:
//! - Message types emitted by the map surface and the edit form
//! - Handlers that turn those messages into marker store commands

pub mod handlers;
pub mod messages;

pub use handlers::handle_msg;
pub use messages::{FormMsg, MapMsg, Msg};
