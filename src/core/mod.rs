//! Core module - Business logic
//!
//! Card model, rendering, queries and the browsing session.

pub mod cache;
pub mod card;
pub mod history;
pub mod library;
pub mod markup;
pub mod query;
pub mod render;
pub mod session;
pub mod store;
