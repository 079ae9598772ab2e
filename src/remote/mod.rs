//! Remote card feed module
//!
//! Provides the HTTP client that fetches the card feed.

mod client;

pub use client::RemoteClient;
