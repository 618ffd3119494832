//! Core use-case services.
//!
//! # Responsibility
//! - Own durable domain state and keep it synchronized with storage.
//! - Keep presentation layers decoupled from storage details.

pub mod store;
