//! Transient navigation and editing state for presentation layers.
//!
//! # Responsibility
//! - Track which view is active and which project is selected.
//! - Hold input buffers for add/rename/edit flows and translate their
//!   confirmation into store operations.
//!
//! # Invariants
//! - Nothing in this module is persisted.
//! - Store mutations happen only on explicit confirm actions.

pub mod controller;
pub mod input;
