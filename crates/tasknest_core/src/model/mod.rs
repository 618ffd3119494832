//! Domain model for projects and the todo items they own.
//!
//! # Responsibility
//! - Define the two durable record shapes shared by store, codec and views.
//!
//! # Invariants
//! - Ids are opaque strings assigned at creation and never rewritten.
//! - A todo item belongs to exactly one project for its whole lifetime.

pub mod project;
pub mod todo;
