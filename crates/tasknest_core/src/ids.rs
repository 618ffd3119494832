//! Identifier sources used by create operations.
//!
//! # Responsibility
//! - Hide id generation behind a small port so tests stay deterministic.
//!
//! # Invariants
//! - An `IdSource` never yields the same id twice within one process.

use uuid::Uuid;

/// Producer of collision-free opaque ids.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUID ids for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Counter-backed ids (`<prefix>-1`, `<prefix>-2`, ...).
#[derive(Debug, Clone)]
pub struct SequentialIdSource {
    prefix: String,
    next: u64,
}

impl SequentialIdSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::{IdSource, SequentialIdSource, UuidIdSource};
    use std::collections::HashSet;

    #[test]
    fn uuid_source_yields_distinct_ids() {
        let mut source = UuidIdSource;
        let ids: HashSet<String> = (0..64).map(|_| source.next_id()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn sequential_source_counts_from_one() {
        let mut source = SequentialIdSource::new("todo");
        assert_eq!(source.next_id(), "todo-1");
        assert_eq!(source.next_id(), "todo-2");
    }
}
