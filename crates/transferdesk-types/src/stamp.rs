//! Optimistic concurrency stamps.
//!
//! Every mutable entity carries an opaque 128-bit [`ConcurrencyStamp`]. The
//! storage layer regenerates it on every successful write and compares the
//! caller-supplied value against the stored one as part of the conditional
//! update (`UPDATE ... WHERE id = ? AND stamp = ?` semantics). A mismatch
//! means another writer got there first and the caller must re-read.
//!
//! This is the only conflict-detection mechanism in the system — no locks
//! are held across requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque per-entity token compared-and-swapped on update to detect
/// lost updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConcurrencyStamp(Uuid);

impl ConcurrencyStamp {
    /// Generate a fresh random stamp.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Constant-value stamp comparison. Stamps are opaque: equality is the
    /// only operation callers may rely on.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self == other
    }
}

impl Default for ConcurrencyStamp {
    fn default() -> Self {
        Self::fresh()
    }
}

impl fmt::Display for ConcurrencyStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Entities guarded by the stamp controller.
///
/// The store's conditional updates are written against this trait, so the
/// compare-and-swap discipline lives in one place regardless of entity type.
pub trait Stamped {
    /// Entity kind name used in conflict errors (e.g. `"Team"`).
    fn entity_name() -> &'static str;

    /// The entity's raw UUID, for conflict errors.
    fn entity_uuid(&self) -> Uuid;

    /// The currently held stamp.
    fn stamp(&self) -> ConcurrencyStamp;

    /// Replace the stamp. Called by the store inside the same transaction
    /// as the business change, never by callers directly.
    fn set_stamp(&mut self, stamp: ConcurrencyStamp);
}

/// Caller expectation for a conditional write.
#[derive(Debug, Clone, Copy)]
pub enum Expect {
    /// Write regardless of the stored stamp (entity was loaded inside the
    /// same transaction, so no concurrent writer can have intervened).
    Any,
    /// Write only if the stored stamp matches the one the caller observed.
    Stamp(ConcurrencyStamp),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stamps_differ() {
        let a = ConcurrencyStamp::fresh();
        let b = ConcurrencyStamp::fresh();
        assert_ne!(a, b);
        assert!(!a.matches(&b));
    }

    #[test]
    fn stamp_matches_itself() {
        let a = ConcurrencyStamp::fresh();
        let copy = a;
        assert!(a.matches(&copy));
    }

    #[test]
    fn display_is_opaque_hex() {
        let a = ConcurrencyStamp::fresh();
        let s = a.to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn serde_roundtrip() {
        let a = ConcurrencyStamp::fresh();
        let json = serde_json::to_string(&a).unwrap();
        let back: ConcurrencyStamp = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
