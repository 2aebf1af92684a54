//! Globally unique identifiers used throughout Transferdesk.
//!
//! All entity IDs use UUIDv7 for time-ordered lexicographic sorting.
//! `UserId` identifies a team owner; identity itself is managed by the
//! caller (authentication is out of scope for the engine).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// TeamId
// ---------------------------------------------------------------------------

/// Globally unique team identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TeamId(pub Uuid);

impl TeamId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// Globally unique player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TransferId
// ---------------------------------------------------------------------------

/// Globally unique transfer identifier.
///
/// Ledger entries caused by a transfer are tagged with this id; the
/// uniqueness constraints on those tags are what make settlement
/// effectively-once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TransferId(pub Uuid);

impl TransferId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transfer:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EntryId
// ---------------------------------------------------------------------------

/// Globally unique ledger entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Unique identifier for a team owner, supplied by the calling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_id_uniqueness() {
        let a = TeamId::new();
        let b = TeamId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn transfer_id_ordering() {
        let a = TransferId::new();
        let b = TransferId::new();
        assert!(a < b);
    }

    #[test]
    fn display_carries_kind_prefix() {
        let id = PlayerId::new();
        assert!(id.to_string().starts_with("player:"));
        let id = EntryId::new();
        assert!(id.to_string().starts_with("entry:"));
    }

    #[test]
    fn serde_roundtrips() {
        let tid = TeamId::new();
        let json = serde_json::to_string(&tid).unwrap();
        let back: TeamId = serde_json::from_str(&json).unwrap();
        assert_eq!(tid, back);

        let uid = UserId::new();
        let json = serde_json::to_string(&uid).unwrap();
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(uid, back);
    }
}
