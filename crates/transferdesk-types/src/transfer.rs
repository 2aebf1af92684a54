//! Transfer entity and its two-state lifecycle.
//!
//! ```text
//!   ┌────────┐  settlement   ┌───────────┐
//!   │ LISTED ├──────────────▶│ COMPLETED │
//!   └────────┘               └───────────┘
//! ```
//!
//! A transfer is created **Listed** (destination team unset) when a team
//! owner lists one of their own players, and transitions once, irreversibly,
//! to **Completed** (destination team set) when settlement succeeds. There
//! is no cancel or reopen transition. At most one Listed transfer exists
//! per player at any time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ConcurrencyStamp, PlayerId, Result, Stamped, TeamId, TransferId, TransferdeskError,
};

/// Lifecycle state of a transfer, derived from whether the destination team
/// has been set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferState {
    /// Awaiting a buyer. Destination team unset.
    Listed,
    /// Settlement succeeded. Destination team set. **Terminal.**
    Completed,
}

impl std::fmt::Display for TransferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listed => write!(f, "LISTED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// A player transfer listing.
///
/// `from_team_id` and `player_id` are immutable after creation;
/// `to_team_id` is set exactly once, by settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    /// Globally unique transfer identifier.
    pub id: TransferId,
    /// External-facing identifier, exposed to API callers.
    pub external_id: Uuid,
    /// Price the destination team must pay. Non-negative.
    pub asking_price: Decimal,
    /// The team listing the player. Immutable.
    pub from_team_id: TeamId,
    /// The player being transferred. Immutable.
    pub player_id: PlayerId,
    /// The destination team. `None` while Listed; set on completion.
    pub to_team_id: Option<TeamId>,
    /// Optimistic concurrency stamp.
    pub stamp: ConcurrencyStamp,
    /// When the transfer was listed.
    pub created_at: DateTime<Utc>,
    /// When the transfer was last written.
    pub updated_at: DateTime<Utc>,
}

impl Transfer {
    /// Create a new transfer in the Listed state.
    #[must_use]
    pub fn list(
        from_team_id: TeamId,
        player_id: PlayerId,
        asking_price: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransferId::new(),
            external_id: Uuid::new_v4(),
            asking_price,
            from_team_id,
            player_id,
            to_team_id: None,
            stamp: ConcurrencyStamp::fresh(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TransferState {
        if self.to_team_id.is_some() {
            TransferState::Completed
        } else {
            TransferState::Listed
        }
    }

    /// Whether settlement has already happened.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.to_team_id.is_some()
    }

    /// Transition Listed → Completed by setting the destination team.
    ///
    /// # Errors
    /// Returns [`TransferdeskError::AlreadyCompleted`] if the transfer is
    /// already terminal — the transition is irreversible and single-shot.
    pub fn complete(&mut self, to_team_id: TeamId) -> Result<()> {
        if self.is_completed() {
            return Err(TransferdeskError::AlreadyCompleted(self.id));
        }
        self.to_team_id = Some(to_team_id);
        Ok(())
    }
}

impl Stamped for Transfer {
    fn entity_name() -> &'static str {
        "Transfer"
    }

    fn entity_uuid(&self) -> Uuid {
        self.id.0
    }

    fn stamp(&self) -> ConcurrencyStamp {
        self.stamp
    }

    fn set_stamp(&mut self, stamp: ConcurrencyStamp) {
        self.stamp = stamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed() -> Transfer {
        Transfer::list(
            TeamId::new(),
            PlayerId::new(),
            Decimal::new(200_000, 0),
            Utc::now(),
        )
    }

    #[test]
    fn new_transfer_is_listed() {
        let t = listed();
        assert_eq!(t.state(), TransferState::Listed);
        assert!(!t.is_completed());
        assert!(t.to_team_id.is_none());
    }

    #[test]
    fn complete_sets_destination() {
        let mut t = listed();
        let dest = TeamId::new();
        t.complete(dest).unwrap();
        assert_eq!(t.state(), TransferState::Completed);
        assert_eq!(t.to_team_id, Some(dest));
    }

    #[test]
    fn complete_twice_blocked() {
        let mut t = listed();
        t.complete(TeamId::new()).unwrap();
        let err = t.complete(TeamId::new()).unwrap_err();
        assert!(matches!(err, TransferdeskError::AlreadyCompleted(id) if id == t.id));
    }

    #[test]
    fn state_display() {
        assert_eq!(TransferState::Listed.to_string(), "LISTED");
        assert_eq!(TransferState::Completed.to_string(), "COMPLETED");
    }

    #[test]
    fn serde_roundtrip() {
        let t = listed();
        let json = serde_json::to_string(&t).unwrap();
        let back: Transfer = serde_json::from_str(&json).unwrap();
        assert_eq!(t.id, back.id);
        assert_eq!(t.asking_price, back.asking_price);
        assert_eq!(back.state(), TransferState::Listed);
    }
}
