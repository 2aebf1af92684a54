//! Append-only ledger entries — the source of truth for all balances.
//!
//! Entries are write-once: creating one is the *only* way an aggregate
//! balance may change. Each entry carries a signed delta; the sum of all
//! entries for an owner must always equal the owner's cached aggregate
//! field. The Aggregate Maintainer applies each delta inside the same
//! transaction that persists the entry, so the two can never diverge.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EntryId, PlayerId, TeamId, TransferId, constants};

/// Why a player's value changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerValueKind {
    /// Seed entry written when the player is created.
    Initial,
    /// Market appreciation applied when a transfer settles. At most one
    /// such entry may exist per source transfer.
    Transfer,
}

impl std::fmt::Display for PlayerValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initial => write!(f, "INITIAL"),
            Self::Transfer => write!(f, "TRANSFER"),
        }
    }
}

/// Immutable record of a signed change to a player's value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerValueEntry {
    /// Globally unique entry identifier.
    pub id: EntryId,
    /// The player whose value this entry adjusts.
    pub player_id: PlayerId,
    /// Why the value changed.
    pub kind: PlayerValueKind,
    /// Signed delta: positive for increase, negative for decrease.
    pub delta: Decimal,
    /// The transfer that caused this entry, for `Transfer`-kind entries.
    pub source_transfer_id: Option<TransferId>,
    /// When the entry was written.
    pub recorded_at: DateTime<Utc>,
}

impl PlayerValueEntry {
    /// Seed entry written when a player is created.
    #[must_use]
    pub fn initial(player_id: PlayerId, value: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            player_id,
            kind: PlayerValueKind::Initial,
            delta: value,
            source_transfer_id: None,
            recorded_at: now,
        }
    }

    /// Market-appreciation entry written when a transfer settles.
    #[must_use]
    pub fn transfer_rise(
        player_id: PlayerId,
        increment: Decimal,
        source: TransferId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            player_id,
            kind: PlayerValueKind::Transfer,
            delta: increment,
            source_transfer_id: Some(source),
            recorded_at: now,
        }
    }
}

/// Immutable record of a signed change to a team's transfer budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Globally unique entry identifier.
    pub id: EntryId,
    /// The team whose budget this entry adjusts.
    pub team_id: TeamId,
    /// Signed delta: positive for increase, negative for decrease.
    pub delta: Decimal,
    /// Human-readable reason ("Initial", "Transfer", ...).
    pub description: String,
    /// The transfer that caused this entry, if any. At most one budget
    /// entry may exist per transfer — a transfer debits a destination
    /// team's budget exactly once.
    pub transfer_id: Option<TransferId>,
    /// When the entry was written.
    pub recorded_at: DateTime<Utc>,
}

impl BudgetEntry {
    /// Seed entry written when a team is created.
    #[must_use]
    pub fn initial(team_id: TeamId, budget: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            team_id,
            delta: budget,
            description: constants::INITIAL_VALUE_DESCRIPTION.to_string(),
            transfer_id: None,
            recorded_at: now,
        }
    }

    /// Debit entry written against the destination team when a transfer
    /// settles.
    #[must_use]
    pub fn transfer_debit(
        team_id: TeamId,
        asking_price: Decimal,
        transfer_id: TransferId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            team_id,
            delta: -asking_price,
            description: constants::TRANSFER_DESCRIPTION.to_string(),
            transfer_id: Some(transfer_id),
            recorded_at: now,
        }
    }
}
