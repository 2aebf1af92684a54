//! Aggregate maintenance: cached balances kept equal to ledger sums.
//!
//! The ledger-backed aggregates (`Team::transfer_budget`, `Player::value`)
//! may only change through this module. The maintainer applies a ledger
//! entry's delta to its owner's cached field in the same transaction that
//! persists the entry, so the cache can never observe an entry without its
//! effect or vice versa. `Team::value` is a roster sum rather than a ledger
//! sum: settlement and roster operations adjust it directly where players
//! move or appreciate, and the recompute path can rebuild it from the
//! current roster.
//!
//! The recompute path overwrites a cached field with the full ledger sum.
//! It exists to heal drift (administrative repair), not for the normal
//! write path, which is incremental.

use rust_decimal::Decimal;
use transferdesk_store::StoreTx;
use transferdesk_types::{
    BudgetEntry, Expect, Player, PlayerId, PlayerValueEntry, Result, Team, TeamId,
    TransferdeskError,
};

/// Which cached aggregate to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOwner {
    /// `Team::transfer_budget` = Σ budget entry deltas.
    TeamBudget(TeamId),
    /// `Team::value` = Σ current players' values.
    TeamValue(TeamId),
    /// `Player::value` = Σ value entry deltas.
    PlayerValue(PlayerId),
}

/// Applies ledger entries to cached aggregates inside an open transaction.
#[derive(Debug, Clone, Copy)]
pub struct AggregateMaintainer {
    /// Floor below which no team's transfer budget may fall.
    min_budget: Decimal,
}

impl AggregateMaintainer {
    #[must_use]
    pub fn new(min_budget: Decimal) -> Self {
        Self { min_budget }
    }

    /// Persist a budget entry and apply its delta to the owning team's
    /// cached `transfer_budget`, atomically within `tx`.
    ///
    /// The floor check happens before any write: on violation the entry is
    /// not persisted and the aggregate is untouched. Because the store
    /// serializes transactions, no concurrent writer can slip a debit in
    /// between the check and the insert.
    ///
    /// # Errors
    /// - [`TransferdeskError::BudgetInsufficient`] if the delta would push
    ///   the budget below the floor
    /// - [`TransferdeskError::DuplicateBudgetEntry`] if the transfer was
    ///   already debited (the effectively-once backstop)
    pub fn apply_budget_entry(&self, tx: &mut StoreTx<'_>, entry: BudgetEntry) -> Result<Team> {
        let mut team = tx.team(entry.team_id)?;
        let after = team.transfer_budget + entry.delta;
        if after < self.min_budget {
            return Err(TransferdeskError::BudgetInsufficient {
                needed: -entry.delta,
                available: team.transfer_budget,
            });
        }
        tx.insert_budget_entry(entry)?;
        team.transfer_budget = after;
        tx.update_team(team, Expect::Any)
    }

    /// Persist a player value entry and apply its delta to the player's
    /// cached `value`, atomically within `tx`.
    ///
    /// # Errors
    /// [`TransferdeskError::DuplicatePlayerValueEntry`] if a Transfer-kind
    /// entry for the same source transfer already exists.
    pub fn apply_value_entry(
        &self,
        tx: &mut StoreTx<'_>,
        entry: PlayerValueEntry,
    ) -> Result<Player> {
        let mut player = tx.player(entry.player_id)?;
        let delta = entry.delta;
        tx.insert_value_entry(entry)?;
        player.value += delta;
        tx.update_player(player, Expect::Any)
    }

    /// Overwrite a cached aggregate with its ledger sum. Returns the
    /// recomputed value.
    ///
    /// # Errors
    /// Not-found errors if the owner is missing.
    pub fn recompute(&self, tx: &mut StoreTx<'_>, owner: AggregateOwner) -> Result<Decimal> {
        match owner {
            AggregateOwner::TeamBudget(team_id) => {
                let mut team = tx.team(team_id)?;
                let sum: Decimal = tx.budget_entries_for(team_id).iter().map(|e| e.delta).sum();
                tracing::info!(%team_id, cached = %team.transfer_budget, ledger = %sum, "recomputed transfer budget");
                team.transfer_budget = sum;
                tx.update_team(team, Expect::Any)?;
                Ok(sum)
            }
            AggregateOwner::TeamValue(team_id) => {
                let mut team = tx.team(team_id)?;
                let sum: Decimal = tx.players_of_team(team_id).iter().map(|p| p.value).sum();
                tracing::info!(%team_id, cached = %team.value, ledger = %sum, "recomputed team value");
                team.value = sum;
                tx.update_team(team, Expect::Any)?;
                Ok(sum)
            }
            AggregateOwner::PlayerValue(player_id) => {
                let mut player = tx.player(player_id)?;
                let sum: Decimal = tx.value_entries_for(player_id).iter().map(|e| e.delta).sum();
                tracing::info!(%player_id, cached = %player.value, ledger = %sum, "recomputed player value");
                player.value = sum;
                tx.update_player(player, Expect::Any)?;
                Ok(sum)
            }
        }
    }
}
