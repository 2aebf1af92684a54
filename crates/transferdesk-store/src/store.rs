//! The in-memory transactional store.
//!
//! `MemoryStore` is the engine's storage backend: atomic multi-row
//! read-modify-write with conditional updates and unique-constraint
//! enforcement. A transaction runs against a clone of the tables and the
//! clone is installed only on `Ok` — a failed or abandoned transaction
//! leaves no trace.
//!
//! A single mutex serializes transactions, making the store the sole
//! arbiter of correctness under contention: the budget-floor check and the
//! debiting insert inside one transaction can never interleave with
//! another writer. Optimistic concurrency across the caller's read-to-write
//! gap is still detected by the stamp compare in the conditional updates.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use transferdesk_types::{
    BudgetEntry, Player, PlayerId, PlayerValueEntry, Result, Team, TeamId, Transfer, TransferId,
    UserId,
};

use crate::tables::Tables;
use crate::tx::StoreTx;

/// In-memory storage backend with all-or-nothing transactions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` as one atomic transaction at timestamp `now`.
    ///
    /// All writes made through the [`StoreTx`] become visible together on
    /// `Ok`; on `Err` none of them are, and the error propagates unchanged.
    ///
    /// # Errors
    /// Whatever `f` returns.
    pub fn transact<T>(
        &self,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut StoreTx<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut live = self.lock();
        let mut working = live.clone();
        let mut tx = StoreTx::new(&mut working, now);
        match f(&mut tx) {
            Ok(value) => {
                *live = working;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "transaction rolled back");
                Err(err)
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -----------------------------------------------------------------
    // Snapshot reads (transactionally consistent point-in-time copies)
    // -----------------------------------------------------------------

    pub fn team(&self, id: TeamId) -> Result<Team> {
        self.lock().find_team(id)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player> {
        self.lock().find_player(id)
    }

    pub fn transfer(&self, id: TransferId) -> Result<Transfer> {
        self.lock().find_transfer(id)
    }

    #[must_use]
    pub fn open_transfer_for_player(&self, player_id: PlayerId) -> Option<Transfer> {
        self.lock().open_transfer_for_player(player_id)
    }

    #[must_use]
    pub fn teams_by_owner(&self, owner_id: UserId) -> Vec<Team> {
        self.lock().teams_by_owner(owner_id)
    }

    #[must_use]
    pub fn players_of_team(&self, team_id: TeamId) -> Vec<Player> {
        self.lock().players_of_team(team_id)
    }

    #[must_use]
    pub fn budget_entries(&self, team_id: TeamId) -> Vec<BudgetEntry> {
        self.lock().budget_entries_for(team_id)
    }

    #[must_use]
    pub fn value_entries(&self, player_id: PlayerId) -> Vec<PlayerValueEntry> {
        self.lock().value_entries_for(player_id)
    }

    #[must_use]
    pub fn all_teams(&self) -> Vec<Team> {
        self.lock().all_teams()
    }
}
