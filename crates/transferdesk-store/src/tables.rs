//! The table set backing the in-memory store.
//!
//! `Tables` is cheaply cloneable; a transaction works on a clone and the
//! clone replaces the live tables only on commit. The unique-index sets
//! are the storage-level equivalents of database unique constraints:
//!
//! - `listed_players` — at most one Listed transfer per player
//! - `budget_entry_transfers` — at most one budget entry per transfer
//! - `value_entry_transfers` — at most one Transfer-kind value entry per
//!   transfer

use std::collections::{HashMap, HashSet};

use transferdesk_types::{
    BudgetEntry, Player, PlayerId, PlayerValueEntry, Result, Team, TeamId, Transfer, TransferId,
    TransferdeskError, UserId,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub teams: HashMap<TeamId, Team>,
    pub players: HashMap<PlayerId, Player>,
    pub transfers: HashMap<TransferId, Transfer>,
    /// Append-only. Entries are never mutated or deleted after insert.
    pub budget_entries: Vec<BudgetEntry>,
    /// Append-only. Entries are never mutated or deleted after insert.
    pub value_entries: Vec<PlayerValueEntry>,
    pub listed_players: HashSet<PlayerId>,
    pub budget_entry_transfers: HashSet<TransferId>,
    pub value_entry_transfers: HashSet<TransferId>,
}

impl Tables {
    pub fn find_team(&self, id: TeamId) -> Result<Team> {
        self.teams
            .get(&id)
            .cloned()
            .ok_or(TransferdeskError::TeamNotFound(id))
    }

    pub fn find_player(&self, id: PlayerId) -> Result<Player> {
        self.players
            .get(&id)
            .cloned()
            .ok_or(TransferdeskError::PlayerNotFound(id))
    }

    pub fn find_transfer(&self, id: TransferId) -> Result<Transfer> {
        self.transfers
            .get(&id)
            .cloned()
            .ok_or(TransferdeskError::TransferNotFound(id))
    }

    /// The player's currently Listed transfer, if any.
    pub fn open_transfer_for_player(&self, player_id: PlayerId) -> Option<Transfer> {
        if !self.listed_players.contains(&player_id) {
            return None;
        }
        self.transfers
            .values()
            .find(|t| t.player_id == player_id && !t.is_completed())
            .cloned()
    }

    pub fn teams_by_owner(&self, owner_id: UserId) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .teams
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        teams.sort_by_key(|t| t.id);
        teams
    }

    pub fn players_of_team(&self, team_id: TeamId) -> Vec<Player> {
        let mut players: Vec<Player> = self
            .players
            .values()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        players.sort_by_key(|p| p.id);
        players
    }

    pub fn budget_entries_for(&self, team_id: TeamId) -> Vec<BudgetEntry> {
        self.budget_entries
            .iter()
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect()
    }

    pub fn value_entries_for(&self, player_id: PlayerId) -> Vec<PlayerValueEntry> {
        self.value_entries
            .iter()
            .filter(|e| e.player_id == player_id)
            .cloned()
            .collect()
    }

    pub fn all_teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = self.teams.values().cloned().collect();
        teams.sort_by_key(|t| t.id);
        teams
    }
}
