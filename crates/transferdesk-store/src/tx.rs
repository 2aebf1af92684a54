//! A single all-or-nothing transaction against the store.
//!
//! `StoreTx` wraps a working copy of the tables. Reads see every write made
//! earlier in the same transaction; nothing becomes visible to other
//! callers until the transaction commits. Update operations implement the
//! conditional-write primitive: the caller states what stamp it observed
//! ([`Expect`]) and the write fails with `ConcurrencyConflict` if the
//! stored stamp differs — the equivalent of `UPDATE ... WHERE id = ? AND
//! stamp = ?` with an affected-row-count check.

use chrono::{DateTime, Utc};
use transferdesk_types::{
    BudgetEntry, ConcurrencyStamp, Expect, Player, PlayerId, PlayerValueEntry, PlayerValueKind,
    Result, Stamped, Team, TeamId, Transfer, TransferId, TransferdeskError, UserId,
};

use crate::tables::Tables;

/// Handle to an in-flight transaction. Obtained through
/// [`MemoryStore::transact`](crate::MemoryStore::transact).
pub struct StoreTx<'a> {
    tables: &'a mut Tables,
    now: DateTime<Utc>,
}

impl<'a> StoreTx<'a> {
    pub(crate) fn new(tables: &'a mut Tables, now: DateTime<Utc>) -> Self {
        Self { tables, now }
    }

    /// The timestamp this transaction runs at. All writes in one
    /// transaction share it.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    // -----------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------

    pub fn team(&self, id: TeamId) -> Result<Team> {
        self.tables.find_team(id)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player> {
        self.tables.find_player(id)
    }

    pub fn transfer(&self, id: TransferId) -> Result<Transfer> {
        self.tables.find_transfer(id)
    }

    #[must_use]
    pub fn open_transfer_for_player(&self, player_id: PlayerId) -> Option<Transfer> {
        self.tables.open_transfer_for_player(player_id)
    }

    #[must_use]
    pub fn teams_by_owner(&self, owner_id: UserId) -> Vec<Team> {
        self.tables.teams_by_owner(owner_id)
    }

    #[must_use]
    pub fn players_of_team(&self, team_id: TeamId) -> Vec<Player> {
        self.tables.players_of_team(team_id)
    }

    #[must_use]
    pub fn all_teams(&self) -> Vec<Team> {
        self.tables.all_teams()
    }

    #[must_use]
    pub fn budget_entries_for(&self, team_id: TeamId) -> Vec<BudgetEntry> {
        self.tables.budget_entries_for(team_id)
    }

    #[must_use]
    pub fn value_entries_for(&self, player_id: PlayerId) -> Vec<PlayerValueEntry> {
        self.tables.value_entries_for(player_id)
    }

    // -----------------------------------------------------------------
    // Inserts
    // -----------------------------------------------------------------

    pub fn insert_team(&mut self, team: Team) {
        self.tables.teams.insert(team.id, team);
    }

    pub fn insert_player(&mut self, player: Player) {
        self.tables.players.insert(player.id, player);
    }

    /// Insert a transfer. A Listed transfer claims the player's slot in the
    /// open-listing index.
    ///
    /// # Errors
    /// Returns [`TransferdeskError::AlreadyListed`] if the player already
    /// has a Listed transfer.
    pub fn insert_transfer(&mut self, transfer: Transfer) -> Result<()> {
        if !transfer.is_completed() && !self.tables.listed_players.insert(transfer.player_id) {
            return Err(TransferdeskError::AlreadyListed(transfer.player_id));
        }
        self.tables.transfers.insert(transfer.id, transfer);
        Ok(())
    }

    /// Append a budget ledger entry. Entries tagged with a transfer id are
    /// unique per transfer — the constraint that makes a settlement debit
    /// effectively-once.
    ///
    /// # Errors
    /// Returns [`TransferdeskError::DuplicateBudgetEntry`] on a second
    /// entry for the same transfer.
    pub fn insert_budget_entry(&mut self, entry: BudgetEntry) -> Result<()> {
        if let Some(transfer_id) = entry.transfer_id {
            if !self.tables.budget_entry_transfers.insert(transfer_id) {
                return Err(TransferdeskError::DuplicateBudgetEntry(transfer_id));
            }
        }
        self.tables.budget_entries.push(entry);
        Ok(())
    }

    /// Append a player value ledger entry. Transfer-kind entries are unique
    /// per source transfer — a transfer can raise a player's value exactly
    /// once.
    ///
    /// # Errors
    /// Returns [`TransferdeskError::DuplicatePlayerValueEntry`] on a second
    /// Transfer-kind entry for the same source transfer.
    pub fn insert_value_entry(&mut self, entry: PlayerValueEntry) -> Result<()> {
        if entry.kind == PlayerValueKind::Transfer {
            if let Some(source) = entry.source_transfer_id {
                if !self.tables.value_entry_transfers.insert(source) {
                    return Err(TransferdeskError::DuplicatePlayerValueEntry(source));
                }
            }
        }
        self.tables.value_entries.push(entry);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Conditional updates (compare-and-swap on the concurrency stamp)
    // -----------------------------------------------------------------

    /// Write back a team. On success the team carries a fresh stamp and
    /// `updated_at` set to the transaction timestamp.
    ///
    /// # Errors
    /// - `TeamNotFound` if the team vanished
    /// - `ConcurrencyConflict` if `expect` names a stale stamp
    pub fn update_team(&mut self, mut team: Team, expect: Expect) -> Result<Team> {
        let stored = self.tables.find_team(team.id)?;
        check_stamp(&stored, expect)?;
        team.set_stamp(ConcurrencyStamp::fresh());
        team.updated_at = self.now;
        self.tables.teams.insert(team.id, team.clone());
        Ok(team)
    }

    /// Write back a player. Same stamp discipline as [`Self::update_team`].
    pub fn update_player(&mut self, mut player: Player, expect: Expect) -> Result<Player> {
        let stored = self.tables.find_player(player.id)?;
        check_stamp(&stored, expect)?;
        player.set_stamp(ConcurrencyStamp::fresh());
        player.updated_at = self.now;
        self.tables.players.insert(player.id, player.clone());
        Ok(player)
    }

    /// Write back a transfer. Completing a transfer releases the player's
    /// slot in the open-listing index, so the player can be listed again in
    /// a later transaction.
    pub fn update_transfer(&mut self, mut transfer: Transfer, expect: Expect) -> Result<Transfer> {
        let stored = self.tables.find_transfer(transfer.id)?;
        check_stamp(&stored, expect)?;
        if !stored.is_completed() && transfer.is_completed() {
            self.tables.listed_players.remove(&transfer.player_id);
        }
        transfer.set_stamp(ConcurrencyStamp::fresh());
        transfer.updated_at = self.now;
        self.tables.transfers.insert(transfer.id, transfer.clone());
        Ok(transfer)
    }
}

/// The compare step of the conditional write. `Expect::Any` is reserved for
/// entities loaded inside the same transaction, where no concurrent writer
/// can have intervened.
fn check_stamp<E: Stamped>(stored: &E, expect: Expect) -> Result<()> {
    match expect {
        Expect::Any => Ok(()),
        Expect::Stamp(seen) if stored.stamp().matches(&seen) => Ok(()),
        Expect::Stamp(_) => {
            tracing::debug!(
                entity = E::entity_name(),
                id = %stored.entity_uuid(),
                "stale stamp rejected"
            );
            Err(TransferdeskError::ConcurrencyConflict {
                entity: E::entity_name(),
                id: stored.entity_uuid(),
                current_stamp: stored.stamp(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use transferdesk_types::Position;

    fn tx_fixture(tables: &mut Tables) -> StoreTx<'_> {
        StoreTx::new(tables, Utc::now())
    }

    fn seeded_team(tx: &mut StoreTx<'_>) -> Team {
        let team = Team::new(UserId::new(), None, Some("Norte".into()), tx.now());
        tx.insert_team(team.clone());
        team
    }

    fn seeded_player(tx: &mut StoreTx<'_>, team_id: TeamId) -> Player {
        let player = Player::new(
            team_id,
            Position::Defender,
            chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            None,
            None,
            None,
            tx.now(),
        );
        tx.insert_player(player.clone());
        player
    }

    #[test]
    fn missing_team_errors() {
        let mut tables = Tables::default();
        let tx = tx_fixture(&mut tables);
        let err = tx.team(TeamId::new()).unwrap_err();
        assert!(matches!(err, TransferdeskError::TeamNotFound(_)));
    }

    #[test]
    fn update_with_matching_stamp_refreshes() {
        let mut tables = Tables::default();
        let mut tx = tx_fixture(&mut tables);
        let team = seeded_team(&mut tx);
        let old_stamp = team.stamp;

        let updated = tx.update_team(team, Expect::Stamp(old_stamp)).unwrap();
        assert_ne!(updated.stamp, old_stamp, "stamp must be regenerated");
    }

    #[test]
    fn update_with_stale_stamp_conflicts() {
        let mut tables = Tables::default();
        let mut tx = tx_fixture(&mut tables);
        let team = seeded_team(&mut tx);
        let current = team.stamp;

        let err = tx
            .update_team(team, Expect::Stamp(ConcurrencyStamp::fresh()))
            .unwrap_err();
        match err {
            TransferdeskError::ConcurrencyConflict {
                entity,
                current_stamp,
                ..
            } => {
                assert_eq!(entity, "Team");
                assert_eq!(current_stamp, current, "conflict must carry the live stamp");
            }
            other => panic!("expected ConcurrencyConflict, got {other:?}"),
        }
    }

    #[test]
    fn second_listing_for_player_blocked() {
        let mut tables = Tables::default();
        let mut tx = tx_fixture(&mut tables);
        let team = seeded_team(&mut tx);
        let player = seeded_player(&mut tx, team.id);

        let first = Transfer::list(team.id, player.id, Decimal::new(100, 0), tx.now());
        tx.insert_transfer(first).unwrap();

        let second = Transfer::list(team.id, player.id, Decimal::new(200, 0), tx.now());
        let err = tx.insert_transfer(second).unwrap_err();
        assert!(matches!(err, TransferdeskError::AlreadyListed(id) if id == player.id));
    }

    #[test]
    fn completing_transfer_frees_listing_slot() {
        let mut tables = Tables::default();
        let mut tx = tx_fixture(&mut tables);
        let team = seeded_team(&mut tx);
        let other = seeded_team(&mut tx);
        let player = seeded_player(&mut tx, team.id);

        let mut transfer = Transfer::list(team.id, player.id, Decimal::new(100, 0), tx.now());
        tx.insert_transfer(transfer.clone()).unwrap();

        transfer.complete(other.id).unwrap();
        tx.update_transfer(transfer, Expect::Any).unwrap();

        // Player can be listed again.
        let relist = Transfer::list(other.id, player.id, Decimal::new(300, 0), tx.now());
        assert!(tx.insert_transfer(relist).is_ok());
    }

    #[test]
    fn duplicate_budget_entry_blocked() {
        let mut tables = Tables::default();
        let mut tx = tx_fixture(&mut tables);
        let team = seeded_team(&mut tx);
        let transfer_id = TransferId::new();

        let entry = BudgetEntry::transfer_debit(team.id, Decimal::new(500, 0), transfer_id, tx.now());
        tx.insert_budget_entry(entry.clone()).unwrap();

        let err = tx
            .insert_budget_entry(BudgetEntry::transfer_debit(
                team.id,
                Decimal::new(500, 0),
                transfer_id,
                tx.now(),
            ))
            .unwrap_err();
        assert!(matches!(err, TransferdeskError::DuplicateBudgetEntry(id) if id == transfer_id));
    }

    #[test]
    fn duplicate_transfer_value_entry_blocked() {
        let mut tables = Tables::default();
        let mut tx = tx_fixture(&mut tables);
        let team = seeded_team(&mut tx);
        let player = seeded_player(&mut tx, team.id);
        let source = TransferId::new();

        tx.insert_value_entry(PlayerValueEntry::transfer_rise(
            player.id,
            Decimal::new(100, 0),
            source,
            tx.now(),
        ))
        .unwrap();

        let err = tx
            .insert_value_entry(PlayerValueEntry::transfer_rise(
                player.id,
                Decimal::new(100, 0),
                source,
                tx.now(),
            ))
            .unwrap_err();
        assert!(matches!(err, TransferdeskError::DuplicatePlayerValueEntry(id) if id == source));
    }

    #[test]
    fn initial_value_entries_unconstrained() {
        let mut tables = Tables::default();
        let mut tx = tx_fixture(&mut tables);
        let team = seeded_team(&mut tx);
        let player = seeded_player(&mut tx, team.id);

        // Initial entries carry no source transfer; several may coexist.
        tx.insert_value_entry(PlayerValueEntry::initial(
            player.id,
            Decimal::new(100, 0),
            tx.now(),
        ))
        .unwrap();
        tx.insert_value_entry(PlayerValueEntry::initial(
            player.id,
            Decimal::new(200, 0),
            tx.now(),
        ))
        .unwrap();
        assert_eq!(tx.value_entries_for(player.id).len(), 2);
    }
}
