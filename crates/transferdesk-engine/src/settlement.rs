//! The pay-for-transfer settlement transaction.
//!
//! Settlement is a single storage transaction that debits the buying
//! team's budget, raises the player's value by a random market
//! appreciation, moves the player, adjusts both teams' cached values, and
//! completes the transfer. Any failure at any step rolls the whole thing
//! back: no partial money movement, no orphaned ledger entries.
//!
//! The caller-supplied transfer stamp is the optimistic gate. Two buyers
//! racing from the same read both reach the conditional write; the store
//! admits exactly one and the loser sees a retryable conflict with none of
//! its writes applied.

use rust_decimal::Decimal;
use transferdesk_types::{
    BudgetEntry, ConcurrencyStamp, Expect, PlayerValueEntry, Result, TeamId, Transfer, TransferId,
    TransferdeskError,
};

use crate::engine::TransferEngine;

/// Market appreciation: `value * percent / 100`, exact decimal arithmetic.
fn appreciation(value: Decimal, percent: u32) -> Decimal {
    value * Decimal::from(percent) / Decimal::ONE_HUNDRED
}

impl TransferEngine {
    /// Settle a listed transfer: `to_team_id` buys the player.
    ///
    /// Runs as one atomic transaction. On success the returned transfer is
    /// Completed with a fresh stamp; the player belongs to the destination
    /// team at a value raised by the rolled percentage, the destination's
    /// budget is debited by the asking price, and both teams' cached values
    /// reflect the move.
    ///
    /// # Errors
    /// - [`TransferdeskError::TransferNotFound`] / [`TransferdeskError::TeamNotFound`]
    /// - [`TransferdeskError::AlreadyCompleted`] if settlement already happened
    /// - [`TransferdeskError::SameTeam`] if the destination is the listing team
    /// - [`TransferdeskError::BudgetInsufficient`] if the price would push the
    ///   destination's budget below the floor
    /// - [`TransferdeskError::ConcurrencyConflict`] on a stale transfer stamp
    pub fn settle(
        &self,
        transfer_id: TransferId,
        to_team_id: TeamId,
        transfer_stamp: ConcurrencyStamp,
    ) -> Result<Transfer> {
        let now = self.now();
        let percent = self.roll_rise_percent();
        let maintainer = self.maintainer();

        self.store.transact(now, |tx| {
            let mut transfer = tx.transfer(transfer_id)?;
            if transfer.is_completed() {
                return Err(TransferdeskError::AlreadyCompleted(transfer_id));
            }
            let to_team = tx.team(to_team_id)?;
            if to_team.id == transfer.from_team_id {
                return Err(TransferdeskError::SameTeam(to_team_id));
            }
            let mut from_team = tx.team(transfer.from_team_id)?;
            let player = tx.player(transfer.player_id)?;
            let pre_rise_value = player.value;

            // Debit the buyer. The maintainer enforces the budget floor
            // before writing anything.
            let mut to_team = maintainer.apply_budget_entry(
                tx,
                BudgetEntry::transfer_debit(to_team.id, transfer.asking_price, transfer.id, now),
            )?;

            // Market appreciation on the player's value.
            let increment = appreciation(pre_rise_value, percent);
            let mut player = maintainer.apply_value_entry(
                tx,
                PlayerValueEntry::transfer_rise(player.id, increment, transfer.id, now),
            )?;

            // Move the player; the seller loses the pre-rise value, the
            // buyer gains the post-rise value.
            player.team_id = to_team.id;
            let player = tx.update_player(player, Expect::Any)?;

            from_team.value -= pre_rise_value;
            tx.update_team(from_team, Expect::Any)?;
            to_team.value += player.value;
            tx.update_team(to_team, Expect::Any)?;

            transfer.complete(to_team_id)?;
            let transfer = tx.update_transfer(transfer, Expect::Stamp(transfer_stamp))?;

            tracing::info!(
                %transfer_id,
                player_id = %transfer.player_id,
                from = %transfer.from_team_id,
                to = %to_team_id,
                price = %transfer.asking_price,
                rise_percent = percent,
                "transfer settled"
            );
            Ok(transfer)
        })
    }
}
