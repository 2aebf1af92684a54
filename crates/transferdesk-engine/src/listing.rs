//! Placing a player on the transfer list.

use rust_decimal::Decimal;
use transferdesk_types::{
    ConcurrencyStamp, Expect, PlayerId, Result, Transfer, TransferdeskError, UserId,
};

use crate::engine::TransferEngine;

impl TransferEngine {
    /// List a player for transfer at `asking_price`.
    ///
    /// The player must belong to a team owned by `owner_id`; lookups are
    /// owner-scoped, so a player outside the caller's teams reads as not
    /// found rather than forbidden. The caller supplies the player stamp it
    /// observed; the listing conditionally re-stamps the player, so a
    /// concurrent edit of the same player surfaces as a conflict instead of
    /// silently racing the listing.
    ///
    /// # Errors
    /// - [`TransferdeskError::InvalidAskingPrice`] on a negative price
    /// - [`TransferdeskError::PlayerNotFound`] if the player is missing or
    ///   not owned by the caller
    /// - [`TransferdeskError::AlreadyListed`] if an open listing exists
    /// - [`TransferdeskError::ConcurrencyConflict`] on a stale player stamp
    pub fn list_for_transfer(
        &self,
        player_id: PlayerId,
        owner_id: UserId,
        asking_price: Decimal,
        player_stamp: ConcurrencyStamp,
    ) -> Result<Transfer> {
        if asking_price < Decimal::ZERO {
            return Err(TransferdeskError::InvalidAskingPrice(asking_price));
        }
        let now = self.now();
        self.store.transact(now, |tx| {
            let player = tx.player(player_id)?;
            let team = tx.team(player.team_id)?;
            if team.owner_id != owner_id {
                return Err(TransferdeskError::PlayerNotFound(player_id));
            }
            if tx.open_transfer_for_player(player_id).is_some() {
                return Err(TransferdeskError::AlreadyListed(player_id));
            }

            let transfer = Transfer::list(player.team_id, player_id, asking_price, now);
            tx.insert_transfer(transfer.clone())?;
            tx.update_player(player, Expect::Stamp(player_stamp))?;

            tracing::info!(
                transfer_id = %transfer.id,
                %player_id,
                price = %asking_price,
                "player listed for transfer"
            );
            Ok(transfer)
        })
    }
}
