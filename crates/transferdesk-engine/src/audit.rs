//! Ledger-equivalence audit.
//!
//! Verifies, at a quiescent point, that every cached aggregate equals its
//! ledger sum: a team's budget equals the sum of its budget entries, a
//! team's value equals the sum of its current players' values, and each
//! player's value equals the sum of its value entries. A violation means an
//! invariant was broken somewhere upstream and is reported as
//! `AggregateDrift`, which callers should treat as halt-worthy.

use rust_decimal::Decimal;
use transferdesk_store::StoreTx;
use transferdesk_types::{Result, TeamId, TransferdeskError};

use crate::engine::TransferEngine;

fn verify_team_in(tx: &StoreTx<'_>, team_id: TeamId) -> Result<()> {
    let team = tx.team(team_id)?;

    let budget_sum: Decimal = tx.budget_entries_for(team_id).iter().map(|e| e.delta).sum();
    if team.transfer_budget != budget_sum {
        return Err(TransferdeskError::AggregateDrift {
            entity: "Team.TransferBudget",
            id: team.id.0,
            cached: team.transfer_budget,
            ledger: budget_sum,
        });
    }

    let players = tx.players_of_team(team_id);
    let roster_sum: Decimal = players.iter().map(|p| p.value).sum();
    if team.value != roster_sum {
        return Err(TransferdeskError::AggregateDrift {
            entity: "Team.Value",
            id: team.id.0,
            cached: team.value,
            ledger: roster_sum,
        });
    }

    for player in players {
        let entry_sum: Decimal = tx.value_entries_for(player.id).iter().map(|e| e.delta).sum();
        if player.value != entry_sum {
            return Err(TransferdeskError::AggregateDrift {
                entity: "Player.Value",
                id: player.id.0,
                cached: player.value,
                ledger: entry_sum,
            });
        }
    }
    Ok(())
}

impl TransferEngine {
    /// Audit one team and its roster against the ledger.
    ///
    /// # Errors
    /// [`TransferdeskError::AggregateDrift`] naming the first divergent
    /// aggregate, or `TeamNotFound`.
    pub fn verify_team(&self, team_id: TeamId) -> Result<()> {
        self.store.transact(self.now(), |tx| {
            verify_team_in(tx, team_id)?;
            tracing::debug!(%team_id, "ledger audit passed");
            Ok(())
        })
    }

    /// Audit every team in one consistent snapshot.
    ///
    /// # Errors
    /// Same as [`Self::verify_team`], for the first team that fails.
    pub fn verify_all(&self) -> Result<()> {
        self.store.transact(self.now(), |tx| {
            for team in tx.all_teams() {
                verify_team_in(tx, team.id)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::TeamSpec;
    use transferdesk_types::{EngineConfig, Expect, UserId};

    #[test]
    fn fresh_team_passes_audit() {
        let engine = TransferEngine::new(EngineConfig::default()).unwrap();
        let team = engine
            .create_team(UserId::new(), TeamSpec::default(), engine.default_squad())
            .unwrap();
        engine.verify_team(team.id).unwrap();
        engine.verify_all().unwrap();
    }

    #[test]
    fn injected_drift_detected_and_healed() {
        let engine = TransferEngine::new(EngineConfig::default()).unwrap();
        let team = engine
            .create_team(UserId::new(), TeamSpec::default(), vec![])
            .unwrap();

        // Corrupt the cached budget directly, bypassing the maintainer.
        engine
            .store()
            .transact(engine.now(), |tx| {
                let mut t = tx.team(team.id)?;
                t.transfer_budget += Decimal::ONE;
                tx.update_team(t, Expect::Any)?;
                Ok(())
            })
            .unwrap();

        let err = engine.verify_team(team.id).unwrap_err();
        match err {
            TransferdeskError::AggregateDrift { entity, cached, ledger, .. } => {
                assert_eq!(entity, "Team.TransferBudget");
                assert_eq!(cached - ledger, Decimal::ONE);
            }
            other => panic!("expected AggregateDrift, got {other:?}"),
        }

        engine
            .recompute_aggregate(crate::aggregates::AggregateOwner::TeamBudget(team.id))
            .unwrap();
        engine.verify_team(team.id).unwrap();
    }
}
