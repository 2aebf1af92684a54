//! Team entity: owner, cached aggregates, concurrency stamp.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ConcurrencyStamp, Stamped, TeamId, UserId};

/// A team: owns players, a transfer budget, and a cached total value.
///
/// `transfer_budget` and `value` are cached aggregates. `transfer_budget`
/// equals the sum of the team's budget ledger entries; `value` equals the
/// sum of its current players' values. Both are maintained incrementally by
/// the Aggregate Maintainer and may only be overwritten wholesale by the
/// recompute repair path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Globally unique team identifier.
    pub id: TeamId,
    /// External-facing identifier, exposed to API callers.
    pub external_id: Uuid,
    /// Country the team plays in.
    pub country: Option<String>,
    /// Team name.
    pub name: Option<String>,
    /// The user who owns this team. Exactly one owner per team.
    pub owner_id: UserId,
    /// Cached sum of budget ledger entries. Never below the configured floor.
    pub transfer_budget: Decimal,
    /// Cached sum of current players' values.
    pub value: Decimal,
    /// Optimistic concurrency stamp.
    pub stamp: ConcurrencyStamp,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
    /// When the team was last written.
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with zeroed aggregates. Seed ledger entries (and
    /// the aggregate application that goes with them) are the engine's job.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        country: Option<String>,
        name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TeamId::new(),
            external_id: Uuid::new_v4(),
            country,
            name,
            owner_id,
            transfer_budget: Decimal::ZERO,
            value: Decimal::ZERO,
            stamp: ConcurrencyStamp::fresh(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Stamped for Team {
    fn entity_name() -> &'static str {
        "Team"
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

    #[test]
    fn new_team_has_zero_aggregates() {
        let team = Team::new(UserId::new(), Some("ES".into()), Some("Norte".into()), Utc::now());
        assert_eq!(team.transfer_budget, Decimal::ZERO);
        assert_eq!(team.value, Decimal::ZERO);
        assert_eq!(team.owner_id, team.owner_id);
    }

    #[test]
    fn stamped_reports_team_kind() {
        let team = Team::new(UserId::new(), None, None, Utc::now());
        assert_eq!(Team::entity_name(), "Team");
        assert_eq!(team.entity_uuid(), team.id.0);
    }

    #[test]
    fn set_stamp_replaces() {
        let mut team = Team::new(UserId::new(), None, None, Utc::now());
        let old = team.stamp();
        team.set_stamp(ConcurrencyStamp::fresh());
        assert_ne!(team.stamp(), old);
    }
}
