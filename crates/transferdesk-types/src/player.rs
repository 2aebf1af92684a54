//! Player entity: bio fields, team membership, cached value.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ConcurrencyStamp, PlayerId, Stamped, TeamId};

/// A player's position on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goalkeeper => write!(f, "GK"),
            Self::Defender => write!(f, "DEF"),
            Self::Midfielder => write!(f, "MID"),
            Self::Attacker => write!(f, "ATT"),
        }
    }
}

/// A player: belongs to exactly one team at a time; `team_id` changes only
/// when a transfer settles.
///
/// `value` is a cached aggregate equal to the sum of the player's value
/// ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Globally unique player identifier.
    pub id: PlayerId,
    /// External-facing identifier, exposed to API callers.
    pub external_id: Uuid,
    /// Country of origin.
    pub country: Option<String>,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Position on the pitch.
    pub position: Position,
    /// The team this player currently belongs to.
    pub team_id: TeamId,
    /// Cached sum of value ledger entries.
    pub value: Decimal,
    /// Optimistic concurrency stamp.
    pub stamp: ConcurrencyStamp,
    /// When the player was created.
    pub created_at: DateTime<Utc>,
    /// When the player was last written.
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with zero value. The seed ledger entry (and the
    /// aggregate application that goes with it) is the engine's job.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        team_id: TeamId,
        position: Position,
        date_of_birth: NaiveDate,
        country: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PlayerId::new(),
            external_id: Uuid::new_v4(),
            country,
            date_of_birth,
            first_name,
            last_name,
            position,
            team_id,
            value: Decimal::ZERO,
            stamp: ConcurrencyStamp::fresh(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Age in whole years on the given date. A player whose birthday falls
    /// later in the year has not aged yet.
    #[must_use]
    pub fn age(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.date_of_birth.year();
        let birthday_this_year = self
            .date_of_birth
            .with_year(today.year())
            // Feb 29 birthdays fall back to Feb 28 in non-leap years.
            .unwrap_or_else(|| {
                NaiveDate::from_ymd_opt(today.year(), 2, 28).unwrap_or(self.date_of_birth)
            });
        if today < birthday_this_year {
            age -= 1;
        }
        age
    }
}

impl Stamped for Player {
    fn entity_name() -> &'static str {
        "Player"
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

    fn player_born(y: i32, m: u32, d: u32) -> Player {
        Player::new(
            TeamId::new(),
            Position::Midfielder,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            None,
            None,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn age_after_birthday() {
        let p = player_born(2000, 3, 15);
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(p.age(today), 26);
    }

    #[test]
    fn age_before_birthday() {
        let p = player_born(2000, 9, 15);
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(p.age(today), 25);
    }

    #[test]
    fn age_on_birthday() {
        let p = player_born(2000, 6, 1);
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(p.age(today), 26);
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        let p = player_born(2000, 2, 29);
        let today = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(p.age(today), 26);
        let day_before = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        assert_eq!(p.age(day_before), 25);
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::Goalkeeper.to_string(), "GK");
        assert_eq!(Position::Attacker.to_string(), "ATT");
    }

    #[test]
    fn new_player_has_zero_value() {
        let p = player_born(1999, 1, 1);
        assert_eq!(p.value, Decimal::ZERO);
    }
}
