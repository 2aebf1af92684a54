//! Team and player roster management.
//!
//! Creation is where the ledger gets its seed entries: a new team is worth
//! exactly its initial budget entry, and every new player is worth exactly
//! its Initial value entry. The aggregates are applied in the same
//! transaction, so a freshly created team already satisfies the
//! ledger-equivalence audit.

use chrono::{Days, NaiveDate};
use transferdesk_types::{
    BudgetEntry, ConcurrencyStamp, Expect, Player, PlayerId, PlayerValueEntry, Position, Result,
    Team, TeamId, TransferdeskError, UserId, constants,
};

use crate::engine::TransferEngine;

/// Bio fields for a new team.
#[derive(Debug, Clone, Default)]
pub struct TeamSpec {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// Bio fields for a new player.
#[derive(Debug, Clone)]
pub struct PlayerSpec {
    pub position: Position,
    pub date_of_birth: NaiveDate,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
}

/// Partial update of a team's bio fields. `None` and blank strings leave
/// the stored field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// Partial update of a player's bio fields, same blank-skipping rules as
/// [`UpdateTeam`].
#[derive(Debug, Clone, Default)]
pub struct UpdatePlayer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
}

fn apply_text(slot: &mut Option<String>, incoming: Option<String>) {
    if let Some(text) = incoming {
        if !text.trim().is_empty() {
            *slot = Some(text);
        }
    }
}

fn check_len(field: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        Some(text) if text.chars().count() > constants::STRING_MAX_LENGTH => {
            Err(TransferdeskError::Configuration(format!(
                "{field} exceeds {} characters",
                constants::STRING_MAX_LENGTH
            )))
        }
        _ => Ok(()),
    }
}

fn check_player_spec(spec: &PlayerSpec) -> Result<()> {
    check_len("first_name", spec.first_name.as_deref())?;
    check_len("last_name", spec.last_name.as_deref())?;
    check_len("country", spec.country.as_deref())
}

/// `date` shifted by whole years, with Feb 29 falling back to Feb 28.
fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    use chrono::Datelike;
    let year = date.year() + years;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

impl TransferEngine {
    /// Create a team owned by `owner_id` with the given roster.
    ///
    /// Seeds the initial budget entry (default 5,000,000) and one Initial
    /// value entry per player (default 1,000,000), all in one transaction.
    ///
    /// # Errors
    /// [`TransferdeskError::Configuration`] on over-length text fields.
    pub fn create_team(
        &self,
        owner_id: UserId,
        spec: TeamSpec,
        players: Vec<PlayerSpec>,
    ) -> Result<Team> {
        check_len("name", spec.name.as_deref())?;
        check_len("country", spec.country.as_deref())?;
        for player in &players {
            check_player_spec(player)?;
        }
        let now = self.now();
        let maintainer = self.maintainer();
        let initial_budget = self.config.initial_transfer_budget;
        let initial_value = self.config.initial_player_value;

        self.store.transact(now, |tx| {
            let team = Team::new(owner_id, spec.country, spec.name, now);
            tx.insert_team(team.clone());
            maintainer.apply_budget_entry(tx, BudgetEntry::initial(team.id, initial_budget, now))?;

            for spec in players {
                let player = Player::new(
                    team.id,
                    spec.position,
                    spec.date_of_birth,
                    spec.country,
                    spec.first_name,
                    spec.last_name,
                    now,
                );
                tx.insert_player(player.clone());
                maintainer
                    .apply_value_entry(tx, PlayerValueEntry::initial(player.id, initial_value, now))?;
            }

            let mut team = tx.team(team.id)?;
            team.value = tx.players_of_team(team.id).iter().map(|p| p.value).sum();
            let team = tx.update_team(team, Expect::Any)?;
            tracing::info!(
                team_id = %team.id,
                %owner_id,
                budget = %team.transfer_budget,
                value = %team.value,
                "team created"
            );
            Ok(team)
        })
    }

    /// The standard generated roster: 3 goalkeepers, 6 defenders,
    /// 6 midfielders and 5 attackers, each with a random date of birth in
    /// the 18 to 40 age window (inclusive).
    #[must_use]
    pub fn default_squad(&self) -> Vec<PlayerSpec> {
        let today = self.now().date_naive();
        let slots = [
            (Position::Goalkeeper, constants::SQUAD_GOALKEEPERS),
            (Position::Defender, constants::SQUAD_DEFENDERS),
            (Position::Midfielder, constants::SQUAD_MIDFIELDERS),
            (Position::Attacker, constants::SQUAD_ATTACKERS),
        ];
        let mut squad = Vec::with_capacity(slots.iter().map(|(_, n)| n).sum());
        for (position, count) in slots {
            for _ in 0..count {
                squad.push(PlayerSpec {
                    position,
                    date_of_birth: self.random_birth_date(today),
                    first_name: None,
                    last_name: None,
                    country: None,
                });
            }
        }
        squad
    }

    /// A date of birth giving an age of 18 to 40 whole years on `today`,
    /// uniform over days in that window.
    fn random_birth_date(&self, today: NaiveDate) -> NaiveDate {
        // Age >= 18 means born on or before today - 18y; age <= 40 means
        // born strictly after today - 41y.
        let latest = shift_years(today, -constants::MIN_PLAYER_AGE);
        let earliest = shift_years(today, -(constants::MAX_PLAYER_AGE + 1))
            .checked_add_days(Days::new(1))
            .unwrap_or(latest);
        let span = u32::try_from((latest - earliest).num_days()).unwrap_or(0);
        let offset = self.roll_inclusive(0, span);
        earliest
            .checked_add_days(Days::new(u64::from(offset)))
            .unwrap_or(latest)
    }

    /// Add players to an existing team, owner-scoped and gated by the
    /// team's stamp.
    ///
    /// # Errors
    /// - [`TransferdeskError::TeamNotFound`] if missing or foreign-owned
    /// - [`TransferdeskError::ConcurrencyConflict`] on a stale team stamp
    pub fn add_players(
        &self,
        team_id: TeamId,
        owner_id: UserId,
        specs: Vec<PlayerSpec>,
        team_stamp: ConcurrencyStamp,
    ) -> Result<Vec<Player>> {
        for spec in &specs {
            check_player_spec(spec)?;
        }
        let now = self.now();
        let maintainer = self.maintainer();
        let initial_value = self.config.initial_player_value;

        self.store.transact(now, |tx| {
            let team = tx.team(team_id)?;
            if team.owner_id != owner_id {
                return Err(TransferdeskError::TeamNotFound(team_id));
            }

            let mut created = Vec::with_capacity(specs.len());
            for spec in specs {
                let player = Player::new(
                    team_id,
                    spec.position,
                    spec.date_of_birth,
                    spec.country,
                    spec.first_name,
                    spec.last_name,
                    now,
                );
                tx.insert_player(player.clone());
                let player = maintainer
                    .apply_value_entry(tx, PlayerValueEntry::initial(player.id, initial_value, now))?;
                created.push(player);
            }

            let mut team = tx.team(team_id)?;
            team.value = tx.players_of_team(team_id).iter().map(|p| p.value).sum();
            tx.update_team(team, Expect::Stamp(team_stamp))?;
            Ok(created)
        })
    }

    /// Update a team's bio fields, owner-scoped and stamp-gated. Blank
    /// strings leave the stored value unchanged.
    ///
    /// # Errors
    /// Same taxonomy as [`Self::add_players`].
    pub fn update_team(
        &self,
        team_id: TeamId,
        owner_id: UserId,
        changes: UpdateTeam,
        stamp: ConcurrencyStamp,
    ) -> Result<Team> {
        check_len("name", changes.name.as_deref())?;
        check_len("country", changes.country.as_deref())?;
        self.store.transact(self.now(), |tx| {
            let mut team = tx.team(team_id)?;
            if team.owner_id != owner_id {
                return Err(TransferdeskError::TeamNotFound(team_id));
            }
            apply_text(&mut team.name, changes.name);
            apply_text(&mut team.country, changes.country);
            tx.update_team(team, Expect::Stamp(stamp))
        })
    }

    /// Update a player's bio fields, owner-scoped through the owning team
    /// and stamp-gated.
    ///
    /// # Errors
    /// - [`TransferdeskError::PlayerNotFound`] if missing or foreign-owned
    /// - [`TransferdeskError::ConcurrencyConflict`] on a stale stamp
    pub fn update_player(
        &self,
        player_id: PlayerId,
        owner_id: UserId,
        changes: UpdatePlayer,
        stamp: ConcurrencyStamp,
    ) -> Result<Player> {
        check_len("first_name", changes.first_name.as_deref())?;
        check_len("last_name", changes.last_name.as_deref())?;
        check_len("country", changes.country.as_deref())?;
        self.store.transact(self.now(), |tx| {
            let mut player = tx.player(player_id)?;
            let team = tx.team(player.team_id)?;
            if team.owner_id != owner_id {
                return Err(TransferdeskError::PlayerNotFound(player_id));
            }
            apply_text(&mut player.first_name, changes.first_name);
            apply_text(&mut player.last_name, changes.last_name);
            apply_text(&mut player.country, changes.country);
            tx.update_player(player, Expect::Stamp(stamp))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use transferdesk_types::EngineConfig;

    fn engine() -> TransferEngine {
        TransferEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn create_team_seeds_ledger_and_aggregates() {
        let engine = engine();
        let owner = UserId::new();
        let team = engine
            .create_team(
                owner,
                TeamSpec {
                    name: Some("Norte".into()),
                    country: Some("ES".into()),
                },
                engine.default_squad(),
            )
            .unwrap();

        assert_eq!(team.transfer_budget, Decimal::new(5_000_000, 0));
        assert_eq!(team.value, Decimal::new(20_000_000, 0));
        assert_eq!(engine.budget_entries(team.id).len(), 1);
        assert_eq!(engine.players_of_team(team.id).len(), 20);
        for player in engine.players_of_team(team.id) {
            assert_eq!(player.value, Decimal::new(1_000_000, 0));
            assert_eq!(engine.value_entries(player.id).len(), 1);
        }
    }

    #[test]
    fn default_squad_positions_and_ages() {
        let engine = engine();
        let squad = engine.default_squad();
        assert_eq!(squad.len(), 20);

        let count = |p: Position| squad.iter().filter(|s| s.position == p).count();
        assert_eq!(count(Position::Goalkeeper), 3);
        assert_eq!(count(Position::Defender), 6);
        assert_eq!(count(Position::Midfielder), 6);
        assert_eq!(count(Position::Attacker), 5);

        let today = engine.now().date_naive();
        for spec in &squad {
            let player = Player::new(
                TeamId::new(),
                spec.position,
                spec.date_of_birth,
                None,
                None,
                None,
                engine.now(),
            );
            let age = player.age(today);
            assert!((18..=40).contains(&age), "age {age} out of window");
        }
    }

    #[test]
    fn add_players_grows_roster_and_value() {
        let engine = engine();
        let owner = UserId::new();
        let team = engine
            .create_team(owner, TeamSpec::default(), engine.default_squad())
            .unwrap();

        let extra = vec![PlayerSpec {
            position: Position::Attacker,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 7, 1).unwrap(),
            first_name: Some("Ana".into()),
            last_name: None,
            country: None,
        }];
        let created = engine
            .add_players(team.id, owner, extra, team.stamp)
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(
            engine.team(team.id).unwrap().value,
            Decimal::new(21_000_000, 0)
        );
    }

    #[test]
    fn add_players_foreign_owner_not_found() {
        let engine = engine();
        let team = engine
            .create_team(UserId::new(), TeamSpec::default(), vec![])
            .unwrap();
        let err = engine
            .add_players(team.id, UserId::new(), vec![], team.stamp)
            .unwrap_err();
        assert!(matches!(err, TransferdeskError::TeamNotFound(id) if id == team.id));
    }

    #[test]
    fn update_team_skips_blank_fields() {
        let engine = engine();
        let owner = UserId::new();
        let team = engine
            .create_team(
                owner,
                TeamSpec {
                    name: Some("Norte".into()),
                    country: Some("ES".into()),
                },
                vec![],
            )
            .unwrap();

        let updated = engine
            .update_team(
                team.id,
                owner,
                UpdateTeam {
                    name: Some("  ".into()),
                    country: Some("PT".into()),
                },
                team.stamp,
            )
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Norte"));
        assert_eq!(updated.country.as_deref(), Some("PT"));
    }

    #[test]
    fn update_player_stale_stamp_conflicts() {
        let engine = engine();
        let owner = UserId::new();
        let team = engine
            .create_team(owner, TeamSpec::default(), engine.default_squad())
            .unwrap();
        let player = engine.players_of_team(team.id).remove(0);

        let err = engine
            .update_player(
                player.id,
                owner,
                UpdatePlayer {
                    first_name: Some("Ana".into()),
                    ..UpdatePlayer::default()
                },
                ConcurrencyStamp::fresh(),
            )
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn over_length_name_rejected() {
        let engine = engine();
        let err = engine
            .create_team(
                UserId::new(),
                TeamSpec {
                    name: Some("x".repeat(256)),
                    country: None,
                },
                vec![],
            )
            .unwrap_err();
        assert!(matches!(err, TransferdeskError::Configuration(_)));
    }

    #[test]
    fn shift_years_handles_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            shift_years(leap, 1),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert_eq!(
            shift_years(leap, 4),
            NaiveDate::from_ymd_opt(2028, 2, 29).unwrap()
        );
    }
}
