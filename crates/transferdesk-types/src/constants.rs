//! System-wide constants for the Transferdesk settlement engine.
//!
//! Decimal defaults are expressed in whole currency units and lifted into
//! `Decimal` by [`EngineConfig::default`](crate::EngineConfig).

/// Default initial value of a newly created player, in whole units.
pub const INITIAL_PLAYER_VALUE_UNITS: i64 = 1_000_000;

/// Default initial transfer budget of a newly created team, in whole units.
pub const INITIAL_TRANSFER_BUDGET_UNITS: i64 = 5_000_000;

/// Minimum market-appreciation roll applied to a player's value on
/// settlement, in percent (inclusive).
pub const MIN_RISE_PERCENT: u32 = 10;

/// Maximum market-appreciation roll, in percent (inclusive).
pub const MAX_RISE_PERCENT: u32 = 100;

/// Youngest age a generated player may have, in whole years.
pub const MIN_PLAYER_AGE: i32 = 18;

/// Oldest age a generated player may have, in whole years.
pub const MAX_PLAYER_AGE: i32 = 40;

/// Goalkeepers in a default generated squad.
pub const SQUAD_GOALKEEPERS: usize = 3;

/// Defenders in a default generated squad.
pub const SQUAD_DEFENDERS: usize = 6;

/// Midfielders in a default generated squad.
pub const SQUAD_MIDFIELDERS: usize = 6;

/// Attackers in a default generated squad.
pub const SQUAD_ATTACKERS: usize = 5;

/// Ledger description for seed entries written at creation time.
pub const INITIAL_VALUE_DESCRIPTION: &str = "Initial";

/// Ledger description for entries caused by a settled transfer.
pub const TRANSFER_DESCRIPTION: &str = "Transfer";

/// Maximum length accepted for free-text string fields (names, countries).
pub const STRING_MAX_LENGTH: usize = 255;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Transferdesk";
