//! The engine facade: storage, configuration, and injectables.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use transferdesk_store::MemoryStore;
use transferdesk_types::{
    BudgetEntry, EngineConfig, Player, PlayerId, PlayerValueEntry, Result, Team, TeamId, Transfer,
    TransferId, UserId,
};

use crate::aggregates::{AggregateMaintainer, AggregateOwner};
use crate::clock::{Clock, SystemClock};
use crate::rng::{RandomSource, StdRandom};

/// The Ledger & Transfer Settlement Engine.
///
/// Cheap to clone; clones share the same store, clock, and random source,
/// so callers may run request-parallel (one clone per request thread). The
/// engine holds no locks across operations; each operation is a single
/// storage transaction and conflicts surface as `ConcurrencyConflict`.
#[derive(Clone)]
pub struct TransferEngine {
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) config: EngineConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) rng: Arc<Mutex<dyn RandomSource>>,
}

impl TransferEngine {
    /// Create an engine with a fresh store, the system clock, and
    /// entropy-seeded randomness.
    ///
    /// # Errors
    /// [`transferdesk_types::TransferdeskError::Configuration`] if `config`
    /// is inconsistent.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_parts(
            Arc::new(MemoryStore::new()),
            config,
            Arc::new(SystemClock),
            Arc::new(Mutex::new(StdRandom::from_entropy())),
        )
    }

    /// Create an engine over explicit parts. Tests use this to inject a
    /// fixed clock and a pinned random source.
    ///
    /// # Errors
    /// [`transferdesk_types::TransferdeskError::Configuration`] if `config`
    /// is inconsistent.
    pub fn with_parts(
        store: Arc<MemoryStore>,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn RandomSource>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            clock,
            rng,
        })
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying store, for snapshot reads and test assertions.
    #[must_use]
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub(crate) fn maintainer(&self) -> AggregateMaintainer {
        AggregateMaintainer::new(self.config.min_transfer_budget)
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Draw the market-appreciation percentage for one settlement.
    pub(crate) fn roll_rise_percent(&self) -> u32 {
        self.roll_inclusive(self.config.rise_min_percent, self.config.rise_max_percent)
    }

    pub(crate) fn roll_inclusive(&self, min: u32, max: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.roll_inclusive(min, max)
    }

    // -----------------------------------------------------------------
    // Administrative / repair surface
    // -----------------------------------------------------------------

    /// Overwrite a cached aggregate with its ledger sum. Repair path only;
    /// the normal write path maintains aggregates incrementally.
    ///
    /// # Errors
    /// Not-found errors if the owner is missing.
    pub fn recompute_aggregate(&self, owner: AggregateOwner) -> Result<Decimal> {
        let maintainer = self.maintainer();
        self.store
            .transact(self.now(), |tx| maintainer.recompute(tx, owner))
    }

    // -----------------------------------------------------------------
    // Snapshot reads
    // -----------------------------------------------------------------

    pub fn team(&self, id: TeamId) -> Result<Team> {
        self.store.team(id)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player> {
        self.store.player(id)
    }

    pub fn transfer(&self, id: TransferId) -> Result<Transfer> {
        self.store.transfer(id)
    }

    #[must_use]
    pub fn teams_by_owner(&self, owner_id: UserId) -> Vec<Team> {
        self.store.teams_by_owner(owner_id)
    }

    #[must_use]
    pub fn players_of_team(&self, team_id: TeamId) -> Vec<Player> {
        self.store.players_of_team(team_id)
    }

    #[must_use]
    pub fn budget_entries(&self, team_id: TeamId) -> Vec<BudgetEntry> {
        self.store.budget_entries(team_id)
    }

    #[must_use]
    pub fn value_entries(&self, player_id: PlayerId) -> Vec<PlayerValueEntry> {
        self.store.value_entries(player_id)
    }
}

impl std::fmt::Debug for TransferEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
