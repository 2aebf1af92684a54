//! Configuration for the Transferdesk settlement engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, TransferdeskError, constants};

/// Tunable parameters for the settlement engine.
///
/// Defaults match the production values; tests override individual fields
/// to pin down numeric outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Floor below which no team's transfer budget may fall.
    pub min_transfer_budget: Decimal,
    /// Lower bound (inclusive) of the market-appreciation roll, in percent.
    pub rise_min_percent: u32,
    /// Upper bound (inclusive) of the market-appreciation roll, in percent.
    pub rise_max_percent: u32,
    /// Seed value for players created without an explicit value.
    pub initial_player_value: Decimal,
    /// Seed budget for teams created without an explicit budget.
    pub initial_transfer_budget: Decimal,
}

impl EngineConfig {
    /// Validate internal consistency.
    ///
    /// # Errors
    /// Returns [`TransferdeskError::Configuration`] if the rise range is
    /// inverted or any seed value lies below the budget floor.
    pub fn validate(&self) -> Result<()> {
        if self.rise_min_percent > self.rise_max_percent {
            return Err(TransferdeskError::Configuration(format!(
                "rise_min_percent {} > rise_max_percent {}",
                self.rise_min_percent, self.rise_max_percent
            )));
        }
        if self.initial_transfer_budget < self.min_transfer_budget {
            return Err(TransferdeskError::Configuration(format!(
                "initial_transfer_budget {} below floor {}",
                self.initial_transfer_budget, self.min_transfer_budget
            )));
        }
        if self.initial_player_value < Decimal::ZERO {
            return Err(TransferdeskError::Configuration(format!(
                "initial_player_value {} is negative",
                self.initial_player_value
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_transfer_budget: Decimal::ZERO,
            rise_min_percent: constants::MIN_RISE_PERCENT,
            rise_max_percent: constants::MAX_RISE_PERCENT,
            initial_player_value: Decimal::from(constants::INITIAL_PLAYER_VALUE_UNITS),
            initial_transfer_budget: Decimal::from(constants::INITIAL_TRANSFER_BUDGET_UNITS),
        }
    }
}
