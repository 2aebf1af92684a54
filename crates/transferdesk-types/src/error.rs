//! Error types for the Transferdesk settlement engine.
//!
//! All errors use the `TD_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Not-found errors (stale or bad ids)
//! - 2xx: Domain errors (business rule violations, safe to show to users)
//! - 3xx: Concurrency errors (stale writes; safe to retry after re-reading)
//! - 4xx: Ledger / configuration errors

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::{ConcurrencyStamp, PlayerId, TeamId, TransferId};

/// Central error enum for all Transferdesk operations.
#[derive(Debug, Error)]
pub enum TransferdeskError {
    // =================================================================
    // Not-found (1xx)
    // =================================================================
    /// The referenced transfer does not exist.
    #[error("TD_ERR_100: Transfer not found: {0}")]
    TransferNotFound(TransferId),

    /// The referenced team does not exist.
    #[error("TD_ERR_101: Team not found: {0}")]
    TeamNotFound(TeamId),

    /// The referenced player does not exist (or is not owned by the caller
    /// for owner-scoped operations).
    #[error("TD_ERR_102: Player not found: {0}")]
    PlayerNotFound(PlayerId),

    // =================================================================
    // Domain (2xx)
    // =================================================================
    /// The player already has a listed (open) transfer.
    #[error("TD_ERR_200: Player is already on the transfer list: {0}")]
    AlreadyListed(PlayerId),

    /// The transfer has already been completed; settlement is terminal.
    #[error("TD_ERR_201: Transfer already completed: {0}")]
    AlreadyCompleted(TransferId),

    /// Destination team equals the source team.
    #[error("TD_ERR_202: Transfer can't be to the same team: {0}")]
    SameTeam(TeamId),

    /// The destination team's transfer budget cannot cover the asking price.
    #[error("TD_ERR_203: Transfer budget insufficient: need {needed}, have {available}")]
    BudgetInsufficient { needed: Decimal, available: Decimal },

    /// Asking price must be non-negative.
    #[error("TD_ERR_204: Invalid asking price: {0}")]
    InvalidAskingPrice(Decimal),

    // =================================================================
    // Concurrency (3xx)
    // =================================================================
    /// Another writer mutated the entity between the caller's read and this
    /// write. Carries the current stamp so the caller can re-read and retry.
    #[error("TD_ERR_300: Concurrency conflict on {entity} {id}: current stamp is {current_stamp}")]
    ConcurrencyConflict {
        entity: &'static str,
        id: Uuid,
        current_stamp: ConcurrencyStamp,
    },

    // =================================================================
    // Ledger / configuration (4xx)
    // =================================================================
    /// A budget ledger entry for this transfer already exists. A transfer
    /// may debit a destination team's budget exactly once.
    #[error("TD_ERR_400: Duplicate budget entry for transfer {0}")]
    DuplicateBudgetEntry(TransferId),

    /// A Transfer-kind player value entry for this transfer already exists.
    /// A transfer may increase a player's value exactly once.
    #[error("TD_ERR_401: Duplicate player value entry for transfer {0}")]
    DuplicatePlayerValueEntry(TransferId),

    /// A cached aggregate disagrees with its ledger sum — critical alert.
    /// If this fires, an invariant has been broken somewhere upstream.
    #[error("TD_ERR_402: Aggregate drift on {entity} {id}: cached {cached} != ledger {ledger}")]
    AggregateDrift {
        entity: &'static str,
        id: Uuid,
        cached: Decimal,
        ledger: Decimal,
    },

    /// Invalid engine configuration.
    #[error("TD_ERR_403: Configuration error: {0}")]
    Configuration(String),
}

impl TransferdeskError {
    /// Whether the caller may retry the operation after re-reading current
    /// state. Only concurrency conflicts qualify: not-found errors need
    /// fresh input and domain errors need a different user decision.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TransferdeskError>;
