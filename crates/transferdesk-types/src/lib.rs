//! # transferdesk-types
//!
//! Shared types, errors, and configuration for the **Transferdesk**
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`TeamId`], [`PlayerId`], [`TransferId`], [`EntryId`], [`UserId`]
//! - **Concurrency stamps**: [`ConcurrencyStamp`], the [`Stamped`] trait, [`Expect`]
//! - **Entities**: [`Team`], [`Player`], [`Position`], [`Transfer`], [`TransferState`]
//! - **Ledger**: [`PlayerValueEntry`], [`PlayerValueKind`], [`BudgetEntry`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`TransferdeskError`] with `TD_ERR_` prefix codes
//! - **Constants**: system-wide defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod player;
pub mod stamp;
pub mod team;
pub mod transfer;

// Re-export all primary types at crate root for ergonomic imports:
//   use transferdesk_types::{Team, Player, Transfer, BudgetEntry, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use player::*;
pub use stamp::*;
pub use team::*;
pub use transfer::*;

// Constants are accessed via `transferdesk_types::constants::FOO`
// (not re-exported to avoid name collisions).
