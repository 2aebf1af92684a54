//! Transferdesk settlement engine.
//!
//! Builds the operations of the transfer market on top of
//! [`transferdesk_store`]: roster creation with seeded ledger entries,
//! listing players for transfer, the atomic pay-for-transfer settlement,
//! aggregate recompute, and the ledger-equivalence audit.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use transferdesk_engine::{FixedRandom, SystemClock, TeamSpec, TransferEngine};
//! use transferdesk_store::MemoryStore;
//! use transferdesk_types::{EngineConfig, UserId};
//!
//! let engine = TransferEngine::with_parts(
//!     Arc::new(MemoryStore::new()),
//!     EngineConfig::default(),
//!     Arc::new(SystemClock),
//!     Arc::new(Mutex::new(FixedRandom::always(10))),
//! )?;
//!
//! let seller = UserId::new();
//! let buyer = UserId::new();
//! let selling = engine.create_team(seller, TeamSpec::default(), engine.default_squad())?;
//! let buying = engine.create_team(buyer, TeamSpec::default(), engine.default_squad())?;
//!
//! let player = engine.players_of_team(selling.id).remove(0);
//! let listing = engine.list_for_transfer(
//!     player.id,
//!     seller,
//!     rust_decimal::Decimal::new(200_000, 0),
//!     player.stamp,
//! )?;
//! let settled = engine.settle(listing.id, buying.id, listing.stamp)?;
//! assert!(settled.is_completed());
//! # Ok::<(), transferdesk_types::TransferdeskError>(())
//! ```

pub mod aggregates;
mod audit;
pub mod clock;
mod engine;
mod listing;
pub mod rng;
mod roster;
mod settlement;

pub use aggregates::{AggregateMaintainer, AggregateOwner};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::TransferEngine;
pub use rng::{FixedRandom, RandomSource, StdRandom};
pub use roster::{PlayerSpec, TeamSpec, UpdatePlayer, UpdateTeam};
