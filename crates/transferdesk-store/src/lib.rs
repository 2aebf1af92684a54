//! # transferdesk-store
//!
//! Transactional in-memory storage backend for the Transferdesk settlement
//! engine. Provides the three primitives the engine's correctness rests on:
//!
//! 1. **All-or-nothing transactions** — [`MemoryStore::transact`] installs
//!    a transaction's writes atomically or not at all.
//! 2. **Conditional updates** — [`StoreTx`] update operations compare the
//!    caller-observed concurrency stamp against the stored one and reject
//!    stale writers.
//! 3. **Unique constraints** — one Listed transfer per player, one budget
//!    debit per transfer, one Transfer-kind value entry per transfer.
//!
//! The store serializes transactions internally, so a budget-floor check
//! and the debiting insert in the same transaction are atomic with respect
//! to every other writer.

mod tables;
mod tx;

pub mod store;

pub use store::MemoryStore;
pub use tx::StoreTx;
