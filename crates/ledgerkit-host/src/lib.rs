//! # ledgerkit-host — Sequential Ledger Host
//!
//! An in-memory stand-in for the execution environment the Ledgerkit
//! components assume: a single globally sequential ledger providing caller
//! identities, a monotonic clock, and atomic call application. Intended
//! for integration tests and embedding; it is not a consensus system.
//!
//! - **Ledger** ([`ledger`]): the account book, the manually advanced
//!   clock, open escrows, and the append-only event journal.
//!
//! - **Errors** ([`error`]): host-level rejections wrapping the component
//!   errors.
//!
//! ## Atomicity
//!
//! Every host operation validates all of its guards before touching any
//! state. A failed call leaves accounts, escrows, clock, and journal
//! exactly as they were.

pub mod error;
pub mod ledger;

// Re-export primary types.
pub use error::HostError;
pub use ledger::{Ledger, LedgerEvent};
