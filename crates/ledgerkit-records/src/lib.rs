//! # ledgerkit-records — Administrator-Gated Record Store
//!
//! An ordered collection of mutable records, each carrying a three-state
//! lifecycle status, writable only by the single administrator fixed at
//! construction:
//!
//! - **Store** ([`store`]): the record collection. Create, update,
//!   complete, delete with compaction, public reads.
//!
//! - **Errors** ([`error`]): structured rejection reasons. Authorization
//!   is checked before index validity.
//!
//! ## Crate Policy
//!
//! - Depends on `ledgerkit-core` internally.
//! - Every operation either fully applies or fully rejects; there is no
//!   partially updated record observable after an error.

pub mod error;
pub mod store;

// Re-export primary types.
pub use error::RecordError;
pub use store::{Record, RecordStatus, RecordStore};
