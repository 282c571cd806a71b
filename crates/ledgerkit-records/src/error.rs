//! # Record Store Error Types
//!
//! Rejection reasons for record store operations. The two variants map to
//! the two gates every mutation passes through: the administrator check
//! and the index bound check.

use thiserror::Error;

use ledgerkit_core::AccountId;

/// Errors arising from record store operations.
#[derive(Error, Debug)]
pub enum RecordError {
    /// A mutating call came from an identity other than the
    /// administrator. Permanent for that caller.
    #[error("caller {caller} is not the record store administrator")]
    NotAdministrator {
        /// The identity that attempted the mutation.
        caller: AccountId,
    },

    /// The addressed slot does not currently exist: it was never created,
    /// or it was deleted and compacted away. Recoverable with a valid
    /// index.
    #[error("record index {index} is out of range for store of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The store length at the time of the call.
        len: usize,
    },
}
