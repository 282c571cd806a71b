//! # Escrow Error Types
//!
//! Structured failure reasons for escrow operations. Every variant carries
//! the identifiers and clock readings an operator needs to diagnose the
//! rejection without inspecting logs, and each guard has its own variant
//! so callers can assert on cause rather than on bare failure.

use thiserror::Error;

use ledgerkit_core::{AccountId, EscrowId, Timestamp};

/// Errors arising from escrow operations.
#[derive(Error, Debug)]
pub enum EscrowError {
    /// The requested release time is not strictly after the current
    /// ledger time. The escrow is never constructed.
    #[error("release time {release_time} is not after ledger time {now}")]
    ReleaseTimeNotInFuture {
        /// The rejected release time.
        release_time: Timestamp,
        /// The ledger clock reading at the attempt.
        now: Timestamp,
    },

    /// Release was attempted before the release time. Recoverable: the
    /// caller may retry once the ledger clock reaches the release time.
    #[error("escrow {escrow_id} is locked until {release_time}, ledger time is {now}")]
    ReleaseTooEarly {
        /// The escrow that rejected the release.
        escrow_id: EscrowId,
        /// The instant the escrow unlocks.
        release_time: Timestamp,
        /// The ledger clock reading at the attempt.
        now: Timestamp,
    },

    /// Release was attempted by an identity other than the beneficiary.
    #[error("caller {caller} is not the beneficiary of escrow {escrow_id}")]
    NotBeneficiary {
        /// The escrow that rejected the release.
        escrow_id: EscrowId,
        /// The identity that attempted the release.
        caller: AccountId,
    },

    /// The escrow balance was already withdrawn. Terminal: the escrow
    /// stays inert forever after its single successful release.
    #[error("escrow {escrow_id} was already released at {released_at}")]
    AlreadyReleased {
        /// The escrow that rejected the release.
        escrow_id: EscrowId,
        /// When the single successful release happened.
        released_at: Timestamp,
    },
}
