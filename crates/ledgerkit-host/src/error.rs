//! # Host Error Types
//!
//! Rejections raised by the simulated ledger host. Component-level
//! failures pass through unchanged so callers can still assert on the
//! precise guard that fired.

use thiserror::Error;

use ledgerkit_core::{AccountId, Amount, EscrowId, Timestamp, ValidationError};
use ledgerkit_escrow::EscrowError;

/// Errors arising from ledger host operations.
#[derive(Error, Debug)]
pub enum HostError {
    /// An escrow component guard rejected the call.
    #[error(transparent)]
    Escrow(#[from] EscrowError),

    /// The addressed account has never been opened on this ledger.
    #[error("unknown account {0}")]
    UnknownAccount(AccountId),

    /// The addressed escrow does not exist on this ledger.
    #[error("unknown escrow {0}")]
    UnknownEscrow(EscrowId),

    /// A debit exceeds the account balance.
    #[error("account {account} holds {balance}, cannot debit {requested}")]
    InsufficientFunds {
        /// The account being debited.
        account: AccountId,
        /// Its current balance.
        balance: Amount,
        /// The requested debit.
        requested: Amount,
    },

    /// A credit would overflow the account balance.
    #[error("crediting {amount} to account {account} would overflow its balance")]
    BalanceOverflow {
        /// The account being credited.
        account: AccountId,
        /// The requested credit.
        amount: Amount,
    },

    /// The clock was asked to move backwards.
    #[error("ledger clock at {now} cannot move back to {requested}")]
    ClockRegression {
        /// The current clock reading.
        now: Timestamp,
        /// The earlier instant that was requested.
        requested: Timestamp,
    },

    /// A core primitive could not be constructed (e.g. clock arithmetic
    /// out of range).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
