//! # ledgerkit-escrow — Time-Locked Value Escrow
//!
//! A single deposited quantity of value, held until an instant in time has
//! passed and releasable only by one designated beneficiary:
//!
//! - **Escrow** ([`escrow`]): the escrow state machine. Opened with a
//!   deposit and a strictly-future release time, released once after the
//!   deadline, inert afterwards.
//!
//! - **Errors** ([`error`]): structured failure reasons for each violated
//!   guard, checked in a fixed order so callers can assert on cause.
//!
//! ## Crate Policy
//!
//! - Depends on `ledgerkit-core` internally.
//! - The component never moves value itself; a successful release returns
//!   a [`Withdrawal`] event and the host applies the transfer.

pub mod error;
pub mod escrow;

// Re-export primary types.
pub use error::EscrowError;
pub use escrow::{Escrow, EscrowStatus, Withdrawal};
