//! # Ledger Amounts
//!
//! [`Amount`] counts value in the smallest indivisible ledger unit.
//! The inner representation is a `u64`; negative balances cannot be
//! expressed, and all arithmetic is checked.
//!
//! ## Invariant
//!
//! No operation on `Amount` wraps. Overflowing additions and underflowing
//! subtractions return `None` and the caller decides how to report them.

use serde::{Deserialize, Serialize};

/// A quantity of ledger value, in smallest indivisible units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Create an amount from a count of smallest units.
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// The zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The number of smallest units.
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction. `None` if `other` exceeds `self`.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units)
    }
}
