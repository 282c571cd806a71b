//! # Escrow State Machine
//!
//! Holds a single deposited amount until a fixed instant has passed, then
//! releases the entire balance to one designated beneficiary, exactly once.
//!
//! ## Status machine
//!
//! `Funded → Released`
//!
//! `Released` is terminal. The object is never destroyed; after release
//! it stays inert with a zero balance and rejects further releases.
//!
//! ## Guard order
//!
//! [`Escrow::release`] checks its guards in a fixed order: the time lock
//! first, the caller identity second, the terminal status last. A
//! non-beneficiary probing before the release time therefore observes the
//! time error, not the identity error.

use serde::{Deserialize, Serialize};

use ledgerkit_core::{AccountId, Amount, EscrowId, Timestamp};

use crate::error::EscrowError;

// ── Status ─────────────────────────────────────────────────────────────

/// The status of an escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowStatus {
    /// The deposit is held and the time lock is armed.
    Funded,
    /// The balance has been withdrawn. Terminal state.
    Released,
}

impl EscrowStatus {
    /// Whether this status is terminal (no further releases possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released)
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Funded => "FUNDED",
            Self::Released => "RELEASED",
        }
    }
}

impl std::fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Withdrawal Event ───────────────────────────────────────────────────

/// The notification produced by a successful release.
///
/// Exactly one `Withdrawal` exists per escrow, carrying the full released
/// amount and the clock reading at which the release was applied. The host
/// environment credits the beneficiary from this event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// The escrow the withdrawal drained.
    pub escrow_id: EscrowId,
    /// The amount moved to the beneficiary.
    pub amount: Amount,
    /// The ledger clock reading at release.
    pub released_at: Timestamp,
}

// ── Escrow ─────────────────────────────────────────────────────────────

/// A time-locked value escrow with a single designated beneficiary.
///
/// Opened once with an attached deposit; mutated only by [`release`]
/// (`Escrow::release`); inert after the balance has been withdrawn.
/// The beneficiary and release time are fixed for the life of the object.
///
/// [`release`]: Escrow::release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escrow {
    id: EscrowId,
    beneficiary: AccountId,
    release_time: Timestamp,
    balance: Amount,
    status: EscrowStatus,
    opened_at: Timestamp,
    // Always Some once status is Released.
    released_at: Option<Timestamp>,
}

impl Escrow {
    /// Open an escrow holding `deposit` for `beneficiary` until
    /// `release_time`.
    ///
    /// `now` is the current ledger clock reading. A zero deposit is
    /// accepted; the time lock still applies to it.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::ReleaseTimeNotInFuture`] when
    /// `release_time <= now`. No escrow exists after a failed open.
    pub fn open(
        beneficiary: AccountId,
        release_time: Timestamp,
        deposit: Amount,
        now: Timestamp,
    ) -> Result<Self, EscrowError> {
        if release_time <= now {
            return Err(EscrowError::ReleaseTimeNotInFuture { release_time, now });
        }
        Ok(Self {
            id: EscrowId::new(),
            beneficiary,
            release_time,
            balance: deposit,
            status: EscrowStatus::Funded,
            opened_at: now,
            released_at: None,
        })
    }

    /// Release the entire balance to the beneficiary.
    ///
    /// Guards, checked in order:
    ///
    /// 1. the ledger clock must have reached the release time,
    /// 2. the caller must be the beneficiary,
    /// 3. the escrow must not already be released.
    ///
    /// On success the balance drops to zero, the status becomes
    /// [`EscrowStatus::Released`], and the single [`Withdrawal`] event is
    /// returned for the host to apply. A failed release changes nothing.
    ///
    /// # Errors
    ///
    /// [`EscrowError::ReleaseTooEarly`], [`EscrowError::NotBeneficiary`],
    /// or [`EscrowError::AlreadyReleased`], per the violated guard.
    pub fn release(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<Withdrawal, EscrowError> {
        if now < self.release_time {
            return Err(EscrowError::ReleaseTooEarly {
                escrow_id: self.id,
                release_time: self.release_time,
                now,
            });
        }
        if *caller != self.beneficiary {
            return Err(EscrowError::NotBeneficiary {
                escrow_id: self.id,
                caller: *caller,
            });
        }
        if let Some(released_at) = self.released_at {
            return Err(EscrowError::AlreadyReleased {
                escrow_id: self.id,
                released_at,
            });
        }

        let amount = self.balance;
        self.balance = Amount::zero();
        self.status = EscrowStatus::Released;
        self.released_at = Some(now);
        Ok(Withdrawal {
            escrow_id: self.id,
            amount,
            released_at: now,
        })
    }

    /// The escrow instance identifier.
    pub fn id(&self) -> EscrowId {
        self.id
    }

    /// The identity permitted to release the balance.
    pub fn beneficiary(&self) -> &AccountId {
        &self.beneficiary
    }

    /// The instant the time lock expires.
    pub fn release_time(&self) -> Timestamp {
        self.release_time
    }

    /// The currently held balance. Zero after release.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// The current status.
    pub fn status(&self) -> EscrowStatus {
        self.status
    }

    /// The ledger clock reading at open.
    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// When the balance was withdrawn, if it has been.
    pub fn released_at(&self) -> Option<Timestamp> {
        self.released_at
    }

    /// Whether the single release has already happened.
    pub fn is_released(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Timestamp {
        Timestamp::parse("2026-01-15T12:00:00Z").unwrap()
    }

    fn unlock() -> Timestamp {
        Timestamp::parse("2027-01-15T12:00:00Z").unwrap()
    }

    fn funded(beneficiary: AccountId) -> Escrow {
        Escrow::open(beneficiary, unlock(), Amount::new(1_000_000_000), t0()).unwrap()
    }

    // ── Open guards ──────────────────────────────────────────────────

    #[test]
    fn open_records_terms() {
        let beneficiary = AccountId::new();
        let escrow = funded(beneficiary);
        assert_eq!(*escrow.beneficiary(), beneficiary);
        assert_eq!(escrow.release_time(), unlock());
        assert_eq!(escrow.balance(), Amount::new(1_000_000_000));
        assert_eq!(escrow.status(), EscrowStatus::Funded);
        assert_eq!(escrow.opened_at(), t0());
        assert_eq!(escrow.released_at(), None);
    }

    #[test]
    fn open_rejects_past_release_time() {
        let past = Timestamp::parse("2026-01-15T11:59:59Z").unwrap();
        let result = Escrow::open(AccountId::new(), past, Amount::new(100), t0());
        assert!(matches!(
            result,
            Err(EscrowError::ReleaseTimeNotInFuture { .. })
        ));
    }

    #[test]
    fn open_rejects_release_time_equal_to_now() {
        let result = Escrow::open(AccountId::new(), t0(), Amount::new(100), t0());
        assert!(matches!(
            result,
            Err(EscrowError::ReleaseTimeNotInFuture { .. })
        ));
    }

    #[test]
    fn open_rejects_past_release_time_for_zero_deposit() {
        let result = Escrow::open(AccountId::new(), t0(), Amount::zero(), t0());
        assert!(matches!(
            result,
            Err(EscrowError::ReleaseTimeNotInFuture { .. })
        ));
    }

    #[test]
    fn open_accepts_zero_deposit() {
        let escrow = Escrow::open(AccountId::new(), unlock(), Amount::zero(), t0()).unwrap();
        assert!(escrow.balance().is_zero());
        assert_eq!(escrow.status(), EscrowStatus::Funded);
    }

    // ── Release guard order ──────────────────────────────────────────

    #[test]
    fn release_before_unlock_fails_too_early() {
        let beneficiary = AccountId::new();
        let mut escrow = funded(beneficiary);
        let result = escrow.release(&beneficiary, t0());
        assert!(matches!(result, Err(EscrowError::ReleaseTooEarly { .. })));
        assert_eq!(escrow.balance(), Amount::new(1_000_000_000));
    }

    #[test]
    fn early_release_by_stranger_reports_time_not_identity() {
        let mut escrow = funded(AccountId::new());
        let stranger = AccountId::new();
        let result = escrow.release(&stranger, t0());
        assert!(matches!(result, Err(EscrowError::ReleaseTooEarly { .. })));
    }

    #[test]
    fn release_by_stranger_after_unlock_fails_not_beneficiary() {
        let mut escrow = funded(AccountId::new());
        let stranger = AccountId::new();
        let result = escrow.release(&stranger, unlock());
        assert!(matches!(
            result,
            Err(EscrowError::NotBeneficiary { caller, .. }) if caller == stranger
        ));
        assert_eq!(escrow.status(), EscrowStatus::Funded);
    }

    #[test]
    fn release_at_exact_unlock_instant_succeeds() {
        let beneficiary = AccountId::new();
        let mut escrow = funded(beneficiary);
        assert!(escrow.release(&beneficiary, unlock()).is_ok());
    }

    // ── Successful release ───────────────────────────────────────────

    #[test]
    fn release_drains_balance_and_reports_withdrawal() {
        let beneficiary = AccountId::new();
        let mut escrow = funded(beneficiary);
        let at = unlock().checked_add_secs(60).unwrap();

        let withdrawal = escrow.release(&beneficiary, at).unwrap();
        assert_eq!(withdrawal.amount, Amount::new(1_000_000_000));
        assert_eq!(withdrawal.released_at, at);
        assert_eq!(withdrawal.escrow_id, escrow.id());

        assert!(escrow.balance().is_zero());
        assert!(escrow.is_released());
        assert_eq!(escrow.released_at(), Some(at));
    }

    #[test]
    fn second_release_fails_already_released() {
        let beneficiary = AccountId::new();
        let mut escrow = funded(beneficiary);
        let first = unlock();
        escrow.release(&beneficiary, first).unwrap();

        let result = escrow.release(&beneficiary, first.checked_add_secs(1).unwrap());
        assert!(matches!(
            result,
            Err(EscrowError::AlreadyReleased { released_at, .. }) if released_at == first
        ));
        assert!(escrow.balance().is_zero());
    }

    #[test]
    fn stranger_after_release_still_sees_not_beneficiary() {
        let beneficiary = AccountId::new();
        let mut escrow = funded(beneficiary);
        escrow.release(&beneficiary, unlock()).unwrap();

        let stranger = AccountId::new();
        let result = escrow.release(&stranger, unlock());
        assert!(matches!(result, Err(EscrowError::NotBeneficiary { .. })));
    }

    #[test]
    fn zero_deposit_release_reports_zero_withdrawal() {
        let beneficiary = AccountId::new();
        let mut escrow = Escrow::open(beneficiary, unlock(), Amount::zero(), t0()).unwrap();
        let withdrawal = escrow.release(&beneficiary, unlock()).unwrap();
        assert!(withdrawal.amount.is_zero());
        assert!(escrow.is_released());
    }

    // ── Status and serde ─────────────────────────────────────────────

    #[test]
    fn status_display() {
        assert_eq!(EscrowStatus::Funded.to_string(), "FUNDED");
        assert_eq!(EscrowStatus::Released.to_string(), "RELEASED");
    }

    #[test]
    fn status_terminality() {
        assert!(!EscrowStatus::Funded.is_terminal());
        assert!(EscrowStatus::Released.is_terminal());
    }

    #[test]
    fn escrow_serde_roundtrip() {
        let escrow = funded(AccountId::new());
        let json = serde_json::to_string(&escrow).unwrap();
        let parsed: Escrow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id(), escrow.id());
        assert_eq!(parsed.balance(), escrow.balance());
        assert_eq!(parsed.status(), escrow.status());
        assert_eq!(parsed.release_time(), escrow.release_time());
    }

    #[test]
    fn withdrawal_serde_roundtrip() {
        let withdrawal = Withdrawal {
            escrow_id: EscrowId::new(),
            amount: Amount::new(42),
            released_at: unlock(),
        };
        let json = serde_json::to_string(&withdrawal).unwrap();
        let parsed: Withdrawal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, withdrawal);
    }
}
