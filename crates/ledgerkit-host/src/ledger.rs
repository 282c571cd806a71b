//! # The Simulated Ledger
//!
//! A single-threaded, strictly sequential ledger: operations apply one at
//! a time, each either fully mutating state or fully rejecting. The clock
//! only moves forward, and only when told to; tests control time
//! explicitly instead of sleeping.
//!
//! Value is conserved: the only way units enter the ledger is
//! [`Ledger::open_account`], and every later movement is a debit matched
//! by a credit (escrow deposits debit the depositor into the escrow,
//! releases credit the beneficiary back out of it).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ledgerkit_core::{AccountId, Amount, EscrowId, Timestamp};
use ledgerkit_escrow::{Escrow, Withdrawal};

use crate::error::HostError;

/// An entry in the ledger's append-only event journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// An escrow released its balance to the beneficiary.
    Withdrawal(Withdrawal),
}

/// The in-memory sequential ledger host.
///
/// Owns the account book, the clock, every open escrow, and the event
/// journal. All mutation goes through `&mut self` methods, which models
/// the exclusive access each invocation holds for its full duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    accounts: BTreeMap<AccountId, Amount>,
    escrows: BTreeMap<EscrowId, Escrow>,
    events: Vec<LedgerEvent>,
    clock: Timestamp,
}

impl Ledger {
    /// Create an empty ledger whose clock reads `genesis`.
    pub fn new(genesis: Timestamp) -> Self {
        Self {
            accounts: BTreeMap::new(),
            escrows: BTreeMap::new(),
            events: Vec::new(),
            clock: genesis,
        }
    }

    // ── Clock ──────────────────────────────────────────────────────────

    /// The current clock reading.
    pub fn now(&self) -> Timestamp {
        self.clock
    }

    /// Advance the clock by `secs` seconds and return the new reading.
    ///
    /// # Errors
    ///
    /// [`HostError::Validation`] if the resulting instant is out of range.
    pub fn advance_secs(&mut self, secs: u64) -> Result<Timestamp, HostError> {
        let next = self.clock.checked_add_secs(secs)?;
        self.clock = next;
        debug!(now = %self.clock, "ledger clock advanced");
        Ok(next)
    }

    /// Advance the clock to `instant`.
    ///
    /// Setting the clock to its current reading is allowed; moving it
    /// backwards is not.
    ///
    /// # Errors
    ///
    /// [`HostError::ClockRegression`] if `instant` is earlier than the
    /// current reading.
    pub fn advance_to(&mut self, instant: Timestamp) -> Result<(), HostError> {
        if instant < self.clock {
            return Err(HostError::ClockRegression {
                now: self.clock,
                requested: instant,
            });
        }
        self.clock = instant;
        debug!(now = %self.clock, "ledger clock advanced");
        Ok(())
    }

    // ── Accounts ───────────────────────────────────────────────────────

    /// Open a new account holding `initial` units and return its identity.
    pub fn open_account(&mut self, initial: Amount) -> AccountId {
        let account = AccountId::new();
        self.accounts.insert(account, initial);
        debug!(%account, balance = %initial, "account opened");
        account
    }

    /// The balance of `account`.
    ///
    /// # Errors
    ///
    /// [`HostError::UnknownAccount`] if the account was never opened.
    pub fn balance_of(&self, account: &AccountId) -> Result<Amount, HostError> {
        self.accounts
            .get(account)
            .copied()
            .ok_or(HostError::UnknownAccount(*account))
    }

    // ── Escrows ────────────────────────────────────────────────────────

    /// Open an escrow locking the caller's own deposit: debit `deposit`
    /// from `depositor` and record the depositor as the beneficiary.
    ///
    /// Returns the new escrow's identifier.
    ///
    /// # Errors
    ///
    /// Same as [`Ledger::open_escrow_for`].
    pub fn open_escrow(
        &mut self,
        depositor: &AccountId,
        release_time: Timestamp,
        deposit: Amount,
    ) -> Result<EscrowId, HostError> {
        self.open_escrow_for(depositor, *depositor, release_time, deposit)
    }

    /// Open an escrow: debit `deposit` from `depositor` and lock it for
    /// `beneficiary` until `release_time`.
    ///
    /// Returns the new escrow's identifier.
    ///
    /// # Errors
    ///
    /// [`HostError::UnknownAccount`], [`HostError::InsufficientFunds`],
    /// or the component's own
    /// [`ReleaseTimeNotInFuture`](ledgerkit_escrow::EscrowError::ReleaseTimeNotInFuture).
    /// A failed open debits nothing.
    pub fn open_escrow_for(
        &mut self,
        depositor: &AccountId,
        beneficiary: AccountId,
        release_time: Timestamp,
        deposit: Amount,
    ) -> Result<EscrowId, HostError> {
        let balance = self.balance_of(depositor)?;
        let remainder = balance
            .checked_sub(deposit)
            .ok_or(HostError::InsufficientFunds {
                account: *depositor,
                balance,
                requested: deposit,
            })?;

        // Component guard last, still before any mutation.
        let escrow = Escrow::open(beneficiary, release_time, deposit, self.clock)?;
        let escrow_id = escrow.id();

        self.accounts.insert(*depositor, remainder);
        self.escrows.insert(escrow_id, escrow);
        info!(
            %escrow_id,
            %depositor,
            %beneficiary,
            amount = %deposit,
            %release_time,
            "escrow opened"
        );
        Ok(escrow_id)
    }

    /// Release an escrow as `caller` at the current clock reading,
    /// crediting the beneficiary with the full held balance.
    ///
    /// Appends exactly one [`LedgerEvent::Withdrawal`] to the journal per
    /// successful release and returns the withdrawal.
    ///
    /// # Errors
    ///
    /// [`HostError::UnknownEscrow`], [`HostError::UnknownAccount`] (the
    /// beneficiary never opened an account), [`HostError::BalanceOverflow`],
    /// or the component's release guards, in their fixed order.
    /// A failed release moves nothing and journals nothing.
    pub fn release_escrow(
        &mut self,
        escrow_id: &EscrowId,
        caller: &AccountId,
    ) -> Result<Withdrawal, HostError> {
        let now = self.clock;
        let escrow = self
            .escrows
            .get(escrow_id)
            .ok_or(HostError::UnknownEscrow(*escrow_id))?;

        // The credit must be known to succeed before the component state
        // is allowed to change.
        let beneficiary = *escrow.beneficiary();
        let balance = self.balance_of(&beneficiary)?;
        let credited = balance
            .checked_add(escrow.balance())
            .ok_or(HostError::BalanceOverflow {
                account: beneficiary,
                amount: escrow.balance(),
            })?;

        let escrow = self
            .escrows
            .get_mut(escrow_id)
            .ok_or(HostError::UnknownEscrow(*escrow_id))?;
        let withdrawal = escrow.release(caller, now)?;

        self.accounts.insert(beneficiary, credited);
        self.events.push(LedgerEvent::Withdrawal(withdrawal.clone()));
        info!(
            %escrow_id,
            %beneficiary,
            amount = %withdrawal.amount,
            released_at = %withdrawal.released_at,
            "escrow released"
        );
        Ok(withdrawal)
    }

    /// Read an escrow's current state.
    ///
    /// # Errors
    ///
    /// [`HostError::UnknownEscrow`] if no such escrow exists.
    pub fn escrow(&self, escrow_id: &EscrowId) -> Result<&Escrow, HostError> {
        self.escrows
            .get(escrow_id)
            .ok_or(HostError::UnknownEscrow(*escrow_id))
    }

    /// The event journal, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }
}
