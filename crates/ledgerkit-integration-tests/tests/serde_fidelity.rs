//! # Serde Fidelity
//!
//! Round-trip checks for the public types: serialize to JSON, parse back,
//! compare observable state. A restored object must behave exactly like
//! the original, including still enforcing its guards.

use ledgerkit_core::{AccountId, Amount, Timestamp};
use ledgerkit_escrow::{Escrow, EscrowError, EscrowStatus, Withdrawal};
use ledgerkit_host::Ledger;
use ledgerkit_records::{RecordStatus, RecordStore};

fn t0() -> Timestamp {
    Timestamp::parse("2026-01-15T12:00:00Z").unwrap()
}

fn unlock() -> Timestamp {
    Timestamp::parse("2026-03-01T00:00:00Z").unwrap()
}

#[test]
fn escrow_roundtrip_preserves_guards() {
    let beneficiary = AccountId::new();
    let escrow = Escrow::open(beneficiary, unlock(), Amount::new(777), t0()).unwrap();

    let json = serde_json::to_string(&escrow).unwrap();
    let mut restored: Escrow = serde_json::from_str(&json).unwrap();

    // Restored state matches the original.
    assert_eq!(restored.id(), escrow.id());
    assert_eq!(restored.beneficiary(), escrow.beneficiary());
    assert_eq!(restored.release_time(), unlock());
    assert_eq!(restored.balance(), Amount::new(777));
    assert_eq!(restored.status(), EscrowStatus::Funded);

    // The restored escrow still enforces the time lock.
    assert!(matches!(
        restored.release(&beneficiary, t0()),
        Err(EscrowError::ReleaseTooEarly { .. })
    ));
    // And still releases normally after it.
    let withdrawal = restored.release(&beneficiary, unlock()).unwrap();
    assert_eq!(withdrawal.amount, Amount::new(777));
}

#[test]
fn released_escrow_roundtrip_stays_terminal() {
    let beneficiary = AccountId::new();
    let mut escrow = Escrow::open(beneficiary, unlock(), Amount::new(10), t0()).unwrap();
    escrow.release(&beneficiary, unlock()).unwrap();

    let json = serde_json::to_string(&escrow).unwrap();
    let mut restored: Escrow = serde_json::from_str(&json).unwrap();

    assert!(restored.is_released());
    assert!(restored.balance().is_zero());
    assert!(matches!(
        restored.release(&beneficiary, unlock()),
        Err(EscrowError::AlreadyReleased { .. })
    ));
}

#[test]
fn withdrawal_roundtrip_is_exact() {
    let withdrawal = Withdrawal {
        escrow_id: ledgerkit_core::EscrowId::new(),
        amount: Amount::new(1_000_000_000),
        released_at: unlock(),
    };
    let json = serde_json::to_string(&withdrawal).unwrap();
    let restored: Withdrawal = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, withdrawal);
}

#[test]
fn record_store_roundtrip_preserves_gate_and_order() {
    let admin = AccountId::new();
    let mut store = RecordStore::new(admin);
    store.create(&admin, "first", "1").unwrap();
    store.create(&admin, "second", "2").unwrap();
    store.complete(&admin, 1).unwrap();

    let json = serde_json::to_string(&store).unwrap();
    let mut restored: RecordStore = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.administrator(), store.administrator());
    assert_eq!(restored.records(), store.records());
    assert_eq!(restored.get(1).unwrap().status, RecordStatus::Done);

    // The gate survives the round trip.
    let stranger = AccountId::new();
    assert!(restored.create(&stranger, "x", "y").is_err());
    assert!(restored.create(&admin, "third", "3").is_ok());
}

#[test]
fn ledger_roundtrip_preserves_clock_and_balances() {
    let mut ledger = Ledger::new(t0());
    let depositor = ledger.open_account(Amount::new(250));
    let beneficiary = ledger.open_account(Amount::zero());
    let escrow_id = ledger
        .open_escrow_for(&depositor, beneficiary, unlock(), Amount::new(250))
        .unwrap();
    ledger.advance_to(unlock()).unwrap();

    let json = serde_json::to_string(&ledger).unwrap();
    let mut restored: Ledger = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.now(), unlock());
    assert_eq!(restored.balance_of(&depositor).unwrap(), Amount::zero());

    // The restored ledger completes the lifecycle.
    let withdrawal = restored.release_escrow(&escrow_id, &beneficiary).unwrap();
    assert_eq!(withdrawal.amount, Amount::new(250));
    assert_eq!(
        restored.balance_of(&beneficiary).unwrap(),
        Amount::new(250)
    );
}

#[test]
fn timestamp_json_form_is_canonical() {
    let ts = t0();
    let json = serde_json::to_string(&ts).unwrap();
    // chrono serializes DateTime<Utc> in RFC 3339 with Z suffix.
    assert!(json.contains("2026-01-15T12:00:00Z"));
}
