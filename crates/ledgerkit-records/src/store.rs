//! # Record Store
//!
//! An insertion-ordered collection of records with a three-state lifecycle
//! status, mutable only by the administrator fixed at construction.
//!
//! ## Status machine
//!
//! ```text
//! (create) ──▶ Created ──update()──▶ Edited ──complete()──▶ Done
//!                 │                    ▲ │                    │
//!                 └──────complete()────┼─┘◀────update()───────┘
//!                                      └──────────────────────┘
//! ```
//!
//! `update` sets `Edited` from any status, `complete` sets `Done` from any
//! status, and nothing leaves `Done` except another `update`. Deletion
//! removes the record entirely and compacts the sequence: trailing
//! records shift down one slot, so indices are not stable across deletes.
//!
//! ## Guard order
//!
//! Gated operations check the administrator identity before the index, so
//! a non-administrator cannot probe which indices are occupied.

use serde::{Deserialize, Serialize};

use ledgerkit_core::AccountId;

use crate::error::RecordError;

// ── Record Status ──────────────────────────────────────────────────────

/// The lifecycle status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Freshly inserted, never mutated.
    Created,
    /// Title or description has been overwritten.
    Edited,
    /// Marked complete.
    Done,
}

impl RecordStatus {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Edited => "EDITED",
            Self::Done => "DONE",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Record ─────────────────────────────────────────────────────────────

/// A single stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Short record title.
    pub title: String,
    /// Free-form record body.
    pub description: String,
    /// Current lifecycle status.
    pub status: RecordStatus,
}

// ── Record Store ───────────────────────────────────────────────────────

/// An ordered, administrator-gated collection of [`Record`]s.
///
/// The administrator is the creator identity and is fixed for the life of
/// the store. Mutations reject any other caller; reads are public.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStore {
    administrator: AccountId,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store administered by `administrator`.
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            records: Vec::new(),
        }
    }

    /// Append a new record with status [`RecordStatus::Created`].
    ///
    /// Returns the index of the new record.
    ///
    /// # Errors
    ///
    /// [`RecordError::NotAdministrator`] for any caller other than the
    /// administrator.
    pub fn create(
        &mut self,
        caller: &AccountId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<usize, RecordError> {
        self.require_administrator(caller)?;
        self.records.push(Record {
            title: title.into(),
            description: description.into(),
            status: RecordStatus::Created,
        });
        Ok(self.records.len() - 1)
    }

    /// Overwrite the title and description at `index` and set the status
    /// to [`RecordStatus::Edited`], whatever it was before.
    ///
    /// # Errors
    ///
    /// [`RecordError::NotAdministrator`] or [`RecordError::IndexOutOfRange`],
    /// checked in that order.
    pub fn update(
        &mut self,
        caller: &AccountId,
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), RecordError> {
        self.require_administrator(caller)?;
        let record = self.record_at_mut(index)?;
        record.title = title.into();
        record.description = description.into();
        record.status = RecordStatus::Edited;
        Ok(())
    }

    /// Set the status at `index` to [`RecordStatus::Done`], whatever it
    /// was before.
    ///
    /// # Errors
    ///
    /// [`RecordError::NotAdministrator`] or [`RecordError::IndexOutOfRange`],
    /// checked in that order.
    pub fn complete(&mut self, caller: &AccountId, index: usize) -> Result<(), RecordError> {
        self.require_administrator(caller)?;
        self.record_at_mut(index)?.status = RecordStatus::Done;
        Ok(())
    }

    /// Remove the record at `index` and compact the sequence: every
    /// record after `index` shifts down one slot.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// [`RecordError::NotAdministrator`] or [`RecordError::IndexOutOfRange`],
    /// checked in that order.
    pub fn delete(&mut self, caller: &AccountId, index: usize) -> Result<Record, RecordError> {
        self.require_administrator(caller)?;
        if index >= self.records.len() {
            return Err(RecordError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Read the record at `index`. Public.
    ///
    /// # Errors
    ///
    /// [`RecordError::IndexOutOfRange`] if the slot does not exist.
    pub fn get(&self, index: usize) -> Result<&Record, RecordError> {
        self.records.get(index).ok_or(RecordError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// The full current collection, in insertion order. Public.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The identity permitted to mutate the store.
    pub fn administrator(&self) -> &AccountId {
        &self.administrator
    }

    /// The number of currently stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn require_administrator(&self, caller: &AccountId) -> Result<(), RecordError> {
        if *caller != self.administrator {
            return Err(RecordError::NotAdministrator { caller: *caller });
        }
        Ok(())
    }

    fn record_at_mut(&mut self, index: usize) -> Result<&mut Record, RecordError> {
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfRange { index, len })
    }
}
