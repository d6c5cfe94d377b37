//! Append-only transaction ledger.
//!
//! Every successful borrow or return appends one immutable [`TxRecord`].
//! Records carry a monotonically increasing sequence number, so append
//! order is recoverable even when wall-clock timestamps collide.
//! The ledger supports no update or delete.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{BookId, MemberId};

/// The two actions a transaction can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxAction {
    /// A member took a copy out.
    Borrow,
    /// A member brought a copy back.
    Return,
}

impl fmt::Display for TxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxAction::Borrow => write!(f, "BORROW"),
            TxAction::Return => write!(f, "RETURN"),
        }
    }
}

/// One immutable borrow/return event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxRecord {
    /// Position in the ledger, starting at 0.
    pub seq: u64,
    /// The member involved.
    pub member_id: MemberId,
    /// The book involved.
    pub book_id: BookId,
    /// Borrow or return.
    pub action: TxAction,
    /// Wall-clock time the record was appended.
    pub at: DateTime<Utc>,
}

impl fmt::Display for TxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} member={} book={} at={}",
            self.seq,
            self.action,
            self.member_id,
            self.book_id,
            self.at.to_rfc3339()
        )
    }
}

/// Filter for [`Catalog::history`](crate::Catalog::history).
///
/// `None` fields match everything, so the default filter selects the
/// whole ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryFilter {
    /// Only records referencing this book.
    pub book_id: Option<BookId>,
    /// Only records referencing this member.
    pub member_id: Option<MemberId>,
}

impl HistoryFilter {
    /// Match every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match records referencing this book.
    pub fn book(book_id: BookId) -> Self {
        HistoryFilter {
            book_id: Some(book_id),
            member_id: None,
        }
    }

    /// Match records referencing this member.
    pub fn member(member_id: MemberId) -> Self {
        HistoryFilter {
            book_id: None,
            member_id: Some(member_id),
        }
    }

    fn matches(&self, record: &TxRecord) -> bool {
        self.book_id.map_or(true, |id| record.book_id == id)
            && self.member_id.map_or(true, |id| record.member_id == id)
    }
}

/// The append-only sequence of transaction records.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<TxRecord>,
}

impl Ledger {
    /// Append a record, assigning the next sequence number.
    pub(crate) fn append(
        &mut self,
        member_id: MemberId,
        book_id: BookId,
        action: TxAction,
    ) -> &TxRecord {
        let record = TxRecord {
            seq: self.records.len() as u64,
            member_id,
            book_id,
            action,
            at: Utc::now(),
        };
        self.records.push(record);
        // Just pushed, so the slice is non-empty.
        &self.records[self.records.len() - 1]
    }

    /// Records matching the filter, in append order.
    pub fn select(&self, filter: HistoryFilter) -> Vec<&TxRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// All records, in append order.
    pub fn iter(&self) -> impl Iterator<Item = &TxRecord> {
        self.records.iter()
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
