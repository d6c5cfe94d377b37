//! Member entity: identity and the set of currently held books.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{non_empty, BookId};

/// Unique identifier for a library member.
///
/// Ids are positive; [`MemberId::new`] rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(u64);

impl MemberId {
    /// Create a member id from its raw numeric value.
    pub fn new(raw: u64) -> Result<Self> {
        if raw == 0 {
            return Err(Error::Validation("member id must be positive".into()));
        }
        Ok(MemberId(raw))
    }

    /// Raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered library member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
    borrowed: BTreeSet<BookId>,
}

impl Member {
    /// Create a member with no books held.
    ///
    /// Validates eagerly: positive id, non-empty name.
    pub fn new(id: u64, name: impl Into<String>) -> Result<Self> {
        let id = MemberId::new(id)?;
        let name = non_empty(name.into(), "name")?;
        Ok(Member {
            id,
            name,
            borrowed: BTreeSet::new(),
        })
    }

    /// The member's id.
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// The member's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the books currently held, in id order.
    pub fn borrowed(&self) -> impl Iterator<Item = BookId> + '_ {
        self.borrowed.iter().copied()
    }

    /// Number of books currently held.
    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    /// Whether the member currently holds this book.
    pub fn holds(&self, book_id: BookId) -> bool {
        self.borrowed.contains(&book_id)
    }

    /// Record a borrow. Caller has verified the book is not already held.
    pub(crate) fn record_borrow(&mut self, book_id: BookId) {
        self.borrowed.insert(book_id);
    }

    /// Record a return. Caller has verified the book is held.
    pub(crate) fn record_return(&mut self, book_id: BookId) {
        self.borrowed.remove(&book_id);
    }

    /// Apply an already-validated name change.
    pub(crate) fn apply(&mut self, name: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Member ID: {}, Name: {}, Borrowed Books: ", self.id, self.name)?;
        if self.borrowed.is_empty() {
            return write!(f, "None");
        }
        let mut first = true;
        for book_id in &self.borrowed {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{book_id}")?;
            first = false;
        }
        Ok(())
    }
}

/// Patch applied by [`Catalog::update_member`](crate::Catalog::update_member).
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    /// New display name, if changing.
    pub name: Option<String>,
}
