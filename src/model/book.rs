//! Book entity: identity, metadata, and copy counts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::non_empty;

/// Unique identifier for a book title.
///
/// Ids are positive; [`BookId::new`] rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(u64);

impl BookId {
    /// Create a book id from its raw numeric value.
    pub fn new(raw: u64) -> Result<Self> {
        if raw == 0 {
            return Err(Error::Validation("book id must be positive".into()));
        }
        Ok(BookId(raw))
    }

    /// Raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book title in the catalog, with its lendable copy counts.
///
/// `total_copies` is the number of copies the library owns;
/// `available_copies` the number not currently lent. The catalog keeps
/// `0 <= available_copies <= total_copies` at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    total_copies: u32,
    available_copies: u32,
}

impl Book {
    /// Create a book with all copies available.
    ///
    /// Validates eagerly: positive id, non-empty title and author, and at
    /// least one copy.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        total_copies: u32,
    ) -> Result<Self> {
        let id = BookId::new(id)?;
        let title = non_empty(title.into(), "title")?;
        let author = non_empty(author.into(), "author")?;
        if total_copies == 0 {
            return Err(Error::Validation("total copies must be positive".into()));
        }
        Ok(Book {
            id,
            title,
            author,
            total_copies,
            available_copies: total_copies,
        })
    }

    /// The book's id.
    pub fn id(&self) -> BookId {
        self.id
    }

    /// The book's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The book's author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Copies the library owns.
    pub fn total_copies(&self) -> u32 {
        self.total_copies
    }

    /// Copies not currently lent out.
    pub fn available_copies(&self) -> u32 {
        self.available_copies
    }

    /// Copies currently out on loan.
    pub fn on_loan(&self) -> u32 {
        self.total_copies - self.available_copies
    }

    /// Case-insensitive substring match against title or author.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }

    /// Lend one copy out. Caller has verified availability.
    pub(crate) fn check_out(&mut self) {
        debug_assert!(self.available_copies > 0);
        self.available_copies -= 1;
    }

    /// Take one copy back, clamped at the owned total.
    pub(crate) fn check_in(&mut self) {
        self.available_copies = (self.available_copies + 1).min(self.total_copies);
    }

    /// Apply already-validated update fields.
    ///
    /// A new copy total resets `available_copies` so that the on-loan count
    /// is preserved; the caller has verified `total >= on_loan`.
    pub(crate) fn apply(
        &mut self,
        title: Option<String>,
        author: Option<String>,
        total_copies: Option<u32>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(total) = total_copies {
            let on_loan = self.on_loan();
            self.total_copies = total;
            self.available_copies = total - on_loan;
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Available Copies: {}/{}",
            self.id, self.title, self.author, self.available_copies, self.total_copies
        )
    }
}

/// Patch applied by [`Catalog::update_book`](crate::Catalog::update_book).
///
/// `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    /// New title, if changing.
    pub title: Option<String>,
    /// New author, if changing.
    pub author: Option<String>,
    /// New owned-copy total, if changing.
    pub total_copies: Option<u32>,
}
