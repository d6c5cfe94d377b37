//! Catalog coordinator.
//!
//! This module provides the [`Catalog`] struct, the single entry point
//! for all catalog operations. The catalog owns the book and member
//! collections and the transaction ledger; every state change flows
//! through it, which is what keeps the copy-count and borrowed-set
//! invariants from drifting.
//!
//! Each compound operation validates fully before mutating anything, so
//! a rejected request leaves the catalog exactly as it found it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::ledger::{HistoryFilter, Ledger, TxAction, TxRecord};
use crate::model::{non_empty, Book, BookId, BookUpdate, Member, MemberId, MemberUpdate};

/// Borrow limit used when the builder does not override it.
pub const DEFAULT_BORROW_LIMIT: usize = 3;

/// The library catalog.
///
/// Create one with [`Catalog::new`] or configure it through
/// [`Catalog::builder`]. There is no process-wide instance: each catalog
/// is an independent value, which keeps tests isolated and lets one
/// process manage several collections.
///
/// # Example
///
/// ```
/// use circdesk::prelude::*;
///
/// # fn main() -> circdesk::Result<()> {
/// let mut catalog = Catalog::new();
/// catalog.add_book(Book::new(1, "Dune", "Frank Herbert", 2)?)?;
/// catalog.add_member(Member::new(101, "Alice")?)?;
/// catalog.issue_book(MemberId::new(101)?, BookId::new(1)?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Catalog {
    books: BTreeMap<BookId, Book>,
    members: BTreeMap<MemberId, Member>,
    ledger: Ledger,
    borrow_limit: usize,
}

impl Catalog {
    /// Create a catalog with the default borrow limit.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for catalog configuration.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Maximum number of books one member may hold at a time.
    pub fn borrow_limit(&self) -> usize {
        self.borrow_limit
    }

    // =========================================================================
    // Book catalog operations
    // =========================================================================

    /// Add a new book to the inventory.
    ///
    /// Fails with [`Error::DuplicateId`] if a book with the same id exists.
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        let id = book.id();
        if self.books.contains_key(&id) {
            return Err(Error::duplicate_book(id));
        }
        debug!(book_id = %id, title = book.title(), "book added");
        self.books.insert(id, book);
        Ok(())
    }

    /// Remove a book from the inventory, returning it.
    ///
    /// Fails with [`Error::NotFound`] if absent and [`Error::BookInUse`] if
    /// any copy is out on loan.
    pub fn remove_book(&mut self, id: BookId) -> Result<Book> {
        let on_loan = self
            .books
            .get(&id)
            .ok_or_else(|| Error::book_not_found(id))?
            .on_loan();
        if on_loan > 0 {
            return Err(Error::BookInUse { id, on_loan });
        }
        debug!(book_id = %id, "book removed");
        self.books
            .remove(&id)
            .ok_or_else(|| Error::book_not_found(id))
    }

    /// Update a book's metadata or copy total.
    ///
    /// Every changed field is re-validated before anything is applied.
    /// Shrinking `total_copies` below the copies currently on loan fails
    /// with [`Error::Validation`]; shrinking or growing it otherwise keeps
    /// the on-loan count intact and adjusts `available_copies` to match.
    pub fn update_book(&mut self, id: BookId, update: BookUpdate) -> Result<()> {
        let book = self.books.get(&id).ok_or_else(|| Error::book_not_found(id))?;

        let title = update
            .title
            .map(|t| non_empty(t, "title"))
            .transpose()?;
        let author = update
            .author
            .map(|a| non_empty(a, "author"))
            .transpose()?;
        if let Some(total) = update.total_copies {
            if total == 0 {
                return Err(Error::Validation("total copies must be positive".into()));
            }
            let on_loan = book.on_loan();
            if total < on_loan {
                return Err(Error::Validation(format!(
                    "cannot set total copies to {total}: {on_loan} currently on loan"
                )));
            }
        }

        if let Some(book) = self.books.get_mut(&id) {
            book.apply(title, author, update.total_copies);
        }
        debug!(book_id = %id, "book updated");
        Ok(())
    }

    // =========================================================================
    // Member registry operations
    // =========================================================================

    /// Register a new member.
    ///
    /// Fails with [`Error::DuplicateId`] if a member with the same id exists.
    pub fn add_member(&mut self, member: Member) -> Result<()> {
        let id = member.id();
        if self.members.contains_key(&id) {
            return Err(Error::duplicate_member(id));
        }
        debug!(member_id = %id, name = member.name(), "member added");
        self.members.insert(id, member);
        Ok(())
    }

    /// Remove a member, returning the record.
    ///
    /// Fails with [`Error::NotFound`] if absent and
    /// [`Error::MemberHasBooks`] while any book is still held.
    pub fn remove_member(&mut self, id: MemberId) -> Result<Member> {
        let held = self
            .members
            .get(&id)
            .ok_or_else(|| Error::member_not_found(id))?
            .borrowed_count();
        if held > 0 {
            return Err(Error::MemberHasBooks { id, count: held });
        }
        debug!(member_id = %id, "member removed");
        self.members
            .remove(&id)
            .ok_or_else(|| Error::member_not_found(id))
    }

    /// Update a member's profile.
    pub fn update_member(&mut self, id: MemberId, update: MemberUpdate) -> Result<()> {
        if !self.members.contains_key(&id) {
            return Err(Error::member_not_found(id));
        }
        let name = update.name.map(|n| non_empty(n, "name")).transpose()?;
        if let Some(member) = self.members.get_mut(&id) {
            member.apply(name);
        }
        debug!(member_id = %id, "member updated");
        Ok(())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Lend one copy of a book to a member.
    ///
    /// Checks run in order: member and book must exist, a copy must be
    /// available, the member must be under the borrow limit, and the
    /// member must not already hold this title. Only once every check has
    /// passed are the three effects applied together: the available count
    /// drops by one, the book id enters the member's borrowed set, and a
    /// BORROW record is appended.
    pub fn issue_book(&mut self, member_id: MemberId, book_id: BookId) -> Result<&TxRecord> {
        let member = self
            .members
            .get(&member_id)
            .ok_or_else(|| Error::member_not_found(member_id))?;
        let book = self
            .books
            .get(&book_id)
            .ok_or_else(|| Error::book_not_found(book_id))?;

        if book.available_copies() == 0 {
            return Err(Error::NoCopiesAvailable(book_id));
        }
        if member.borrowed_count() >= self.borrow_limit {
            return Err(Error::BorrowLimitExceeded {
                member_id,
                limit: self.borrow_limit,
            });
        }
        if member.holds(book_id) {
            return Err(Error::AlreadyBorrowed { member_id, book_id });
        }

        if let Some(book) = self.books.get_mut(&book_id) {
            book.check_out();
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.record_borrow(book_id);
        }
        debug!(member_id = %member_id, book_id = %book_id, "book issued");
        Ok(self.ledger.append(member_id, book_id, TxAction::Borrow))
    }

    /// Take one copy of a book back from a member.
    ///
    /// Fails with [`Error::NotFound`] if either party is absent and
    /// [`Error::NotBorrowed`] if the member does not hold the title. On
    /// success the available count rises by one (never past the owned
    /// total), the book id leaves the borrowed set, and a RETURN record is
    /// appended.
    pub fn return_book(&mut self, member_id: MemberId, book_id: BookId) -> Result<&TxRecord> {
        let member = self
            .members
            .get(&member_id)
            .ok_or_else(|| Error::member_not_found(member_id))?;
        if !self.books.contains_key(&book_id) {
            return Err(Error::book_not_found(book_id));
        }
        if !member.holds(book_id) {
            return Err(Error::NotBorrowed { member_id, book_id });
        }

        if let Some(book) = self.books.get_mut(&book_id) {
            book.check_in();
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.record_return(book_id);
        }
        debug!(member_id = %member_id, book_id = %book_id, "book returned");
        Ok(self.ledger.append(member_id, book_id, TxAction::Return))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Look up a book by id.
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    /// Look up a member by id.
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// All books, in id order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All members, in id order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Case-insensitive substring search against title or author.
    ///
    /// Results come back in id order; no match is an empty list, not an
    /// error.
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books.values().filter(|b| b.matches(&needle)).collect()
    }

    /// Render the full inventory as one line per book, in id order.
    ///
    /// An empty inventory renders an explicit marker line rather than an
    /// empty string.
    pub fn display_books(&self) -> String {
        if self.books.is_empty() {
            return "No books on record".to_string();
        }
        let lines: Vec<String> = self.books.values().map(|b| b.to_string()).collect();
        lines.join("\n")
    }

    /// Render the member registry as one line per member, in id order.
    pub fn display_members(&self) -> String {
        if self.members.is_empty() {
            return "No members on record".to_string();
        }
        let lines: Vec<String> = self.members.values().map(|m| m.to_string()).collect();
        lines.join("\n")
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Transaction records matching the filter, in append order.
    pub fn history(&self, filter: HistoryFilter) -> Vec<&TxRecord> {
        self.ledger.select(filter)
    }

    /// A book's transaction history.
    ///
    /// Unlike [`Catalog::history`] with a book filter, this fails with
    /// [`Error::NotFound`] when the book itself is unknown, so a caller
    /// can tell "never lent" apart from "no such book".
    pub fn book_history(&self, id: BookId) -> Result<Vec<&TxRecord>> {
        if !self.books.contains_key(&id) {
            return Err(Error::book_not_found(id));
        }
        Ok(self.ledger.select(HistoryFilter::book(id)))
    }

    /// A member's transaction history.
    ///
    /// Fails with [`Error::NotFound`] when the member is unknown.
    pub fn member_history(&self, id: MemberId) -> Result<Vec<&TxRecord>> {
        if !self.members.contains_key(&id) {
            return Err(Error::member_not_found(id));
        }
        Ok(self.ledger.select(HistoryFilter::member(id)))
    }

    /// Read-only view of the whole ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for catalog configuration.
///
/// # Example
///
/// ```
/// use circdesk::Catalog;
///
/// let catalog = Catalog::builder().borrow_limit(5).build();
/// assert_eq!(catalog.borrow_limit(), 5);
/// ```
#[derive(Debug)]
pub struct CatalogBuilder {
    borrow_limit: usize,
}

impl CatalogBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            borrow_limit: DEFAULT_BORROW_LIMIT,
        }
    }

    /// Set the maximum number of books one member may hold.
    ///
    /// The reference behavior for this value is unspecified, so it is a
    /// parameter rather than a constant. A limit of 0 makes every issue
    /// attempt fail with `BorrowLimitExceeded`.
    pub fn borrow_limit(mut self, limit: usize) -> Self {
        self.borrow_limit = limit;
        self
    }

    /// Build the catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            books: BTreeMap::new(),
            members: BTreeMap::new(),
            ledger: Ledger::default(),
            borrow_limit: self.borrow_limit,
        }
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
