//! Unified error types for Circdesk.
//!
//! Every catalog operation reports failure through the [`Error`] enum.
//! Errors are raised synchronously at the point of violation with no
//! partial mutation: the catalog validates fully before it touches state.

use thiserror::Error;

use crate::model::{BookId, MemberId};

/// All Circdesk errors.
///
/// This is the canonical error type for all catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input field (empty text, zero id, zero copy count)
    #[error("validation: {0}")]
    Validation(String),

    /// An entity with this id already exists
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// Entity not found (book or member)
    #[error("not found: {0}")]
    NotFound(String),

    /// Book cannot be removed while copies are out on loan
    #[error("book {id} has {on_loan} copies on loan")]
    BookInUse {
        /// The book that was targeted for removal
        id: BookId,
        /// Copies currently lent out
        on_loan: u32,
    },

    /// Member cannot be removed while holding books
    #[error("member {id} still holds {count} books")]
    MemberHasBooks {
        /// The member that was targeted for removal
        id: MemberId,
        /// Books currently held
        count: usize,
    },

    /// Every copy of the book is out on loan
    #[error("no copies of book {0} available")]
    NoCopiesAvailable(BookId),

    /// Member already holds the maximum number of books
    #[error("member {member_id} is at the borrow limit of {limit}")]
    BorrowLimitExceeded {
        /// The member attempting the borrow
        member_id: MemberId,
        /// The catalog's configured limit
        limit: usize,
    },

    /// Member already holds a copy of this book
    #[error("member {member_id} already holds book {book_id}")]
    AlreadyBorrowed {
        /// The member attempting the borrow
        member_id: MemberId,
        /// The book already held
        book_id: BookId,
    },

    /// Member does not hold a copy of this book
    #[error("member {member_id} does not hold book {book_id}")]
    NotBorrowed {
        /// The member attempting the return
        member_id: MemberId,
        /// The book not held
        book_id: BookId,
    },
}

/// Result type for Circdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error is a business-rule rejection.
    ///
    /// Rule rejections are well-formed requests the current catalog state
    /// does not permit, as opposed to malformed or dangling input.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Error::BookInUse { .. }
                | Error::MemberHasBooks { .. }
                | Error::NoCopiesAvailable(_)
                | Error::BorrowLimitExceeded { .. }
                | Error::AlreadyBorrowed { .. }
                | Error::NotBorrowed { .. }
        )
    }

    pub(crate) fn book_not_found(id: BookId) -> Self {
        Error::NotFound(format!("book {id}"))
    }

    pub(crate) fn member_not_found(id: MemberId) -> Self {
        Error::NotFound(format!("member {id}"))
    }

    pub(crate) fn duplicate_book(id: BookId) -> Self {
        Error::DuplicateId(format!("book {id}"))
    }

    pub(crate) fn duplicate_member(id: MemberId) -> Self {
        Error::DuplicateId(format!("member {id}"))
    }
}
