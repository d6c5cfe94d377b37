//! Catalog entities.
//!
//! Books and members carry validated fields behind read-only accessors.
//! All mutation of copy counts and borrowed sets goes through the
//! [`Catalog`](crate::Catalog) coordinator, so entity state cannot drift
//! from the invariants it enforces.

mod book;
mod member;

pub use book::{Book, BookId, BookUpdate};
pub use member::{Member, MemberId, MemberUpdate};

use crate::error::{Error, Result};

/// Validate a free-text field: non-empty after trimming.
pub(crate) fn non_empty(value: String, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must be non-empty")));
    }
    Ok(value)
}
