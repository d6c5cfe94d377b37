//! # Circdesk
//!
//! In-memory library circulation catalog.
//!
//! Circdesk tracks books, members, and borrow/return transactions for a
//! single library, enforcing referential and business-rule constraints:
//! copy counts never go negative or exceed the owned total, members cannot
//! exceed the configured borrow limit, and every borrow or return is
//! recorded in an append-only ledger.
//!
//! ## Quick Start
//!
//! ```
//! use circdesk::prelude::*;
//!
//! # fn main() -> circdesk::Result<()> {
//! let mut catalog = Catalog::new();
//!
//! catalog.add_book(Book::new(1, "Python Crash Course", "Eric Matthes", 2)?)?;
//! catalog.add_member(Member::new(101, "Alice")?)?;
//!
//! catalog.issue_book(MemberId::new(101)?, BookId::new(1)?)?;
//! catalog.return_book(MemberId::new(101)?, BookId::new(1)?)?;
//!
//! assert_eq!(catalog.history(HistoryFilter::all()).len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! - [`Book`] / [`Member`] - validated entities with newtype ids
//! - [`Ledger`] - append-only record of borrow/return transactions
//! - [`Catalog`] - the coordinator that owns both collections and the
//!   ledger, and through which every state change flows
//!
//! The catalog is an explicitly constructed value with no process-wide
//! state; create as many independent catalogs as you need. Configure it
//! through [`CatalogBuilder`]:
//!
//! ```
//! use circdesk::Catalog;
//!
//! let catalog = Catalog::builder().borrow_limit(5).build();
//! assert_eq!(catalog.borrow_limit(), 5);
//! ```

#![warn(missing_docs)]

mod catalog;
mod error;
mod ledger;
mod model;

pub mod prelude;

// Re-export main entry points
pub use catalog::{Catalog, CatalogBuilder, DEFAULT_BORROW_LIMIT};
pub use error::{Error, Result};

// Re-export entities and ledger types
pub use ledger::{HistoryFilter, Ledger, TxAction, TxRecord};
pub use model::{Book, BookId, BookUpdate, Member, MemberId, MemberUpdate};
