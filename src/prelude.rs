//! Convenient imports for Circdesk.
//!
//! Re-exports the commonly used types so you can get started with a
//! single import:
//!
//! ```
//! use circdesk::prelude::*;
//!
//! let catalog = Catalog::new();
//! assert!(catalog.books().next().is_none());
//! ```

// Main entry point
pub use crate::catalog::{Catalog, CatalogBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Entities
pub use crate::model::{Book, BookId, BookUpdate, Member, MemberId, MemberUpdate};

// Ledger types
pub use crate::ledger::{HistoryFilter, TxAction, TxRecord};
