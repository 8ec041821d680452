//! Client-side list filtering engine.
//!
//! One instance per list page: [`ListController`] owns the filter state,
//! the saved filters and the paginator, and is the only thing pages mutate.
//! The pieces are usable on their own as well.

pub mod controller;
pub mod paginator;
pub mod predicate;
pub mod saved;
pub mod state;
pub mod storage;

pub use controller::{ListController, SortState};
pub use paginator::Paginator;
pub use predicate::{filter_indices, matches, FieldExtractors};
pub use saved::{SaveFilterError, SavedFilterStore};
pub use state::{FilterSnapshot, FilterStateStore, SubscriptionId};
pub use storage::{FilterStorage, LocalStorage, MemoryStorage, StorageError};
