//! Storage port for reviews and its two backends.
//!
//! Callers hold an `Arc<dyn ReviewStore>` built by [`create_store`] and never
//! see which backend they got; both surface the same [`StoreError`] kinds.
//!
//! [`StoreError`]: crate::error::StoreError

pub mod factory;
pub mod in_memory;
pub mod sqlite;
pub mod traits;

pub use factory::create_store;
pub use in_memory::InMemoryReviewStore;
pub use sqlite::SqliteReviewStore;
pub use traits::ReviewStore;
