//! Menu data stores
//!
//! [`MenuStore`] runs query plans; [`MenuWriter`] is the ingestion side.
//! Two implementations: SQLite for real databases and an in-memory store
//! that evaluates plans directly.

mod errors;
mod memory;
mod sqlite;
mod traits;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::{SqliteConnectionFactory, SqliteStore};
pub use traits::{ConnectionFactory, MenuStore, MenuWriter};
