//! Observability
//!
//! Structured JSON-lines logging on stderr plus scoped lifecycle events.
//! Logging never changes what an operation returns.
//!
//! ```ignore
//! use menudb::observability::{Logger, ObservationScope};
//!
//! Logger::info("MENU_INGEST_DAY", &[("date", "2025-03-01")]);
//!
//! let scope = ObservationScope::new("MENU_LOAD");
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::ObservationScope;
