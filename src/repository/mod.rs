//! Menu repository
//!
//! Turns a [`SearchRequest`] into view rows:
//! normalize filters, plan against the store's partitions, fetch, decode.

mod clock;
mod errors;
mod repository;
mod request;
mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{RepositoryError, RepositoryResult};
pub use repository::MenuRepository;
pub use request::SearchRequest;
pub use view::{format_detail_date, relative_day, DetailRow, SummaryRow};
