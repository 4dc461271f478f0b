//! Filter codec subsystem
//!
//! Turns the compact 7-digit filter string carried on search requests into a
//! structured [`FilterSet`]. Malformed input is silently corrected; decoding
//! cannot fail.

mod codec;
mod types;

pub use codec::{FilterCodec, FilterContext, DEFAULT_FILTERS, NUM_FILTERS};
pub use types::{FilterSet, TimeMode};
