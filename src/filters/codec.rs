//! Codec for the 7-digit filter wire format
//!
//! Slot layout: `[time, breakfast, lunch, dinner, hall_a, hall_b, hall_c]`.
//!
//! Decoding never fails. Anything malformed is corrected:
//! - empty or absent input yields [`DEFAULT_FILTERS`]
//! - longer input is truncated, shorter input is padded with `'1'`
//! - a boolean slot is off only when it is exactly `'0'`
//! - the time slot accepts `'0'`/`'1'`, and `'2'` only in the detail view

use super::types::{FilterSet, TimeMode};

/// Number of slots in the wire form
pub const NUM_FILTERS: usize = 7;

/// Wire form used when a request carries no filters
pub const DEFAULT_FILTERS: &str = "0111111";

/// Where the filters are being decoded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterContext {
    pub is_detail_view: bool,
}

impl FilterContext {
    pub fn listing() -> Self {
        Self {
            is_detail_view: false,
        }
    }

    pub fn detail() -> Self {
        Self {
            is_detail_view: true,
        }
    }
}

/// Stateless filter codec
pub struct FilterCodec;

impl FilterCodec {
    /// Decodes raw wire filters into a [`FilterSet`].
    pub fn normalize(raw: Option<&str>, context: FilterContext) -> FilterSet {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => DEFAULT_FILTERS,
        };

        let mut slots: Vec<char> = raw.chars().take(NUM_FILTERS).collect();
        slots.resize(NUM_FILTERS, '1');

        let time_mode = match TimeMode::from_digit(slots[0]) {
            Some(TimeMode::History) if !context.is_detail_view => TimeMode::Future,
            Some(mode) => mode,
            None => TimeMode::Future,
        };
        let on = |slot: usize| slots[slot] != '0';

        FilterSet {
            time_mode,
            breakfast: on(1),
            lunch: on(2),
            dinner: on(3),
            hall_a: on(4),
            hall_b: on(5),
            hall_c: on(6),
        }
    }

    /// Encodes a [`FilterSet`] back into its 7-digit wire form.
    pub fn encode(filters: &FilterSet) -> String {
        let bit = |on: bool| if on { '1' } else { '0' };

        [
            filters.time_mode.digit(),
            bit(filters.breakfast),
            bit(filters.lunch),
            bit(filters.dinner),
            bit(filters.hall_a),
            bit(filters.hall_b),
            bit(filters.hall_c),
        ]
        .iter()
        .collect()
    }

    /// Normalizes raw filters and returns the corrected wire form.
    pub fn normalize_str(raw: Option<&str>, context: FilterContext) -> String {
        Self::encode(&Self::normalize(raw, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(raw: &str) -> String {
        FilterCodec::normalize_str(Some(raw), FilterContext::listing())
    }

    fn detail(raw: &str) -> String {
        FilterCodec::normalize_str(Some(raw), FilterContext::detail())
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(listing(""), DEFAULT_FILTERS);
        assert_eq!(detail(""), DEFAULT_FILTERS);
        assert_eq!(
            FilterCodec::normalize_str(None, FilterContext::listing()),
            DEFAULT_FILTERS
        );
    }

    #[test]
    fn test_short_input_padded_with_ones() {
        for raw in ["0", "00", "000", "0000", "00000", "000000"] {
            let normalized = listing(raw);
            assert_eq!(normalized.len(), NUM_FILTERS);
            assert!(normalized.starts_with(raw));
            assert!(normalized[raw.len()..].chars().all(|c| c == '1'));
        }
    }

    #[test]
    fn test_long_input_truncated() {
        assert_eq!(listing("0101010000"), "0101010");
        assert_eq!(listing("11111110"), "1111111");
    }

    #[test]
    fn test_invalid_boolean_coerced_on() {
        assert_eq!(listing("0x0?0-0"), "0101010");
        assert_eq!(listing("0222222"), "0111111");
    }

    #[test]
    fn test_history_only_in_detail_view() {
        assert_eq!(listing("2111111"), "1111111");
        assert_eq!(detail("2111111"), "2111111");
        assert_eq!(
            FilterCodec::normalize(Some("2011111"), FilterContext::detail()).time_mode,
            TimeMode::History
        );
    }

    #[test]
    fn test_invalid_time_slot_coerced_to_future() {
        assert_eq!(listing("9000000"), "1000000");
        assert_eq!(detail("a000000"), "1000000");
    }

    #[test]
    fn test_multibyte_input_counts_characters() {
        assert_eq!(listing("0ü"), "0111111");
        assert_eq!(listing("0000000ü"), "0000000");
    }

    #[test]
    fn test_encode_matches_fields() {
        let filters = FilterCodec::normalize(Some("1100010"), FilterContext::listing());
        assert_eq!(filters.time_mode, TimeMode::Future);
        assert!(filters.breakfast);
        assert!(!filters.lunch);
        assert!(!filters.dinner);
        assert!(!filters.hall_a);
        assert!(filters.hall_b);
        assert!(!filters.hall_c);
        assert_eq!(FilterCodec::encode(&filters), "1100010");
    }
}
