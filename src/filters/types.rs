//! Structured filter settings

use serde::{Deserialize, Serialize};

use crate::schema::{Location, Mealtime};

/// Time axis of a search.
///
/// The third state is interpreted by the caller through
/// [`HistoryScope`](crate::planner::HistoryScope): "all time" for the
/// listing view, "past only" for the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeMode {
    /// Today plus the next few days
    Short,
    /// Today onwards
    Future,
    /// Everything since the epoch
    History,
}

impl TimeMode {
    /// Wire digit for this mode
    pub fn digit(&self) -> char {
        match self {
            TimeMode::Short => '0',
            TimeMode::Future => '1',
            TimeMode::History => '2',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeMode::Short => "short",
            TimeMode::Future => "future",
            TimeMode::History => "history",
        }
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(TimeMode::Short),
            '1' => Some(TimeMode::Future),
            '2' => Some(TimeMode::History),
            _ => None,
        }
    }
}

/// Normalized search filters.
///
/// Built only by the filter codec; the raw 7-digit form never travels
/// further than that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub time_mode: TimeMode,
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
    pub hall_a: bool,
    pub hall_b: bool,
    pub hall_c: bool,
}

impl FilterSet {
    /// Returns whether the given meal is switched on
    pub fn includes_meal(&self, meal: Mealtime) -> bool {
        match meal {
            Mealtime::Breakfast => self.breakfast,
            Mealtime::Lunch => self.lunch,
            Mealtime::Dinner => self.dinner,
        }
    }

    /// Returns whether the given hall is switched on
    pub fn includes_location(&self, location: Location) -> bool {
        match location {
            Location::HallA => self.hall_a,
            Location::HallB => self.hall_b,
            Location::HallC => self.hall_c,
        }
    }

    /// Meals switched on, in code order
    pub fn meals(&self) -> Vec<Mealtime> {
        Mealtime::ALL
            .into_iter()
            .filter(|m| self.includes_meal(*m))
            .collect()
    }

    /// Halls switched on, in code order
    pub fn locations(&self) -> Vec<Location> {
        Location::ALL
            .into_iter()
            .filter(|l| self.includes_location(*l))
            .collect()
    }

    pub fn with_time_mode(mut self, time_mode: TimeMode) -> Self {
        self.time_mode = time_mode;
        self
    }
}

impl Default for FilterSet {
    /// Short window, every meal, every hall
    fn default() -> Self {
        Self {
            time_mode: TimeMode::Short,
            breakfast: true,
            lunch: true,
            dinner: true,
            hall_a: true,
            hall_b: true,
            hall_c: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unrestricted() {
        let filters = FilterSet::default();
        assert_eq!(filters.time_mode, TimeMode::Short);
        assert_eq!(filters.meals(), Mealtime::ALL.to_vec());
        assert_eq!(filters.locations(), Location::ALL.to_vec());
    }

    #[test]
    fn test_active_sets_follow_flags() {
        let filters = FilterSet {
            lunch: false,
            hall_a: false,
            hall_c: false,
            ..FilterSet::default()
        };
        assert_eq!(filters.meals(), vec![Mealtime::Breakfast, Mealtime::Dinner]);
        assert_eq!(filters.locations(), vec![Location::HallB]);
    }

    #[test]
    fn test_time_mode_digits() {
        for mode in [TimeMode::Short, TimeMode::Future, TimeMode::History] {
            assert_eq!(TimeMode::from_digit(mode.digit()), Some(mode));
        }
        assert_eq!(TimeMode::from_digit('3'), None);
    }
}
