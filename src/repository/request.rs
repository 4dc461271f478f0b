//! Search requests

use crate::filters::{FilterCodec, FilterContext, FilterSet};
use crate::planner::{HistoryScope, MatchMode};

/// One search, with every interpretation choice explicit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub food: String,
    /// Raw filter string as received; normalized on use
    pub filters: Option<String>,
    pub match_mode: MatchMode,
    pub scope: HistoryScope,
    pub detail_view: bool,
}

impl SearchRequest {
    /// Listing search: word-start matching, history means all time
    pub fn summary(food: impl Into<String>, filters: Option<&str>) -> Self {
        Self {
            food: food.into(),
            filters: filters.map(str::to_string),
            match_mode: MatchMode::PrefixOrContains,
            scope: HistoryScope::AllTime,
            detail_view: false,
        }
    }

    /// Detail page for one recipe: exact name, history means past only
    pub fn detail(food: impl Into<String>, filters: Option<&str>) -> Self {
        Self {
            food: food.into(),
            filters: filters.map(str::to_string),
            match_mode: MatchMode::Exact,
            scope: HistoryScope::PastOnly,
            detail_view: true,
        }
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn with_scope(mut self, scope: HistoryScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn context(&self) -> FilterContext {
        if self.detail_view {
            FilterContext::detail()
        } else {
            FilterContext::listing()
        }
    }

    pub fn normalized_filters(&self) -> FilterSet {
        FilterCodec::normalize(self.filters.as_deref(), self.context())
    }
}
