//! Query builder subsystem
//!
//! Translates a food name plus a [`FilterSet`](crate::filters::FilterSet)
//! into a [`QueryPlan`] over the monthly partition tables.
//!
//! # Design Principles
//!
//! - Deterministic: same inputs and catalog → same plan
//! - Bound: the food name is always a bound parameter, never SQL text
//! - Minimal: an axis with every option switched on adds no clause
//! - Tolerant: a missing partition contributes zero rows
//!
//! # Partition selection by time mode
//!
//! - Short: today through the short limit, one slice per month touched
//! - Future: today onwards this month, all of next month if present
//! - History: every month since the epoch, then either next month
//!   (all time) or a `< today` bound on the current month (past only)

mod ast;
mod bounds;
mod explain;
mod planner;

pub use ast::{
    escape_like, quote_literal, restriction, DateBound, HistoryScope, MatchMode, Param, Predicate,
    RecipeMatch, SortKey, ORDER_BY,
};
pub use bounds::{PartitionSpan, WindowAnalyzer};
pub use explain::{ExplainPartition, ExplainPlan};
pub use planner::{
    PartitionQuery, PlannerConfig, QueryBuilder, QueryPlan, SqlStatement,
    DEFAULT_SHORT_LIMIT_DAYS,
};
