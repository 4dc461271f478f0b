//! Query builder
//!
//! Produces a [`QueryPlan`]: one SELECT per partition touched by the time
//! window, all sharing the recipe/mealtime/location predicate, combined
//! with UNION and ordered once at the end.
//!
//! Partition selection:
//! 1. Compute per-partition date slices for the time mode
//! 2. Drop partitions that do not exist (the epoch partition is assumed)
//! 3. Attach the shared predicate and ordering

use chrono::NaiveDate;

use super::ast::{
    restriction, DateBound, HistoryScope, MatchMode, Param, Predicate, RecipeMatch, ORDER_BY,
};
use super::bounds::WindowAnalyzer;
use super::explain::ExplainPlan;
use crate::filters::FilterSet;
use crate::observability::Logger;
use crate::partition::{PartitionCatalog, PartitionKey, TableLocator};
use crate::schema::{Location, Mealtime, COL_DATE, COL_LOCATION, COL_MEALTIME, COL_RECIPE};

/// Default number of days covered by the short window
pub const DEFAULT_SHORT_LIMIT_DAYS: u32 = 3;

/// Planner tuning taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// First month whose partition is guaranteed to exist
    pub epoch: PartitionKey,
    /// Days in the short window, today included
    pub short_limit_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            epoch: PartitionKey { year: 2024, month: 7 },
            short_limit_days: DEFAULT_SHORT_LIMIT_DAYS,
        }
    }
}

/// One partition-scoped SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionQuery {
    pub table: String,
    pub partition: PartitionKey,
    pub bound: DateBound,
}

/// SQL text with positional `?` parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Param>,
}

impl SqlStatement {
    /// Substitutes every placeholder with its quoted literal.
    ///
    /// For display only; execution always binds.
    pub fn inline(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + 32);
        let mut params = self.params.iter();

        for c in self.sql.chars() {
            if c != '?' {
                out.push(c);
                continue;
            }
            match params.next() {
                Some(p) => out.push_str(&p.to_literal()),
                None => out.push('?'),
            }
        }

        out
    }
}

/// Immutable query plan (no runtime state)
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub filters: FilterSet,
    pub match_mode: MatchMode,
    pub scope: HistoryScope,
    /// Predicate shared by every partition query
    pub predicate: Predicate,
    /// Partition queries, oldest first
    pub partitions: Vec<PartitionQuery>,
    /// Partitions the window touched but the store does not have
    pub missing: Vec<String>,
}

impl QueryPlan {
    /// True when no partition qualifies; such a plan yields no rows
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn tables(&self) -> Vec<&str> {
        self.partitions.iter().map(|p| p.table.as_str()).collect()
    }

    /// SELECT for a single partition
    pub fn partition_sql(&self, query: &PartitionQuery) -> SqlStatement {
        let (mut terms, mut params) = self.predicate.to_sql_terms();

        if let Some((date_sql, date_params)) = query.bound.to_sql() {
            terms.push(date_sql);
            params.extend(date_params);
        }

        SqlStatement {
            sql: format!(
                "SELECT {}, {}, {}, {} FROM {} WHERE {}",
                COL_RECIPE,
                COL_DATE,
                COL_MEALTIME,
                COL_LOCATION,
                query.table,
                terms.join(" AND ")
            ),
            params,
        }
    }

    /// ORDER BY clause applied to the union
    pub fn order_sql() -> String {
        let columns: Vec<&str> = ORDER_BY.iter().map(|k| k.column()).collect();
        format!("ORDER BY {}", columns.join(", "))
    }

    /// Full statement, or `None` for an empty plan
    pub fn to_sql(&self) -> Option<SqlStatement> {
        if self.is_empty() {
            return None;
        }

        let mut selects = Vec::with_capacity(self.partitions.len());
        let mut params = Vec::new();
        for query in &self.partitions {
            let statement = self.partition_sql(query);
            selects.push(statement.sql);
            params.extend(statement.params);
        }

        Some(SqlStatement {
            sql: format!("{} {}", selects.join(" UNION "), Self::order_sql()),
            params,
        })
    }

    pub fn explain(&self) -> ExplainPlan {
        ExplainPlan::from_plan(self)
    }
}

/// Builds query plans against one store's partitions
pub struct QueryBuilder<'a, C: PartitionCatalog + ?Sized> {
    locator: &'a TableLocator,
    catalog: &'a C,
    config: PlannerConfig,
}

impl<'a, C: PartitionCatalog + ?Sized> QueryBuilder<'a, C> {
    pub fn new(locator: &'a TableLocator, catalog: &'a C, config: PlannerConfig) -> Self {
        Self {
            locator,
            catalog,
            config,
        }
    }

    /// Plans a search for `food` under `filters`, relative to `today`.
    ///
    /// Deterministic for fixed inputs and catalog contents. Never fails: a
    /// window with no existing partitions gives an empty plan.
    pub fn build(
        &self,
        food: &str,
        filters: &FilterSet,
        match_mode: MatchMode,
        scope: HistoryScope,
        today: NaiveDate,
    ) -> QueryPlan {
        let predicate = Predicate {
            recipe: RecipeMatch::new(food, match_mode),
            mealtimes: restriction(&filters.meals(), &Mealtime::ALL),
            locations: restriction(&filters.locations(), &Location::ALL),
        };

        let analyzer = WindowAnalyzer::new(today, self.config.short_limit_days, self.config.epoch);
        let mut partitions = Vec::new();
        let mut missing = Vec::new();

        for span in analyzer.spans(filters.time_mode, scope) {
            let table = self.locator.table_name(span.key);

            if span.key != self.config.epoch && !self.locator.exists(self.catalog, &table) {
                missing.push(table);
                continue;
            }

            partitions.push(PartitionQuery {
                table,
                partition: span.key,
                bound: span.bound,
            });
        }

        let plan = QueryPlan {
            filters: *filters,
            match_mode,
            scope,
            predicate,
            partitions,
            missing,
        };

        Logger::trace(
            "QUERY_PLANNED",
            &[
                ("partitions", plan.partitions.len().to_string().as_str()),
                ("missing", plan.missing.join(",").as_str()),
                ("time_mode", filters.time_mode.as_str()),
                ("match_mode", match_mode.as_str()),
            ],
        );

        plan
    }
}
