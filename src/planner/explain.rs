//! Explain plan output
//!
//! Produces deterministic, human-readable explain output. The SQL shown
//! here has parameters inlined as quoted literals; it is never executed.

use std::fmt;

use serde::Serialize;

use super::planner::{QueryPlan, SqlStatement};
use crate::filters::FilterCodec;

/// One partition line of an explain plan
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPartition {
    pub table: String,
    pub bound: String,
}

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Normalized filters in wire form
    pub filters: String,
    pub time_mode: String,
    pub match_mode: String,
    /// Partitions queried, oldest first
    pub partitions: Vec<ExplainPartition>,
    /// Partitions skipped because they do not exist
    pub missing: Vec<String>,
    /// Shared predicate terms
    pub predicates: Vec<String>,
    pub order: String,
    /// Full statement with literals inlined, `None` for an empty plan
    pub sql: Option<String>,
}

impl ExplainPlan {
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let (terms, params) = plan.predicate.to_sql_terms();
        // the recipe term is the only one carrying parameters
        let predicates = terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| {
                if i == 0 {
                    SqlStatement {
                        sql: term,
                        params: params.clone(),
                    }
                    .inline()
                } else {
                    term
                }
            })
            .collect();

        Self {
            filters: FilterCodec::encode(&plan.filters),
            time_mode: plan.filters.time_mode.as_str().to_string(),
            match_mode: plan.match_mode.as_str().to_string(),
            partitions: plan
                .partitions
                .iter()
                .map(|p| ExplainPartition {
                    table: p.table.clone(),
                    bound: p.bound.describe(),
                })
                .collect(),
            missing: plan.missing.clone(),
            predicates,
            order: QueryPlan::order_sql(),
            sql: plan.to_sql().map(|s| s.inline()),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;
        writeln!(f, "Filters: {}", self.filters)?;
        writeln!(f, "Time Mode: {}", self.time_mode)?;
        writeln!(f, "Match Mode: {}", self.match_mode)?;

        if self.partitions.is_empty() {
            writeln!(f, "Partitions: none (empty result)")?;
        } else {
            writeln!(f, "Partitions:")?;
            for p in &self.partitions {
                writeln!(f, "  - {} ({})", p.table, p.bound)?;
            }
        }
        if !self.missing.is_empty() {
            writeln!(f, "Missing: {}", self.missing.join(", "))?;
        }

        writeln!(f, "Predicates:")?;
        for pred in &self.predicates {
            writeln!(f, "  - {}", pred)?;
        }
        writeln!(f, "Order: {}", self.order)?;

        if let Some(sql) = &self.sql {
            writeln!(f, "SQL: {}", sql)?;
        }

        Ok(())
    }
}
