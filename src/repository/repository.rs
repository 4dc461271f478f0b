//! Menu repository
//!
//! Request-scoped: each load opens one connection, plans against that
//! connection's partitions, runs the plan, decodes rows and lets the
//! connection drop on every exit path.

use chrono::NaiveDate;

use super::clock::{Clock, SystemClock};
use super::errors::{RepositoryError, RepositoryResult};
use super::request::SearchRequest;
use super::view::{DetailRow, SummaryRow};
use crate::filters::{FilterCodec, FilterSet};
use crate::observability::{Logger, ObservationScope, Severity};
use crate::partition::{PartitionKey, TableLocator};
use crate::planner::{ExplainPlan, PlannerConfig, QueryBuilder, QueryPlan};
use crate::schema::MenuEntry;
use crate::store::{ConnectionFactory, MenuStore};

pub struct MenuRepository<F: ConnectionFactory, K: Clock = SystemClock> {
    factory: F,
    locator: TableLocator,
    planner: PlannerConfig,
    clock: K,
}

impl<F: ConnectionFactory> MenuRepository<F, SystemClock> {
    pub fn new(factory: F, locator: TableLocator, planner: PlannerConfig) -> Self {
        Self {
            factory,
            locator,
            planner,
            clock: SystemClock,
        }
    }
}

impl<F: ConnectionFactory, K: Clock> MenuRepository<F, K> {
    /// Replaces the clock, typically with a fixed one in tests
    pub fn with_clock<K2: Clock>(self, clock: K2) -> MenuRepository<F, K2> {
        MenuRepository {
            factory: self.factory,
            locator: self.locator,
            planner: self.planner,
            clock,
        }
    }

    pub fn locator(&self) -> &TableLocator {
        &self.locator
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Listing view: relative day labels
    pub fn load_summary(&self, request: &SearchRequest) -> RepositoryResult<Vec<SummaryRow>> {
        let today = self.clock.today();
        let entries = self.load(request, "summary", today)?;
        Ok(entries
            .iter()
            .map(|e| SummaryRow::from_entry(e, today))
            .collect())
    }

    /// Detail view: absolute dates
    pub fn load_detail(&self, request: &SearchRequest) -> RepositoryResult<Vec<DetailRow>> {
        let today = self.clock.today();
        let entries = self.load(request, "detail", today)?;
        Ok(entries.iter().map(DetailRow::from_entry).collect())
    }

    /// Plans `request` against the current partitions without running it
    pub fn explain(&self, request: &SearchRequest) -> RepositoryResult<ExplainPlan> {
        let conn = self.factory.connect()?;
        let filters = request.normalized_filters();
        Ok(self
            .plan(&conn, request, &filters, self.clock.today())
            .explain())
    }

    /// Existing partitions, oldest first
    pub fn partitions(&self) -> RepositoryResult<Vec<PartitionKey>> {
        let conn = self.factory.connect()?;
        Ok(self.locator.list_partitions(&conn)?)
    }

    fn plan(
        &self,
        conn: &F::Connection,
        request: &SearchRequest,
        filters: &FilterSet,
        today: NaiveDate,
    ) -> QueryPlan {
        QueryBuilder::new(&self.locator, conn, self.planner).build(
            &request.food,
            filters,
            request.match_mode,
            request.scope,
            today,
        )
    }

    fn load(
        &self,
        request: &SearchRequest,
        view: &str,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<MenuEntry>> {
        let filters = request.normalized_filters();
        let wire = FilterCodec::encode(&filters);
        let scope = ObservationScope::with_fields(
            "MENU_LOAD",
            &[
                ("view", view),
                ("food", request.food.as_str()),
                ("filters", wire.as_str()),
            ],
        );

        match self.run(request, &filters, today) {
            Ok(entries) => {
                scope.complete_with_fields(&[("rows", entries.len().to_string().as_str())]);
                Ok(entries)
            }
            Err(e) => {
                scope.fail(e.code(), e.to_string().as_str());
                Err(e)
            }
        }
    }

    fn run(
        &self,
        request: &SearchRequest,
        filters: &FilterSet,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<MenuEntry>> {
        let conn = self.factory.connect()?;
        let plan = self.plan(&conn, request, filters, today);

        if Logger::enabled(Severity::Trace) {
            Logger::trace(
                "MENU_LOAD_PLAN",
                &[("explain", plan.explain().to_string().as_str())],
            );
        }
        if plan.is_empty() {
            return Ok(Vec::new());
        }

        conn.fetch(&plan)?
            .iter()
            .map(|row| {
                row.decode()
                    .map_err(|e| RepositoryError::from_schema(e, &row.recipe))
            })
            .collect()
    }
}
