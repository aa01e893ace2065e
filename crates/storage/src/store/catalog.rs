#![forbid(unsafe_code)]

use super::resolve::strategy_version_from_row;
use super::{RowStore, StoreError};
use sp_core::envelope::{HealthReport, StrategySummary};
use sp_core::model::StrategyVersion;
use tracing::debug;

#[derive(Debug)]
pub struct StrategyCatalog<'a, S> {
    store: &'a S,
}

impl<'a, S: RowStore> StrategyCatalog<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Newest first.
    pub fn list_strategies(&self) -> Result<Vec<StrategyVersion>, StoreError> {
        let versions = self.store.with_session(|session| {
            session
                .query(
                    "SELECT id, name, status, valid_from, valid_to, owner_id, created_at_ms \
                     FROM strategy_versions \
                     ORDER BY created_at_ms DESC, rowid DESC",
                    &[],
                )?
                .iter()
                .map(strategy_version_from_row)
                .collect::<Result<Vec<_>, _>>()
        })?;
        debug!(strategies = versions.len(), "listed strategy versions");
        Ok(versions)
    }

    pub fn summaries(&self) -> Result<Vec<StrategySummary>, StoreError> {
        Ok(self
            .list_strategies()?
            .iter()
            .map(StrategySummary::from)
            .collect())
    }

    /// Round-trips the store once; any failure surfaces as the store error.
    pub fn health(&self) -> Result<HealthReport, StoreError> {
        self.store
            .with_session(|session| session.query("SELECT 1 AS ok", &[]))?;
        Ok(HealthReport::ok())
    }
}
