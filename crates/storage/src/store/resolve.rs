#![forbid(unsafe_code)]

//! Row → record mapping for each entity kind.
//!
//! Optional columns (`weighting`, `health_status`, `budget_allocated`, …) may be
//! absent from the row or NULL; both map to the record's sentinel. A column
//! holding the wrong type is a `TypeMismatch`.

use super::{Row, StoreError};
use sp_core::ImpactEdge;
use sp_core::ImpactTarget;
use sp_core::model::{
    HealthStatus, Initiative, Objective, StrategyStatus, StrategyVersion, Theme, Weighting,
};

pub fn strategy_version_from_row(row: &Row) -> Result<StrategyVersion, StoreError> {
    let status = row.text("status")?;
    let status = StrategyStatus::parse(&status).ok_or_else(|| StoreError::TypeMismatch {
        column: "status".to_string(),
        expected: "draft|active|archived",
        found: "text",
    })?;

    Ok(StrategyVersion {
        id: row.text("id")?,
        name: row.text("name")?,
        status,
        valid_from: row.opt_text("valid_from")?,
        valid_to: row.opt_text("valid_to")?,
        created_at_ms: row.integer("created_at_ms")?,
        owner_id: row.opt_text("owner_id")?,
    })
}

pub fn theme_from_row(row: &Row) -> Result<Theme, StoreError> {
    Ok(Theme {
        id: row.text("id")?,
        strategy_version_id: row.text("strategy_version_id")?,
        title: row.text("title")?,
        description: row.opt_text("description")?.unwrap_or_default(),
        weighting: Weighting::from_column(row.opt_real("weighting")?),
        health_status: HealthStatus::from_column(row.opt_text("health_status")?.as_deref()),
        owner_id: row.opt_text("owner_id")?,
        created_at_ms: row.integer("created_at_ms")?,
    })
}

pub fn objective_from_row(row: &Row) -> Result<Objective, StoreError> {
    Ok(Objective {
        id: row.text("id")?,
        theme_id: row.text("theme_id")?,
        title: row.text("title")?,
        statement: row.opt_text("statement")?.unwrap_or_default(),
        metric_type: row.text("metric_type")?,
        owner_id: row.opt_text("owner_id")?,
        created_at_ms: row.integer("created_at_ms")?,
    })
}

pub fn initiative_from_row(row: &Row) -> Result<Initiative, StoreError> {
    Ok(Initiative {
        id: row.text("id")?,
        title: row.text("title")?,
        status: row.text("status")?,
        budget_allocated: row.opt_real("budget_allocated")?,
    })
}

pub fn impact_edge_from_row(row: &Row) -> Result<ImpactEdge, StoreError> {
    let entity_type = row.text("entity_type")?;
    Ok(ImpactEdge {
        assumption_id: row.text("assumption_id")?,
        target: ImpactTarget::from_tag(&entity_type, row.text("entity_id")?),
        impact_severity: row.text("impact_severity")?,
    })
}
