#![forbid(unsafe_code)]

use sp_core::model::HealthStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateStrategyRequest {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AddThemeRequest {
    pub strategy_version_id: String,
    pub title: String,
    pub description: String,
    pub weighting: Option<f64>,
    pub health_status: Option<HealthStatus>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddObjectiveRequest {
    pub theme_id: String,
    pub title: String,
    pub statement: String,
}
