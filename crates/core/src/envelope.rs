#![forbid(unsafe_code)]

//! Response shapes handed to whatever transport fronts the store.

use crate::impact::ResolvedImpact;
use crate::model::{CanvasTheme, DeepDiveTheme, StrategyStatus, StrategyVersion};
use crate::time::created_at_rfc3339;
use serde::Serialize;

pub const SYSTEM_NAME: &str = "Strategy Management System";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanvasEnvelope {
    pub strategy_id: String,
    pub canvas: Vec<CanvasTheme>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeepDiveEnvelope {
    pub strategy_id: String,
    pub canvas: Vec<DeepDiveTheme>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImpactEnvelope {
    pub assumption_id: String,
    pub impacts: Vec<ResolvedImpact>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatedEnvelope {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StrategySummary {
    pub id: String,
    pub name: String,
    pub status: StrategyStatus,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub created_at: String,
}

impl From<&StrategyVersion> for StrategySummary {
    fn from(value: &StrategyVersion) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            status: value.status,
            valid_from: value.valid_from.clone(),
            valid_to: value.valid_to.clone(),
            created_at: created_at_rfc3339(value.created_at_ms),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub system: &'static str,
}

impl HealthReport {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            system: SYSTEM_NAME,
        }
    }
}

/// Whether a failure is the caller's fault (4xx-equivalent) or ours (5xx-equivalent).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    Client,
    Server,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub class: ErrorClass,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}
