#![forbid(unsafe_code)]

use serde::{Serialize, Serializer};

/// Metric type stamped on every objective created through the write path.
pub const DEFAULT_METRIC_TYPE: &str = "percentage";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Draft,
    Active,
    Archived,
}

impl StrategyStatus {
    pub const ALL: [StrategyStatus; 3] = [Self::Draft, Self::Active, Self::Archived];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Green,
    Amber,
    Red,
    #[default]
    Unknown,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
            Self::Unknown => "unknown",
        }
    }

    /// Absent or unrecognized column values collapse to `Unknown`.
    pub fn from_column(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("green") => Self::Green,
            Some("amber") => Self::Amber,
            Some("red") => Self::Red,
            _ => Self::Unknown,
        }
    }

    /// Column value to persist; `Unknown` is stored as NULL.
    pub fn to_column(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            other => Some(other.as_str()),
        }
    }
}

/// Relative weight of a theme inside its strategy version.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Weighting {
    Known(f64),
    #[default]
    Unknown,
}

impl Weighting {
    pub fn from_column(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Known(v),
            _ => Self::Unknown,
        }
    }
}

impl Serialize for Weighting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => serializer.serialize_f64(*v),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyVersion {
    pub id: String,
    pub name: String,
    pub status: StrategyStatus,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub created_at_ms: i64,
    pub owner_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Theme {
    pub id: String,
    #[serde(skip_serializing)]
    pub strategy_version_id: String,
    pub title: String,
    pub description: String,
    pub weighting: Weighting,
    pub health_status: HealthStatus,
    #[serde(skip_serializing)]
    pub owner_id: Option<String>,
    #[serde(skip_serializing)]
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Objective {
    pub id: String,
    #[serde(skip_serializing)]
    pub theme_id: String,
    pub title: String,
    pub statement: String,
    pub metric_type: String,
    #[serde(skip_serializing)]
    pub owner_id: Option<String>,
    #[serde(skip_serializing)]
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Initiative {
    pub id: String,
    pub title: String,
    pub status: String,
    pub budget_allocated: Option<f64>,
}

/// Theme with its nested children. `C` is `Objective` on the canvas and
/// `ObjectiveNode` on the deep dive.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThemeNode<C> {
    #[serde(flatten)]
    pub theme: Theme,
    pub objectives: Vec<C>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectiveNode {
    #[serde(flatten)]
    pub objective: Objective,
    pub initiatives: Vec<Initiative>,
}

pub type CanvasTheme = ThemeNode<Objective>;
pub type DeepDiveTheme = ThemeNode<ObjectiveNode>;
