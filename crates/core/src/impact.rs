#![forbid(unsafe_code)]

use serde::Serialize;

/// Entity kinds an impact edge may point at. The set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImpactKind {
    Initiative,
    Theme,
}

impl ImpactKind {
    pub const ALL: [ImpactKind; 2] = [Self::Initiative, Self::Theme];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initiative => "initiative",
            Self::Theme => "theme",
        }
    }

    /// Exact, case-sensitive match on the stored tag.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Target of an impact edge, discriminated by the edge's `entity_type` column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImpactTarget {
    Initiative(String),
    Theme(String),
    Unrecognized { entity_type: String, id: String },
}

impl ImpactTarget {
    pub fn from_tag(entity_type: &str, entity_id: impl Into<String>) -> Self {
        let id = entity_id.into();
        match ImpactKind::parse(entity_type) {
            Some(ImpactKind::Initiative) => Self::Initiative(id),
            Some(ImpactKind::Theme) => Self::Theme(id),
            None => Self::Unrecognized {
                entity_type: entity_type.to_string(),
                id,
            },
        }
    }

    pub fn kind(&self) -> Option<ImpactKind> {
        match self {
            Self::Initiative(_) => Some(ImpactKind::Initiative),
            Self::Theme(_) => Some(ImpactKind::Theme),
            Self::Unrecognized { .. } => None,
        }
    }

    pub fn entity_id(&self) -> &str {
        match self {
            Self::Initiative(id) | Self::Theme(id) => id,
            Self::Unrecognized { id, .. } => id,
        }
    }

    /// Tag as stored; unrecognized tags are echoed back verbatim.
    pub fn entity_type(&self) -> &str {
        match self {
            Self::Initiative(_) => ImpactKind::Initiative.as_str(),
            Self::Theme(_) => ImpactKind::Theme.as_str(),
            Self::Unrecognized { entity_type, .. } => entity_type,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImpactEdge {
    pub assumption_id: String,
    pub target: ImpactTarget,
    pub impact_severity: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedImpact {
    pub entity_type: String,
    pub entity_id: String,
    pub impact_severity: String,
    pub entity_name: Option<String>,
}

impl ResolvedImpact {
    pub fn new(edge: ImpactEdge, entity_name: Option<String>) -> Self {
        let entity_type = edge.target.entity_type().to_string();
        let entity_id = match edge.target {
            ImpactTarget::Initiative(id) | ImpactTarget::Theme(id) => id,
            ImpactTarget::Unrecognized { id, .. } => id,
        };
        Self {
            entity_type,
            entity_id,
            impact_severity: edge.impact_severity,
            entity_name,
        }
    }
}
