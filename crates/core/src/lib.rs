#![forbid(unsafe_code)]

pub mod envelope;
pub mod ids;
pub mod impact;
pub mod model;
pub mod time;

pub use ids::{ActorId, ActorIdError, IdentifierError, canonical_identifier};
pub use impact::{ImpactEdge, ImpactKind, ImpactTarget, ResolvedImpact};
