#![forbid(unsafe_code)]

//! Relational storage for strategy versions, their theme/objective/initiative
//! hierarchy and the assumption impact graph.
//!
//! Components borrow a [`RowStore`] at construction:
//!
//! - [`HierarchyAssembler`] builds canvas and deep-dive trees,
//! - [`ImpactResolver`] resolves an assumption's impact edges to named targets,
//! - [`WriteCoordinator`] inserts strategies, themes and objectives,
//! - [`StrategyCatalog`] lists strategy versions and reports store health.
//!
//! [`SqliteStore`] is the bundled row store.

mod store;

pub use store::*;
