#![forbid(unsafe_code)]

mod catalog;
mod config;
mod error;
mod hierarchy;
mod impact;
mod requests;
pub mod resolve;
mod row;
mod session;
mod sqlite;
mod support;
mod writes;

pub use catalog::StrategyCatalog;
pub use config::*;
pub use error::StoreError;
pub use hierarchy::HierarchyAssembler;
pub use impact::ImpactResolver;
pub use requests::*;
pub use row::{Row, SqlValue};
pub use session::{RowSession, RowStore};
pub use sqlite::SqliteStore;
pub use writes::WriteCoordinator;
