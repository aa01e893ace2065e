#![forbid(unsafe_code)]

use super::{Row, SqlValue, StoreError};

/// One acquired connection. Every call is a single round trip.
pub trait RowSession {
    /// Runs a read with positionally bound parameters (`?1`, `?2`, …).
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError>;

    /// Runs a write and returns the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, StoreError>;
}

/// Source of row sessions. Components borrow a store at construction and
/// acquire exactly one session per public operation; the session is released
/// when `with_session` returns, on success and error paths alike.
pub trait RowStore {
    fn with_session<T>(
        &self,
        work: impl FnOnce(&mut dyn RowSession) -> Result<T, StoreError>,
    ) -> Result<T, StoreError>;
}

impl<S: RowStore> RowStore for &S {
    fn with_session<T>(
        &self,
        work: impl FnOnce(&mut dyn RowSession) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        (**self).with_session(work)
    }
}

/// `?1, ?2, …, ?n` for an `IN (…)` list.
pub(crate) fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}
