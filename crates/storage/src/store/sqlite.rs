#![forbid(unsafe_code)]

use super::support::install_schema;
use super::{Row, RowSession, RowStore, SqlValue, StoreConfig, StoreError};
use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

/// SQLite-backed row store. Holds no open connection: each operation opens
/// its own and closes it when the session ends.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    db_path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(&StoreConfig::new(storage_dir))
    }

    pub fn open_with(config: &StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.storage_dir)?;

        let store = Self {
            db_path: config.db_path(),
            busy_timeout: config.busy_timeout,
        };

        let conn = store.connect()?;
        install_schema(&conn)?;
        debug!(db_path = %store.db_path.display(), "strategy store opened");

        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(self.busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}

impl RowStore for SqliteStore {
    fn with_session<T>(
        &self,
        work: impl FnOnce(&mut dyn RowSession) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut session = SqliteSession {
            conn: self.connect()?,
        };
        work(&mut session)
    }
}

struct SqliteSession {
    conn: Connection,
}

impl RowSession for SqliteSession {
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
        trace!(sql = first_line(sql), params = params.len(), "query");

        let mut stmt = self.conn.prepare(sql)?;
        let columns = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut mapped = Row::new();
            for (index, column) in columns.iter().enumerate() {
                mapped.insert(column.clone(), SqlValue::from_value_ref(row.get_ref(index)?));
            }
            out.push(mapped);
        }

        Ok(out)
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, StoreError> {
        trace!(sql = first_line(sql), params = params.len(), "execute");
        Ok(self.conn.execute(sql, params_from_iter(params.iter()))?)
    }
}

fn first_line(sql: &str) -> &str {
    sql.trim().lines().next().unwrap_or_default()
}
