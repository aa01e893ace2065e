#![allow(dead_code)]

use rusqlite::{Connection, params};
use sp_core::ActorId;
use sp_storage::{Row, RowSession, RowStore, SqlValue, SqliteStore, StoreError};
use std::cell::{Cell, RefCell};
use tempfile::TempDir;

pub fn open_store() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().expect("temp dir must be creatable");
    let store = SqliteStore::open(dir.path()).expect("fresh storage should open");
    (dir, store)
}

pub fn actor() -> ActorId {
    ActorId::try_new("tim.cole").expect("actor id")
}

/// Raw connection for seeding tables owned by external processes.
pub fn seed_conn(store: &SqliteStore) -> Connection {
    let conn = Connection::open(store.db_path()).expect("seed connection");
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("foreign keys");
    conn
}

pub fn seed_initiative(conn: &Connection, id: &str, title: &str, budget: Option<f64>) {
    conn.execute(
        "INSERT INTO initiatives(id, title, status, budget_allocated) VALUES (?1, ?2, 'in_progress', ?3)",
        params![id, title, budget],
    )
    .expect("seed initiative");
}

pub fn link_initiative(conn: &Connection, initiative_id: &str, objective_id: &str) {
    conn.execute(
        "INSERT INTO initiative_objective_map(initiative_id, objective_id) VALUES (?1, ?2)",
        params![initiative_id, objective_id],
    )
    .expect("link initiative");
}

pub fn seed_assumption(conn: &Connection, id: &str) {
    conn.execute(
        "INSERT INTO assumptions(id, statement) VALUES (?1, 'stated premise')",
        params![id],
    )
    .expect("seed assumption");
}

pub fn seed_edge(conn: &Connection, assumption_id: &str, entity_type: &str, entity_id: &str, severity: &str) {
    conn.execute(
        "INSERT INTO assumption_impact_map(assumption_id, entity_type, entity_id, impact_severity) \
         VALUES (?1, ?2, ?3, ?4)",
        params![assumption_id, entity_type, entity_id, severity],
    )
    .expect("seed impact edge");
}

type Responder = Box<dyn Fn(&str, &[SqlValue]) -> Result<Vec<Row>, StoreError>>;

/// Scripted row store that records every statement it receives.
pub struct FakeRowStore {
    responder: Responder,
    statements: RefCell<Vec<(String, Vec<SqlValue>)>>,
    acquired: Cell<usize>,
    released: Cell<usize>,
}

impl FakeRowStore {
    pub fn new(
        responder: impl Fn(&str, &[SqlValue]) -> Result<Vec<Row>, StoreError> + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            statements: RefCell::new(Vec::new()),
            acquired: Cell::new(0),
            released: Cell::new(0),
        }
    }

    pub fn round_trips(&self) -> usize {
        self.statements.borrow().len()
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements
            .borrow()
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }

    pub fn sessions_acquired(&self) -> usize {
        self.acquired.get()
    }

    pub fn sessions_released(&self) -> usize {
        self.released.get()
    }

    pub fn reset(&self) {
        self.statements.borrow_mut().clear();
    }
}

struct FakeSession<'a> {
    store: &'a FakeRowStore,
}

impl Drop for FakeSession<'_> {
    fn drop(&mut self) {
        self.store.released.set(self.store.released.get() + 1);
    }
}

impl RowSession for FakeSession<'_> {
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
        self.store
            .statements
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));
        (self.store.responder)(sql, params)
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, StoreError> {
        self.query(sql, params).map(|rows| rows.len().max(1))
    }
}

impl RowStore for FakeRowStore {
    fn with_session<T>(
        &self,
        work: impl FnOnce(&mut dyn RowSession) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.acquired.set(self.acquired.get() + 1);
        let mut session = FakeSession { store: self };
        work(&mut session)
    }
}

pub fn text_params(params: &[SqlValue]) -> Vec<String> {
    params
        .iter()
        .filter_map(|value| match value {
            SqlValue::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}
