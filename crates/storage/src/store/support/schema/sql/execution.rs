#![forbid(unsafe_code)]

// Initiatives and their objective links are written by an external process.
pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS initiatives (
          id TEXT PRIMARY KEY,
          title TEXT NOT NULL,
          status TEXT NOT NULL DEFAULT 'proposed',
          budget_allocated REAL,
          created_at_ms INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS initiative_objective_map (
          initiative_id TEXT NOT NULL,
          objective_id TEXT NOT NULL,
          PRIMARY KEY(initiative_id, objective_id),
          FOREIGN KEY(initiative_id)
            REFERENCES initiatives(id)
            ON DELETE CASCADE,
          FOREIGN KEY(objective_id)
            REFERENCES objectives(id)
            ON DELETE CASCADE
        );
"#;
