#![forbid(unsafe_code)]

// Edges are loaded externally; `entity_type` may hold tags outside
// {initiative, theme}.
pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS assumptions (
          id TEXT PRIMARY KEY,
          statement TEXT NOT NULL DEFAULT '',
          created_at_ms INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS assumption_impact_map (
          assumption_id TEXT NOT NULL,
          entity_type TEXT NOT NULL,
          entity_id TEXT NOT NULL,
          impact_severity TEXT NOT NULL,
          FOREIGN KEY(assumption_id)
            REFERENCES assumptions(id)
            ON DELETE CASCADE
        );
"#;
