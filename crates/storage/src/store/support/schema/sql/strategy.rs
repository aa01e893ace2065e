#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS strategy_versions (
          id TEXT PRIMARY KEY,
          name TEXT NOT NULL,
          status TEXT NOT NULL DEFAULT 'draft'
            CHECK(status IN ('draft', 'active', 'archived')),
          valid_from TEXT,
          valid_to TEXT,
          owner_id TEXT,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS strategic_themes (
          id TEXT PRIMARY KEY,
          strategy_version_id TEXT NOT NULL,
          title TEXT NOT NULL,
          description TEXT NOT NULL DEFAULT '',
          weighting REAL,
          health_status TEXT,
          owner_id TEXT,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(strategy_version_id)
            REFERENCES strategy_versions(id)
            ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS objectives (
          id TEXT PRIMARY KEY,
          theme_id TEXT NOT NULL,
          title TEXT NOT NULL,
          statement TEXT NOT NULL DEFAULT '',
          metric_type TEXT NOT NULL,
          owner_id TEXT,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(theme_id)
            REFERENCES strategic_themes(id)
            ON DELETE CASCADE
        );
"#;
