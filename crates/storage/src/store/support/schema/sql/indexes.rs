#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_strategy_versions_created
          ON strategy_versions(created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_strategic_themes_version_created
          ON strategic_themes(strategy_version_id, created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_objectives_theme_created
          ON objectives(theme_id, created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_initiative_objective_map_objective
          ON initiative_objective_map(objective_id);
        CREATE INDEX IF NOT EXISTS idx_assumption_impact_map_assumption
          ON assumption_impact_map(assumption_id);
"#;
