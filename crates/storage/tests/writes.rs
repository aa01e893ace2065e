mod support;

use sp_core::model::{HealthStatus, StrategyStatus, Weighting};
use sp_storage::{
    AddObjectiveRequest, AddThemeRequest, CreateStrategyRequest, HierarchyAssembler,
    StrategyCatalog, StoreError, WriteCoordinator,
};
use support::*;

fn accepting_store() -> FakeRowStore {
    FakeRowStore::new(|_, _| Ok(Vec::new()))
}

fn theme_request(strategy_version_id: &str) -> AddThemeRequest {
    AddThemeRequest {
        strategy_version_id: strategy_version_id.to_string(),
        title: "APAC Expansion".to_string(),
        description: "Aggressive growth in Asian markets via M&A".to_string(),
        weighting: None,
        health_status: None,
    }
}

#[test]
fn create_strategy_applies_draft_status_and_owner() {
    let (_dir, store) = open_store();
    let id = WriteCoordinator::new(&store)
        .create_strategy(
            &actor(),
            CreateStrategyRequest {
                name: "  Corporate Strategy 2025-2027 ".to_string(),
            },
        )
        .expect("strategy");

    let listed = StrategyCatalog::new(&store).list_strategies().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].name, "Corporate Strategy 2025-2027");
    assert_eq!(listed[0].status, StrategyStatus::Draft);
    assert_eq!(listed[0].owner_id.as_deref(), Some("tim.cole"));
    assert_eq!(listed[0].valid_from, None);
    assert!(listed[0].created_at_ms > 0);
}

#[test]
fn generated_ids_are_distinct_uuids() {
    let (_dir, store) = open_store();
    let writes = WriteCoordinator::new(&store);
    let first = writes
        .create_strategy(&actor(), CreateStrategyRequest { name: "A".to_string() })
        .unwrap();
    let second = writes
        .create_strategy(&actor(), CreateStrategyRequest { name: "A".to_string() })
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(first.len(), 36);
    assert_eq!(first.matches('-').count(), 4);
}

#[test]
fn add_objective_defaults_metric_type() {
    let (_dir, store) = open_store();
    let writes = WriteCoordinator::new(&store);
    let strategy = writes
        .create_strategy(&actor(), CreateStrategyRequest { name: "Plan".to_string() })
        .unwrap();
    let theme = writes.add_theme(&actor(), theme_request(&strategy)).unwrap();
    let objective = writes
        .add_objective(
            &actor(),
            AddObjectiveRequest {
                theme_id: format!(" {theme} "),
                title: "Establish Regional HQ".to_string(),
                statement: "Operational readiness by Q3".to_string(),
            },
        )
        .unwrap();

    let canvas = HierarchyAssembler::new(&store)
        .assemble_canvas(&strategy)
        .unwrap();
    assert_eq!(canvas[0].objectives[0].id, objective);
    assert_eq!(canvas[0].objectives[0].metric_type, "percentage");
    assert_eq!(canvas[0].objectives[0].owner_id.as_deref(), Some("tim.cole"));
}

#[test]
fn add_theme_persists_weighting_and_health() {
    let (_dir, store) = open_store();
    let writes = WriteCoordinator::new(&store);
    let strategy = writes
        .create_strategy(&actor(), CreateStrategyRequest { name: "Plan".to_string() })
        .unwrap();
    writes
        .add_theme(
            &actor(),
            AddThemeRequest {
                weighting: Some(0.35),
                health_status: Some(HealthStatus::Amber),
                ..theme_request(&strategy)
            },
        )
        .unwrap();
    writes
        .add_theme(
            &actor(),
            AddThemeRequest {
                health_status: Some(HealthStatus::Unknown),
                ..theme_request(&strategy)
            },
        )
        .unwrap();

    let canvas = HierarchyAssembler::new(&store)
        .assemble_canvas(&strategy)
        .unwrap();
    assert_eq!(canvas[0].theme.weighting, Weighting::Known(0.35));
    assert_eq!(canvas[0].theme.health_status, HealthStatus::Amber);
    assert_eq!(canvas[1].theme.weighting, Weighting::Unknown);
    assert_eq!(canvas[1].theme.health_status, HealthStatus::Unknown);
}

#[test]
fn theme_under_missing_strategy_is_a_constraint_violation() {
    let (_dir, store) = open_store();
    let err = WriteCoordinator::new(&store)
        .add_theme(&actor(), theme_request("sv-missing"))
        .expect_err("foreign key must reject the theme");

    assert!(matches!(err, StoreError::ConstraintViolation(_)));
    assert_eq!(err.code(), "CONSTRAINT_VIOLATION");
    let envelope = serde_json::to_value(err.to_envelope()).unwrap();
    assert_eq!(envelope["error"]["class"], "client");
}

#[test]
fn objective_under_missing_theme_is_a_constraint_violation() {
    let (_dir, store) = open_store();
    let err = WriteCoordinator::new(&store)
        .add_objective(
            &actor(),
            AddObjectiveRequest {
                theme_id: "t-missing".to_string(),
                title: "Orphan".to_string(),
                statement: "No parent".to_string(),
            },
        )
        .expect_err("foreign key must reject the objective");
    assert_eq!(err.code(), "CONSTRAINT_VIOLATION");
}

#[test]
fn blank_fields_are_rejected_before_the_store_is_touched() {
    let store = accepting_store();
    let writes = WriteCoordinator::new(&store);

    let err = writes
        .create_strategy(&actor(), CreateStrategyRequest { name: "   ".to_string() })
        .unwrap_err();
    assert_eq!(err.code(), "MALFORMED_INPUT");

    let err = writes.add_theme(&actor(), theme_request("")).unwrap_err();
    assert_eq!(err.to_string(), "malformed input: strategy_version_id is required");

    let err = writes
        .add_theme(
            &actor(),
            AddThemeRequest {
                title: String::new(),
                ..theme_request("sv-1")
            },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "malformed input: title is required");

    let err = writes
        .add_theme(
            &actor(),
            AddThemeRequest {
                weighting: Some(f64::NAN),
                ..theme_request("sv-1")
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), "MALFORMED_INPUT");

    let err = writes
        .add_objective(
            &actor(),
            AddObjectiveRequest {
                theme_id: "\t".to_string(),
                title: "Title".to_string(),
                statement: "Statement".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "malformed input: theme_id is required");

    let err = writes
        .add_objective(
            &actor(),
            AddObjectiveRequest {
                theme_id: "t-1".to_string(),
                title: "Title".to_string(),
                statement: " ".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "malformed input: statement is required");

    assert_eq!(store.sessions_acquired(), 0);
    assert_eq!(store.round_trips(), 0);
}

#[test]
fn invalid_parent_ids_report_the_actual_problem() {
    let store = accepting_store();
    let writes = WriteCoordinator::new(&store);

    let err = writes
        .add_theme(&actor(), theme_request(&"s".repeat(200)))
        .unwrap_err();
    assert_eq!(err.code(), "MALFORMED_INPUT");
    assert_eq!(err.to_string(), "malformed input: strategy_version_id is too long");

    let err = writes
        .add_objective(
            &actor(),
            AddObjectiveRequest {
                theme_id: "t-\u{7}1".to_string(),
                title: "Title".to_string(),
                statement: "Statement".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "malformed input: theme_id contains control characters");
    let envelope = serde_json::to_value(err.to_envelope()).unwrap();
    assert_eq!(envelope["error"]["class"], "client");

    assert_eq!(store.sessions_acquired(), 0);
}

#[test]
fn each_write_is_a_single_insert() {
    let store = accepting_store();
    let writes = WriteCoordinator::new(&store);

    writes
        .create_strategy(&actor(), CreateStrategyRequest { name: "Plan".to_string() })
        .unwrap();
    writes.add_theme(&actor(), theme_request("sv-1")).unwrap();
    writes
        .add_objective(
            &actor(),
            AddObjectiveRequest {
                theme_id: "t-1".to_string(),
                title: "Title".to_string(),
                statement: "Statement".to_string(),
            },
        )
        .unwrap();

    let statements = store.statements();
    assert_eq!(statements.len(), 3);
    assert!(statements.iter().all(|sql| sql.starts_with("INSERT INTO")));
    assert_eq!(store.sessions_acquired(), 3);
    assert_eq!(store.sessions_released(), 3);
}
