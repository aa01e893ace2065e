mod support;

use serde_json::json;
use sp_storage::{
    AddThemeRequest, CreateStrategyRequest, ImpactResolver, Row, StoreError, WriteCoordinator,
};
use support::*;

fn seeded_theme(store: &sp_storage::SqliteStore) -> String {
    let writes = WriteCoordinator::new(store);
    let strategy = writes
        .create_strategy(
            &actor(),
            CreateStrategyRequest {
                name: "Impact".to_string(),
            },
        )
        .expect("strategy");
    writes
        .add_theme(
            &actor(),
            AddThemeRequest {
                strategy_version_id: strategy,
                title: "APAC Expansion".to_string(),
                description: "Growth in Asian markets".to_string(),
                weighting: Some(0.6),
                health_status: None,
            },
        )
        .expect("theme")
}

#[test]
fn edges_resolve_to_target_names() {
    let (_dir, store) = open_store();
    let theme = seeded_theme(&store);
    let conn = seed_conn(&store);
    seed_initiative(&conn, "i-1", "Open Singapore office", None);
    seed_assumption(&conn, "a-1");
    seed_edge(&conn, "a-1", "initiative", "i-1", "high");
    seed_edge(&conn, "a-1", "theme", &theme, "medium");

    let envelope = ImpactResolver::new(&store).impact("a-1").expect("impacts");
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "assumption_id": "a-1",
            "impacts": [
                {
                    "entity_type": "initiative",
                    "entity_id": "i-1",
                    "impact_severity": "high",
                    "entity_name": "Open Singapore office",
                },
                {
                    "entity_type": "theme",
                    "entity_id": theme,
                    "impact_severity": "medium",
                    "entity_name": "APAC Expansion",
                },
            ],
        })
    );
}

#[test]
fn unrecognized_entity_type_keeps_edge_without_name() {
    let (_dir, store) = open_store();
    let conn = seed_conn(&store);
    seed_initiative(&conn, "i-1", "Open Singapore office", None);
    seed_assumption(&conn, "a-1");
    seed_edge(&conn, "a-1", "objective", "i-1", "low");
    seed_edge(&conn, "a-1", "Initiative", "i-1", "low");

    let impacts = ImpactResolver::new(&store)
        .resolve_impacts("a-1")
        .expect("impacts");
    assert_eq!(impacts.len(), 2);
    assert_eq!(impacts[0].entity_type, "objective");
    assert_eq!(impacts[0].entity_id, "i-1");
    assert_eq!(impacts[0].entity_name, None);
    assert_eq!(impacts[1].entity_type, "Initiative");
    assert_eq!(impacts[1].entity_name, None);
}

#[test]
fn missing_target_resolves_to_null_name() {
    let (_dir, store) = open_store();
    let conn = seed_conn(&store);
    seed_assumption(&conn, "a-1");
    seed_edge(&conn, "a-1", "theme", "t-gone", "critical");

    let impacts = ImpactResolver::new(&store)
        .resolve_impacts("a-1")
        .expect("impacts");
    assert_eq!(impacts.len(), 1);
    assert_eq!(impacts[0].entity_name, None);
    assert_eq!(impacts[0].impact_severity, "critical");
}

#[test]
fn assumption_without_edges_is_empty() {
    let (_dir, store) = open_store();
    let impacts = ImpactResolver::new(&store)
        .resolve_impacts("a-unknown")
        .expect("impacts");
    assert!(impacts.is_empty());
}

#[test]
fn resolution_is_repeatable_and_keeps_edge_order() {
    let (_dir, store) = open_store();
    let theme = seeded_theme(&store);
    let conn = seed_conn(&store);
    seed_initiative(&conn, "i-1", "First", None);
    seed_initiative(&conn, "i-2", "Second", None);
    seed_assumption(&conn, "a-1");
    seed_edge(&conn, "a-1", "initiative", "i-2", "low");
    seed_edge(&conn, "a-1", "theme", &theme, "high");
    seed_edge(&conn, "a-1", "initiative", "i-1", "low");
    seed_edge(&conn, "a-1", "initiative", "i-2", "medium");

    let resolver = ImpactResolver::new(&store);
    let first = resolver.resolve_impacts("a-1").expect("first");
    let second = resolver.resolve_impacts("a-1").expect("second");
    assert_eq!(first, second);

    let ids = first
        .iter()
        .map(|impact| impact.entity_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["i-2", theme.as_str(), "i-1", "i-2"]);
    assert_eq!(first[3].entity_name.as_deref(), Some("Second"));
}

#[test]
fn byte_valued_target_name_is_a_type_mismatch() {
    let (_dir, store) = open_store();
    let conn = seed_conn(&store);
    conn.execute(
        "INSERT INTO initiatives(id, title, status) VALUES ('i-1', X'FFFE41', 'in_progress')",
        [],
    )
    .expect("seed initiative with byte title");
    seed_assumption(&conn, "a-1");
    seed_edge(&conn, "a-1", "initiative", "i-1", "high");

    let err = ImpactResolver::new(&store)
        .resolve_impacts("a-1")
        .expect_err("byte title must not resolve to a name");
    assert!(matches!(
        err,
        StoreError::TypeMismatch { expected: "text", found: "blob", .. }
    ));
    assert_eq!(err.code(), "TYPE_MISMATCH");
}

#[test]
fn round_trips_do_not_grow_with_edge_count() {
    let store = FakeRowStore::new(|sql, params| {
        if sql.contains("FROM assumption_impact_map") {
            return Ok((0..40)
                .map(|n| {
                    let (kind, id) = match n % 3 {
                        0 => ("initiative", format!("i-{n}")),
                        1 => ("theme", format!("t-{n}")),
                        _ => ("risk", format!("r-{n}")),
                    };
                    Row::new()
                        .with("assumption_id", "a-1")
                        .with("entity_type", kind)
                        .with("entity_id", id)
                        .with("impact_severity", "low")
                })
                .collect());
        }
        if sql.contains("FROM initiatives") || sql.contains("FROM strategic_themes") {
            return Ok(text_params(params)
                .into_iter()
                .map(|id| Row::new().with("name", format!("name of {id}")).with("id", id))
                .collect());
        }
        Err(StoreError::Unavailable(format!("unexpected statement: {sql}")))
    });

    let impacts = ImpactResolver::new(&store)
        .resolve_impacts("a-1")
        .expect("impacts");

    assert_eq!(impacts.len(), 40);
    assert!(store.round_trips() <= 3);
    assert_eq!(impacts[0].entity_name.as_deref(), Some("name of i-0"));
    assert_eq!(impacts[1].entity_name.as_deref(), Some("name of t-1"));
    assert_eq!(impacts[2].entity_name, None);
    assert_eq!(store.sessions_acquired(), 1);
    assert_eq!(store.sessions_released(), 1);
}

#[test]
fn name_lookup_skipped_when_only_unrecognized_edges() {
    let store = FakeRowStore::new(|_, _| {
        Ok(vec![
            Row::new()
                .with("assumption_id", "a-1")
                .with("entity_type", "")
                .with("entity_id", "x-1")
                .with("impact_severity", "low"),
        ])
    });

    let impacts = ImpactResolver::new(&store)
        .resolve_impacts("a-1")
        .expect("impacts");
    assert_eq!(impacts[0].entity_type, "");
    assert_eq!(impacts[0].entity_name, None);
    assert_eq!(store.round_trips(), 1);
}
