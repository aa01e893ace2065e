#![forbid(unsafe_code)]

use super::{
    AddObjectiveRequest, AddThemeRequest, CreateStrategyRequest, RowStore, StoreError,
};
use sp_core::ids::canonical_identifier;
use sp_core::model::{DEFAULT_METRIC_TYPE, StrategyStatus};
use sp_core::{ActorId, time::now_ms};
use tracing::info;
use uuid::Uuid;

/// Single-row inserts for the strategy hierarchy. Each call validates its
/// request before touching the store and issues exactly one insert.
#[derive(Debug)]
pub struct WriteCoordinator<'a, S> {
    store: &'a S,
}

impl<'a, S: RowStore> WriteCoordinator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn create_strategy(
        &self,
        actor: &ActorId,
        request: CreateStrategyRequest,
    ) -> Result<String, StoreError> {
        let name = required_text(request.name, "name is required")?;
        let id = new_id();

        self.store.with_session(|session| {
            session.execute(
                "INSERT INTO strategy_versions(id, name, status, valid_from, valid_to, owner_id, created_at_ms) \
                 VALUES (?1, ?2, ?3, NULL, NULL, ?4, ?5)",
                &crate::sql_params![
                    id.as_str(),
                    name,
                    StrategyStatus::Draft.as_str(),
                    actor.as_str(),
                    now_ms(),
                ],
            )
        })?;

        info!(strategy_version_id = id.as_str(), actor = actor.as_str(), "strategy created");
        Ok(id)
    }

    pub fn add_theme(&self, actor: &ActorId, request: AddThemeRequest) -> Result<String, StoreError> {
        let strategy_version_id =
            canonical_identifier("strategy_version_id", request.strategy_version_id)?;
        let title = required_text(request.title, "title is required")?;
        let description = required_text(request.description, "description is required")?;
        if request.weighting.is_some_and(|w| !w.is_finite()) {
            return Err(StoreError::MalformedInput("weighting must be a finite number"));
        }
        let id = new_id();

        self.store.with_session(|session| {
            session.execute(
                "INSERT INTO strategic_themes(id, strategy_version_id, title, description, weighting, health_status, owner_id, created_at_ms) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                &crate::sql_params![
                    id.as_str(),
                    strategy_version_id.as_str(),
                    title,
                    description,
                    request.weighting,
                    request.health_status.and_then(|h| h.to_column()),
                    actor.as_str(),
                    now_ms(),
                ],
            )
        })?;

        info!(
            theme_id = id.as_str(),
            strategy_version_id = strategy_version_id.as_str(),
            actor = actor.as_str(),
            "theme added"
        );
        Ok(id)
    }

    pub fn add_objective(
        &self,
        actor: &ActorId,
        request: AddObjectiveRequest,
    ) -> Result<String, StoreError> {
        let theme_id = canonical_identifier("theme_id", request.theme_id)?;
        let title = required_text(request.title, "title is required")?;
        let statement = required_text(request.statement, "statement is required")?;
        let id = new_id();

        self.store.with_session(|session| {
            session.execute(
                "INSERT INTO objectives(id, theme_id, title, statement, metric_type, owner_id, created_at_ms) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                &crate::sql_params![
                    id.as_str(),
                    theme_id.as_str(),
                    title,
                    statement,
                    DEFAULT_METRIC_TYPE,
                    actor.as_str(),
                    now_ms(),
                ],
            )
        })?;

        info!(
            objective_id = id.as_str(),
            theme_id = theme_id.as_str(),
            actor = actor.as_str(),
            "objective added"
        );
        Ok(id)
    }
}

fn required_text(value: String, message: &'static str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::MalformedInput(message));
    }
    Ok(if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    })
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
