#![forbid(unsafe_code)]

use super::resolve::{initiative_from_row, objective_from_row, theme_from_row};
use super::session::placeholders;
use super::{ChildFetch, Row, RowSession, RowStore, SqlValue, StoreError};
use sp_core::envelope::{CanvasEnvelope, DeepDiveEnvelope};
use sp_core::model::{CanvasTheme, DeepDiveTheme, ObjectiveNode, Theme, ThemeNode};
use std::collections::HashMap;
use tracing::debug;

/// Upper bound on parent ids bound into one `IN (…)` list.
const MAX_BATCH_PARENTS: usize = 500;

const THEMES_BY_VERSION: &str = "SELECT id, strategy_version_id, title, description, weighting, health_status, owner_id, created_at_ms \
     FROM strategic_themes \
     WHERE strategy_version_id = ?1 \
     ORDER BY created_at_ms ASC, rowid ASC";

/// Child level loaded beneath a parent level.
struct ChildLevel {
    name: &'static str,
    per_parent: &'static str,
    /// Projection + source; must alias the parent key as `parent_id`.
    batched_select: &'static str,
    batched_parent_column: &'static str,
    batched_order_by: &'static str,
}

const OBJECTIVES: ChildLevel = ChildLevel {
    name: "objectives",
    per_parent: "SELECT id, theme_id, title, statement, metric_type, owner_id, created_at_ms \
         FROM objectives \
         WHERE theme_id = ?1 \
         ORDER BY created_at_ms ASC, rowid ASC",
    batched_select: "SELECT theme_id AS parent_id, id, theme_id, title, statement, metric_type, owner_id, created_at_ms \
         FROM objectives",
    batched_parent_column: "theme_id",
    batched_order_by: "created_at_ms ASC, rowid ASC",
};

const INITIATIVES: ChildLevel = ChildLevel {
    name: "initiatives",
    per_parent: "SELECT i.id, i.title, i.status, i.budget_allocated \
         FROM initiative_objective_map m \
         JOIN initiatives i ON i.id = m.initiative_id \
         WHERE m.objective_id = ?1 \
         ORDER BY m.rowid ASC",
    batched_select: "SELECT m.objective_id AS parent_id, i.id, i.title, i.status, i.budget_allocated \
         FROM initiative_objective_map m \
         JOIN initiatives i ON i.id = m.initiative_id",
    batched_parent_column: "m.objective_id",
    batched_order_by: "m.rowid ASC",
};

/// Builds Theme → Objective (→ Initiative) trees for one strategy version.
///
/// Levels are loaded top-down inside a single store session. Unknown strategy
/// version ids produce an empty tree; a failure at any level fails the whole
/// assembly.
#[derive(Debug)]
pub struct HierarchyAssembler<'a, S> {
    store: &'a S,
    child_fetch: ChildFetch,
}

impl<'a, S: RowStore> HierarchyAssembler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            child_fetch: ChildFetch::default(),
        }
    }

    pub fn with_child_fetch(mut self, child_fetch: ChildFetch) -> Self {
        self.child_fetch = child_fetch;
        self
    }

    pub fn assemble_canvas(
        &self,
        strategy_version_id: &str,
    ) -> Result<Vec<CanvasTheme>, StoreError> {
        self.store.with_session(|session| {
            let mut trips = RoundTrips::default();
            let themes = load_themes(session, strategy_version_id, &mut trips)?;
            let objectives = self.load_level(
                session,
                &OBJECTIVES,
                &theme_ids(&themes),
                objective_from_row,
                &mut trips,
            )?;

            let canvas = themes
                .into_iter()
                .zip(objectives)
                .map(|(theme, objectives)| ThemeNode { theme, objectives })
                .collect::<Vec<_>>();

            debug!(
                strategy_version_id,
                child_fetch = self.child_fetch.as_str(),
                themes = canvas.len(),
                round_trips = trips.0,
                "assembled canvas"
            );
            Ok(canvas)
        })
    }

    pub fn assemble_deep_dive(
        &self,
        strategy_version_id: &str,
    ) -> Result<Vec<DeepDiveTheme>, StoreError> {
        self.store.with_session(|session| {
            let mut trips = RoundTrips::default();
            let themes = load_themes(session, strategy_version_id, &mut trips)?;
            let objectives = self.load_level(
                session,
                &OBJECTIVES,
                &theme_ids(&themes),
                objective_from_row,
                &mut trips,
            )?;

            let objective_ids = objectives
                .iter()
                .flatten()
                .map(|objective| objective.id.as_str())
                .collect::<Vec<_>>();
            let objective_count = objective_ids.len();
            let mut initiatives = self
                .load_level(
                    session,
                    &INITIATIVES,
                    &objective_ids,
                    initiative_from_row,
                    &mut trips,
                )?
                .into_iter();

            let mut deep_dive = Vec::with_capacity(themes.len());
            for (theme, objectives) in themes.into_iter().zip(objectives) {
                let objectives = objectives
                    .into_iter()
                    .map(|objective| ObjectiveNode {
                        objective,
                        initiatives: initiatives.next().unwrap_or_default(),
                    })
                    .collect();
                deep_dive.push(ThemeNode { theme, objectives });
            }

            debug!(
                strategy_version_id,
                child_fetch = self.child_fetch.as_str(),
                themes = deep_dive.len(),
                objectives = objective_count,
                round_trips = trips.0,
                "assembled deep dive"
            );
            Ok(deep_dive)
        })
    }

    pub fn canvas(&self, strategy_version_id: &str) -> Result<CanvasEnvelope, StoreError> {
        Ok(CanvasEnvelope {
            strategy_id: strategy_version_id.to_string(),
            canvas: self.assemble_canvas(strategy_version_id)?,
        })
    }

    pub fn deep_dive(&self, strategy_version_id: &str) -> Result<DeepDiveEnvelope, StoreError> {
        Ok(DeepDiveEnvelope {
            strategy_id: strategy_version_id.to_string(),
            canvas: self.assemble_deep_dive(strategy_version_id)?,
        })
    }

    /// Children for each parent id, returned in parent order.
    fn load_level<C>(
        &self,
        session: &mut dyn RowSession,
        level: &ChildLevel,
        parent_ids: &[&str],
        resolve: fn(&Row) -> Result<C, StoreError>,
        trips: &mut RoundTrips,
    ) -> Result<Vec<Vec<C>>, StoreError> {
        match self.child_fetch {
            ChildFetch::PerParent => {
                load_level_per_parent(session, level, parent_ids, resolve, trips)
            }
            ChildFetch::Batched => {
                load_level_batched(session, level, parent_ids, resolve, trips)
            }
        }
    }
}

#[derive(Debug, Default)]
struct RoundTrips(usize);

impl RoundTrips {
    fn query(
        &mut self,
        session: &mut dyn RowSession,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<Row>, StoreError> {
        self.0 += 1;
        session.query(sql, params)
    }
}

fn load_themes(
    session: &mut dyn RowSession,
    strategy_version_id: &str,
    trips: &mut RoundTrips,
) -> Result<Vec<Theme>, StoreError> {
    trips
        .query(session, THEMES_BY_VERSION, &crate::sql_params![strategy_version_id])?
        .iter()
        .map(theme_from_row)
        .collect()
}

fn theme_ids(themes: &[Theme]) -> Vec<&str> {
    themes.iter().map(|theme| theme.id.as_str()).collect()
}

fn load_level_per_parent<C>(
    session: &mut dyn RowSession,
    level: &ChildLevel,
    parent_ids: &[&str],
    resolve: fn(&Row) -> Result<C, StoreError>,
    trips: &mut RoundTrips,
) -> Result<Vec<Vec<C>>, StoreError> {
    let mut out = Vec::with_capacity(parent_ids.len());
    for parent_id in parent_ids {
        let children = trips
            .query(session, level.per_parent, &crate::sql_params![*parent_id])?
            .iter()
            .map(resolve)
            .collect::<Result<Vec<_>, _>>()?;
        out.push(children);
    }
    Ok(out)
}

fn load_level_batched<C>(
    session: &mut dyn RowSession,
    level: &ChildLevel,
    parent_ids: &[&str],
    resolve: fn(&Row) -> Result<C, StoreError>,
    trips: &mut RoundTrips,
) -> Result<Vec<Vec<C>>, StoreError> {
    let mut grouped: HashMap<String, Vec<C>> = HashMap::with_capacity(parent_ids.len());

    for chunk in parent_ids.chunks(MAX_BATCH_PARENTS) {
        let sql = format!(
            "{} WHERE {} IN ({}) ORDER BY {}",
            level.batched_select,
            level.batched_parent_column,
            placeholders(chunk.len()),
            level.batched_order_by
        );
        let params = chunk
            .iter()
            .map(|id| SqlValue::from(*id))
            .collect::<Vec<_>>();

        for row in trips.query(session, &sql, &params)? {
            let parent_id = row.text("parent_id")?;
            grouped.entry(parent_id).or_default().push(resolve(&row)?);
        }
    }

    debug!(level = level.name, parents = parent_ids.len(), "batched child level");
    Ok(parent_ids
        .iter()
        .map(|id| grouped.remove(*id).unwrap_or_default())
        .collect())
}
