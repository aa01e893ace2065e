#![forbid(unsafe_code)]

use super::resolve::impact_edge_from_row;
use super::session::placeholders;
use super::{RowSession, RowStore, SqlValue, StoreError};
use sp_core::envelope::ImpactEnvelope;
use sp_core::{ImpactEdge, ImpactKind, ImpactTarget, ResolvedImpact};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

const MAX_LOOKUP_IDS: usize = 500;

const EDGES_BY_ASSUMPTION: &str = "SELECT assumption_id, entity_type, entity_id, impact_severity \
     FROM assumption_impact_map \
     WHERE assumption_id = ?1 \
     ORDER BY rowid ASC";

/// Table and column a kind's display name lives in.
struct NameSource {
    table: &'static str,
    column: &'static str,
}

fn name_source(kind: ImpactKind) -> NameSource {
    match kind {
        ImpactKind::Initiative => NameSource {
            table: "initiatives",
            column: "title",
        },
        ImpactKind::Theme => NameSource {
            table: "strategic_themes",
            column: "title",
        },
    }
}

#[derive(Debug, Default)]
struct ResolvedNames {
    initiatives: HashMap<String, String>,
    themes: HashMap<String, String>,
}

impl ResolvedNames {
    fn slot(&mut self, kind: ImpactKind) -> &mut HashMap<String, String> {
        match kind {
            ImpactKind::Initiative => &mut self.initiatives,
            ImpactKind::Theme => &mut self.themes,
        }
    }

    fn name_for(&self, target: &ImpactTarget) -> Option<String> {
        match target {
            ImpactTarget::Initiative(id) => self.initiatives.get(id).cloned(),
            ImpactTarget::Theme(id) => self.themes.get(id).cloned(),
            ImpactTarget::Unrecognized { .. } => None,
        }
    }
}

/// Resolves an assumption's impact edges to named targets.
///
/// Edges are read in one query; names are then looked up per target kind
/// with one `IN (…)` query for each kind present, so the number of round
/// trips does not grow with the number of edges.
#[derive(Debug)]
pub struct ImpactResolver<'a, S> {
    store: &'a S,
}

impl<'a, S: RowStore> ImpactResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn resolve_impacts(&self, assumption_id: &str) -> Result<Vec<ResolvedImpact>, StoreError> {
        self.store.with_session(|session| {
            let edges = session
                .query(EDGES_BY_ASSUMPTION, &crate::sql_params![assumption_id])?
                .iter()
                .map(impact_edge_from_row)
                .collect::<Result<Vec<_>, _>>()?;

            let names = lookup_names(session, &edges)?;

            let mut unresolved = 0usize;
            let impacts = edges
                .into_iter()
                .map(|edge| {
                    let name = names.name_for(&edge.target);
                    if name.is_none() {
                        unresolved += 1;
                        if let ImpactTarget::Unrecognized { entity_type, id } = &edge.target {
                            warn!(
                                assumption_id,
                                entity_type = entity_type.as_str(),
                                entity_id = id.as_str(),
                                "impact edge has unrecognized entity type"
                            );
                        }
                    }
                    ResolvedImpact::new(edge, name)
                })
                .collect::<Vec<_>>();

            debug!(
                assumption_id,
                edges = impacts.len(),
                unresolved,
                "resolved impacts"
            );
            Ok(impacts)
        })
    }

    pub fn impact(&self, assumption_id: &str) -> Result<ImpactEnvelope, StoreError> {
        Ok(ImpactEnvelope {
            assumption_id: assumption_id.to_string(),
            impacts: self.resolve_impacts(assumption_id)?,
        })
    }
}

fn lookup_names(
    session: &mut dyn RowSession,
    edges: &[ImpactEdge],
) -> Result<ResolvedNames, StoreError> {
    let mut wanted: HashMap<ImpactKind, BTreeSet<&str>> = HashMap::new();
    for edge in edges {
        if let Some(kind) = edge.target.kind() {
            wanted
                .entry(kind)
                .or_default()
                .insert(edge.target.entity_id());
        }
    }

    let mut names = ResolvedNames::default();
    for kind in ImpactKind::ALL {
        let Some(ids) = wanted.get(&kind) else {
            continue;
        };
        let source = name_source(kind);
        let ids = ids.iter().copied().collect::<Vec<_>>();

        for chunk in ids.chunks(MAX_LOOKUP_IDS) {
            let sql = format!(
                "SELECT id, {column} AS name FROM {table} WHERE id IN ({placeholders})",
                column = source.column,
                table = source.table,
                placeholders = placeholders(chunk.len()),
            );
            let params = chunk
                .iter()
                .map(|id| SqlValue::from(*id))
                .collect::<Vec<_>>();

            let slot = names.slot(kind);
            for row in session.query(&sql, &params)? {
                slot.insert(row.text("id")?, row.text("name")?);
            }
        }
    }

    Ok(names)
}
