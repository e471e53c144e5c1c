//! Player import orchestration
//!
//! Linear pipeline: validate, fetch, normalize, upsert, reconcile,
//! summarize. Validation and fetch failures abort before any write;
//! an upsert failure aborts before reconciliation; reconciliation
//! failures are per-player data in the summary, never an abort.

use crate::db::players::upsert_players;
use crate::db::squads::SquadStore;
use crate::models::{ImportSummary, InvalidParameter, RawImportQuery};
use crate::services::memberships::{record_memberships, MembershipReport, MembershipWriter};
use crate::services::normalize::normalize_entry;
use crate::services::source::{PlayersSource, SourceError};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Lazily resolved membership writer
///
/// The squad store is looked up on every call instead of being
/// captured at construction, so module wiring can hand the importer
/// out before all of its collaborators exist.
pub type MembershipResolver = Arc<dyn Fn() -> Option<Arc<dyn MembershipWriter>> + Send + Sync>;

/// Failures that abort an import call
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Parameter(#[from] InvalidParameter),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Imports pages of players from the external source
pub struct PlayerImporter {
    db: SqlitePool,
    source: Arc<dyn PlayersSource>,
    squads: MembershipResolver,
}

impl PlayerImporter {
    pub fn new(
        db: SqlitePool,
        source: Arc<dyn PlayersSource>,
        squads: MembershipResolver,
    ) -> Self {
        Self { db, source, squads }
    }

    /// Importer wired to the SQLite-backed squad store
    pub fn with_store(db: SqlitePool, source: Arc<dyn PlayersSource>) -> Self {
        let store: Arc<dyn MembershipWriter> = Arc::new(SquadStore::new(db.clone()));
        let resolver: MembershipResolver = Arc::new(move || Some(store.clone()));
        Self::new(db, source, resolver)
    }

    /// Import one page of players and record their squad memberships
    pub async fn import_page(&self, query: &RawImportQuery) -> Result<ImportSummary, ImportError> {
        let params = query.validate()?;

        let page = self.source.fetch_page(&params).await?;
        let total_pages = page.paging.total;

        let mut players = Vec::new();
        let mut memberships = Vec::new();
        for entry in &page.response {
            let normalized =
                match normalize_entry(entry, params.league, Some(params.team), params.season) {
                    Some(normalized) => normalized,
                    None => continue,
                };
            players.push(normalized.player);
            if let Some(membership) = normalized.membership {
                memberships.push(membership);
            }
        }

        if players.is_empty() {
            tracing::info!(
                season = params.season,
                league = params.league,
                team = params.team,
                page = params.page,
                "Import page produced no players"
            );
            return Ok(ImportSummary::empty(&params, total_pages));
        }

        upsert_players(&self.db, &players).await?;

        let report = match (self.squads)() {
            Some(writer) => record_memberships(writer.as_ref(), &memberships).await,
            None => {
                tracing::warn!("Squad store unavailable; memberships not recorded");
                MembershipReport::unavailable(&memberships)
            }
        };

        tracing::info!(
            imported = players.len(),
            memberships = report.inserted,
            membership_errors = report.errors.len(),
            page = params.page,
            total_pages,
            "Imported player page"
        );

        Ok(ImportSummary {
            imported: players.len(),
            memberships_inserted: report.inserted,
            membership_errors: report.errors,
            season: params.season,
            league: params.league,
            team: params.team,
            page: params.page,
            total_pages,
            message: None,
        })
    }
}
