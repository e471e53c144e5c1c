//! Integration tests for the player import pipeline
//!
//! Drives the orchestrator end to end against an in-memory database
//! and a scripted source, covering the success path, the short-circuit
//! on empty pages, per-item membership failures, and every abort
//! class.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::Arc;
use terrace_common::db::{connect_in_memory, schema::ensure_schema};
use terrace_data::db::leagues::{upsert_league, League};
use terrace_data::db::players::upsert_players;
use terrace_data::db::squads::SquadStore;
use terrace_data::db::teams::{upsert_team, Team};
use terrace_data::models::{ImportParameters, NewPlayer, RawImportQuery, SquadMembership};
use terrace_data::services::memberships::record_memberships;
use terrace_data::services::player_import::{ImportError, MembershipResolver, PlayerImporter};
use terrace_data::services::source::{PlayersPage, PlayersSource, SourceError};
use tokio::sync::Mutex;

/// Source that serves a scripted sequence of results
struct StubSource {
    pages: Mutex<VecDeque<Result<PlayersPage, SourceError>>>,
}

impl StubSource {
    fn new(pages: Vec<Result<PlayersPage, SourceError>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
        })
    }
}

#[async_trait]
impl PlayersSource for StubSource {
    async fn fetch_page(&self, _params: &ImportParameters) -> Result<PlayersPage, SourceError> {
        self.pages
            .lock()
            .await
            .pop_front()
            .expect("no scripted page left; unexpected fetch")
    }
}

fn page(players: serde_json::Value, total_pages: i64) -> PlayersPage {
    serde_json::from_value(json!({
        "response": players,
        "paging": { "current": 1, "total": total_pages },
        "errors": []
    }))
    .unwrap()
}

fn player_entry(id: i64, name: &str, age: i64) -> serde_json::Value {
    json!({
        "player": { "id": id, "name": name, "age": age },
        "statistics": [
            { "team": { "id": 33 }, "games": { "position": "Midfielder" } }
        ]
    })
}

fn import_query(season: i64, league: i64, team: i64) -> RawImportQuery {
    RawImportQuery {
        season: Some(json!(season)),
        league: Some(json!(league)),
        team: Some(json!(team)),
        page: None,
    }
}

/// Resolver for tests that must never reach the reconcile step
fn panicking_resolver() -> MembershipResolver {
    Arc::new(|| panic!("membership writer resolved; reconcile step should not run"))
}

async fn empty_pool() -> SqlitePool {
    let pool = connect_in_memory().await.unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}

/// Schema plus the league and team the import refers to
async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;

    upsert_league(
        &pool,
        &League {
            id: 39,
            name: "Premier League".to_string(),
            kind: Some("League".to_string()),
            logo_url: None,
            country_id: None,
        },
    )
    .await
    .unwrap();
    upsert_team(
        &pool,
        &Team {
            id: 33,
            name: "Manchester United".to_string(),
            code: None,
            country: Some("England".to_string()),
            founded: None,
            logo_url: None,
        },
    )
    .await
    .unwrap();

    pool
}

async fn player_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM players")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn membership_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM squad_memberships")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn importing_a_page_stores_players_and_memberships() {
    let pool = seeded_pool().await;
    let source = StubSource::new(vec![Ok(page(
        json!([
            player_entry(100, "Marcus Rashford", 23),
            player_entry(101, "Bruno Fernandes", 26),
        ]),
        1,
    ))]);
    let importer = PlayerImporter::with_store(pool.clone(), source);

    let summary = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.memberships_inserted, 2);
    assert!(summary.membership_errors.is_empty());
    assert_eq!(summary.season, 2021);
    assert_eq!(summary.league, 39);
    assert_eq!(summary.team, 33);
    assert_eq!(summary.page, 1);
    assert_eq!(summary.total_pages, 1);
    assert!(summary.message.is_none());

    assert_eq!(player_count(&pool).await, 2);
    assert_eq!(membership_count(&pool).await, 2);
}

#[tokio::test]
async fn importing_the_same_page_twice_is_idempotent() {
    let pool = seeded_pool().await;
    let entries = || {
        json!([
            player_entry(100, "Marcus Rashford", 23),
            player_entry(101, "Bruno Fernandes", 26),
        ])
    };
    let source = StubSource::new(vec![Ok(page(entries(), 1)), Ok(page(entries(), 1))]);
    let importer = PlayerImporter::with_store(pool.clone(), source);

    let first = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();
    let second = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();

    assert_eq!(first.imported, second.imported);
    // duplicates absorbed by the unique constraint still count as satisfied
    assert_eq!(second.memberships_inserted, 2);
    assert!(second.membership_errors.is_empty());

    assert_eq!(player_count(&pool).await, 2);
    assert_eq!(membership_count(&pool).await, 2);
}

#[tokio::test]
async fn reimport_updates_fields_but_never_the_id() {
    let pool = seeded_pool().await;
    let source = StubSource::new(vec![
        Ok(page(json!([player_entry(100, "M. Rashford", 23)]), 1)),
        Ok(page(json!([player_entry(100, "Marcus Rashford", 24)]), 1)),
    ]);
    let importer = PlayerImporter::with_store(pool.clone(), source);

    importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();
    importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();

    assert_eq!(player_count(&pool).await, 1);

    let (name, age): (String, i64) =
        sqlx::query_as("SELECT name, age FROM players WHERE id = 100")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name, "Marcus Rashford");
    assert_eq!(age, 24);
}

#[tokio::test]
async fn one_bad_membership_leaves_the_rest_intact() {
    let pool = seeded_pool().await;
    upsert_players(
        &pool,
        &[
            NewPlayer::bare(1, "One"),
            NewPlayer::bare(2, "Two"),
            NewPlayer::bare(3, "Three"),
        ],
    )
    .await
    .unwrap();

    let membership = |player_id: i64, league_id: i64| SquadMembership {
        player_id,
        league_id,
        team_id: 33,
        season: 2021,
    };
    // league 999 does not exist
    let batch = vec![membership(1, 39), membership(2, 999), membership(3, 39)];

    let store = SquadStore::new(pool.clone());
    let report = record_memberships(&store, &batch).await;

    assert_eq!(report.inserted, 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].player_id, 2);

    assert_eq!(membership_count(&pool).await, 2);
    assert_eq!(player_count(&pool).await, 3);
}

#[tokio::test]
async fn membership_failures_do_not_fail_the_import() {
    // Schema only: the league and team rows the memberships point at
    // are missing, so every membership write hits a FK violation.
    let pool = empty_pool().await;
    let source = StubSource::new(vec![Ok(page(
        json!([
            player_entry(100, "Marcus Rashford", 23),
            player_entry(101, "Bruno Fernandes", 26),
        ]),
        1,
    ))]);
    let importer = PlayerImporter::with_store(pool.clone(), source);

    let summary = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.memberships_inserted, 0);
    assert_eq!(summary.membership_errors.len(), 2);
    let failed: Vec<i64> = summary
        .membership_errors
        .iter()
        .map(|e| e.player_id)
        .collect();
    assert_eq!(failed, vec![100, 101]);

    assert_eq!(player_count(&pool).await, 2);
    assert_eq!(membership_count(&pool).await, 0);
}

#[tokio::test]
async fn empty_page_short_circuits_before_any_write() {
    let pool = seeded_pool().await;
    let source = StubSource::new(vec![Ok(page(json!([]), 0))]);
    // A resolved membership writer would panic; the short-circuit
    // must return before that lookup.
    let importer = PlayerImporter::new(pool.clone(), source, panicking_resolver());

    let summary = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();

    assert_eq!(summary.imported, 0);
    assert_eq!(summary.memberships_inserted, 0);
    assert!(summary.membership_errors.is_empty());
    assert_eq!(summary.total_pages, 0);
    assert_eq!(summary.message.as_deref(), Some("No players found"));

    assert_eq!(player_count(&pool).await, 0);
}

#[tokio::test]
async fn page_of_stub_records_counts_as_empty() {
    let pool = seeded_pool().await;
    let source = StubSource::new(vec![Ok(page(
        json!([
            { "player": { "name": "No Id" } },
            { "player": { "id": "???", "name": "Bad Id" } },
            { "player": { "id": 500 } }
        ]),
        1,
    ))]);
    let importer = PlayerImporter::new(pool.clone(), source, panicking_resolver());

    let summary = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();

    // dropped records are skips, not errors
    assert_eq!(summary.imported, 0);
    assert!(summary.membership_errors.is_empty());
    assert_eq!(summary.message.as_deref(), Some("No players found"));
    assert_eq!(player_count(&pool).await, 0);
}

#[tokio::test]
async fn missing_season_aborts_before_the_fetch() {
    let pool = seeded_pool().await;
    // No scripted pages: a fetch would panic inside the stub.
    let source = StubSource::new(vec![]);
    let importer = PlayerImporter::new(pool.clone(), source, panicking_resolver());

    let err = importer
        .import_page(&RawImportQuery::default())
        .await
        .unwrap_err();

    match err {
        ImportError::Parameter(p) => assert_eq!(p.field, "season"),
        other => panic!("expected parameter error, got {:?}", other),
    }
}

#[tokio::test]
async fn provider_timeout_aborts_with_nothing_persisted() {
    let pool = seeded_pool().await;
    let source = StubSource::new(vec![Err(SourceError::Timeout)]);
    let importer = PlayerImporter::new(pool.clone(), source, panicking_resolver());

    let err = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Source(SourceError::Timeout)));
    assert_eq!(player_count(&pool).await, 0);
}

#[tokio::test]
async fn absent_membership_writer_is_reported_per_player() {
    let pool = seeded_pool().await;
    let source = StubSource::new(vec![Ok(page(
        json!([
            player_entry(100, "Marcus Rashford", 23),
            player_entry(101, "Bruno Fernandes", 26),
        ]),
        1,
    ))]);
    let resolver: MembershipResolver = Arc::new(|| None);
    let importer = PlayerImporter::new(pool.clone(), source, resolver);

    let summary = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.memberships_inserted, 0);
    assert_eq!(summary.membership_errors.len(), 2);
    assert!(summary.membership_errors[0].reason.contains("unavailable"));

    assert_eq!(player_count(&pool).await, 2);
}

#[tokio::test]
async fn upsert_failure_aborts_before_reconciliation() {
    let pool = seeded_pool().await;
    sqlx::query("DROP TABLE players")
        .execute(&pool)
        .await
        .unwrap();

    let source = StubSource::new(vec![Ok(page(
        json!([player_entry(100, "Marcus Rashford", 23)]),
        1,
    ))]);
    let importer = PlayerImporter::new(pool.clone(), source, panicking_resolver());

    let err = importer
        .import_page(&import_query(2021, 39, 33))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Database(_)));
}
