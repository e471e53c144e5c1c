//! Table creation for the Terrace database
//!
//! Every statement is idempotent (`CREATE ... IF NOT EXISTS`), so
//! `ensure_schema` is safe to call on every startup.

use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Create all tables and indexes if they don't exist
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    create_countries_table(pool).await?;
    create_leagues_table(pool).await?;
    create_teams_table(pool).await?;
    create_players_table(pool).await?;
    create_squad_memberships_table(pool).await?;

    info!("Database schema ready");

    Ok(())
}

async fn create_countries_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            code TEXT,
            flag_url TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_leagues_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leagues (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            kind TEXT,
            logo_url TEXT,
            country_id INTEGER REFERENCES countries(id),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_teams_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT,
            country TEXT,
            founded INTEGER,
            logo_url TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Players keep the identifier assigned by the external provider,
/// so `id` has no AUTOINCREMENT.
async fn create_players_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            first_name TEXT,
            last_name TEXT,
            age INTEGER,
            birth_date TEXT,
            birth_place TEXT,
            birth_country TEXT,
            nationality TEXT,
            height TEXT,
            weight TEXT,
            position TEXT,
            photo_url TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_squad_memberships_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS squad_memberships (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            player_id INTEGER NOT NULL REFERENCES players(id),
            league_id INTEGER NOT NULL REFERENCES leagues(id),
            team_id INTEGER NOT NULL REFERENCES teams(id),
            season INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(player_id, league_id, team_id, season)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_squad_memberships_team_season
        ON squad_memberships(team_id, season)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
