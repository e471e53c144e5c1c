//! League database operations

use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// Stored league row
///
/// `id` is the identifier assigned by the external provider.
#[derive(Debug, Clone, Serialize)]
pub struct League {
    pub id: i64,
    pub name: String,
    pub kind: Option<String>,
    pub logo_url: Option<String>,
    pub country_id: Option<i64>,
}

/// Insert or update one league
pub async fn upsert_league(pool: &SqlitePool, league: &League) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO leagues (id, name, kind, logo_url, country_id)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            kind = excluded.kind,
            logo_url = excluded.logo_url,
            country_id = excluded.country_id,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(league.id)
    .bind(&league.name)
    .bind(&league.kind)
    .bind(&league.logo_url)
    .bind(league.country_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// All leagues, ordered by name
pub async fn list_leagues(pool: &SqlitePool) -> Result<Vec<League>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, kind, logo_url, country_id
        FROM leagues
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| League {
            id: row.get("id"),
            name: row.get("name"),
            kind: row.get("kind"),
            logo_url: row.get("logo_url"),
            country_id: row.get("country_id"),
        })
        .collect())
}
