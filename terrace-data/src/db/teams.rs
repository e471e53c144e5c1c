//! Team database operations

use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// Stored team row
///
/// `id` is the identifier assigned by the external provider.
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub country: Option<String>,
    pub founded: Option<i64>,
    pub logo_url: Option<String>,
}

/// Insert or update one team
pub async fn upsert_team(pool: &SqlitePool, team: &Team) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO teams (id, name, code, country, founded, logo_url)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            code = excluded.code,
            country = excluded.country,
            founded = excluded.founded,
            logo_url = excluded.logo_url,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.code)
    .bind(&team.country)
    .bind(team.founded)
    .bind(&team.logo_url)
    .execute(pool)
    .await?;

    Ok(())
}

/// All teams, ordered by name
pub async fn list_teams(pool: &SqlitePool) -> Result<Vec<Team>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, code, country, founded, logo_url
        FROM teams
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Team {
            id: row.get("id"),
            name: row.get("name"),
            code: row.get("code"),
            country: row.get("country"),
            founded: row.get("founded"),
            logo_url: row.get("logo_url"),
        })
        .collect())
}
