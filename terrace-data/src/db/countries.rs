//! Country database operations

use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// Country payload keyed by name; ids are assigned locally
#[derive(Debug, Clone)]
pub struct NewCountry {
    pub name: String,
    pub code: Option<String>,
    pub flag_url: Option<String>,
}

/// Stored country row
#[derive(Debug, Clone, Serialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub flag_url: Option<String>,
}

/// Insert or update one country, keyed by its unique name
pub async fn upsert_country(pool: &SqlitePool, country: &NewCountry) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO countries (name, code, flag_url)
        VALUES (?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET
            code = excluded.code,
            flag_url = excluded.flag_url,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&country.name)
    .bind(&country.code)
    .bind(&country.flag_url)
    .execute(pool)
    .await?;

    Ok(())
}

/// All countries, ordered by name
pub async fn list_countries(pool: &SqlitePool) -> Result<Vec<Country>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, code, flag_url
        FROM countries
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Country {
            id: row.get("id"),
            name: row.get("name"),
            code: row.get("code"),
            flag_url: row.get("flag_url"),
        })
        .collect())
}
