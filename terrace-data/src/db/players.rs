//! Player database operations

use crate::models::NewPlayer;
use serde::Serialize;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Stored player row
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub birth_country: Option<String>,
    pub nationality: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub position: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Write a batch of players in one statement
///
/// Rows conflict on `id`; every descriptive column takes the incoming
/// value while the identity itself is never in the update list, so a
/// re-import can change anything about a player except which player it
/// is. An empty batch returns without touching the pool.
pub async fn upsert_players(pool: &SqlitePool, players: &[NewPlayer]) -> Result<(), sqlx::Error> {
    if players.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "INSERT INTO players (id, name, first_name, last_name, age, birth_date, birth_place, \
         birth_country, nationality, height, weight, position, photo_url) ",
    );

    builder.push_values(players.iter(), |mut b, p| {
        b.push_bind(p.id)
            .push_bind(&p.name)
            .push_bind(&p.first_name)
            .push_bind(&p.last_name)
            .push_bind(p.age)
            .push_bind(&p.birth_date)
            .push_bind(&p.birth_place)
            .push_bind(&p.birth_country)
            .push_bind(&p.nationality)
            .push_bind(&p.height)
            .push_bind(&p.weight)
            .push_bind(&p.position)
            .push_bind(&p.photo_url);
    });

    builder.push(
        " ON CONFLICT(id) DO UPDATE SET \
         name = excluded.name, \
         first_name = excluded.first_name, \
         last_name = excluded.last_name, \
         age = excluded.age, \
         birth_date = excluded.birth_date, \
         birth_place = excluded.birth_place, \
         birth_country = excluded.birth_country, \
         nationality = excluded.nationality, \
         height = excluded.height, \
         weight = excluded.weight, \
         position = excluded.position, \
         photo_url = excluded.photo_url, \
         updated_at = CURRENT_TIMESTAMP",
    );

    builder.build().execute(pool).await?;

    Ok(())
}

/// Load one player by id
pub async fn get_player(pool: &SqlitePool, id: i64) -> Result<Option<Player>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, first_name, last_name, age, birth_date, birth_place,
               birth_country, nationality, height, weight, position, photo_url,
               created_at, updated_at
        FROM players
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(player_from_row))
}

pub(crate) fn player_from_row(row: &sqlx::sqlite::SqliteRow) -> Player {
    Player {
        id: row.get("id"),
        name: row.get("name"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        age: row.get("age"),
        birth_date: row.get("birth_date"),
        birth_place: row.get("birth_place"),
        birth_country: row.get("birth_country"),
        nationality: row.get("nationality"),
        height: row.get("height"),
        weight: row.get("weight"),
        position: row.get("position"),
        photo_url: row.get("photo_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
