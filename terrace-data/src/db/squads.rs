//! Squad membership database operations

use crate::db::players::{player_from_row, Player};
use crate::models::SquadMembership;
use crate::services::memberships::{MembershipOutcome, MembershipWriter};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Membership writer backed by the squad_memberships table
pub struct SquadStore {
    pool: SqlitePool,
}

impl SquadStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipWriter for SquadStore {
    /// Insert one membership row
    ///
    /// A duplicate is absorbed by the unique constraint (`DO NOTHING`)
    /// and reported as already present; inserting and letting the
    /// constraint decide avoids the check-then-insert race. Foreign
    /// key violations are not conflicts and still surface as errors.
    async fn create_membership(
        &self,
        membership: &SquadMembership,
    ) -> terrace_common::Result<MembershipOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO squad_memberships (player_id, league_id, team_id, season)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(player_id, league_id, team_id, season) DO NOTHING
            "#,
        )
        .bind(membership.player_id)
        .bind(membership.league_id)
        .bind(membership.team_id)
        .bind(membership.season)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(MembershipOutcome::AlreadyPresent)
        } else {
            Ok(MembershipOutcome::Inserted)
        }
    }
}

/// Players recorded for a team in a season, optionally narrowed to one league
pub async fn squad_for_team(
    pool: &SqlitePool,
    team_id: i64,
    season: i64,
    league: Option<i64>,
) -> Result<Vec<Player>, sqlx::Error> {
    let rows = match league {
        Some(league_id) => {
            sqlx::query(
                r#"
                SELECT p.id, p.name, p.first_name, p.last_name, p.age, p.birth_date,
                       p.birth_place, p.birth_country, p.nationality, p.height, p.weight,
                       p.position, p.photo_url, p.created_at, p.updated_at
                FROM players p
                JOIN squad_memberships sm ON sm.player_id = p.id
                WHERE sm.team_id = ? AND sm.season = ? AND sm.league_id = ?
                ORDER BY p.name
                "#,
            )
            .bind(team_id)
            .bind(season)
            .bind(league_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            // DISTINCT: without a league filter, a player with
            // memberships in several leagues joins once per league
            sqlx::query(
                r#"
                SELECT DISTINCT p.id, p.name, p.first_name, p.last_name, p.age, p.birth_date,
                       p.birth_place, p.birth_country, p.nationality, p.height, p.weight,
                       p.position, p.photo_url, p.created_at, p.updated_at
                FROM players p
                JOIN squad_memberships sm ON sm.player_id = p.id
                WHERE sm.team_id = ? AND sm.season = ?
                ORDER BY p.name
                "#,
            )
            .bind(team_id)
            .bind(season)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.iter().map(player_from_row).collect())
}
