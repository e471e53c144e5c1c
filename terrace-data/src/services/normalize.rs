//! Normalization of raw provider entries into database payloads
//!
//! Pure functions, no I/O. A record with no usable identity or name is
//! dropped here; nothing downstream ever sees it. External feeds
//! routinely contain incomplete stub records, so a dropped record is
//! not an error.

use crate::models::{NewPlayer, SquadMembership};
use crate::services::source::RawPlayerEntry;

/// One raw entry reduced to its database payloads
#[derive(Debug, Clone)]
pub struct NormalizedPlayer {
    pub player: NewPlayer,
    /// Present only when a team could be resolved for the entry
    pub membership: Option<SquadMembership>,
}

/// Normalize one provider entry
///
/// Returns `None` when the entry has no strictly positive integer id
/// or no usable name; such records cannot be stored or referenced.
///
/// Team resolution: the explicit `team` parameter wins; without one,
/// the first statistics block is consulted. If neither yields a team
/// the membership half is `None` while the player half is still
/// returned, since the player is worth storing even when its team
/// context for this season is unknown.
pub fn normalize_entry(
    entry: &RawPlayerEntry,
    league: i64,
    team: Option<i64>,
    season: i64,
) -> Option<NormalizedPlayer> {
    let raw = &entry.player;

    let id = raw.id.as_ref()?.as_positive()?;
    let name = clean_text(raw.name.as_deref())?;

    let first_stats = entry.statistics.first();
    let position = first_stats
        .and_then(|s| s.games.as_ref())
        .and_then(|g| clean_text(g.position.as_deref()));

    let birth = raw.birth.as_ref();

    let player = NewPlayer {
        id,
        name,
        first_name: clean_text(raw.firstname.as_deref()),
        last_name: clean_text(raw.lastname.as_deref()),
        age: raw.age.as_ref().and_then(|a| a.as_i64()),
        birth_date: birth.and_then(|b| clean_text(b.date.as_deref())),
        birth_place: birth.and_then(|b| clean_text(b.place.as_deref())),
        birth_country: birth.and_then(|b| clean_text(b.country.as_deref())),
        nationality: clean_text(raw.nationality.as_deref()),
        height: clean_text(raw.height.as_deref()),
        weight: clean_text(raw.weight.as_deref()),
        position,
        photo_url: clean_text(raw.photo.as_deref()),
    };

    let team_id = team.or_else(|| {
        first_stats
            .and_then(|s| s.team.as_ref())
            .and_then(|t| t.id.as_ref())
            .and_then(|id| id.as_positive())
    });

    let membership = team_id.map(|team_id| SquadMembership {
        player_id: id,
        league_id: league,
        team_id,
        season,
    });

    Some(NormalizedPlayer { player, membership })
}

/// Trimmed, non-empty text or `None`
fn clean_text(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
