//! Squad membership payload

/// One player-team-league-season relationship
///
/// The database enforces uniqueness over all four fields, so writing
/// the same membership twice is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquadMembership {
    pub player_id: i64,
    pub league_id: i64,
    pub team_id: i64,
    pub season: i64,
}
