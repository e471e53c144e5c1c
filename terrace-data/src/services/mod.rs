//! Business logic for terrace-data

pub mod api_football;
pub mod memberships;
pub mod normalize;
pub mod player_import;
pub mod source;
