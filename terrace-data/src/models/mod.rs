//! Data models for terrace-data

pub mod import;
pub mod player;
pub mod squad;

pub use import::{
    ImportParameters, ImportSummary, InvalidParameter, LooseInt, MembershipError, RawImportQuery,
};
pub use player::NewPlayer;
pub use squad::SquadMembership;
