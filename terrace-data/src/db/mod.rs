//! Database access for terrace-data

pub mod countries;
pub mod leagues;
pub mod players;
pub mod squads;
pub mod teams;
