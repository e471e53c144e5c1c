//! HTTP API handlers for terrace-data

pub mod health;
pub mod import;
pub mod players;
pub mod reference;

pub use health::health_routes;
pub use import::import_routes;
pub use players::player_routes;
pub use reference::reference_routes;
