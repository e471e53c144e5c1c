//! # Terrace Common Library
//!
//! Shared code for the Terrace platform services:
//! - Error and result types
//! - TOML configuration loading
//! - SQLite pool construction and schema bootstrap

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
