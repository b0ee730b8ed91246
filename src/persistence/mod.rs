//! Persistence - Local key/value store

mod database;

pub use database::{keys, Database};
