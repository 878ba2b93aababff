//! Database module: the nurse record store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the storage actor owning the connection pool, and its handle

pub mod actor;
pub mod models;
pub mod schema;

pub use models::DbNurse;
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
