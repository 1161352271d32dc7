//! Storage access for the Lead Desk pipeline: a lazily-created shared SQLite
//! pool, the record models, and the insert/list queries.

pub mod models;
pub mod pool;
pub mod queries;
pub mod schema;

pub use pool::{Database, DbError};
