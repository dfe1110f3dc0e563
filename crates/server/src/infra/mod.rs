//! Infrastructure: database connection and schema migrations.

pub mod db;
pub mod migrations;

pub use db::Database;
