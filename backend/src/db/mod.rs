pub mod connection;
pub mod migrations;
pub mod users;
pub mod plants;
pub mod swipes;
pub mod connections;
pub mod proposals;

pub use connection::{get_db_pool, DatabaseConfig};
