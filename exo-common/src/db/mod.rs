//! SQLite ratings store

pub mod init;
pub mod ratings;

pub use init::init_database;
pub use ratings::{aggregate_for_planet, insert_rating};
