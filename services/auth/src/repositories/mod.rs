//! Repositories for database operations

pub mod profile;

pub use profile::{PgProfileRepository, ProfileRepository};
