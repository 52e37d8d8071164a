//! # Bloguide Infrastructure
//!
//! Concrete implementations of the ports defined in `bloguide-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `sql` - SQL storage via SeaORM (PostgreSQL or SQLite)
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod denylist;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{DatabaseConfig, InMemoryStore, mask_email};
pub use denylist::InMemoryTokenDenylist;

#[cfg(feature = "sql")]
pub use database::DatabaseHandle;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
