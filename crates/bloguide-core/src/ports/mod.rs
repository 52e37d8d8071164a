//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod denylist;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use denylist::TokenDenylist;
pub use repository::{BaseRepository, PostRepository, UserRepository};
