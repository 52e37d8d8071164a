//! SeaORM entities mapped onto the domain types.

pub mod post;
pub mod user;
