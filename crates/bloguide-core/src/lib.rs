//! # Bloguide Core
//!
//! The domain layer of the Bloguide blogging backend.
//! This crate contains the user/post model and the ports infrastructure
//! must implement, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
