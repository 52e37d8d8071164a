//! Token revocation storage.

mod memory;

pub use memory::InMemoryTokenDenylist;
