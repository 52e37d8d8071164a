//! Schema migrations for the Bloguide store.
//!
//! Applied at API server startup (`Migrator::up`) and by the `migration` CLI.

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users_table;
mod m20261001_000002_create_posts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        // posts references users, so users must come first
        vec![
            Box::new(m20261001_000001_create_users_table::Migration),
            Box::new(m20261001_000002_create_posts_table::Migration),
        ]
    }
}
