//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and exposes `up`, `down`, `status`, `fresh`, `refresh`
//! and `reset`. The CLI installs its own tracing subscriber (`-v` for debug).

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(migration::Migrator).await;
}
