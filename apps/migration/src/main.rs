//! Migration CLI tool.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    cli::run_cli(yatube_migration::Migrator).await;
}
