use sea_orm_migration::prelude::*;

/// Schema CLI. Reads `DATABASE_URL` (or `-u`) like the sea-orm CLI; the API
/// server applies the same migrations on startup when `RUN_MIGRATIONS` is set.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
