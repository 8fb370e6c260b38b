use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};

/// Schema migrations embedded at compile time from `src/storage/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("src/storage/migrations");

/// Applies pending migrations.
///
/// sqlx takes a Postgres advisory lock for the duration of the run, so
/// several bot instances starting together do not interleave.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database schema is up to date ({} migration(s) known)", MIGRATOR.iter().count());
    Ok(())
}
