use freightops_api::{config, db, migrator::Migrator};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

/// Applies, rolls back or reports the embedded schema migrations.
///
/// Usage: `migration [up|down|status|fresh]` (defaults to `up`). The database
/// is taken from the regular application configuration.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    info!(command = %command, "Starting database migration");

    let pool = db::establish_connection_from_app_config(&cfg).await?;

    let result = match command.as_str() {
        "up" => Migrator::up(&pool, None).await,
        "down" => Migrator::down(&pool, Some(1)).await,
        "status" => Migrator::status(&pool).await,
        "fresh" => Migrator::fresh(&pool).await,
        other => {
            anyhow::bail!("unknown command '{}': expected up, down, status or fresh", other)
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Migration command failed");
        return Err(e.into());
    }

    info!("Migration completed successfully");
    db::close_pool(pool).await?;
    Ok(())
}
