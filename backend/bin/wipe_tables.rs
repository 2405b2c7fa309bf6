use anyhow::Result;
use clap::{Arg, Command};
use sproutswap::db::{get_db_pool, DatabaseConfig};
use sqlx::PgPool;
use tracing::{info, warn};

/// Engine tables in dependency order: children before the tables they
/// reference.
const ENGINE_TABLES: [&str; 4] = ["trade_proposals", "matches", "swipes", "connections"];

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let matches = Command::new("wipe-tables")
        .about("Wipe the matching-engine tables (swipes, connections, matches, trade proposals)")
        .arg(
            Arg::new("confirm-wipe")
                .long("confirm-wipe")
                .help("Confirm that you want to wipe the engine tables (required)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("include-traded-flags")
                .long("include-traded-flags")
                .help("Also reset is_traded on all plants")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let confirm_wipe = matches.get_flag("confirm-wipe");
    let reset_traded = matches.get_flag("include-traded-flags");

    let db_config = DatabaseConfig::from_env()?;
    let pool = get_db_pool(&db_config).await?;
    info!("Connected to database");

    if !confirm_wipe {
        warn!("⚠️  Wipe not confirmed. Use --confirm-wipe to proceed.");
        return Ok(());
    }

    for table in ENGINE_TABLES {
        let deleted = wipe_table(&pool, table).await?;
        info!("🗑️  Deleted {} records from {}", deleted, table);
    }

    if reset_traded {
        let reset = sqlx::query("UPDATE plants SET is_traded = FALSE WHERE is_traded = TRUE")
            .execute(&pool)
            .await?
            .rows_affected();
        info!("♻️  Reset is_traded on {} plants", reset);
    }

    info!("🎉 Wipe complete");

    Ok(())
}

async fn wipe_table(pool: &PgPool, table: &str) -> Result<u64> {
    let count_before: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;

    info!("{}: {} records before deletion", table, count_before);

    let result = sqlx::query(&format!("DELETE FROM {}", table))
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
