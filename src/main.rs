use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use opdslot_api::{config::ApiConfig, init_tracing};
use opdslot_db::{PgStore, create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    opdslot_api::start_server(config, Arc::new(PgStore::new(db_pool))).await?;

    Ok(())
}
