//! One-shot schema bootstrap. Run before starting the server.

use std::process::ExitCode;

use vigil_api::logging::init_tracing;
use vigil_db::ConnectionProvider;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing("vigil_bootstrap=info,vigil_db=info");

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        tracing::error!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };

    match run(&database_url).await {
        Ok(()) => {
            tracing::info!("Database initialized successfully with tables and indexes");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Database bootstrap failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(database_url: &str) -> Result<(), sqlx::Error> {
    let mut conn = ConnectionProvider::from_url(database_url)?.connect().await?;
    vigil_db::bootstrap::bootstrap(&mut conn).await?;
    vigil_api::handlers::release(conn).await;
    Ok(())
}
