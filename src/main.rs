use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Server};

use tenant_console::api::build_app;
use tenant_console::cli::{self, Cli, Commands};
use tenant_console::config::{connect_database, init_logging, migrate_database, AppSettings};
use tenant_console::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();
    let settings = AppSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let command = cli.command();
    if command != Commands::Serve {
        return cli::execute_command(command, settings).await;
    }

    let db = connect_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    let bind_address = settings.bind_address();
    let app_data = Arc::new(AppData::init(db, settings)?);
    let app = build_app(app_data);

    tracing::info!("Starting server on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/docs", bind_address);

    Server::new(TcpListener::bind(bind_address)).run(app).await?;

    Ok(())
}
