//! FabFierce - storefront catalog service
//!
//! Serves the product catalog, text and visual search, and the shopper's
//! cart and wishlist over a JSON API.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use fabfierce::api::{self, AppState};
use fabfierce::config::{AppConfig, Paths};
use fabfierce::data;

/// FabFierce - storefront catalog service
#[derive(Parser, Debug)]
#[command(name = "fabfierce")]
#[command(version)]
#[command(about = "Storefront catalog service with text and visual product search")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON catalog to serve instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("FabFierce v{} starting...", env!("CARGO_PKG_VERSION"));

    // Initialize paths
    let paths = Paths::init(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    let config = AppConfig::load()?;

    // Load the catalog
    let catalog = match args.catalog.or_else(|| config.catalog_path.clone()) {
        Some(path) => {
            info!("Loading catalog from {:?}", path);
            data::load_catalog_file(&path)?
        }
        None => data::seed_products(),
    };

    let state = actix_web::web::Data::new(AppState::new(&paths, config, catalog)?);

    start_server(args.host, args.port, state).await
}

async fn start_server(
    host: String,
    port: u16,
    state: actix_web::web::Data<AppState>,
) -> Result<()> {
    use actix_cors::Cors;
    use actix_web::{middleware, web, App, HttpServer};

    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .service(web::scope("/api").configure(api::configure))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
