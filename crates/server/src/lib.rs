//! Sea Queen ticket web server
//!
//! Serves a form at `/`; submitting it renders the ferry ticket, stores it
//! in the output directory and returns it as a PDF download.

pub mod config;
pub mod form;
pub mod handlers;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use config::AppConfig;
use ticket::{FsAssets, TicketGenerator};

/// Shared state handed to every request through `web::Data`
pub struct AppState {
    pub config: AppConfig,
    pub generator: TicketGenerator<FsAssets>,
}

impl AppState {
    pub fn new(config: AppConfig) -> ticket::Result<Self> {
        let assets = FsAssets::new(&config.font_path, &config.emblem_path);
        let generator = TicketGenerator::new(assets)?;
        Ok(Self { config, generator })
    }
}

/// Start the HTTP server and run until shutdown
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.output_dir)?;

    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::new(config)?);

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::config)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
