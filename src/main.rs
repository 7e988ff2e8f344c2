use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reportflow::config::Config;
use reportflow::modules::health;
use reportflow::reports::controllers as report_controllers;
use reportflow::reports::repositories::{
    MySqlMetricsRepository, MySqlReportDefinitionRepository,
};
use reportflow::reports::services::{ReportRunner, ReportScheduler, ResendMailer};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reportflow=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting Reportflow scheduled report engine");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    if !config.mail.is_configured() {
        tracing::warn!("RESEND_API_KEY not set, reports will be evaluated but not delivered");
    }

    let mailer = ResendMailer::new(&config.mail).context("Failed to create mail client")?;
    let runner = Arc::new(ReportRunner::new(
        Arc::new(MySqlReportDefinitionRepository::new(db_pool.clone())),
        Arc::new(MySqlMetricsRepository::new(db_pool.clone())),
        Arc::new(mailer),
    ));

    if config.scheduler.enabled() {
        let scheduler = Arc::new(ReportScheduler::new(
            runner.clone(),
            config.scheduler.clone(),
        ));
        tokio::spawn(scheduler.start());
    } else {
        tracing::info!("REPORT_SWEEP_INTERVAL_SECS is 0, in-process sweeps disabled");
    }

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(runner.clone()))
            .configure(health::configure)
            .configure(report_controllers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("HTTP server error")
}
