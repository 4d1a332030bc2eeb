use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bord_core::config;
use bord_core::core::seed::seed_demo_data;
use bord_core::{handlers, Platform};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let platform = web::Data::new(Platform::new());
    if config::seed_demo_data() {
        seed_demo_data(&platform).context("failed to seed demo data")?;
        info!("demo data loaded");
    }

    let addr = config::bind_addr();
    info!("Server listening on http://{}", addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(platform.clone())
            .configure(handlers::configure)
    });
    if let Some(workers) = config::workers() {
        server = server.workers(workers);
    }

    server
        .bind(&addr)
        .with_context(|| format!("failed to bind {}", addr))?
        .run()
        .await
        .context("server terminated with an error")
}
