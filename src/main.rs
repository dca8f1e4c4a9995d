use std::sync::Arc;

use atelier_backend::api;
use atelier_backend::config::Config;
use atelier_backend::db::Database;
use atelier_backend::generate::OllamaGenerator;
use atelier_backend::metrics;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load();
    metrics::register_metrics();

    let db = Database::new(&config.database_url)
        .await
        .expect("Failed to initialize database");
    let db = Arc::new(db);

    match db.count_elements().await {
        Ok(count) => metrics::ELEMENTS_DISCOVERED.set(count),
        Err(e) => tracing::warn!("Failed to count elements at startup: {e}"),
    }

    let generator = Arc::new(OllamaGenerator::new(
        config.ollama_url.clone(),
        config.ollama_model.clone(),
        config.generate_timeout,
    ));

    let app = api::router(db, generator, config.static_dir.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to port {}: {e}", config.port));

    tracing::info!("Atelier backend listening on port {}", config.port);
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
