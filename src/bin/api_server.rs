// src/bin/api_server.rs

use bookshelf_api::infra::telemetry;
use bookshelf_api::transport;
use bookshelf_api::{BookCatalog, JsonFileStore, Settings};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    telemetry::init("info");

    // --- Catalog Initialization ---
    let store = Arc::new(JsonFileStore::new(&settings.data_file, settings.fallback));
    let catalog = BookCatalog::open(store).await;
    tracing::info!(
        path = %settings.data_file.display(),
        books = catalog.len(),
        "catalog ready"
    );

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let mut app = transport::http::create_router(transport::http::AppState::new(catalog));
    if settings.swagger_ui {
        app = app.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        );
        tracing::info!("Swagger UI available at /swagger-ui");
    }
    let app = app.layer(cors);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await?;

    Ok(())
}
