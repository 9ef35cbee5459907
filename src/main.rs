//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

// Fotos de prato chegam em base64 dentro do JSON
const IMAGE_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings)?;
    tracing::info!("🍽️ Salão com {} mesas carregado", settings.table_count);

    let app = build_router(app_state);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📖 Swagger UI em http://{}/swagger-ui", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(app_state: AppState) -> Router {
    let table_routes = Router::new()
        .route("/", get(handlers::tables::list_tables))
        .route("/{table_id}/status", put(handlers::tables::update_table_status))
        .route("/{table_id}/orders", post(handlers::tables::place_order))
        .route("/{table_id}/qrcode", get(handlers::tables::table_qrcode));

    let order_routes = Router::new()
        .route("/", get(handlers::orders::list_orders))
        .route("/{order_id}/advance", post(handlers::orders::advance_order))
        .route("/{order_id}/status", put(handlers::orders::update_order_status));

    let dashboard_routes = Router::new()
        .route("/waste-by-item", get(handlers::dashboard::waste_by_item))
        .route("/waste-by-stage", get(handlers::dashboard::waste_by_stage))
        .route("/feedback", get(handlers::dashboard::feedback_entries))
        .route("/prediction", get(handlers::dashboard::refresh_prediction))
        .route("/prediction/current", get(handlers::dashboard::current_prediction));

    let visual_waste_routes = Router::new()
        .route("/", get(handlers::waste::list_visual_waste_logs))
        .route("/latest", get(handlers::waste::latest_visual_waste_log))
        .route(
            "/analyze",
            post(handlers::waste::analyze_waste_image).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        );

    let feedback_routes = Router::new()
        .route(
            "/",
            post(handlers::feedback::submit_feedback)
            .get(handlers::feedback::list_feedback),
        )
        .route("/greeting/{table_id}", get(handlers::feedback::feedback_greeting));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/menu", get(handlers::tables::list_menu))
        .route("/api/kitchen/tickets", get(handlers::orders::kitchen_tickets))
        .route("/api/ai/status", get(handlers::dashboard::ai_status))
        .route(
            "/api/waste-logs",
            post(handlers::waste::create_waste_log)
            .get(handlers::waste::list_waste_logs),
        )
        .nest("/api/tables", table_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/visual-waste-logs", visual_waste_routes)
        .nest("/api/feedback", feedback_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
