// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::dashboard::{AiStatus, FeedbackEntry, PredictionResponse, WasteByItemEntry, WasteByStageEntry},
};

// GET /api/dashboard/waste-by-item
#[utoipa::path(
    get,
    path = "/api/dashboard/waste-by-item",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Desperdício acumulado por prato (gráfico de barras)", body = Vec<WasteByItemEntry>)
    )
)]
pub async fn waste_by_item(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.dashboard_service.waste_by_item())
}

// GET /api/dashboard/waste-by-stage
#[utoipa::path(
    get,
    path = "/api/dashboard/waste-by-stage",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Desperdício por etapa: Kitchen, Plate, Buffet (gráfico de pizza)", body = Vec<WasteByStageEntry>)
    )
)]
pub async fn waste_by_stage(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.dashboard_service.waste_by_stage())
}

// GET /api/dashboard/feedback
#[utoipa::path(
    get,
    path = "/api/dashboard/feedback",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Feedback dos clientes, mais recente primeiro", body = Vec<FeedbackEntry>)
    )
)]
pub async fn feedback_entries(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.dashboard_service.feedback_entries())
}

// GET /api/dashboard/prediction
#[utoipa::path(
    get,
    path = "/api/dashboard/prediction",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Nova previsão da IA (sempre responde; usa fallback se a IA falhar)", body = PredictionResponse)
    )
)]
pub async fn refresh_prediction(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.dashboard_service.refresh_prediction().await)
}

// GET /api/dashboard/prediction/current
#[utoipa::path(
    get,
    path = "/api/dashboard/prediction/current",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Última previsão publicada, sem chamar a IA (null se nenhuma)", body = PredictionResponse)
    )
)]
pub async fn current_prediction(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.dashboard_service.current_prediction())
}

// GET /api/ai/status
#[utoipa::path(
    get,
    path = "/api/ai/status",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Modelo em uso e quantas vezes cada chamada caiu no fallback", body = AiStatus)
    )
)]
pub async fn ai_status(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.ai_service.status())
}
