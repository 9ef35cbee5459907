// src/handlers/waste.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::waste::{NewWasteLog, VisualWasteLog, WasteLog},
};

// ---
// Registro manual
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWasteLogPayload {
    /// Se omitida, usa a data de hoje.
    #[schema(value_type = Option<String>, example = "2024-01-01")]
    pub date: Option<NaiveDate>,

    #[schema(example = 2)]
    pub menu_item_id: u32,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    #[schema(example = 3.0)]
    pub wasted_amount_kg: f64,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Spoilage")]
    pub reason: String,
}

// GET /api/waste-logs
#[utoipa::path(
    get,
    path = "/api/waste-logs",
    tag = "Waste",
    responses(
        (status = 200, description = "Registros de desperdício", body = Vec<WasteLog>)
    )
)]
pub async fn list_waste_logs(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.waste_service.list_waste_logs())
}

// POST /api/waste-logs
#[utoipa::path(
    post,
    path = "/api/waste-logs",
    tag = "Waste",
    request_body = CreateWasteLogPayload,
    responses(
        (status = 201, description = "Desperdício registrado", body = WasteLog),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Prato não encontrado")
    )
)]
pub async fn create_waste_log(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateWasteLogPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let log = app_state
        .waste_service
        .add_waste_log(NewWasteLog {
            date: payload.date.unwrap_or_else(|| Utc::now().date_naive()),
            menu_item_id: payload.menu_item_id,
            wasted_amount_kg: payload.wasted_amount_kg,
            reason: payload.reason,
        })
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(log)))
}

// ---
// Análise visual
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeWastePayload {
    /// Data URL (`data:image/jpeg;base64,...`) ou base64 puro.
    #[validate(length(min = 1, message = "required"))]
    pub image: String,

    #[schema(example = "Cliente disse que estava apimentado demais")]
    pub notes: Option<String>,
}

// POST /api/visual-waste-logs/analyze
#[utoipa::path(
    post,
    path = "/api/visual-waste-logs/analyze",
    tag = "Waste",
    request_body = AnalyzeWastePayload,
    responses(
        (status = 201, description = "Foto analisada pela IA e registrada (ou fallback, se a IA falhar)", body = VisualWasteLog),
        (status = 400, description = "Imagem inválida")
    )
)]
pub async fn analyze_waste_image(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<AnalyzeWastePayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let log = app_state
        .waste_service
        .analyze_and_record(&payload.image, payload.notes)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(log)))
}

// GET /api/visual-waste-logs
#[utoipa::path(
    get,
    path = "/api/visual-waste-logs",
    tag = "Waste",
    responses(
        (status = 200, description = "Análises visuais registradas", body = Vec<VisualWasteLog>)
    )
)]
pub async fn list_visual_waste_logs(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.waste_service.list_visual_logs())
}

// GET /api/visual-waste-logs/latest
#[utoipa::path(
    get,
    path = "/api/visual-waste-logs/latest",
    tag = "Waste",
    responses(
        (status = 200, description = "Última análise visual (null se ainda não houver)", body = VisualWasteLog)
    )
)]
pub async fn latest_visual_waste_log(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.waste_service.latest_visual_log())
}
