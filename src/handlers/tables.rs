// src/handlers/tables.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        menu::MenuItem,
        order::{Order, OrderItem},
        table::{Table, TableStatus},
    },
};

// =============================================================================
//  1. MAPA DE MESAS
// =============================================================================

// GET /api/tables
#[utoipa::path(
    get,
    path = "/api/tables",
    tag = "Tables",
    responses(
        (status = 200, description = "Todas as mesas do salão", body = Vec<Table>)
    )
)]
pub async fn list_tables(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.floor_service.list_tables())
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableStatusPayload {
    #[schema(example = "Reserved")]
    pub status: TableStatus,
}

// PUT /api/tables/{table_id}/status
#[utoipa::path(
    put,
    path = "/api/tables/{table_id}/status",
    tag = "Tables",
    request_body = UpdateTableStatusPayload,
    responses(
        (status = 200, description = "Status da mesa atualizado", body = Table),
        (status = 404, description = "Mesa não encontrada")
    ),
    params(
        ("table_id" = u32, Path, description = "Número da mesa")
    )
)]
pub async fn update_table_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(table_id): Path<u32>,
    Json(payload): Json<UpdateTableStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {

    let table = app_state
        .floor_service
        .set_table_status(table_id, payload.status)
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(table)))
}

// =============================================================================
//  2. PEDIDO NA MESA
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderPayload {
    #[validate(length(min = 1, message = "required"))]
    pub items: Vec<OrderItem>,
}

// POST /api/tables/{table_id}/orders
#[utoipa::path(
    post,
    path = "/api/tables/{table_id}/orders",
    tag = "Tables",
    request_body = PlaceOrderPayload,
    responses(
        (status = 201, description = "Pedido criado em Preparing e mesa ocupada", body = Order),
        (status = 400, description = "Pedido sem itens"),
        (status = 404, description = "Mesa ou prato não encontrado")
    ),
    params(
        ("table_id" = u32, Path, description = "Número da mesa")
    )
)]
pub async fn place_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(table_id): Path<u32>,
    Json(payload): Json<PlaceOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let order = app_state
        .floor_service
        .place_order(table_id, payload.items)
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// =============================================================================
//  3. QR CODE DE FEEDBACK
// =============================================================================

// GET /api/tables/{table_id}/qrcode
#[utoipa::path(
    get,
    path = "/api/tables/{table_id}/qrcode",
    tag = "Tables",
    responses(
        (status = 200, description = "PNG com o link do formulário de feedback da mesa", content_type = "image/png"),
        (status = 404, description = "Mesa não encontrada")
    ),
    params(
        ("table_id" = u32, Path, description = "Número da mesa")
    )
)]
pub async fn table_qrcode(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(table_id): Path<u32>,
) -> Result<Response, ApiError> {

    if app_state.store.table(table_id).is_none() {
        return Err(AppError::TableNotFound(table_id).to_api_error(&locale));
    }

    let png = app_state
        .qrcode_service
        .render_feedback_png(table_id)
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"mesa_{}_feedback.png\"", table_id),
        ),
    ];

    Ok((headers, png).into_response())
}

// =============================================================================
//  4. CARDÁPIO
// =============================================================================

// GET /api/menu
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "Tables",
    responses(
        (status = 200, description = "Cardápio fixo", body = Vec<MenuItem>)
    )
)]
pub async fn list_menu(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.floor_service.menu())
}
