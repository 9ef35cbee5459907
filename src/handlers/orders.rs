// src/handlers/orders.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::order::{KitchenTicket, Order, OrderStatus},
};

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Kitchen",
    responses(
        (status = 200, description = "Todos os pedidos, inclusive os já servidos", body = Vec<Order>)
    )
)]
pub async fn list_orders(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.floor_service.list_orders())
}

// GET /api/kitchen/tickets
#[utoipa::path(
    get,
    path = "/api/kitchen/tickets",
    tag = "Kitchen",
    responses(
        (status = 200, description = "KOTs ativos (Preparing e Ready), do mais antigo ao mais novo", body = Vec<KitchenTicket>)
    )
)]
pub async fn kitchen_tickets(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.floor_service.kitchen_tickets())
}

// POST /api/orders/{order_id}/advance
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/advance",
    tag = "Kitchen",
    responses(
        (status = 200, description = "Pedido avançou um passo (Preparing -> Ready -> Served)", body = Order),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido já servido")
    ),
    params(
        ("order_id" = String, Path, description = "ID do Pedido")
    )
)]
pub async fn advance_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let order = app_state
        .floor_service
        .advance_order(&order_id)
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(order)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    #[schema(example = "Ready")]
    pub status: OrderStatus,
}

// PUT /api/orders/{order_id}/status
#[utoipa::path(
    put,
    path = "/api/orders/{order_id}/status",
    tag = "Kitchen",
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Order),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Transição fora da ordem Preparing -> Ready -> Served")
    ),
    params(
        ("order_id" = String, Path, description = "ID do Pedido")
    )
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(order_id): Path<String>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {

    let order = app_state
        .floor_service
        .update_order_status(&order_id, payload.status)
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(order)))
}
