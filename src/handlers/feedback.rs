// src/handlers/feedback.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
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
        dashboard::GreetingResponse,
        feedback::{Feedback, NewFeedback, PortionFeedback},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackPayload {
    #[schema(example = 4)]
    pub table_id: u32,

    #[schema(example = 2)]
    pub menu_item_id: u32,

    #[validate(range(min = 1, max = 5, message = "A nota deve estar entre 1 e 5."))]
    #[schema(example = 5)]
    pub taste_rating: u8,

    pub portion_feedback: PortionFeedback,

    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

// POST /api/feedback
#[utoipa::path(
    post,
    path = "/api/feedback",
    tag = "Feedback",
    request_body = SubmitFeedbackPayload,
    responses(
        (status = 201, description = "Feedback registrado", body = Feedback),
        (status = 400, description = "Nota fora de 1..5"),
        (status = 404, description = "Mesa ou prato não encontrado")
    )
)]
pub async fn submit_feedback(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SubmitFeedbackPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let comment = payload
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let feedback = app_state
        .feedback_service
        .submit(NewFeedback {
            table_id: payload.table_id,
            menu_item_id: payload.menu_item_id,
            taste_rating: payload.taste_rating,
            portion_feedback: payload.portion_feedback,
            comment,
        })
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

// GET /api/feedback
#[utoipa::path(
    get,
    path = "/api/feedback",
    tag = "Feedback",
    responses(
        (status = 200, description = "Feedback na ordem de chegada", body = Vec<Feedback>)
    )
)]
pub async fn list_feedback(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.feedback_service.list())
}

// GET /api/feedback/greeting/{table_id}
#[utoipa::path(
    get,
    path = "/api/feedback/greeting/{table_id}",
    tag = "Feedback",
    responses(
        (status = 200, description = "Saudação personalizada com base no último pedido da mesa", body = GreetingResponse)
    ),
    params(
        ("table_id" = u32, Path, description = "Número da mesa")
    )
)]
pub async fn feedback_greeting(
    State(app_state): State<AppState>,
    Path(table_id): Path<u32>,
) -> impl IntoResponse {
    Json(app_state.feedback_service.greeting_for_table(table_id).await)
}
