// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{middleware::i18n::Locale, models::order::OrderStatus};

// Erros de domínio. Nenhum deles carrega texto de usuário:
// a mensagem final é escolhida em `to_api_error` conforme o idioma.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Mesa {0} não encontrada")]
    TableNotFound(u32),

    #[error("Pedido {0} não encontrado")]
    OrderNotFound(String),

    #[error("Item do cardápio {0} não encontrado")]
    MenuItemNotFound(u32),

    #[error("Pedido sem itens")]
    EmptyOrder,

    #[error("Quantidade do item {0} excede o limite")]
    QuantityTooLarge(u32),

    #[error("Transição de pedido inválida: {from} -> {to}")]
    InvalidOrderTransition { from: OrderStatus, to: OrderStatus },

    #[error("Imagem inválida: {0}")]
    InvalidImage(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que efetivamente sai na resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let pt = locale.is_portuguese();
        let pick = |en: String, pt_msg: String| if pt { pt_msg } else { en };

        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .map(Value::String)
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: pick(
                        "One or more fields are invalid.".into(),
                        "Um ou mais campos são inválidos.".into(),
                    ),
                    details: Some(Value::Object(details)),
                }
            }
            AppError::TableNotFound(id) => ApiError::new(
                StatusCode::NOT_FOUND,
                pick(format!("Table {} not found.", id), format!("Mesa {} não encontrada.", id)),
            ),
            AppError::OrderNotFound(id) => ApiError::new(
                StatusCode::NOT_FOUND,
                pick(format!("Order {} not found.", id), format!("Pedido {} não encontrado.", id)),
            ),
            AppError::MenuItemNotFound(id) => ApiError::new(
                StatusCode::NOT_FOUND,
                pick(
                    format!("Menu item {} not found.", id),
                    format!("Item do cardápio {} não encontrado.", id),
                ),
            ),
            AppError::EmptyOrder => ApiError::new(
                StatusCode::BAD_REQUEST,
                pick(
                    "An order needs at least one item with quantity above zero.".into(),
                    "O pedido precisa de pelo menos um item com quantidade maior que zero.".into(),
                ),
            ),
            AppError::QuantityTooLarge(id) => ApiError::new(
                StatusCode::BAD_REQUEST,
                pick(
                    format!("Quantity for menu item {} is too large.", id),
                    format!("A quantidade do item {} do cardápio é grande demais.", id),
                ),
            ),
            AppError::InvalidOrderTransition { from, to } => ApiError::new(
                StatusCode::CONFLICT,
                pick(
                    format!("Order cannot move from {} to {}.", from, to),
                    format!("O pedido não pode passar de {} para {}.", from, to),
                ),
            ),
            AppError::InvalidImage(reason) => ApiError::new(
                StatusCode::BAD_REQUEST,
                pick(
                    format!("Invalid image: {}.", reason),
                    format!("Imagem inválida: {}.", reason),
                ),
            ),
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:#}", e);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    pick(
                        "An unexpected error occurred.".into(),
                        "Ocorreu um erro inesperado.".into(),
                    ),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_the_request_language() {
        let en = AppError::TableNotFound(99).to_api_error(&Locale("en".into()));
        assert_eq!(en.status, StatusCode::NOT_FOUND);
        assert_eq!(en.message, "Table 99 not found.");

        let pt = AppError::TableNotFound(99).to_api_error(&Locale("pt".into()));
        assert_eq!(pt.message, "Mesa 99 não encontrada.");
    }

    #[test]
    fn backward_transition_is_a_conflict() {
        let err = AppError::InvalidOrderTransition {
            from: OrderStatus::Served,
            to: OrderStatus::Preparing,
        }
        .to_api_error(&Locale("en".into()));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Order cannot move from Served to Preparing.");
    }
}
