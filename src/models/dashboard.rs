// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{ai::AiPredictionResult, feedback::Feedback};

// 1. Gráfico de barras: desperdício acumulado por prato
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteByItemEntry {
    #[schema(example = "Chicken Biryani")]
    pub name: String,
    #[schema(example = 5.0)]
    pub waste: f64,
}

// 2. Gráfico de pizza: desperdício por etapa (Kitchen / Plate / Buffet)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteByStageEntry {
    #[schema(example = "Kitchen")]
    pub name: String,
    pub value: f64,
}

// 3. Lista de feedback com o nome do prato resolvido
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    #[serde(flatten)]
    pub feedback: Feedback,
    #[schema(example = "Dal Makhani")]
    pub item_name: String,
}

// 4. Previsão da IA, marcada com o id da requisição que a gerou
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    #[schema(example = 7)]
    pub request_id: u64,
    /// `true` quando uma requisição mais nova já publicou o seu resultado.
    pub stale: bool,
    #[serde(flatten)]
    pub result: AiPredictionResult,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GreetingResponse {
    pub table_id: u32,
    #[schema(example = "Your opinion helps us improve.")]
    pub greeting: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiStatus {
    #[schema(example = "gemini-2.5-flash")]
    pub model: String,
    pub api_key_configured: bool,
    pub image_analysis_fallbacks: u64,
    pub prediction_fallbacks: u64,
    pub greeting_fallbacks: u64,
}
