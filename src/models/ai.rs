// src/models/ai.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// O modelo às vezes devolve em minúsculas, por isso os aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Confidence {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[schema(example = "Chicken Biryani")]
    pub item_name: String,
    #[schema(example = 18.0)]
    pub suggested_qty_kg: f64,
    pub reasoning: String,
    pub confidence: Confidence,
}

/// Resultado efêmero da previsão de demanda; recalculado a cada carga do dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiPredictionResult {
    pub predictions: Vec<Prediction>,
    pub menu_suggestion: String,
    pub customer_feedback_insights: String,
}
