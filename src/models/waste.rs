// src/models/waste.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Registro manual de desperdício ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteLog {
    #[schema(example = "WL-1b4e28ba-2fa1-11d2-883f-0016d3cca427")]
    pub id: String,
    #[schema(value_type = String, example = "2024-01-01")]
    pub date: NaiveDate,
    #[schema(example = 2)]
    pub menu_item_id: u32,
    #[schema(example = 3.0)]
    pub wasted_amount_kg: f64,
    #[schema(example = "Spoilage")]
    pub reason: String,
}

/// Dados de entrada de um registro, antes de receber o id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWasteLog {
    pub date: NaiveDate,
    pub menu_item_id: u32,
    pub wasted_amount_kg: f64,
    pub reason: String,
}

// --- Análise visual (IA) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualWasteAnalysis {
    pub identified_items: Vec<String>,
    #[schema(example = 0.3)]
    pub waste_estimate_kg: f64,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualWasteLog {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub image_base64: String,
    pub notes: Option<String>,
    pub analysis: VisualWasteAnalysis,
}

#[derive(Debug, Clone)]
pub struct NewVisualWasteLog {
    pub image_base64: String,
    pub notes: Option<String>,
    pub analysis: VisualWasteAnalysis,
}
