// src/services/waste_service.rs

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    common::error::AppError,
    models::waste::{NewVisualWasteLog, NewWasteLog, VisualWasteLog, WasteLog},
    services::ai_service::AiService,
    store::AppStore,
};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Imagem pronta para o modelo: base64 puro + mime type.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

/// Aceita um data URL (`data:image/png;base64,....`) ou base64 puro.
pub fn parse_image_payload(input: &str) -> Result<ImagePayload, AppError> {
    let input = input.trim();

    let (mime_type, data) = match input.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| AppError::InvalidImage("data URL without payload".into()))?;
            let mut pieces = header.split(';');
            let mime = pieces.next().filter(|m| !m.is_empty()).unwrap_or(DEFAULT_IMAGE_MIME);
            if !pieces.any(|p| p == "base64") {
                return Err(AppError::InvalidImage("data URL is not base64 encoded".into()));
            }
            if !mime.starts_with("image/") {
                return Err(AppError::InvalidImage(format!("unsupported media type {}", mime)));
            }
            (mime.to_string(), data)
        }
        None => (DEFAULT_IMAGE_MIME.to_string(), input),
    };

    let decoded = STANDARD
        .decode(data)
        .map_err(|e| AppError::InvalidImage(e.to_string()))?;
    if decoded.is_empty() {
        return Err(AppError::InvalidImage("empty image".into()));
    }

    Ok(ImagePayload {
        mime_type,
        data: data.to_string(),
    })
}

#[derive(Clone)]
pub struct WasteService {
    store: AppStore,
    ai: AiService,
}

impl WasteService {
    pub fn new(store: AppStore, ai: AiService) -> Self {
        Self { store, ai }
    }

    pub fn list_waste_logs(&self) -> Vec<WasteLog> {
        self.store.waste_logs()
    }

    pub fn add_waste_log(&self, log: NewWasteLog) -> Result<WasteLog, AppError> {
        let entry = self.store.add_waste_log(log)?;
        tracing::info!(
            "🗑️ Desperdício registrado: {}kg do item {} ({})",
            entry.wasted_amount_kg,
            entry.menu_item_id,
            entry.reason
        );
        Ok(entry)
    }

    pub fn list_visual_logs(&self) -> Vec<VisualWasteLog> {
        self.store.visual_waste_logs()
    }

    pub fn latest_visual_log(&self) -> Option<VisualWasteLog> {
        self.store.latest_visual_waste_log()
    }

    /// Analisa a foto do prato e grava o resultado como registro visual.
    pub async fn analyze_and_record(
        &self,
        image: &str,
        notes: Option<String>,
    ) -> Result<VisualWasteLog, AppError> {
        let payload = parse_image_payload(image)?;
        let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

        let analysis = self
            .ai
            .analyze_waste_image(&payload.data, &payload.mime_type, notes.as_deref())
            .await;

        let log = self.store.add_visual_waste_log(NewVisualWasteLog {
            image_base64: payload.data,
            notes,
            analysis,
        });
        tracing::info!(
            "📷 Análise visual {} gravada: {}kg estimados",
            log.id,
            log.analysis.waste_estimate_kg
        );
        Ok(log)
    }
}
