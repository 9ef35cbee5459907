// src/config.rs

use std::{env, str::FromStr, sync::Arc};

use anyhow::Context;

use crate::{
    services::{
        ai_service::AiService,
        dashboard_service::DashboardService,
        feedback_service::FeedbackService,
        floor_service::FloorService,
        gemini_client::{GeminiClient, GenerativeModel},
        qrcode_service::QrCodeService,
        waste_service::WasteService,
    },
    store::{seed, AppStore},
};

#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub public_base_url: String,
    pub table_count: u32,
    pub ai: AiSettings,
}

impl Settings {
    /// Lê o `.env` (se existir) e as variáveis de ambiente.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // API_KEY é o nome antigo; GEMINI_API_KEY também é aceito
        let api_key = lookup("API_KEY").or_else(|| lookup("GEMINI_API_KEY"));

        Ok(Self {
            bind_addr: text("BIND_ADDR", "0.0.0.0:3000"),
            public_base_url: text("PUBLIC_BASE_URL", "http://localhost:5173"),
            table_count: parse_or(&lookup, "TABLE_COUNT", seed::DEFAULT_TABLE_COUNT)?,
            ai: AiSettings {
                api_key,
                model: text("GEMINI_MODEL", "gemini-2.5-flash"),
                base_url: text("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com"),
                timeout_secs: parse_or(&lookup, "AI_TIMEOUT_SECS", 30)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválido: {:?}", key, raw)),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: AppStore,
    pub ai_service: AiService,
    pub floor_service: FloorService,
    pub waste_service: WasteService,
    pub feedback_service: FeedbackService,
    pub dashboard_service: DashboardService,
    pub qrcode_service: QrCodeService,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let model = GeminiClient::new(&settings.ai)?;
        tracing::info!("🤖 Modelo de IA: {}", settings.ai.model);
        Ok(Self::with_model(settings, Arc::new(model)))
    }

    /// Monta o gráfico de dependências com um modelo qualquer (usado nos testes).
    pub fn with_model(settings: &Settings, model: Arc<dyn GenerativeModel>) -> Self {
        let store = AppStore::seeded(settings.table_count);
        let ai_service = AiService::new(model);

        Self {
            floor_service: FloorService::new(store.clone()),
            waste_service: WasteService::new(store.clone(), ai_service.clone()),
            feedback_service: FeedbackService::new(store.clone(), ai_service.clone()),
            dashboard_service: DashboardService::new(store.clone(), ai_service.clone()),
            qrcode_service: QrCodeService::new(&settings.public_base_url),
            ai_service,
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
        assert_eq!(settings.table_count, 12);
        assert_eq!(settings.ai.model, "gemini-2.5-flash");
        assert_eq!(settings.ai.timeout_secs, 30);
        assert!(settings.ai.api_key.is_none());
    }

    #[test]
    fn api_key_prefers_legacy_name() {
        let settings = Settings::from_lookup(lookup(&[("API_KEY", "a"), ("GEMINI_API_KEY", "b")])).unwrap();
        assert_eq!(settings.ai.api_key.as_deref(), Some("a"));

        let settings = Settings::from_lookup(lookup(&[("GEMINI_API_KEY", "b")])).unwrap();
        assert_eq!(settings.ai.api_key.as_deref(), Some("b"));
    }

    #[test]
    fn bad_numbers_are_startup_errors() {
        let err = Settings::from_lookup(lookup(&[("TABLE_COUNT", "doze")])).unwrap_err();
        assert!(err.to_string().contains("TABLE_COUNT"));
    }
}
