// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Idiomas que temos mensagens traduzidas
const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "pt"];
const DEFAULT_LANGUAGE: &str = "en";

// Extrator de idioma: lê o Accept-Language e guarda só o código base ("pt-BR" -> "pt").
pub struct Locale(pub String);

impl Locale {
    pub fn is_portuguese(&self) -> bool {
        self.0 == "pt"
    }

    fn from_header(header_str: &str) -> Self {
        let lang = accept_language::intersection(header_str, &SUPPORTED_LANGUAGES)
            .into_iter()
            .next()
            .or_else(|| {
                // "pt-BR" não casa com "pt" na interseção, então tentamos pelo prefixo
                accept_language::parse(header_str)
                    .into_iter()
                    .filter_map(|tag| tag.split('-').next().map(str::to_lowercase))
                    .find(|base| SUPPORTED_LANGUAGES.contains(&base.as_str()))
            })
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_else(|| Locale(DEFAULT_LANGUAGE.to_string()));

        Ok(locale)
    }
}
