// src/services/mod.rs

pub mod ai_service;
pub mod dashboard_service;
pub mod feedback_service;
pub mod floor_service;
pub mod gemini_client;
pub mod prompts;
pub mod qrcode_service;
pub mod waste_service;

#[cfg(test)]
pub(crate) mod testing;
