// src/common/ids.rs

use uuid::Uuid;

pub const ORDER_PREFIX: &str = "ORD";
pub const WASTE_LOG_PREFIX: &str = "WL";
pub const FEEDBACK_PREFIX: &str = "FB";
pub const VISUAL_WASTE_LOG_PREFIX: &str = "VWL";

/// Gera um id opaco `PREFIXO-<uuid v4>`.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}
