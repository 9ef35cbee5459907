// src/models/table.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Uma mesa está sempre em exatamente um destes estados.
// A ordem não é rígida: qualquer estado pode ir para qualquer outro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TableStatus {
    Free,
    Occupied,
    Reserved,
    #[serde(rename = "Needs Cleaning")]
    NeedsCleaning,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[schema(example = 4)]
    pub id: u32,
    pub status: TableStatus,
}
