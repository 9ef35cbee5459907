// src/models/menu.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MenuCategory {
    Appetizer,
    #[serde(rename = "Main Course")]
    MainCourse,
    Dessert,
    Beverage,
}

// Catálogo estático: carregado na inicialização e nunca alterado.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[schema(example = 2)]
    pub id: u32,
    #[schema(example = "Chicken Biryani")]
    pub name: String,
    #[schema(example = "450.00")]
    pub price: Decimal,
    pub category: MenuCategory,
}
