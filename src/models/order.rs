// src/models/order.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Enums ---

/// Ciclo de vida de um pedido na cozinha. Só avança: Preparing -> Ready -> Served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Preparing,
    Ready,
    Served,
}

impl OrderStatus {
    /// Próximo estado permitido, ou `None` se o pedido já foi servido.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => None,
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Pedidos que ainda aparecem no quadro da cozinha (KOT).
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Preparing | OrderStatus::Ready)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Served => "Served",
        };
        f.write_str(label)
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[schema(example = 2)]
    pub menu_item_id: u32,
    #[schema(example = 3)]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = "ORD-5f0c8e8a-6a1d-4a3e-9a57-1f7d2f0f1c11")]
    pub id: String,
    #[schema(example = 4)]
    pub table_id: u32,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// Visão da cozinha de um pedido ativo, com nomes já resolvidos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicketLine {
    #[schema(example = "Dal Makhani")]
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub order_id: String,
    pub table_id: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<KitchenTicketLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_moves_one_step_forward() {
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Served));

        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Served));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Served.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Ready));
        assert_eq!(OrderStatus::Served.next(), None);
    }
}
