// src/services/floor_service.rs

// Mapa de mesas, pedidos e o quadro da cozinha (KOT).

use crate::{
    common::error::AppError,
    models::{
        menu::MenuItem,
        order::{KitchenTicket, KitchenTicketLine, Order, OrderItem, OrderStatus},
        table::{Table, TableStatus},
    },
    store::AppStore,
};

#[derive(Clone)]
pub struct FloorService {
    store: AppStore,
}

impl FloorService {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        self.store.menu().to_vec()
    }

    // --- MESAS ---

    pub fn list_tables(&self) -> Vec<Table> {
        self.store.tables()
    }

    pub fn set_table_status(&self, table_id: u32, status: TableStatus) -> Result<Table, AppError> {
        let table = self.store.update_table_status(table_id, status)?;
        tracing::info!("Mesa {} agora está {:?}", table_id, status);
        Ok(table)
    }

    // --- PEDIDOS ---

    pub fn place_order(&self, table_id: u32, items: Vec<OrderItem>) -> Result<Order, AppError> {
        let order = self.store.add_order(table_id, items)?;
        tracing::info!(
            "🧾 Pedido {} aberto na mesa {} ({} itens distintos)",
            order.id,
            table_id,
            order.items.len()
        );
        Ok(order)
    }

    pub fn list_orders(&self) -> Vec<Order> {
        self.store.orders()
    }

    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order, AppError> {
        let order = self.store.update_order_status(order_id, status)?;
        tracing::info!("Pedido {} -> {}", order.id, order.status);
        Ok(order)
    }

    pub fn advance_order(&self, order_id: &str) -> Result<Order, AppError> {
        let order = self.store.advance_order(order_id)?;
        tracing::info!("Pedido {} -> {}", order.id, order.status);
        Ok(order)
    }

    // --- COZINHA ---

    /// Pedidos em preparo ou prontos, do mais antigo para o mais novo.
    pub fn kitchen_tickets(&self) -> Vec<KitchenTicket> {
        let mut active: Vec<Order> = self
            .store
            .orders()
            .into_iter()
            .filter(|o| o.status.is_active())
            .collect();
        active.sort_by_key(|o| o.created_at);

        active
            .into_iter()
            .map(|order| KitchenTicket {
                lines: order
                    .items
                    .iter()
                    .map(|item| KitchenTicketLine {
                        name: self
                            .store
                            .menu_item(item.menu_item_id)
                            .map(|mi| mi.name.clone())
                            .unwrap_or_else(|| "Unknown Item".to_string()),
                        quantity: item.quantity,
                    })
                    .collect(),
                order_id: order.id,
                table_id: order.table_id,
                status: order.status,
                created_at: order.created_at,
            })
            .collect()
    }
}
