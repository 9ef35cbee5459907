// src/store/mod.rs

// Estado do salão em memória. É a única fonte da verdade: todos os serviços
// leem e escrevem por aqui. Nada é persistido; reiniciar o processo zera tudo.

pub mod seed;

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    common::{
        error::AppError,
        ids::{self, new_id},
    },
    models::{
        feedback::{Feedback, NewFeedback},
        menu::MenuItem,
        order::{Order, OrderItem, OrderStatus},
        table::{Table, TableStatus},
        waste::{NewVisualWasteLog, NewWasteLog, VisualWasteAnalysis, VisualWasteLog, WasteLog},
    },
};

#[derive(Debug, Default, Clone)]
pub struct StoreState {
    pub tables: Vec<Table>,
    pub orders: Vec<Order>,
    pub waste_logs: Vec<WasteLog>,
    pub feedback: Vec<Feedback>,
    pub visual_waste_logs: Vec<VisualWasteLog>,
}

/// Entradas da previsão de desperdício, lidas sob um único lock.
#[derive(Debug, Clone)]
pub struct PredictionInputs {
    pub waste_logs: Vec<WasteLog>,
    pub feedback: Vec<Feedback>,
    /// Só as análises: as fotos em base64 não entram no prompt.
    pub visual_analyses: Vec<VisualWasteAnalysis>,
}

#[derive(Clone)]
pub struct AppStore {
    menu: Arc<Vec<MenuItem>>,
    state: Arc<RwLock<StoreState>>,
}

impl AppStore {
    /// Estado de demonstração: mesas livres, cardápio fixo e o histórico inicial.
    pub fn seeded(table_count: u32) -> Self {
        Self::with_state(
            seed::menu_items(),
            StoreState {
                tables: seed::tables(table_count),
                waste_logs: seed::waste_logs(),
                feedback: seed::feedback(),
                ..Default::default()
            },
        )
    }

    pub fn with_state(menu: Vec<MenuItem>, state: StoreState) -> Self {
        Self {
            menu: Arc::new(menu),
            state: Arc::new(RwLock::new(state)),
        }
    }

    // =========================================================================
    // Leitura (snapshots)
    // =========================================================================

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn menu_item(&self, id: u32) -> Option<&MenuItem> {
        self.menu.iter().find(|item| item.id == id)
    }

    pub fn tables(&self) -> Vec<Table> {
        self.state.read().tables.clone()
    }

    pub fn table(&self, table_id: u32) -> Option<Table> {
        self.state.read().tables.iter().find(|t| t.id == table_id).cloned()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.state.read().orders.clone()
    }

    pub fn waste_logs(&self) -> Vec<WasteLog> {
        self.state.read().waste_logs.clone()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.state.read().feedback.clone()
    }

    pub fn visual_waste_logs(&self) -> Vec<VisualWasteLog> {
        self.state.read().visual_waste_logs.clone()
    }

    pub fn latest_visual_waste_log(&self) -> Option<VisualWasteLog> {
        self.state.read().visual_waste_logs.last().cloned()
    }

    pub fn prediction_inputs(&self) -> PredictionInputs {
        let state = self.state.read();
        PredictionInputs {
            waste_logs: state.waste_logs.clone(),
            feedback: state.feedback.clone(),
            visual_analyses: state
                .visual_waste_logs
                .iter()
                .map(|log| log.analysis.clone())
                .collect(),
        }
    }

    /// Pedido mais recente da mesa (pelo `created_at`).
    pub fn latest_order_for_table(&self, table_id: u32) -> Option<Order> {
        self.state
            .read()
            .orders
            .iter()
            .filter(|o| o.table_id == table_id)
            .max_by_key(|o| o.created_at)
            .cloned()
    }

    // =========================================================================
    // Mutações
    // =========================================================================

    pub fn update_table_status(&self, table_id: u32, status: TableStatus) -> Result<Table, AppError> {
        let mut state = self.state.write();
        let table = state
            .tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or(AppError::TableNotFound(table_id))?;

        table.status = status;
        Ok(table.clone())
    }

    /// Cria o pedido em `Preparing` e ocupa a mesa.
    ///
    /// Linhas com quantidade zero são descartadas e ids repetidos são somados,
    /// então o pedido final tem uma linha por prato distinto.
    pub fn add_order(&self, table_id: u32, items: Vec<OrderItem>) -> Result<Order, AppError> {
        let mut merged: Vec<OrderItem> = Vec::new();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            if self.menu_item(item.menu_item_id).is_none() {
                return Err(AppError::MenuItemNotFound(item.menu_item_id));
            }
            match merged.iter_mut().find(|m| m.menu_item_id == item.menu_item_id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(item.quantity)
                        .ok_or(AppError::QuantityTooLarge(item.menu_item_id))?;
                }
                None => merged.push(item),
            }
        }

        if merged.is_empty() {
            return Err(AppError::EmptyOrder);
        }

        let mut state = self.state.write();
        let table = state
            .tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or(AppError::TableNotFound(table_id))?;
        table.status = TableStatus::Occupied;

        let order = Order {
            id: new_id(ids::ORDER_PREFIX),
            table_id,
            items: merged,
            status: OrderStatus::Preparing,
            created_at: Utc::now(),
        };
        state.orders.push(order.clone());

        Ok(order)
    }

    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order, AppError> {
        let mut state = self.state.write();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| AppError::OrderNotFound(order_id.to_string()))?;

        if !order.status.can_transition_to(status) {
            return Err(AppError::InvalidOrderTransition {
                from: order.status,
                to: status,
            });
        }

        order.status = status;
        Ok(order.clone())
    }

    /// Avança um passo (botões "Mark as Ready" / "Mark as Served" da cozinha).
    pub fn advance_order(&self, order_id: &str) -> Result<Order, AppError> {
        let mut state = self.state.write();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| AppError::OrderNotFound(order_id.to_string()))?;

        let next = order.status.next().ok_or(AppError::InvalidOrderTransition {
            from: order.status,
            to: order.status,
        })?;

        order.status = next;
        Ok(order.clone())
    }

    pub fn add_waste_log(&self, log: NewWasteLog) -> Result<WasteLog, AppError> {
        if self.menu_item(log.menu_item_id).is_none() {
            return Err(AppError::MenuItemNotFound(log.menu_item_id));
        }

        let entry = WasteLog {
            id: new_id(ids::WASTE_LOG_PREFIX),
            date: log.date,
            menu_item_id: log.menu_item_id,
            wasted_amount_kg: log.wasted_amount_kg,
            reason: log.reason,
        };
        self.state.write().waste_logs.push(entry.clone());

        Ok(entry)
    }

    pub fn add_feedback(&self, feedback: NewFeedback) -> Result<Feedback, AppError> {
        if self.menu_item(feedback.menu_item_id).is_none() {
            return Err(AppError::MenuItemNotFound(feedback.menu_item_id));
        }

        let mut state = self.state.write();
        if !state.tables.iter().any(|t| t.id == feedback.table_id) {
            return Err(AppError::TableNotFound(feedback.table_id));
        }

        let entry = Feedback {
            id: new_id(ids::FEEDBACK_PREFIX),
            table_id: feedback.table_id,
            menu_item_id: feedback.menu_item_id,
            taste_rating: feedback.taste_rating,
            portion_feedback: feedback.portion_feedback,
            comment: feedback.comment,
        };
        state.feedback.push(entry.clone());

        Ok(entry)
    }

    pub fn add_visual_waste_log(&self, log: NewVisualWasteLog) -> VisualWasteLog {
        let entry = VisualWasteLog {
            id: new_id(ids::VISUAL_WASTE_LOG_PREFIX),
            created_at: Utc::now(),
            image_base64: log.image_base64,
            notes: log.notes,
            analysis: log.analysis,
        };
        self.state.write().visual_waste_logs.push(entry.clone());

        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{feedback::PortionFeedback, waste::VisualWasteAnalysis};
    use chrono::NaiveDate;

    fn store() -> AppStore {
        AppStore::seeded(seed::DEFAULT_TABLE_COUNT)
    }

    fn line(menu_item_id: u32, quantity: u32) -> OrderItem {
        OrderItem { menu_item_id, quantity }
    }

    #[test]
    fn seeded_store_starts_with_free_tables_and_demo_history() {
        let store = store();
        let tables = store.tables();
        assert_eq!(tables.len(), 12);
        assert!(tables.iter().all(|t| t.status == TableStatus::Free));
        assert_eq!(tables.first().map(|t| t.id), Some(1));
        assert_eq!(store.waste_logs().len(), 4);
        assert_eq!(store.feedback().len(), 3);
        assert!(store.orders().is_empty());
        assert_eq!(store.menu().len(), 8);
    }

    #[test]
    fn table_status_changes_only_the_target_table() {
        let store = store();
        let updated = store.update_table_status(3, TableStatus::NeedsCleaning).unwrap();
        assert_eq!(updated.status, TableStatus::NeedsCleaning);

        let tables = store.tables();
        assert_eq!(tables.iter().filter(|t| t.status == TableStatus::NeedsCleaning).count(), 1);
        assert_eq!(store.table(3).unwrap().status, TableStatus::NeedsCleaning);
    }

    #[test]
    fn unknown_table_is_rejected() {
        let err = store().update_table_status(42, TableStatus::Reserved).unwrap_err();
        assert!(matches!(err, AppError::TableNotFound(42)));
    }

    #[test]
    fn placing_an_order_keeps_positive_lines_and_occupies_the_table() {
        let store = store();
        let order = store
            .add_order(4, vec![line(1, 2), line(3, 0), line(5, 1)])
            .unwrap();

        assert_eq!(order.items, vec![line(1, 2), line(5, 1)]);
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.table_id, 4);
        assert!(order.id.starts_with("ORD-"));
        assert_eq!(store.table(4).unwrap().status, TableStatus::Occupied);
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn repeated_menu_items_are_merged_into_one_line() {
        let order = store().add_order(1, vec![line(2, 1), line(6, 2), line(2, 3)]).unwrap();
        assert_eq!(order.items, vec![line(2, 4), line(6, 2)]);
    }

    #[test]
    fn merged_quantity_overflow_is_rejected_and_nothing_is_stored() {
        let store = store();
        let err = store.add_order(1, vec![line(1, u32::MAX), line(1, 1)]).unwrap_err();
        assert!(matches!(err, AppError::QuantityTooLarge(1)));
        assert!(store.orders().is_empty());
        assert_eq!(store.table(1).unwrap().status, TableStatus::Free);
    }

    #[test]
    fn order_without_positive_quantities_is_rejected_and_table_untouched() {
        let store = store();
        let err = store.add_order(2, vec![line(1, 0)]).unwrap_err();
        assert!(matches!(err, AppError::EmptyOrder));
        assert_eq!(store.table(2).unwrap().status, TableStatus::Free);
        assert!(store.orders().is_empty());
    }

    #[test]
    fn order_with_unknown_dish_is_rejected() {
        let err = store().add_order(2, vec![line(99, 1)]).unwrap_err();
        assert!(matches!(err, AppError::MenuItemNotFound(99)));
    }

    #[test]
    fn order_status_only_moves_forward() {
        let store = store();
        let order = store.add_order(1, vec![line(1, 1)]).unwrap();

        let err = store.update_order_status(&order.id, OrderStatus::Served).unwrap_err();
        assert!(matches!(err, AppError::InvalidOrderTransition { .. }));

        let ready = store.update_order_status(&order.id, OrderStatus::Ready).unwrap();
        assert_eq!(ready.status, OrderStatus::Ready);

        let err = store.update_order_status(&order.id, OrderStatus::Preparing).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidOrderTransition { from: OrderStatus::Ready, to: OrderStatus::Preparing }
        ));

        let served = store.advance_order(&order.id).unwrap();
        assert_eq!(served.status, OrderStatus::Served);
        assert!(store.advance_order(&order.id).is_err());
    }

    #[test]
    fn unknown_order_is_reported() {
        let err = store().advance_order("ORD-missing").unwrap_err();
        assert!(matches!(err, AppError::OrderNotFound(id) if id == "ORD-missing"));
    }

    #[test]
    fn adding_a_waste_log_appends_exactly_one_entry_with_fields_unchanged() {
        let store = store();
        let before = store.waste_logs().len();

        let log = store
            .add_waste_log(NewWasteLog {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                menu_item_id: 2,
                wasted_amount_kg: 3.0,
                reason: "Spoilage".into(),
            })
            .unwrap();

        let logs = store.waste_logs();
        assert_eq!(logs.len(), before + 1);
        assert_eq!(logs.last(), Some(&log));
        assert!(log.id.starts_with("WL-"));
        assert_eq!(log.date.to_string(), "2024-01-01");
        assert_eq!(log.menu_item_id, 2);
        assert_eq!(log.wasted_amount_kg, 3.0);
        assert_eq!(log.reason, "Spoilage");
    }

    #[test]
    fn feedback_is_appended_with_generated_id() {
        let store = store();
        let fb = store
            .add_feedback(NewFeedback {
                table_id: 3,
                menu_item_id: 5,
                taste_rating: 5,
                portion_feedback: PortionFeedback::TooSmall,
                comment: None,
            })
            .unwrap();

        assert!(fb.id.starts_with("FB-"));
        assert_eq!(store.feedback().last(), Some(&fb));
    }

    #[test]
    fn latest_order_for_table_picks_newest() {
        let store = store();
        store.add_order(6, vec![line(1, 1)]).unwrap();
        let newer = store.add_order(6, vec![line(8, 2)]).unwrap();
        store.add_order(7, vec![line(2, 1)]).unwrap();

        let latest = store.latest_order_for_table(6).unwrap();
        assert_eq!(latest.items, newer.items);
        assert!(store.latest_order_for_table(9).is_none());
    }

    #[test]
    fn visual_waste_logs_get_id_and_timestamp() {
        let store = store();
        let log = store.add_visual_waste_log(NewVisualWasteLog {
            image_base64: "aGVsbG8=".into(),
            notes: Some("half eaten".into()),
            analysis: VisualWasteAnalysis {
                identified_items: vec!["Rice".into()],
                waste_estimate_kg: 0.2,
                suggestion: "Smaller rice portions.".into(),
            },
        });

        assert!(log.id.starts_with("VWL-"));
        assert_eq!(store.visual_waste_logs().len(), 1);
        assert_eq!(store.latest_visual_waste_log().map(|l| l.id), Some(log.id));
    }

    #[test]
    fn prediction_inputs_carry_analyses_only() {
        let store = store();
        assert!(store.latest_visual_waste_log().is_none());

        for (image, kg) in [("Zmlyc3Q=", 0.1), ("c2Vjb25k", 0.4)] {
            store.add_visual_waste_log(NewVisualWasteLog {
                image_base64: image.into(),
                notes: None,
                analysis: VisualWasteAnalysis {
                    identified_items: vec!["Naan".into()],
                    waste_estimate_kg: kg,
                    suggestion: "Bake fewer naans.".into(),
                },
            });
        }

        let inputs = store.prediction_inputs();
        let estimates: Vec<f64> = inputs.visual_analyses.iter().map(|a| a.waste_estimate_kg).collect();
        assert_eq!(estimates, vec![0.1, 0.4]);
        assert_eq!(store.latest_visual_waste_log().map(|l| l.image_base64), Some("c2Vjb25k".to_string()));
    }
}
