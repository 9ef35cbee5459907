// src/services/feedback_service.rs

use crate::{
    common::error::AppError,
    models::{
        dashboard::GreetingResponse,
        feedback::{Feedback, NewFeedback},
    },
    services::ai_service::AiService,
    store::AppStore,
};

#[derive(Clone)]
pub struct FeedbackService {
    store: AppStore,
    ai: AiService,
}

impl FeedbackService {
    pub fn new(store: AppStore, ai: AiService) -> Self {
        Self { store, ai }
    }

    pub fn submit(&self, feedback: NewFeedback) -> Result<Feedback, AppError> {
        let entry = self.store.add_feedback(feedback)?;
        tracing::info!(
            "⭐ Feedback {} da mesa {}: {}/5, porção {}",
            entry.id,
            entry.table_id,
            entry.taste_rating,
            entry.portion_feedback
        );
        Ok(entry)
    }

    pub fn list(&self) -> Vec<Feedback> {
        self.store.feedback()
    }

    /// Saudação do formulário: usa os pratos do pedido mais recente da mesa.
    /// Sem pedido (ou sem pratos conhecidos) a IA nem é chamada.
    pub async fn greeting_for_table(&self, table_id: u32) -> GreetingResponse {
        let item_names: Vec<String> = self
            .store
            .latest_order_for_table(table_id)
            .map(|order| {
                order
                    .items
                    .iter()
                    .filter_map(|item| self.store.menu_item(item.menu_item_id))
                    .map(|mi| mi.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let greeting = self.ai.get_personalized_feedback_greeting(&item_names).await;
        GreetingResponse { table_id, greeting }
    }
}
