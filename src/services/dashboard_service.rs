// src/services/dashboard_service.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::{Days, Utc};
use parking_lot::Mutex;

use crate::{
    models::{
        ai::AiPredictionResult,
        dashboard::{FeedbackEntry, PredictionResponse, WasteByItemEntry, WasteByStageEntry},
        menu::MenuItem,
        waste::WasteLog,
    },
    services::ai_service::AiService,
    store::AppStore,
};

// =============================================================================
// Controle de previsões concorrentes
// =============================================================================

/// Cada previsão recebe um id crescente. Um resultado só vira o "atual" se
/// nenhuma requisição mais nova já tiver publicado o seu.
#[derive(Debug, Default)]
pub struct PredictionTracker {
    issued: AtomicU64,
    current: Mutex<Option<(u64, AiPredictionResult)>>,
}

impl PredictionTracker {
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Retorna `false` (e descarta) se o resultado chegou atrasado.
    pub fn commit(&self, request_id: u64, result: &AiPredictionResult) -> bool {
        let mut current = self.current.lock();
        match current.as_ref() {
            Some((committed_id, _)) if *committed_id > request_id => false,
            _ => {
                *current = Some((request_id, result.clone()));
                true
            }
        }
    }

    pub fn current(&self) -> Option<(u64, AiPredictionResult)> {
        self.current.lock().clone()
    }
}

// =============================================================================
// Agregações dos gráficos
// =============================================================================

/// Desperdício somado por prato, na ordem em que cada prato aparece
/// quando os registros são ordenados por data.
pub fn aggregate_waste_by_item(logs: &[WasteLog], menu: &[MenuItem]) -> Vec<WasteByItemEntry> {
    let mut sorted: Vec<&WasteLog> = logs.iter().collect();
    sorted.sort_by_key(|log| log.date);

    let mut entries: Vec<WasteByItemEntry> = Vec::new();
    for log in sorted {
        let Some(item) = menu.iter().find(|mi| mi.id == log.menu_item_id) else {
            continue;
        };
        match entries.iter_mut().find(|e| e.name == item.name) {
            Some(entry) => entry.waste += log.wasted_amount_kg,
            None => entries.push(WasteByItemEntry {
                name: item.name.clone(),
                waste: log.wasted_amount_kg,
            }),
        }
    }
    entries
}

/// Etapa onde o desperdício aconteceu, a partir do motivo informado.
pub fn waste_stage(reason: &str) -> &'static str {
    match reason {
        "Plate waste" => "Plate",
        "Buffet" => "Buffet",
        _ => "Kitchen",
    }
}

pub fn aggregate_waste_by_stage(logs: &[WasteLog]) -> Vec<WasteByStageEntry> {
    let mut totals = [("Kitchen", 0.0_f64), ("Plate", 0.0), ("Buffet", 0.0)];
    for log in logs {
        let stage = waste_stage(&log.reason);
        if let Some(slot) = totals.iter_mut().find(|(name, _)| *name == stage) {
            slot.1 += log.wasted_amount_kg;
        }
    }

    totals
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(name, value)| WasteByStageEntry {
            name: name.to_string(),
            value,
        })
        .collect()
}

// =============================================================================
// Serviço
// =============================================================================

#[derive(Clone)]
pub struct DashboardService {
    store: AppStore,
    ai: AiService,
    tracker: Arc<PredictionTracker>,
}

impl DashboardService {
    pub fn new(store: AppStore, ai: AiService) -> Self {
        Self {
            store,
            ai,
            tracker: Arc::new(PredictionTracker::default()),
        }
    }

    pub fn waste_by_item(&self) -> Vec<WasteByItemEntry> {
        aggregate_waste_by_item(&self.store.waste_logs(), self.store.menu())
    }

    pub fn waste_by_stage(&self) -> Vec<WasteByStageEntry> {
        aggregate_waste_by_stage(&self.store.waste_logs())
    }

    /// Feedback mais recente primeiro.
    pub fn feedback_entries(&self) -> Vec<FeedbackEntry> {
        self.store
            .feedback()
            .into_iter()
            .rev()
            .map(|feedback| FeedbackEntry {
                item_name: self
                    .store
                    .menu_item(feedback.menu_item_id)
                    .map(|mi| mi.name.clone())
                    .unwrap_or_else(|| "Unknown Item".to_string()),
                feedback,
            })
            .collect()
    }

    /// Recalcula a previsão com o estado atual da loja.
    pub async fn refresh_prediction(&self) -> PredictionResponse {
        let request_id = self.tracker.begin();
        let inputs = self.store.prediction_inputs();
        let tomorrow = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap_or_else(|| Utc::now().date_naive());

        let result = self
            .ai
            .get_waste_prediction(
                &inputs.waste_logs,
                &inputs.feedback,
                &inputs.visual_analyses,
                self.store.menu(),
                tomorrow,
            )
            .await;

        let committed = self.tracker.commit(request_id, &result);
        if !committed {
            tracing::debug!("Previsão {} chegou atrasada e foi descartada", request_id);
        }

        PredictionResponse {
            request_id,
            stale: !committed,
            result,
        }
    }

    /// Última previsão publicada, sem chamar a IA.
    pub fn current_prediction(&self) -> Option<PredictionResponse> {
        self.tracker.current().map(|(request_id, result)| PredictionResponse {
            request_id,
            stale: false,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::services::{ai_service::fallback_prediction, testing::ScriptedModel};
    use crate::store::{seed, StoreState};
    use chrono::NaiveDate;

    fn log(date: (i32, u32, u32), menu_item_id: u32, kg: f64, reason: &str) -> WasteLog {
        WasteLog {
            id: format!("t-{}-{}", menu_item_id, kg),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            menu_item_id,
            wasted_amount_kg: kg,
            reason: reason.into(),
        }
    }

    fn prediction_json(menu_suggestion: &str) -> String {
        format!(
            r#"{{"predictions":[],"menuSuggestion":"{}","customerFeedbackInsights":"x"}}"#,
            menu_suggestion
        )
    }

    #[test]
    fn waste_by_item_sums_per_dish_in_date_order() {
        let logs = vec![
            log((2023, 10, 28), 7, 5.0, "Plate waste"),
            log((2023, 10, 26), 2, 1.0, "Overproduction"),
            log((2023, 10, 27), 2, 4.0, "Buffet"),
            log((2023, 10, 26), 99, 9.0, "Spoilage"),
        ];

        let entries = aggregate_waste_by_item(&logs, &seed::menu_items());
        assert_eq!(
            entries,
            vec![
                WasteByItemEntry { name: "Chicken Biryani".into(), waste: 5.0 },
                WasteByItemEntry { name: "Veg Pulao".into(), waste: 5.0 },
            ]
        );
    }

    #[test]
    fn waste_by_stage_groups_reasons_and_drops_empty_stages() {
        let entries = aggregate_waste_by_stage(&seed::waste_logs());
        assert_eq!(
            entries,
            vec![
                WasteByStageEntry { name: "Kitchen".into(), value: 3.0 },
                WasteByStageEntry { name: "Plate".into(), value: 5.0 },
                WasteByStageEntry { name: "Buffet".into(), value: 4.0 },
            ]
        );

        let kitchen_only = aggregate_waste_by_stage(&[log((2024, 1, 1), 1, 2.0, "Spoilage")]);
        assert_eq!(kitchen_only.len(), 1);
        assert_eq!(kitchen_only[0].name, "Kitchen");
        assert!(aggregate_waste_by_stage(&[]).is_empty());
    }

    #[test]
    fn tracker_rejects_older_results_after_a_newer_commit() {
        let tracker = PredictionTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second > first);

        assert!(tracker.commit(second, &fallback_prediction()));
        assert!(!tracker.commit(first, &fallback_prediction()));
        assert_eq!(tracker.current().map(|(id, _)| id), Some(second));
    }

    #[test]
    fn feedback_is_listed_newest_first_with_names() {
        let service = DashboardService::new(
            AppStore::seeded(seed::DEFAULT_TABLE_COUNT),
            AiService::new(ScriptedModel::new(vec![])),
        );
        let entries = service.feedback_entries();
        assert_eq!(entries[0].feedback.id, "f3");
        assert_eq!(entries[0].item_name, "Dal Makhani");
        assert_eq!(entries[2].feedback.id, "f1");
    }

    #[tokio::test]
    async fn empty_store_still_gets_a_well_formed_prediction() {
        let store = AppStore::with_state(seed::menu_items(), StoreState::default());
        let service = DashboardService::new(store, AiService::new(ScriptedModel::new(vec![])));

        let response = service.refresh_prediction().await;
        assert!(!response.stale);
        assert_eq!(response.result, fallback_prediction());
        assert_eq!(service.current_prediction().map(|p| p.request_id), Some(response.request_id));
    }

    #[tokio::test]
    async fn slow_superseded_prediction_does_not_overwrite_newer_one() {
        let model = ScriptedModel::with_delays(vec![
            (Duration::from_millis(200), Ok(prediction_json("old"))),
            (Duration::ZERO, Ok(prediction_json("new"))),
        ]);
        let service = DashboardService::new(
            AppStore::seeded(seed::DEFAULT_TABLE_COUNT),
            AiService::new(model),
        );

        let slow = {
            let service = service.clone();
            tokio::spawn(async move { service.refresh_prediction().await })
        };
        // garante que a primeira requisição pegou o id 1 e a resposta lenta
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = service.refresh_prediction().await;
        let slow = slow.await.unwrap();

        assert!(!fast.stale);
        assert_eq!(fast.result.menu_suggestion, "new");
        assert!(slow.stale);
        assert_eq!(slow.result.menu_suggestion, "old");

        let current = service.current_prediction().unwrap();
        assert_eq!(current.request_id, fast.request_id);
        assert_eq!(current.result.menu_suggestion, "new");
    }
}
