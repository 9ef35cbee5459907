// src/services/ai_service.rs

// As três chamadas de IA do salão. Para quem chama elas nunca falham:
// qualquer erro vira um payload fixo de fallback, logado e contado em `AiStatus`.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::NaiveDate;

use crate::{
    models::{
        ai::{AiPredictionResult, Confidence, Prediction},
        dashboard::AiStatus,
        feedback::Feedback,
        menu::MenuItem,
        waste::{VisualWasteAnalysis, WasteLog},
    },
    services::{
        gemini_client::{strip_code_fences, AiError, GenerateRequest, GenerativeModel, Part},
        prompts,
    },
};

pub const DEFAULT_GREETING: &str = "Your opinion helps us improve.";

#[derive(Debug, Default)]
struct FallbackCounters {
    image_analysis: AtomicU64,
    prediction: AtomicU64,
    greeting: AtomicU64,
}

#[derive(Clone)]
pub struct AiService {
    model: Arc<dyn GenerativeModel>,
    fallbacks: Arc<FallbackCounters>,
}

impl AiService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        if !model.is_configured() {
            tracing::warn!("⚠️ API key do Gemini ausente: todas as respostas de IA serão de fallback.");
        }
        Self {
            model,
            fallbacks: Arc::new(FallbackCounters::default()),
        }
    }

    pub fn status(&self) -> AiStatus {
        AiStatus {
            model: self.model.model_name().to_string(),
            api_key_configured: self.model.is_configured(),
            image_analysis_fallbacks: self.fallbacks.image_analysis.load(Ordering::Relaxed),
            prediction_fallbacks: self.fallbacks.prediction.load(Ordering::Relaxed),
            greeting_fallbacks: self.fallbacks.greeting.load(Ordering::Relaxed),
        }
    }

    // =========================================================================
    // 1. Análise visual do prato
    // =========================================================================

    pub async fn analyze_waste_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        notes: Option<&str>,
    ) -> VisualWasteAnalysis {
        let request = GenerateRequest::text(prompts::waste_image_prompt(notes))
            .with_part(Part::InlineData {
                mime_type: mime_type.to_string(),
                data: image_base64.to_string(),
            })
            .with_schema(prompts::waste_image_schema());

        match self.generate_json::<VisualWasteAnalysis>(request).await {
            Ok(analysis) => analysis,
            Err(e) => {
                self.fallbacks.image_analysis.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "Falha na análise visual do Gemini, usando fallback");
                fallback_visual_analysis()
            }
        }
    }

    // =========================================================================
    // 2. Previsão de demanda / desperdício
    // =========================================================================

    pub async fn get_waste_prediction(
        &self,
        waste_logs: &[WasteLog],
        feedback: &[Feedback],
        visual_analyses: &[VisualWasteAnalysis],
        menu: &[MenuItem],
        tomorrow: NaiveDate,
    ) -> AiPredictionResult {
        let prompt = prompts::waste_prediction_prompt(waste_logs, feedback, visual_analyses, menu, tomorrow);
        let request = GenerateRequest::text(prompt).with_schema(prompts::waste_prediction_schema());

        match self.generate_json::<AiPredictionResult>(request).await {
            Ok(result) => result,
            Err(e) => {
                self.fallbacks.prediction.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "Falha na previsão do Gemini, usando fallback");
                fallback_prediction()
            }
        }
    }

    // =========================================================================
    // 3. Saudação personalizada
    // =========================================================================

    pub async fn get_personalized_feedback_greeting(&self, item_names: &[String]) -> String {
        let Some(first) = item_names.first() else {
            return DEFAULT_GREETING.to_string();
        };

        let request = GenerateRequest::text(prompts::greeting_prompt(item_names));
        let outcome = self
            .model
            .generate(request)
            .await
            .map(|text| text.trim().to_string())
            .and_then(|text| if text.is_empty() { Err(AiError::EmptyResponse) } else { Ok(text) });

        match outcome {
            Ok(greeting) => greeting,
            Err(e) => {
                self.fallbacks.greeting.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "Falha na saudação do Gemini, usando fallback");
                fallback_greeting(first)
            }
        }
    }

    async fn generate_json<T>(&self, request: GenerateRequest) -> Result<T, AiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let text = self.model.generate(request).await?;
        let parsed = serde_json::from_str(strip_code_fences(&text))?;
        Ok(parsed)
    }
}

// --- Fallbacks ---

pub fn fallback_visual_analysis() -> VisualWasteAnalysis {
    VisualWasteAnalysis {
        identified_items: vec!["Mock Item 1".to_string(), "Mock Item 2".to_string()],
        waste_estimate_kg: 0.25,
        suggestion: "This is a mock response due to an API error. Check the server logs for details. Consider reducing portion sizes for this item.".to_string(),
    }
}

pub fn fallback_prediction() -> AiPredictionResult {
    AiPredictionResult {
        predictions: vec![Prediction {
            item_name: "Chicken Biryani".to_string(),
            suggested_qty_kg: 18.0,
            reasoning: "High weekend demand but recent 'Too Large' portion feedback and waste logs suggest a 10% reduction from typical weekend prep.".to_string(),
            confidence: Confidence::High,
        }],
        menu_suggestion: "Consider reducing the portion size of Chicken Biryani slightly or offering two sizes.".to_string(),
        customer_feedback_insights: "Customers are happy with the taste of the Biryani but consistently find the portions to be too large.".to_string(),
    }
}

pub fn fallback_greeting(first_item: &str) -> String {
    format!(
        "We hope you enjoyed your meal, especially the {}! Your feedback is valuable to us.",
        first_item
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::ScriptedModel;
    use crate::store::seed;

    fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()
    }

    #[tokio::test]
    async fn empty_greeting_input_never_calls_the_model() {
        let model = ScriptedModel::new(vec![Ok("should not be used".into())]);
        let service = AiService::new(model.clone());

        let greeting = service.get_personalized_feedback_greeting(&[]).await;

        assert_eq!(greeting, DEFAULT_GREETING);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn greeting_is_trimmed() {
        let model = ScriptedModel::new(vec![Ok("  Enjoyed the Dal Makhani? Tell us!\n".into())]);
        let service = AiService::new(model);

        let greeting = service
            .get_personalized_feedback_greeting(&["Dal Makhani".into()])
            .await;
        assert_eq!(greeting, "Enjoyed the Dal Makhani? Tell us!");
    }

    #[tokio::test]
    async fn greeting_falls_back_with_first_dish() {
        let model = ScriptedModel::new(vec![Err(AiError::EmptyResponse)]);
        let service = AiService::new(model);

        let greeting = service
            .get_personalized_feedback_greeting(&["Fish Curry".into(), "Masala Chai".into()])
            .await;
        assert_eq!(greeting, fallback_greeting("Fish Curry"));
        assert_eq!(service.status().greeting_fallbacks, 1);
    }

    #[tokio::test]
    async fn prediction_with_empty_inputs_still_returns_a_result() {
        let model = ScriptedModel::new(vec![Err(AiError::Api { status: 429, body: "quota".into() })]);
        let service = AiService::new(model);

        let result = service.get_waste_prediction(&[], &[], &[], &[], tomorrow()).await;

        assert_eq!(result, fallback_prediction());
        assert_eq!(service.status().prediction_fallbacks, 1);
    }

    #[tokio::test]
    async fn prediction_parses_model_json() {
        let reply = r#"```json
        {"predictions":[{"itemName":"Veg Pulao","suggestedQtyKg":6.5,"reasoning":"Plate waste","confidence":"medium"}],
         "menuSuggestion":"Offer half portions.","customerFeedbackInsights":"Portions feel large."}
        ```"#;
        let model = ScriptedModel::new(vec![Ok(reply.into())]);
        let service = AiService::new(model.clone());

        let result = service
            .get_waste_prediction(&seed::waste_logs(), &seed::feedback(), &[], &seed::menu_items(), tomorrow())
            .await;

        assert_eq!(result.predictions.len(), 1);
        assert_eq!(result.predictions[0].item_name, "Veg Pulao");
        assert_eq!(result.predictions[0].confidence, Confidence::Medium);
        assert_eq!(result.menu_suggestion, "Offer half portions.");
        assert_eq!(service.status().prediction_fallbacks, 0);

        let request = model.last_request().unwrap();
        assert!(request.response_schema.is_some());
    }

    #[tokio::test]
    async fn malformed_prediction_json_falls_back() {
        let model = ScriptedModel::new(vec![Ok("{\"predictions\": \"nope\"}".into())]);
        let service = AiService::new(model);

        let result = service.get_waste_prediction(&[], &[], &[], &[], tomorrow()).await;
        assert_eq!(result, fallback_prediction());
    }

    #[tokio::test]
    async fn image_analysis_sends_inline_image() {
        let reply = r#"{"identifiedItems":["Rice"],"wasteEstimateKg":0.4,"suggestion":"Serve less rice."}"#;
        let model = ScriptedModel::new(vec![Ok(reply.into())]);
        let service = AiService::new(model.clone());

        let analysis = service.analyze_waste_image("AAAA", "image/png", Some("table 3")).await;
        assert_eq!(analysis.identified_items, vec!["Rice".to_string()]);
        assert_eq!(analysis.waste_estimate_kg, 0.4);

        let request = model.last_request().unwrap();
        assert!(request.parts.contains(&Part::InlineData {
            mime_type: "image/png".into(),
            data: "AAAA".into(),
        }));
    }

    #[tokio::test]
    async fn image_analysis_failure_returns_mock_analysis() {
        let model = ScriptedModel::new(vec![Err(AiError::MissingApiKey)]);
        let service = AiService::new(model);

        let analysis = service.analyze_waste_image("AAAA", "image/jpeg", None).await;
        assert_eq!(analysis, fallback_visual_analysis());
        assert_eq!(service.status().image_analysis_fallbacks, 1);
    }
}
