// src/services/prompts.rs

// Textos enviados ao modelo e os schemas de resposta esperados.

use chrono::{Datelike, NaiveDate, Weekday};
use serde_json::{json, Value};

use crate::models::{
    feedback::Feedback,
    menu::MenuItem,
    waste::{VisualWasteAnalysis, WasteLog},
};

const UNKNOWN_ITEM: &str = "Unknown Item";

fn item_name(menu: &[MenuItem], id: u32) -> &str {
    menu.iter()
        .find(|mi| mi.id == id)
        .map(|mi| mi.name.as_str())
        .unwrap_or(UNKNOWN_ITEM)
}

fn describe_day(day: NaiveDate) -> String {
    let kind = match day.weekday() {
        Weekday::Sat | Weekday::Sun => "weekend",
        _ => "weekday",
    };
    format!("{} ({})", day.format("%A"), kind)
}

// --- Previsão de demanda ---

pub fn waste_prediction_prompt(
    waste_logs: &[WasteLog],
    feedback: &[Feedback],
    visual_analyses: &[VisualWasteAnalysis],
    menu: &[MenuItem],
    tomorrow: NaiveDate,
) -> String {
    let waste_data = waste_logs
        .iter()
        .map(|log| {
            format!(
                "- {}: Wasted {}kg of {} due to {}",
                log.date,
                log.wasted_amount_kg,
                item_name(menu, log.menu_item_id),
                log.reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let feedback_data = feedback
        .iter()
        .map(|fb| {
            format!(
                "- Item: {}, Taste: {}/5, Portion: {}, Comment: \"{}\"",
                item_name(menu, fb.menu_item_id),
                fb.taste_rating,
                fb.portion_feedback,
                fb.comment.as_deref().filter(|c| !c.is_empty()).unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let visual_data = visual_analyses
        .iter()
        .map(|analysis| {
            format!(
                "- Visually analyzed {}kg of wasted {}. AI Suggestion: \"{}\"",
                analysis.waste_estimate_kg,
                analysis.identified_items.join(", "),
                analysis.suggestion
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let visual_section = if visual_data.is_empty() {
        "No visual analysis performed yet.".to_string()
    } else {
        visual_data
    };
    let waste_section = if waste_data.is_empty() {
        "No waste logged yet.".to_string()
    } else {
        waste_data
    };
    let feedback_section = if feedback_data.is_empty() {
        "No customer feedback yet.".to_string()
    } else {
        feedback_data
    };

    format!(
        r#"You are a restaurant demand forecasting AI for an Indian restaurant. Your goal is to minimize food waste and optimize stock by providing actionable insights.
Analyze the following data and provide predictions for tomorrow's menu items. Tomorrow is a {day}.

Recent Visual Waste Analysis (Most important and recent data):
{visual_section}

Historical Waste Data:
{waste_section}

Recent Customer Feedback (Crucial for understanding customer satisfaction and waste reasons):
{feedback_section}

Based on all this data, with an emphasis on the visual analysis and customer feedback, perform the following tasks:
1. **Predict**: Predict the optimal preparation quantity for the top 2-3 most relevant items. Provide brief reasoning that connects the data to your prediction. For example, if feedback mentions "Too Large" and there's plate waste, recommend reducing quantity.
2. **Suggest**: Provide one high-impact menu optimization suggestion based on all the data.
3. **Analyze Feedback**: Summarize in one sentence the key insight you've derived from the customer feedback comments. For example, "Customers find the Biryani portions too large, which is likely contributing to plate waste."
"#,
        day = describe_day(tomorrow),
    )
}

pub fn waste_prediction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "predictions": {
                "type": "ARRAY",
                "description": "List of predictions for menu items.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "itemName": { "type": "STRING" },
                        "suggestedQtyKg": { "type": "NUMBER" },
                        "reasoning": { "type": "STRING" },
                        "confidence": { "type": "STRING", "enum": ["Low", "Medium", "High"] }
                    },
                    "required": ["itemName", "suggestedQtyKg", "reasoning", "confidence"]
                }
            },
            "menuSuggestion": {
                "type": "STRING",
                "description": "A suggestion for menu optimization."
            },
            "customerFeedbackInsights": {
                "type": "STRING",
                "description": "A summary of key insights derived from customer feedback."
            }
        },
        "required": ["predictions", "menuSuggestion", "customerFeedbackInsights"]
    })
}

// --- Saudação do formulário de feedback ---

pub fn greeting_prompt(item_names: &[String]) -> String {
    format!(
        r#"You are a friendly restaurant host AI. A customer just finished their meal and is about to give feedback.
They ordered the following dishes: {dishes}.

Write a short, warm, and welcoming message (1-2 sentences) to display on the feedback form.
Make it personal by mentioning one of the dishes they ordered.
Encourage them to be honest and thank them for their time.
Do not use markdown or formatting. Just return the plain text message.
"#,
        dishes = item_names.join(", ")
    )
}

// --- Análise de imagem ---

pub fn waste_image_prompt(notes: Option<&str>) -> String {
    let notes = notes.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("No notes");
    format!(
        r#"You are a food waste analysis expert for a restaurant.
Analyze this image of food left on a plate.

Your tasks:
1. Identify the main food items remaining.
2. Estimate the total weight of the wasted food in kilograms (provide a single numerical value).
3. Provide a single, brief, and actionable suggestion to the restaurant manager to help reduce this specific type of waste in the future.

Consider the user's notes if provided: "{notes}"

Return the analysis in a structured JSON format.
"#
    )
}

pub fn waste_image_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "identifiedItems": { "type": "ARRAY", "items": { "type": "STRING" } },
            "wasteEstimateKg": { "type": "NUMBER" },
            "suggestion": { "type": "STRING" }
        },
        "required": ["identifiedItems", "wasteEstimateKg", "suggestion"]
    })
}
