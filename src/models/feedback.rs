// src/models/feedback.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PortionFeedback {
    #[serde(rename = "Too Small")]
    TooSmall,
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Too Large")]
    TooLarge,
}

impl fmt::Display for PortionFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PortionFeedback::TooSmall => "Too Small",
            PortionFeedback::Ok => "OK",
            PortionFeedback::TooLarge => "Too Large",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[schema(example = "FB-9b2d1c7e-0d8a-4c59-a7f0-3a0b6e1d2c44")]
    pub id: String,
    #[schema(example = 5)]
    pub table_id: u32,
    #[schema(example = 2)]
    pub menu_item_id: u32,
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub taste_rating: u8,
    pub portion_feedback: PortionFeedback,
    #[schema(example = "Huge portion! Could easily serve two people.")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub table_id: u32,
    pub menu_item_id: u32,
    pub taste_rating: u8,
    pub portion_feedback: PortionFeedback,
    pub comment: Option<String>,
}
