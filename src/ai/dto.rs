use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::genai::SafetyRating;

/// POST /api/analyze body: a base64-encoded photo of a meal.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub image: Option<String>,
}

/// POST /api/diet body. Every field is tolerated as absent; the prompt
/// renders missing values as "not specified".
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DietPlanRequest {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<String>,
    pub dietary_goals: Option<String>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub food_preferences: Option<Vec<String>>,
    pub timeframe: Option<String>,
}

/// POST /api/recipe body.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeRequest {
    pub ingredients: Option<String>,
    pub cuisine: Option<String>,
    pub dietary_preferences: Option<String>,
}

/// Success envelope shared by the three generation endpoints.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<SafetyRating>>,
}

impl GenerationResponse {
    pub fn new(data: Value) -> Self {
        Self {
            success: true,
            data,
            warnings: None,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<SafetyRating>) -> Self {
        self.warnings = Some(warnings);
        self
    }
}
