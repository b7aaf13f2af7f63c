use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::dto::{DietPlanRequest, RecipeRequest};
use super::prompts;
use crate::error::ApiError;
use crate::genai::{extract_json, GenerateRequest, SafetyRating};
use crate::state::AppState;

/// Version stamp attached to every generated payload.
const API_VERSION: &str = "1.2";

/// Merge server-side generation metadata into the payload, preserving any
/// metadata keys the model itself produced.
fn annotate_metadata(data: &mut Value, model: &str) {
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    if let Some(obj) = data.as_object_mut() {
        let metadata = obj
            .entry("metadata")
            .or_insert_with(|| json!({}));
        if let Some(meta) = metadata.as_object_mut() {
            meta.insert("generatedAt".into(), json!(generated_at));
            meta.insert("apiVersion".into(), json!(API_VERSION));
            meta.insert("modelUsed".into(), json!(model));
        }
    }
}

/// Analyze a meal photo: nutritional breakdown, health assessment and
/// recommendations, plus any upstream safety warnings.
pub async fn analyze_food(
    state: &AppState,
    image_b64: String,
) -> Result<(Value, Vec<SafetyRating>), ApiError> {
    let model = &state.config.gemini.vision_model;
    let request = GenerateRequest::new(model, prompts::food_analysis())
        .with_image(image_b64)
        .with_sampling(0.5, 0.95, 2000);

    let output = state.model.generate(&request).await.map_err(ApiError::Internal)?;

    let mut data = extract_json(&output.text, &["analysis", "recommendations"])?;
    annotate_metadata(&mut data, model);
    Ok((data, output.safety_warnings))
}

/// Generate a seven-day diet plan from the user's parameters.
pub async fn generate_diet_plan(
    state: &AppState,
    req: &DietPlanRequest,
) -> Result<Value, ApiError> {
    let model = &state.config.gemini.planner_model;
    let request = GenerateRequest::new(model, prompts::diet_plan(req));

    let output = state.model.generate(&request).await.map_err(ApiError::Internal)?;

    let mut data = extract_json(&output.text, &["dietPlan"])?;
    annotate_metadata(&mut data, model);
    Ok(data)
}

/// Generate a recipe from ingredients, cuisine and preferences.
pub async fn generate_recipe(state: &AppState, req: &RecipeRequest) -> Result<Value, ApiError> {
    let model = &state.config.gemini.recipe_model;
    let request = GenerateRequest::new(model, prompts::recipe(req));

    let output = state.model.generate(&request).await.map_err(ApiError::Internal)?;

    let mut data = extract_json(&output.text, &["recipe"])?;
    annotate_metadata(&mut data, model);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, CannedModel};
    use std::sync::Arc;

    #[test]
    fn metadata_annotation_preserves_model_supplied_keys() {
        let mut data = json!({
            "recipe": {},
            "metadata": {"disclaimer": "Estimates only"}
        });
        annotate_metadata(&mut data, "gemini-2.0-flash");

        assert_eq!(data["metadata"]["disclaimer"], "Estimates only");
        assert_eq!(data["metadata"]["apiVersion"], "1.2");
        assert_eq!(data["metadata"]["modelUsed"], "gemini-2.0-flash");
        assert!(data["metadata"]["generatedAt"]
            .as_str()
            .is_some_and(|s| s.contains('T')));
    }

    #[tokio::test]
    async fn diet_plan_requires_diet_plan_key() {
        let state = AppState::fake_with_model(Arc::new(CannedModel::new(
            r#"{"mealIdeas": []}"#,
        )));
        let err = generate_diet_plan(&state, &DietPlanRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedModelOutput(_)));
    }

    #[tokio::test]
    async fn recipe_extraction_strips_fences_and_annotates() {
        let state = AppState::fake_with_model(Arc::new(CannedModel::new(
            "```json\n{\"recipe\": {\"title\": \"Low-Carb Chicken Stir Fry\"}}\n```",
        )));
        let data = generate_recipe(&state, &RecipeRequest::default())
            .await
            .unwrap();
        assert_eq!(data["recipe"]["title"], "Low-Carb Chicken Stir Fry");
        assert_eq!(data["metadata"]["modelUsed"], "gemini-2.0-flash");
    }
}
