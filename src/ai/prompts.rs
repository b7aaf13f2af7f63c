//! Prompt builders for the three generation endpoints. Each prompt pins the
//! exact JSON shape the model must return; the extractor then enforces the
//! top-level keys.

use super::dto::{DietPlanRequest, RecipeRequest};

fn or_unspecified(value: &Option<String>) -> &str {
    value.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("not specified")
}

fn num_or_unspecified<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "not specified".to_string(), |v| v.to_string())
}

fn list_or_unspecified(value: &Option<Vec<String>>) -> String {
    match value {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => "not specified".to_string(),
    }
}

/// Prompt for image-based food analysis. The attached image rides along as
/// an inline part of the same request.
pub fn food_analysis() -> String {
    r#"Act as a professional nutritionist analyzing a food image. Provide:

    1. Detailed nutritional analysis
    2. Health impact assessment
    3. Personalized recommendations

    Return in this exact JSON format:
    {
      "analysis": {
        "foodIdentification": {
          "name": "Food name",
          "description": "Detailed description including ingredients if visible",
          "confidenceScore": 0-100,
          "components": ["List of identifiable components"]
        },
        "nutritionalData": {
          "estimatedPortion": {
            "weight": "grams",
            "dimensions": "size description if applicable"
          },
          "perPortion": {
            "calories": { "value": number, "accuracy": "low/medium/high" },
            "macros": {
              "protein": { "value": number, "unit": "g" },
              "carbs": { "value": number, "unit": "g", "fiber": number, "sugars": number },
              "fat": { "value": number, "unit": "g", "saturated": number, "unsaturated": number }
            },
            "micronutrients": {
              "sodium": { "value": number, "unit": "mg" },
              "cholesterol": { "value": number, "unit": "mg" },
              "keyVitamins": ["List any identifiable vitamins"],
              "keyMinerals": ["List any identifiable minerals"]
            }
          },
          "per100g": {
            "calories": { "value": number, "accuracy": "low/medium/high" },
            "macros": {
              "protein": { "value": number, "unit": "g" },
              "carbs": { "value": number, "unit": "g", "fiber": number, "sugars": number },
              "fat": { "value": number, "unit": "g", "saturated": number, "unsaturated": number }
            }
          }
        },
        "healthAssessment": {
          "positiveAttributes": ["List of beneficial nutritional aspects"],
          "concerns": ["List of potential health concerns"],
          "allergens": ["List of potential allergens"],
          "dietaryCompatibility": {
            "vegetarian": boolean,
            "vegan": boolean,
            "glutenFree": boolean,
            "keto": boolean,
            "paleo": boolean
          }
        }
      },
      "recommendations": {
        "servingSuggestions": "Ideal serving size recommendations",
        "pairings": ["List of foods that would complement nutritionally"],
        "alternatives": ["Healthier alternative suggestions if applicable"],
        "consumptionFrequency": "Recommended frequency of consumption",
        "preparationTips": ["Tips for healthier preparation methods"],
        "targetGroups": {
          "beneficialFor": ["List of groups who would benefit"],
          "cautionFor": ["List of groups who should consume cautiously"]
        }
      },
      "metadata": {
        "analysisTimestamp": "ISO8601 timestamp",
        "dataSources": "Nutritional databases used for reference",
        "disclaimer": "Estimates based on visual analysis only"
      }
    }

    Guidelines:
    - Be extremely specific about food identification
    - Provide confidence levels for estimations
    - Include both positive and negative health aspects
    - Offer practical, actionable recommendations
    - Use professional nutritional databases for reference values
    - Maintain strict JSON format without any markdown"#
        .to_string()
}

/// Prompt for personalized diet plan generation.
pub fn diet_plan(req: &DietPlanRequest) -> String {
    format!(
        r#"Create a personalized diet plan based on the following user inputs:
    - Age: {age}
    - Gender: {gender}
    - Current Weight: {weight} kg
    - Height: {height} cm
    - Activity Level: {activity_level}
    - Dietary Goals: {dietary_goals}
    - Dietary Restrictions: {dietary_restrictions}
    - Food Preferences: {food_preferences}
    - Timeframe: {timeframe}

    Provide the response in the following comprehensive JSON format:
    {{
      "dietPlan": {{
        "overview": {{
          "goal": "Primary dietary goal",
          "estimatedDailyCalories": "Calculated daily calorie target",
          "macronutrientSplit": {{
            "protein": "Recommended protein intake in grams",
            "carbs": "Recommended carbs intake in grams",
            "fats": "Recommended fats intake in grams"
          }},
          "keyNutritionalFocus": ["List of key nutrients to focus on"]
        }},
        "dailyMealPlan": {{
          "monday": [
            {{
              "mealType": "Breakfast",
              "mealName": "Meal name",
              "description": "Meal description",
              "ingredients": ["List of ingredients"],
              "nutritionalInfo": {{
                "calories": "Calorie count",
                "protein": "Protein in grams",
                "carbs": "Carbs in grams",
                "fats": "Fats in grams"
              }},
              "preparationTime": "Time needed"
            }}
          ],
          "tuesday": [],
          "wednesday": [],
          "thursday": [],
          "friday": [],
          "saturday": [],
          "sunday": []
        }},
        "shoppingList": {{
          "proteins": ["List of protein sources needed"],
          "vegetables": ["List of vegetables needed"],
          "fruits": ["List of fruits needed"],
          "grains": ["List of grains needed"],
          "dairy": ["List of dairy products needed"],
          "other": ["Other items needed"]
        }},
        "additionalRecommendations": {{
          "hydration": "Hydration recommendations",
          "mealTiming": "Optimal meal timing advice",
          "supplements": ["Recommended supplements if any"],
          "exercisePairing": "Recommended exercise pairing"
        }},
        "progressTracking": {{
          "metricsToTrack": ["List of metrics to monitor"],
          "weeklyCheckpoints": "Key progress indicators"
        }}
      }}
    }}

    Guidelines:
    1. Create a realistic, balanced meal plan tailored to the user's inputs
    2. Include varied meals for every day of the week to prevent monotony
    3. Account for all dietary restrictions and preferences
    4. Provide precise nutritional information for each meal
    5. Make the shopping list comprehensive yet practical
    6. Include helpful lifestyle recommendations
    7. Ensure the response is valid JSON without markdown formatting
    8. Base recommendations on established nutritional science"#,
        age = num_or_unspecified(&req.age),
        gender = or_unspecified(&req.gender),
        weight = num_or_unspecified(&req.weight),
        height = num_or_unspecified(&req.height),
        activity_level = or_unspecified(&req.activity_level),
        dietary_goals = or_unspecified(&req.dietary_goals),
        dietary_restrictions = list_or_unspecified(&req.dietary_restrictions),
        food_preferences = list_or_unspecified(&req.food_preferences),
        timeframe = or_unspecified(&req.timeframe),
    )
}

/// Prompt for recipe generation.
pub fn recipe(req: &RecipeRequest) -> String {
    format!(
        r#"Generate a detailed recipe based on the following input:
    - Ingredients: {ingredients}
    - Cuisine style: {cuisine}
    - Dietary preferences: {dietary_preferences}

    Provide the response in the following JSON format:
    {{
      "recipe": {{
        "title": "Creative recipe name",
        "description": "Brief description of the dish",
        "cuisineType": "Type of cuisine",
        "dietaryInfo": ["List of applicable dietary tags"],
        "prepTime": "Preparation time in minutes",
        "cookTime": "Cooking time in minutes",
        "totalTime": "Total time in minutes",
        "servings": "Number of servings",
        "ingredients": [
          {{
            "name": "Ingredient name",
            "amount": "Quantity",
            "unit": "Measurement unit",
            "notes": "Preparation notes if needed"
          }}
        ],
        "instructions": [
          {{
            "step": 1,
            "instruction": "Detailed step-by-step instruction",
            "tips": "Optional tips for this step"
          }}
        ],
        "nutritionalInfo": {{
          "perServing": {{
            "calories": "Estimated calories",
            "protein": "Protein in grams",
            "carbs": "Carbs in grams",
            "fat": "Fat in grams"
          }}
        }},
        "servingSuggestions": "How to best serve this dish",
        "storageTips": "How to store leftovers",
        "variations": "Possible variations or substitutions"
      }}
    }}

    Guidelines:
    - Be creative with the recipe name and description
    - Provide precise measurements and clear instructions
    - Include useful tips and variations
    - Give realistic nutritional estimates
    - Ensure the response is valid JSON without any markdown formatting
    - Make the recipe practical for home cooking"#,
        ingredients = or_unspecified(&req.ingredients),
        cuisine = or_unspecified(&req.cuisine),
        dietary_preferences = or_unspecified(&req.dietary_preferences),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diet_prompt_embeds_supplied_fields() {
        let req = DietPlanRequest {
            age: Some(32),
            gender: Some("female".into()),
            weight: Some(68.0),
            height: Some(165.0),
            activity_level: Some("moderately active".into()),
            dietary_goals: Some("weight loss".into()),
            dietary_restrictions: Some(vec!["lactose intolerant".into()]),
            food_preferences: Some(vec!["vegetarian".into(), "no seafood".into()]),
            timeframe: Some("4 weeks".into()),
        };
        let prompt = diet_plan(&req);
        assert!(prompt.contains("- Age: 32"));
        assert!(prompt.contains("- Current Weight: 68 kg"));
        assert!(prompt.contains("- Dietary Restrictions: lactose intolerant"));
        assert!(prompt.contains("- Food Preferences: vegetarian, no seafood"));
        assert!(prompt.contains("\"dietPlan\""));
    }

    #[test]
    fn diet_prompt_marks_absent_fields_as_not_specified() {
        let prompt = diet_plan(&DietPlanRequest::default());
        assert!(prompt.contains("- Age: not specified"));
        assert!(prompt.contains("- Timeframe: not specified"));
    }

    #[test]
    fn recipe_prompt_embeds_inputs() {
        let req = RecipeRequest {
            ingredients: Some("chicken, rice, vegetables".into()),
            cuisine: Some("Asian".into()),
            dietary_preferences: Some("low-carb".into()),
        };
        let prompt = recipe(&req);
        assert!(prompt.contains("- Ingredients: chicken, rice, vegetables"));
        assert!(prompt.contains("- Cuisine style: Asian"));
        assert!(prompt.contains("- Dietary preferences: low-carb"));
        assert!(prompt.contains("\"recipe\""));
    }

    #[test]
    fn blank_strings_count_as_unspecified() {
        let req = RecipeRequest {
            ingredients: Some("   ".into()),
            ..Default::default()
        };
        assert!(recipe(&req).contains("- Ingredients: not specified"));
    }

    #[test]
    fn analysis_prompt_pins_required_top_level_keys() {
        let prompt = food_analysis();
        assert!(prompt.contains("\"analysis\""));
        assert!(prompt.contains("\"recommendations\""));
        assert!(prompt.contains("without any markdown"));
    }
}
