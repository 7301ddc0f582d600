//! services/api/src/adapters/plan_llm.rs
//!
//! This module contains the adapter for meal-plan generation.
//! It implements the `MealPlanService` port from the `core` crate by calling
//! the Gemini model through its OpenAI-compatible chat endpoint, with the
//! plan's JSON shape declared as a response schema.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use nutriflow_core::{
    domain::{MealPlan, UserProfile},
    ports::{MealPlanService, PortError, PortResult},
};
use serde_json::json;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `MealPlanService` using the hosted Gemini model.
#[derive(Clone)]
pub struct GeminiPlanAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiPlanAdapter {
    /// Creates a new `GeminiPlanAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

/// Builds the plan-generation prompt, embedding the profile values verbatim.
pub fn plan_prompt(profile: &UserProfile) -> String {
    format!(
        "Generate a personalized 3-day meal plan for a user with the following profile:\n\
         Age: {}\n\
         Gender: {}\n\
         Weight: {}kg\n\
         Height: {}cm\n\
         Goal: {}\n\
         Dietary Restrictions: {}\n\
         Activity Level: {}\n\n\
         Provide a creative name for this plan, a brief summary, a daily breakdown \
         (Breakfast, Lunch, Dinner, Snack) with approximate macros per meal, and a \
         consolidated shopping list.",
        profile.age,
        profile.gender,
        profile.weight_kg,
        profile.height_cm,
        profile.goal,
        profile.dietary_restrictions,
        profile.activity_level,
    )
}

fn meal_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" },
            "macros": {
                "type": "object",
                "properties": {
                    "protein": { "type": "number" },
                    "carbs": { "type": "number" },
                    "fats": { "type": "number" },
                    "calories": { "type": "number" }
                },
                "required": ["protein", "carbs", "fats", "calories"]
            }
        },
        "required": ["name", "description", "macros"]
    })
}

/// The declared output shape for the plan reply. Field names match the
/// serde representation of [`MealPlan`], so the reply parses directly.
pub fn plan_response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "planName": { "type": "string" },
            "summary": { "type": "string" },
            "shoppingList": {
                "type": "array",
                "items": { "type": "string" }
            },
            "dailyPlans": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "day": { "type": "string", "description": "e.g., Day 1" },
                        "breakfast": meal_schema(),
                        "lunch": meal_schema(),
                        "dinner": meal_schema(),
                        "snack": meal_schema()
                    },
                    "required": ["day", "breakfast", "lunch", "dinner", "snack"]
                }
            }
        },
        "required": ["planName", "summary", "shoppingList", "dailyPlans"]
    })
}

//=========================================================================================
// `MealPlanService` Trait Implementation
//=========================================================================================

#[async_trait]
impl MealPlanService for GeminiPlanAdapter {
    /// Generates a three-day plan for the given profile.
    ///
    /// A missing reply or a reply that does not parse as the declared shape
    /// is surfaced as a single `PortError::Unexpected`; nothing is retried.
    async fn generate_plan(&self, profile: &UserProfile) -> PortResult<MealPlan> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(plan_prompt(profile))
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: "meal_plan".to_string(),
                    schema: Some(plan_response_schema()),
                    strict: Some(true),
                },
            })
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Plan generation returned no text content.".to_string())
            })?;

        serde_json::from_str::<MealPlan>(&content).map_err(|e| {
            PortError::Unexpected(format!("Plan reply was not valid plan JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_profile() -> UserProfile {
        UserProfile {
            age: 30,
            gender: "Female".to_string(),
            weight_kg: 70.0,
            height_cm: 165.0,
            goal: "Lose Weight".to_string(),
            dietary_restrictions: "Gluten-free".to_string(),
            activity_level: "Moderate".to_string(),
        }
    }

    #[test]
    fn prompt_embeds_profile_values_verbatim() {
        let prompt = plan_prompt(&a_profile());
        assert!(prompt.contains("Age: 30"));
        assert!(prompt.contains("Weight: 70kg"));
        assert!(prompt.contains("Height: 165cm"));
        assert!(prompt.contains("Goal: Lose Weight"));
        assert!(prompt.contains("Dietary Restrictions: Gluten-free"));
        assert!(prompt.contains("Activity Level: Moderate"));
    }

    #[test]
    fn schema_declares_every_top_level_field() {
        let schema = plan_response_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["planName", "summary", "shoppingList", "dailyPlans"] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn schema_declares_four_meals_with_macros() {
        let schema = plan_response_schema();
        let day = &schema["properties"]["dailyPlans"]["items"]["properties"];
        for meal in ["breakfast", "lunch", "dinner", "snack"] {
            let macros = &day[meal]["properties"]["macros"]["properties"];
            for field in ["protein", "carbs", "fats", "calories"] {
                assert!(!macros[field].is_null(), "missing {} on {}", field, meal);
            }
        }
    }
}
