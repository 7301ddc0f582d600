//! crates/nutriflow_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! Everything here is a plain value record, valid only for the lifetime
//! of a client session; nothing is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The user-supplied attributes that drive the plan-generation prompt.
///
/// All fields are user-editable scalars; no cross-field invariants are
/// enforced (the model receives them verbatim).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub gender: String,
    /// Body weight in kilograms.
    pub weight_kg: f64,
    /// Height in centimeters.
    pub height_cm: f64,
    pub goal: String,
    pub dietary_restrictions: String,
    pub activity_level: String,
}

/// Approximate macros for a single meal, produced only by the model.
/// No consistency check is applied (calories are not recomputed locally).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroNutrients {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub macros: MacroNutrients,
}

/// One day of the generated plan: four named meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day label as produced by the model, e.g. "Day 1".
    pub day: String,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snack: Meal,
}

/// The structured multi-day menu returned by the hosted model.
///
/// Field names follow the declared response schema on the wire
/// (camelCase), so the model's JSON reply deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub plan_name: String,
    pub summary: String,
    pub daily_plans: Vec<DayPlan>,
    pub shopping_list: Vec<String>,
}

/// A bookable nutrition consultant. Static fixture data, read-only at
/// runtime; never created or destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub bio: String,
    /// Hourly rate in dollars.
    pub rate_per_hour: u32,
    pub image_url: String,
    /// Fixed textual time labels selectable during booking.
    pub available_slots: Vec<String>,
}

/// A blog topic from the static catalog; articles are generated on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogTopic {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image_url: String,
}

/// A confirmed booking. Transient: held only as session state and
/// discarded after the success display reverts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub coach_id: String,
    pub coach_name: String,
    pub date: NaiveDate,
    pub slot: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // A well-formed reply in the shape the model is asked to produce.
    const FIXTURE_PLAN: &str = r#"{
        "planName": "Lean & Green Reset",
        "summary": "A balanced three-day plan focused on whole foods.",
        "shoppingList": ["Oats", "Chicken breast", "Spinach", "Greek yogurt"],
        "dailyPlans": [
            {
                "day": "Day 1",
                "breakfast": {
                    "name": "Overnight oats",
                    "description": "Oats with berries and chia.",
                    "macros": { "protein": 20, "carbs": 55, "fats": 12, "calories": 410 }
                },
                "lunch": {
                    "name": "Chicken salad",
                    "description": "Grilled chicken over spinach.",
                    "macros": { "protein": 38, "carbs": 18, "fats": 14, "calories": 350 }
                },
                "dinner": {
                    "name": "Salmon and rice",
                    "description": "Baked salmon with brown rice.",
                    "macros": { "protein": 34, "carbs": 48, "fats": 18, "calories": 490 }
                },
                "snack": {
                    "name": "Greek yogurt",
                    "description": "Plain yogurt with honey.",
                    "macros": { "protein": 15, "carbs": 20, "fats": 4, "calories": 180 }
                }
            }
        ]
    }"#;

    #[test]
    fn fixture_plan_parses_verbatim() {
        let plan: MealPlan = serde_json::from_str(FIXTURE_PLAN).unwrap();

        assert_eq!(plan.plan_name, "Lean & Green Reset");
        assert_eq!(plan.shopping_list.len(), 4);
        assert_eq!(plan.daily_plans.len(), 1);

        let day = &plan.daily_plans[0];
        assert_eq!(day.day, "Day 1");
        assert_eq!(day.breakfast.macros.protein, 20.0);
        assert_eq!(day.lunch.macros.calories, 350.0);
        assert_eq!(day.dinner.macros.fats, 18.0);
        assert_eq!(day.snack.macros.carbs, 20.0);
    }

    #[test]
    fn plan_round_trips_through_json() {
        let plan: MealPlan = serde_json::from_str(FIXTURE_PLAN).unwrap();
        let reserialized = serde_json::to_string(&plan).unwrap();
        let reparsed: MealPlan = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(plan, reparsed);
    }

    #[test]
    fn profile_uses_camel_case_on_the_wire() {
        let profile = UserProfile {
            age: 30,
            gender: "Female".to_string(),
            weight_kg: 70.0,
            height_cm: 165.0,
            goal: "Lose Weight".to_string(),
            dietary_restrictions: "None".to_string(),
            activity_level: "Moderate".to_string(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"weightKg\""));
        assert!(json.contains("\"dietaryRestrictions\""));
    }
}
