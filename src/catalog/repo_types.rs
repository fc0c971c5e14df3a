use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Arabic/English display string pair, as stored in the catalog documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub ar: String,
    pub en: String,
}

/// Root of `programs.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramsDoc {
    pub sports: Vec<Sport>,
    #[serde(default)]
    pub sample_workouts: HashMap<String, SampleDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub color: String,
    pub levels: Vec<Level>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub name: LocalizedText,
    pub programs: Vec<Program>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    #[serde(default)]
    pub features: Vec<LocalizedText>,
    pub is_free: bool,
    /// Only meaningful when `is_free` is false; free programs carry 0.
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDay {
    pub warmup: Vec<LocalizedText>,
    pub main: Vec<LocalizedText>,
    pub cooldown: Vec<LocalizedText>,
}

/// Root of `nutrition.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDoc {
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: LocalizedText,
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: LocalizedText,
    pub is_free: bool,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub macros: Option<Macros>,
    /// Free-form day -> meals structure; rendered as-is by the UI.
    #[serde(default)]
    pub weekly_menu: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}
