use serde::{Deserialize, Serialize};

use super::repo_types::{Level, LocalizedText, Program, Sport};

/// Query parameters for the flattened program listing. `"all"` passes a
/// dimension through unfiltered.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramFilter {
    #[serde(default = "all")]
    pub sport: String,
    #[serde(default = "all")]
    pub level: String,
    #[serde(default)]
    pub free: bool,
}

fn all() -> String {
    "all".into()
}

impl Default for ProgramFilter {
    fn default() -> Self {
        Self {
            sport: all(),
            level: all(),
            free: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PlanFilter {
    #[serde(default)]
    pub free: bool,
}

/// A program flattened out of the sport -> level tree, carrying its parent
/// context so the listing can render without further lookups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub features: Vec<LocalizedText>,
    pub is_free: bool,
    pub price: f64,
    pub sport_id: String,
    pub sport_name: LocalizedText,
    pub level_id: String,
    pub level_name: LocalizedText,
    pub color: String,
}

impl ProgramView {
    pub fn denormalize(sport: &Sport, level: &Level, program: &Program) -> Self {
        Self {
            id: program.id.clone(),
            name: program.name.clone(),
            description: program.description.clone(),
            features: program.features.clone(),
            is_free: program.is_free,
            price: program.price,
            sport_id: sport.id.clone(),
            sport_name: sport.name.clone(),
            level_id: level.id.clone(),
            level_name: level.name.clone(),
            color: sport.color.clone(),
        }
    }
}
