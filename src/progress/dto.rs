use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddWeightRequest {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddMeasurementRequest {
    pub waist: f64,
    pub chest: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddPrRequest {
    pub squat: f64,
    pub bench: f64,
    pub deadlift: f64,
}

#[derive(Debug, Deserialize)]
pub struct WeightsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    super::services::DEFAULT_WEIGHT_WINDOW
}
