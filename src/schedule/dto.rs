use serde::{Deserialize, Serialize};
use time::Date;

use super::services::ClassSession;

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    /// Any date inside the wanted week, `YYYY-MM-DD`; defaults to today.
    pub start: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub week_start: Date,
    pub days: Vec<Date>,
    pub classes: Vec<ClassSession>,
}
