use serde::{Deserialize, Serialize};

use super::aggregate::{self, ComputedItem, DailyRecord, NutrientEntry};

#[derive(Debug, Deserialize)]
pub struct SaveDayRequest {
    pub limit_mg: f64,
    pub entries: Vec<NutrientEntry>,
}

#[derive(Debug, Serialize)]
pub struct DayRecordDto {
    pub total_iron_mg: f64,
    pub percentage_of_limit: f64,
    pub items: Vec<ComputedItem>,
    pub status: String,
}

impl From<DailyRecord> for DayRecordDto {
    fn from(record: DailyRecord) -> Self {
        let status = aggregate::display_status(&record);
        Self {
            total_iron_mg: record.total_iron_mg,
            percentage_of_limit: record.percentage_of_limit,
            items: record.items,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    /// Session default limit for the edit view; the save body carries the
    /// value actually used.
    pub limit_mg: f64,
    pub record: Option<DayRecordDto>,
}

#[derive(Debug, Serialize)]
pub struct FoodDto {
    pub name: String,
    pub iron_per_100g: f64,
}
