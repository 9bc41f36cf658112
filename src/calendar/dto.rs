use serde::{Deserialize, Serialize};

use crate::dates;

use super::grid::{DayCell, DayStatus};

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct DayCellDto {
    pub date: String,
    pub day: u8,
    pub status: DayStatus,
}

impl From<DayCell> for DayCellDto {
    fn from(cell: DayCell) -> Self {
        Self {
            date: dates::format_iso(cell.date),
            day: cell.date.day(),
            status: cell.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u8,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u8,
    pub weeks: Vec<Vec<DayCellDto>>,
    pub previous: MonthRef,
    pub next: MonthRef,
}
