use serde::Serialize;

use crate::dates;

use super::summary::{DailySummary, SummaryEntry, SummaryStatus};

#[derive(Debug, Serialize)]
pub struct SummaryEntryDto {
    pub date: String,
    pub total_iron_mg: Option<f64>,
    pub percentage_of_limit: Option<f64>,
    pub status: SummaryStatus,
}

impl From<SummaryEntry> for SummaryEntryDto {
    fn from(entry: SummaryEntry) -> Self {
        Self {
            date: dates::format_iso(entry.date),
            total_iron_mg: entry.totals.map(|t| t.total_iron_mg),
            percentage_of_limit: entry.totals.map(|t| t.percentage),
            status: entry.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: SummaryEntryDto,
    pub recent: Vec<SummaryEntryDto>,
}

impl From<DailySummary> for DashboardResponse {
    fn from(summary: DailySummary) -> Self {
        Self {
            today: summary.today.into(),
            recent: summary.recent.into_iter().map(Into::into).collect(),
        }
    }
}
