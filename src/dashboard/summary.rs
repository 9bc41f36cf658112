use serde::Serialize;
use sqlx::SqlitePool;
use time::{Date, Duration};

use crate::dates;
use crate::error::TrackerError;
use crate::records::repo::{self, DayTotals};

pub const DEFAULT_WINDOW_DAYS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryStatus {
    WithinLimit,
    OverLimit,
    /// Nothing saved for the day. Distinct from a real 0-iron day, which is
    /// stored data and classifies as within-limit.
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryEntry {
    pub date: Date,
    pub totals: Option<DayTotals>,
    pub status: SummaryStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub today: SummaryEntry,
    /// Previous `window_days` days, most recent first.
    pub recent: Vec<SummaryEntry>,
}

fn classify(totals: Option<&DayTotals>) -> SummaryStatus {
    match totals {
        None => SummaryStatus::NoData,
        Some(t) if t.percentage <= 100.0 => SummaryStatus::WithinLimit,
        Some(_) => SummaryStatus::OverLimit,
    }
}

async fn entry_for(
    db: &SqlitePool,
    user_id: i64,
    date: Date,
) -> Result<SummaryEntry, TrackerError> {
    let totals = repo::get_totals(db, user_id, &dates::format_iso(date)).await?;
    Ok(SummaryEntry {
        date,
        status: classify(totals.as_ref()),
        totals,
    })
}

/// Today's aggregate plus the trailing window for the trend view. Reads
/// only; a day with no record surfaces as a no-data sentinel.
pub async fn build_summary(
    db: &SqlitePool,
    user_id: i64,
    today: Date,
    window_days: u32,
) -> Result<DailySummary, TrackerError> {
    let today_entry = entry_for(db, user_id, today).await?;
    let mut recent = Vec::with_capacity(window_days as usize);
    for offset in 1..=window_days {
        let day = today
            .checked_sub(Duration::days(i64::from(offset)))
            .ok_or_else(|| TrackerError::InvalidDate(dates::format_iso(today)))?;
        recent.push(entry_for(db, user_id, day).await?);
    }
    Ok(DailySummary {
        today: today_entry,
        recent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::aggregate::{compute_record, NutrientEntry};
    use crate::records::repo::upsert;
    use crate::reference::ReferenceTable;
    use sqlx::sqlite::SqlitePoolOptions;
    use time::macros::date;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory sqlite");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("run migrations");
        pool
    }

    async fn save(pool: &SqlitePool, day: &str, entries: &[(&str, f64)], limit: f64) {
        let table = ReferenceTable::builtin();
        let entries: Vec<NutrientEntry> = entries
            .iter()
            .map(|(food_name, grams)| NutrientEntry {
                food_name: food_name.to_string(),
                grams: *grams,
            })
            .collect();
        let record = compute_record(&table, &entries, limit).expect("valid submission");
        upsert(pool, 1, day, &record).await.expect("upsert");
    }

    #[tokio::test]
    async fn window_is_most_recent_first_with_sentinels() {
        let pool = test_pool().await;
        let today = date!(2024 - 06 - 15);
        save(&pool, "2024-06-15", &[("Spinach", 100.0)], 15.0).await;
        save(&pool, "2024-06-13", &[("Soybeans", 100.0)], 10.0).await;

        let summary = build_summary(&pool, 1, today, DEFAULT_WINDOW_DAYS)
            .await
            .unwrap();

        assert_eq!(summary.today.status, SummaryStatus::WithinLimit);
        assert_eq!(
            summary.today.totals,
            Some(DayTotals {
                total_iron_mg: 2.7,
                percentage: 18.0
            })
        );

        assert_eq!(summary.recent.len(), 5);
        let dates: Vec<String> = summary
            .recent
            .iter()
            .map(|e| dates::format_iso(e.date))
            .collect();
        assert_eq!(
            dates,
            ["2024-06-14", "2024-06-13", "2024-06-12", "2024-06-11", "2024-06-10"]
        );

        assert_eq!(summary.recent[0].status, SummaryStatus::NoData);
        assert_eq!(summary.recent[0].totals, None);
        assert_eq!(summary.recent[1].status, SummaryStatus::OverLimit);
        assert_eq!(summary.recent[2].status, SummaryStatus::NoData);
    }

    #[tokio::test]
    async fn empty_store_is_all_sentinels() {
        let pool = test_pool().await;
        let summary = build_summary(&pool, 1, date!(2024 - 06 - 15), 5).await.unwrap();
        assert_eq!(summary.today.status, SummaryStatus::NoData);
        assert!(summary
            .recent
            .iter()
            .all(|e| e.status == SummaryStatus::NoData && e.totals.is_none()));
    }

    #[tokio::test]
    async fn a_real_zero_day_is_not_a_sentinel() {
        let pool = test_pool().await;
        // saved, but nothing with any iron in it
        save(&pool, "2024-06-14", &[("Mystery Paste", 100.0)], 15.0).await;

        let summary = build_summary(&pool, 1, date!(2024 - 06 - 15), 5).await.unwrap();
        assert_eq!(summary.recent[0].status, SummaryStatus::WithinLimit);
        assert_eq!(
            summary.recent[0].totals,
            Some(DayTotals {
                total_iron_mg: 0.0,
                percentage: 0.0
            })
        );
    }

    #[tokio::test]
    async fn window_crosses_month_boundaries() {
        let pool = test_pool().await;
        save(&pool, "2024-02-29", &[("Spinach", 100.0)], 15.0).await;

        let summary = build_summary(&pool, 1, date!(2024 - 03 - 02), 5).await.unwrap();
        let leap_day = summary
            .recent
            .iter()
            .find(|e| dates::format_iso(e.date) == "2024-02-29")
            .expect("leap day in window");
        assert_eq!(leap_day.status, SummaryStatus::WithinLimit);
    }
}
