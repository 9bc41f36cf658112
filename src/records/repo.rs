use std::collections::HashMap;

use sqlx::{FromRow, SqlitePool};

use crate::error::TrackerError;

use super::aggregate::DailyRecord;

#[derive(Debug, FromRow)]
struct DailyRecordRow {
    total_iron_mg: f64,
    percentage: f64,
    items_json: String,
}

/// The two columns the dashboard needs; full records stay out of that path.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct DayTotals {
    pub total_iron_mg: f64,
    pub percentage: f64,
}

#[derive(Debug, FromRow)]
struct DayPercentage {
    record_date: String,
    percentage: f64,
}

pub async fn get(
    db: &SqlitePool,
    user_id: i64,
    date: &str,
) -> Result<Option<DailyRecord>, TrackerError> {
    let row = sqlx::query_as::<_, DailyRecordRow>(
        r#"
        SELECT total_iron_mg, percentage, items_json
        FROM daily_records
        WHERE user_id = ? AND record_date = ?
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await?;

    row.map(|r| {
        let items = serde_json::from_str(&r.items_json).map_err(|source| {
            TrackerError::ItemsJson {
                date: date.to_string(),
                source,
            }
        })?;
        Ok(DailyRecord {
            total_iron_mg: r.total_iron_mg,
            percentage_of_limit: r.percentage,
            items,
        })
    })
    .transpose()
}

pub async fn get_totals(
    db: &SqlitePool,
    user_id: i64,
    date: &str,
) -> Result<Option<DayTotals>, TrackerError> {
    let totals = sqlx::query_as::<_, DayTotals>(
        r#"
        SELECT total_iron_mg, percentage
        FROM daily_records
        WHERE user_id = ? AND record_date = ?
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(totals)
}

/// Percentage-of-limit keyed by date for every stored day in the inclusive
/// range. The calendar classifier only needs this one column.
pub async fn percentages_between(
    db: &SqlitePool,
    user_id: i64,
    start: &str,
    end: &str,
) -> Result<HashMap<String, f64>, TrackerError> {
    let rows = sqlx::query_as::<_, DayPercentage>(
        r#"
        SELECT record_date, percentage
        FROM daily_records
        WHERE user_id = ? AND record_date BETWEEN ? AND ?
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| (r.record_date, r.percentage))
        .collect())
}

/// Replace whatever is stored for `(user_id, date)` with `record`. The
/// delete and insert run in one transaction, so a concurrent reader sees
/// either the old row or the new one, never a missing day.
pub async fn upsert(
    db: &SqlitePool,
    user_id: i64,
    date: &str,
    record: &DailyRecord,
) -> Result<(), TrackerError> {
    let items_json =
        serde_json::to_string(&record.items).map_err(|source| TrackerError::ItemsJson {
            date: date.to_string(),
            source,
        })?;

    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM daily_records WHERE user_id = ? AND record_date = ?")
        .bind(user_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        r#"
        INSERT INTO daily_records (user_id, record_date, total_iron_mg, percentage, items_json)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(record.total_iron_mg)
    .bind(record.percentage_of_limit)
    .bind(&items_json)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}
