use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::reference::ReferenceTable;

/// One submitted (product, grams) pair, before aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct NutrientEntry {
    pub food_name: String,
    pub grams: f64,
}

/// One aggregated line of a daily record. Serialized verbatim into the
/// persisted items blob, order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedItem {
    pub food_name: String,
    pub grams: f64,
    pub iron_mg: f64,
}

/// The aggregate for one user on one calendar date. Identity (`user_id`,
/// date) lives in the store key, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub total_iron_mg: f64,
    pub percentage_of_limit: f64,
    pub items: Vec<ComputedItem>,
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Reduce a submission to a daily record. Pure; the caller persists the
/// result. The whole submission is rejected if the limit is unusable or any
/// grams value is non-finite, so a record is always a single consistent
/// snapshot.
pub fn compute_record(
    reference: &ReferenceTable,
    entries: &[NutrientEntry],
    limit_mg: f64,
) -> Result<DailyRecord, TrackerError> {
    if !limit_mg.is_finite() || limit_mg <= 0.0 {
        return Err(TrackerError::InvalidLimit(limit_mg));
    }
    for entry in entries {
        if !entry.grams.is_finite() {
            return Err(TrackerError::MalformedEntry {
                food: entry.food_name.clone(),
            });
        }
    }

    let mut items = Vec::with_capacity(entries.len());
    let mut total = 0.0;
    for entry in entries {
        // iron from the unrounded grams; only the stored grams are rounded
        let iron_mg = round2(entry.grams * reference.lookup(&entry.food_name) / 100.0);
        total += iron_mg;
        items.push(ComputedItem {
            food_name: entry.food_name.clone(),
            grams: round2(entry.grams),
            iron_mg,
        });
    }

    // the total sums the already-rounded line items, not the raw products
    let total_iron_mg = round2(total);
    let percentage_of_limit = round2(total_iron_mg / limit_mg * 100.0);

    Ok(DailyRecord {
        total_iron_mg,
        percentage_of_limit,
        items,
    })
}

pub fn display_status(record: &DailyRecord) -> String {
    format!(
        "This is {}% of your daily limit.",
        record.percentage_of_limit
    )
}
