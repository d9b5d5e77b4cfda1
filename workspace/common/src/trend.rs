//! Merges per-product year series into chart-ready rows.
//!
//! Both trend charts plot several products over policy years, but products
//! rarely cover the same year range. Rows are therefore keyed by a year label
//! and collect one value per product; a product simply stays absent from rows
//! it has no data for, which the charts render as a gap.

use std::collections::HashMap;

use tracing::trace;

use crate::PlanAnalysis;

/// Which per-year series of an analysis to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendKind {
    /// Cash value per benefit-table row
    CashValue,
    /// Annualized IRR in percent per policy year
    Irr,
}

/// One chart row: a year label plus the value of every product that has one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendRow {
    /// Year label, e.g. "Year 3"
    pub label: String,
    /// Value per product display name
    pub values: HashMap<String, f64>,
}

/// Merge the selected series of all records into per-year rows.
///
/// Rows appear in first-encounter order: all years of the first record, then
/// any additional years later records introduce. An IRR gap (`None`) still
/// claims its row so the year shows on the axis, but contributes no value.
pub fn build_trend_rows(records: &[PlanAnalysis], kind: TrendKind) -> Vec<TrendRow> {
    let mut rows: Vec<TrendRow> = Vec::new();

    for record in records {
        let points: Vec<(String, Option<f64>)> = match kind {
            TrendKind::CashValue => record
                .benefit_table
                .iter()
                .map(|row| (year_label(row.year), Some(row.cash_value)))
                .collect(),
            TrendKind::Irr => record
                .irr_trend
                .iter()
                .enumerate()
                .map(|(index, value)| (year_label(index as u32 + 1), *value))
                .collect(),
        };

        for (label, value) in points {
            let index = match rows.iter().position(|row| row.label == label) {
                Some(index) => index,
                None => {
                    rows.push(TrendRow { label, values: HashMap::new() });
                    rows.len() - 1
                }
            };
            if let Some(value) = value {
                rows[index].values.insert(record.product_name.clone(), value);
            }
        }
    }

    trace!("Merged {} record(s) into {} trend rows", records.len(), rows.len());
    rows
}

/// The values of one product across all rows, aligned with the row order.
/// Rows without that product yield `None`.
pub fn series_for(rows: &[TrendRow], product_name: &str) -> Vec<Option<f64>> {
    rows.iter().map(|row| row.values.get(product_name).copied()).collect()
}

fn year_label(year: u32) -> String {
    format!("Year {year}")
}
