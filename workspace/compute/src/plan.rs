//! Indicators derived from an insurance plan's benefit illustration table.
//!
//! Every figure here treats the first-year premium as being paid once per
//! policy year for the whole payment period, against the cash value the
//! illustration promises for that year.

use common::{PlanIndicators, PlanMetrics};
use tracing::debug;

use crate::irr;

/// Net position per illustrated year and the first year it turns non-negative.
///
/// The net position for year `t` is the cash value minus the premiums paid up
/// to `t`. Rows are taken in table order; the payback year is the `year` value
/// of the first row with a non-negative position, or `None` when the plan
/// never recovers its premiums within the illustrated horizon.
pub fn cashflows_and_payback(metrics: &PlanMetrics) -> (Vec<f64>, Option<u32>) {
    let premium = metrics.annual_premium.unwrap_or(0.0);
    let payment_years = metrics.payment_years.unwrap_or(0);

    let mut cashflows = Vec::with_capacity(metrics.benefit_table.len());
    let mut payback_year = None;
    for row in &metrics.benefit_table {
        let paid_in = premium * f64::from(row.year.min(payment_years));
        let cashflow = row.cash_value - paid_in;
        cashflows.push(cashflow);
        if payback_year.is_none() && cashflow >= 0.0 {
            payback_year = Some(row.year);
        }
    }
    (cashflows, payback_year)
}

/// Annualized IRR in percent for surrendering at each illustrated year.
///
/// For a row with year `t` the flow series is one premium payment per year
/// while premiums are due, zeros afterwards, and the row's cash value received
/// with the final flow. Years where no rate exists (single flow, one-sided
/// flows, no convergence) yield `None`, as do all years before a positive
/// payback year.
pub fn irr_trend(metrics: &PlanMetrics, payback_year: Option<u32>) -> Vec<Option<f64>> {
    let premium = metrics.annual_premium.unwrap_or(0.0);
    let payment_years = metrics.payment_years.unwrap_or(0);

    let mut trend: Vec<Option<f64>> = metrics
        .benefit_table
        .iter()
        .map(|row| {
            let paying = row.year.min(payment_years) as usize;
            let mut flows = vec![-premium; paying];
            flows.resize(row.year as usize, 0.0);
            if let Some(last) = flows.last_mut() {
                *last += row.cash_value;
            }
            match irr::irr(&flows) {
                Ok(rate) => Some(round_to(rate * 100.0, 6)),
                Err(err) => {
                    debug!("No IRR for year {}: {}", row.year, err);
                    None
                }
            }
        })
        .collect();

    // Mask the years before a positive payback year
    if let Some(payback) = payback_year {
        if payback > 0 {
            let masked = (payback - 1) as usize;
            for point in trend.iter_mut().take(masked) {
                *point = None;
            }
        }
    }
    trend
}

/// Compound annual growth of the cash value across the whole table, in
/// percent rounded to two decimals.
///
/// Needs at least two rows, a non-zero starting cash value and a non-zero
/// final year; returns `None` otherwise, or when the growth is not a real
/// number.
pub fn annualized_growth(metrics: &PlanMetrics) -> Option<f64> {
    let table = &metrics.benefit_table;
    if table.len() < 2 {
        return None;
    }
    let start = table[0].cash_value;
    let end = table[table.len() - 1].cash_value;
    let horizon = table[table.len() - 1].year;
    if start == 0.0 || horizon == 0 {
        return None;
    }

    let growth = ((end / start).powf(1.0 / f64::from(horizon)) - 1.0) * 100.0;
    if growth.is_finite() {
        Some(round_to(growth, 2))
    } else {
        None
    }
}

/// Smallest and largest computed IRR in the trend, ignoring masked years.
pub fn irr_range(trend: &[Option<f64>]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for value in trend.iter().flatten() {
        range = Some(match range {
            Some((min, max)) => (min.min(*value), max.max(*value)),
            None => (*value, *value),
        });
    }
    range
}

/// All derived indicators for one plan.
pub fn plan_indicators(metrics: &PlanMetrics) -> PlanIndicators {
    let (cashflows, payback_year) = cashflows_and_payback(metrics);
    let irr_trend = irr_trend(metrics, payback_year);
    debug!(
        rows = metrics.benefit_table.len(),
        ?payback_year,
        "Computed plan indicators"
    );
    PlanIndicators {
        cashflows,
        payback_year,
        irr_trend,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
