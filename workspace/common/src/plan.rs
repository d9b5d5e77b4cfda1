use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metrics extracted from a single plan document.
///
/// Everything is optional: the analyst reads whatever the document states and
/// leaves the rest empty, so downstream code must not rely on any field being
/// present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PlanMetrics {
    /// Product name as printed in the document
    pub product_name: Option<String>,
    /// Covered amount (sum assured)
    pub coverage_amount: Option<f64>,
    /// Coverage duration as free text, e.g. "lifetime" or "to age 70"
    pub coverage_term: Option<String>,
    /// First-year premium
    pub annual_premium: Option<f64>,
    /// Number of years premiums are paid
    pub payment_years: Option<u32>,
    /// Year-by-year benefit illustration
    pub benefit_table: Vec<BenefitRow>,
}

impl PlanMetrics {
    /// Fill in missing policy years sequentially (1-based).
    ///
    /// Benefit tables sometimes arrive without explicit year numbers; rows
    /// then count up from 1 in table order.
    pub fn normalize_years(&mut self) {
        for (index, row) in self.benefit_table.iter_mut().enumerate() {
            if row.year == 0 {
                row.year = index as u32 + 1;
            }
        }
    }
}

/// One row of a benefit illustration table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BenefitRow {
    /// Policy year (1-based)
    pub year: u32,
    /// Accumulated cash value at the end of the year
    pub cash_value: f64,
    /// Surrender value, when the document lists one
    pub surrender: Option<f64>,
}

/// Indicators derived from the extracted metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PlanIndicators {
    /// Net position per benefit-table row (cash value minus premiums paid)
    pub cashflows: Vec<f64>,
    /// First policy year where the net position is non-negative
    pub payback_year: Option<u32>,
    /// Annualized IRR in percent per policy year, `None` where undefined
    pub irr_trend: Vec<Option<f64>>,
}

/// One fully analyzed plan document, as returned by the analyze endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanAnalysis {
    /// Product display name (falls back to the uploaded file name)
    pub product_name: String,
    /// Covered amount (sum assured)
    pub coverage_amount: Option<f64>,
    /// Coverage duration as free text
    pub coverage_term: Option<String>,
    /// First-year premium
    pub annual_premium: Option<f64>,
    /// Number of years premiums are paid
    pub payment_years: Option<u32>,
    /// Year-by-year benefit illustration
    pub benefit_table: Vec<BenefitRow>,
    /// Net position per benefit-table row
    pub cashflows: Vec<f64>,
    /// First policy year where the net position is non-negative
    pub payback_year: Option<u32>,
    /// Annualized IRR in percent per policy year
    pub irr_trend: Vec<Option<f64>>,
    /// Plain-language summary of the plan
    pub summary: String,
}

impl PlanAnalysis {
    /// Assemble a response record from extracted metrics, computed indicators
    /// and the generated summary.
    pub fn from_parts(
        product_name: String,
        metrics: PlanMetrics,
        indicators: PlanIndicators,
        summary: String,
    ) -> Self {
        Self {
            product_name,
            coverage_amount: metrics.coverage_amount,
            coverage_term: metrics.coverage_term,
            annual_premium: metrics.annual_premium,
            payment_years: metrics.payment_years,
            benefit_table: metrics.benefit_table,
            cashflows: indicators.cashflows,
            payback_year: indicators.payback_year,
            irr_trend: indicators.irr_trend,
            summary,
        }
    }

    /// Total premium over the payment period; absent values count as zero.
    pub fn total_premium(&self) -> f64 {
        self.annual_premium.unwrap_or(0.0) * f64::from(self.payment_years.unwrap_or(0))
    }
}
