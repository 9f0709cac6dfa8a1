//! Compensation summary models.
//!
//! A [`CompensationSummary`] is recomputed from scratch on every projection
//! and is never mutated afterwards. All amounts are annual figures in the
//! summary's preferred currency unless the field name says otherwise.

use serde::{Deserialize, Serialize};

use super::CurrencyCode;

/// ESPP figures for the current year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EsppSummary {
    /// True when any contribution was made this year.
    pub enabled: bool,
    /// Salary contributed to the plans.
    pub contributions: f64,
    /// Expected growth on the contributions.
    pub returns: f64,
}

/// Current-year (year 0) totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalsSummary {
    /// Total annual compensation.
    pub annual: f64,
    /// `annual / 12`.
    pub monthly: f64,
    /// Base salary after ESPP contributions are deducted.
    pub base: f64,
    /// Recurring allowance.
    pub allowances: f64,
    /// Bonus.
    pub bonus: f64,
    /// Benefits.
    pub benefits: f64,
    /// RSU value vesting this year.
    pub rsu_annual: f64,
    /// ESPP contributions and returns.
    pub espp: EsppSummary,
}

/// One labelled slice of the current-year compensation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionItem {
    /// Component label (e.g. "Base Salary").
    pub label: String,
    /// Annual value of the component.
    pub value: f64,
}

/// One projected year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Relative year (0 = the reference year).
    pub year: u32,
    /// Calendar year this point represents.
    pub calendar_year: i32,
    /// Raised base salary after ESPP contributions.
    pub base: f64,
    /// Recurring allowance.
    pub allowances: f64,
    /// Bonus on the raised base.
    pub bonus: f64,
    /// Benefits.
    pub benefits: f64,
    /// RSU value vesting this year.
    pub rsu: f64,
    /// ESPP contributions plus returns.
    pub espp: f64,
    /// Total compensation for the year.
    pub total: f64,
}

/// Converted value of one RSU grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsuBreakdownItem {
    /// Grant name.
    pub name: String,
    /// Value of one yearly tranche.
    pub annual_value: f64,
    /// Total grant value.
    pub total_value: f64,
}

/// The complete output of a compensation projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationSummary {
    /// Currency every amount is expressed in.
    pub preferred_currency: CurrencyCode,
    /// Current-year totals.
    pub totals: TotalsSummary,
    /// Current-year component distribution.
    pub distribution: Vec<DistributionItem>,
    /// One point per projected year, starting at year 0.
    pub timeline: Vec<TimelinePoint>,
    /// Per-grant RSU values.
    pub rsu_breakdown: Vec<RsuBreakdownItem>,
}

impl CompensationSummary {
    /// Number of projected years.
    pub fn horizon(&self) -> usize {
        self.timeline.len()
    }

    /// Returns the timeline point for a relative year.
    pub fn year(&self, year: u32) -> Option<&TimelinePoint> {
        self.timeline.get(year as usize)
    }

    /// Returns the distribution value for a label.
    pub fn distribution_value(&self, label: &str) -> Option<f64> {
        self.distribution
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.value)
    }

    /// Sum of the yearly totals across the whole horizon.
    pub fn cumulative_total(&self) -> f64 {
        self.timeline.iter().map(|point| point.total).sum()
    }
}
