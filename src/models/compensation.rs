//! Compensation input models.
//!
//! These are the values an employee (or the editing UI acting for them)
//! supplies to the engine. Dates are kept as the raw strings that were
//! entered; the calculation layer decides how to treat ones it cannot parse.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CurrencyCode, MonetaryField};

/// How the "Benefits" component of the summary is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitsMode {
    /// Benefits are the recurring allowance, counted once in the total.
    #[default]
    AllowanceOnly,
    /// Benefits are a percentage of base plus allowance, evaluated in the
    /// benefits calculation currency. The allowance is reported separately
    /// and raised along with the base.
    ///
    /// Adapted from the earlier benefits model rather than copied: raises at
    /// year offset 0 apply to year 0, and every year goes through the
    /// calculation currency.
    PercentOfPay,
}

/// Recurring monthly compensation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringCompensation {
    /// Monthly base salary.
    pub base: MonetaryField,
    /// Monthly allowance (e.g. meal allowance). Raised only under
    /// [`BenefitsMode::PercentOfPay`].
    #[serde(alias = "food")]
    pub allowance: MonetaryField,
    /// Annual bonus as a percentage of the (raised) base salary.
    #[serde(default)]
    pub bonus_percentage: f64,
}

/// Benefits settings used by [`BenefitsMode::PercentOfPay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitsSettings {
    /// Percentage of base plus allowance.
    #[serde(default)]
    pub percentage: f64,
    /// Currency in which the percentage is evaluated.
    pub calculation_currency: CurrencyCode,
}

impl Default for BenefitsSettings {
    fn default() -> Self {
        Self {
            percentage: 0.0,
            calculation_currency: CurrencyCode::Usd,
        }
    }
}

/// An equity award that vests evenly once a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsuGrant {
    /// Display name of the grant.
    pub name: String,
    /// Grant start date, as entered (normally `YYYY-MM-DD`).
    pub start_date: String,
    /// Number of yearly vesting tranches.
    pub vesting_years: u32,
    /// Total grant value across all tranches.
    pub total_value: MonetaryField,
}

fn default_duration_months() -> u32 {
    6
}

/// One employee stock purchase plan window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsppPlan {
    /// Display name of the plan.
    pub name: String,
    /// First day of the purchase window, as entered.
    pub start_date: String,
    /// Length of the window in months.
    #[serde(default = "default_duration_months")]
    pub duration_months: u32,
    /// Share of base salary contributed, in percent.
    pub contribution_percentage: f64,
    /// Expected growth on the contribution, in percent.
    pub growth_percentage: f64,
    /// Currency in which shares are purchased.
    pub purchase_currency: CurrencyCode,
    /// Optional rate overriding the table during this plan's conversions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_rate: Option<f64>,
}

/// A scheduled change to base salary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Raise {
    /// Relative year in which the raise takes effect (0 = this year).
    pub year_offset: u32,
    /// Raise in percent; negative values are pay cuts.
    pub percentage: f64,
}

/// Everything the engine needs to project one employee's compensation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationInputs {
    /// Recurring salary, allowance and bonus.
    pub recurring: RecurringCompensation,
    /// Benefits percentage settings.
    #[serde(default)]
    pub benefits: BenefitsSettings,
    /// Equity grants.
    #[serde(default)]
    pub rsu_grants: Vec<RsuGrant>,
    /// ESPP purchase windows.
    #[serde(default)]
    pub espp_plans: Vec<EsppPlan>,
    /// Scheduled raises.
    #[serde(default)]
    pub raises: Vec<Raise>,
}

impl CompensationInputs {
    /// Starter values for a fresh projection: a 20,000 ILS monthly salary
    /// with a 1,000 ILS allowance, a 10% bonus and a 50,000 USD grant
    /// vesting over four years from `today`.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::models::CompensationInputs;
    /// use chrono::NaiveDate;
    ///
    /// let inputs = CompensationInputs::starter(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    /// assert_eq!(inputs.rsu_grants[0].start_date, "2026-03-01");
    /// assert!(inputs.espp_plans.is_empty());
    /// ```
    pub fn starter(today: NaiveDate) -> Self {
        Self {
            recurring: RecurringCompensation {
                base: MonetaryField::new(20_000.0, CurrencyCode::Ils),
                allowance: MonetaryField::new(1_000.0, CurrencyCode::Ils),
                bonus_percentage: 10.0,
            },
            benefits: BenefitsSettings {
                percentage: 10.0,
                calculation_currency: CurrencyCode::Usd,
            },
            rsu_grants: vec![RsuGrant {
                name: "Initial Grant".to_string(),
                start_date: today.format("%Y-%m-%d").to_string(),
                vesting_years: 4,
                total_value: MonetaryField::new(50_000.0, CurrencyCode::Usd),
            }],
            espp_plans: Vec::new(),
            raises: Vec::new(),
        }
    }
}
