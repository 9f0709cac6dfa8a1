//! ESPP contribution proration.
//!
//! A purchase window can straddle a calendar-year boundary, so each plan
//! contributes only for the months it is active in the year being projected.

use chrono::{Datelike, Months};

use crate::models::{AuditStep, CurrencyCode, EsppPlan, ExchangeRateTable};

use super::{MONTHS_PER_YEAR, convert, parse_calendar_date, safe};

/// Months of `target_year` covered by a plan window.
///
/// The window runs from `start_date` for `duration_months` calendar months.
/// Month positions are zero-based, so a window ending on 1 March of the
/// target year covers two months of it.
///
/// Returns `0` when the start date cannot be parsed or the window misses the
/// year entirely. The result is always in `[0, 12]`.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::months_in_year;
///
/// // September to March: four months in the first year, two in the next.
/// assert_eq!(months_in_year("2026-09-01", 6, 2026), 4);
/// assert_eq!(months_in_year("2026-09-01", 6, 2027), 2);
/// assert_eq!(months_in_year("2026-09-01", 6, 2028), 0);
/// ```
pub fn months_in_year(start_date: &str, duration_months: u32, target_year: i32) -> u32 {
    let Some(start) = parse_calendar_date(start_date) else {
        return 0;
    };
    let Some(end) = start.checked_add_months(Months::new(duration_months)) else {
        return 0;
    };

    let (start_year, end_year) = (start.year(), end.year());

    let months = if target_year < start_year || target_year > end_year {
        0
    } else if start_year == target_year && end_year == target_year {
        duration_months
    } else if start_year == target_year {
        12 - start.month0()
    } else if end_year == target_year {
        end.month0()
    } else {
        12
    };

    months.min(12)
}

/// ESPP figures for one projected year, in the preferred currency.
#[derive(Debug, Clone)]
pub struct EsppYearResult {
    /// Salary contributed across all plans.
    pub contributions: f64,
    /// Expected growth on the contributions.
    pub returns: f64,
    /// Number of plans active in the year.
    pub active_plans: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl EsppYearResult {
    /// Contributions plus returns.
    pub fn total(&self) -> f64 {
        safe(self.contributions + self.returns)
    }
}

/// Calculates ESPP contributions and returns for one calendar year.
///
/// For each plan active in `target_year`, the year's base salary is
/// converted into the purchase currency, the contribution is taken for the
/// active months, and the result is converted back. The plan's override
/// rate is used for both conversions.
///
/// # Arguments
///
/// * `plans` - The ESPP plans
/// * `base_salary_for_year` - Raised annual base salary in `preferred_currency`
/// * `preferred_currency` - Currency of the input salary and of the result
/// * `rates` - Exchange rate table
/// * `target_year` - Calendar year being projected
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use compensation_engine::calculation::calculate_espp_for_year;
/// use compensation_engine::models::{CurrencyCode, EsppPlan, ExchangeRateTable};
///
/// let plan = EsppPlan {
///     name: "H1".to_string(),
///     start_date: "2026-01-01".to_string(),
///     duration_months: 6,
///     contribution_percentage: 10.0,
///     growth_percentage: 15.0,
///     purchase_currency: CurrencyCode::Usd,
///     override_rate: None,
/// };
///
/// let result = calculate_espp_for_year(
///     &[plan],
///     120_000.0,
///     CurrencyCode::Usd,
///     &ExchangeRateTable::default_rates(),
///     2026,
///     1,
/// );
///
/// // 10,000 a month, 10% for six months, 15% growth.
/// assert!((result.contributions - 6_000.0).abs() < 1e-9);
/// assert!((result.returns - 900.0).abs() < 1e-9);
/// ```
pub fn calculate_espp_for_year(
    plans: &[EsppPlan],
    base_salary_for_year: f64,
    preferred_currency: CurrencyCode,
    rates: &ExchangeRateTable,
    target_year: i32,
    step_number: u32,
) -> EsppYearResult {
    let mut contributions = 0.0;
    let mut returns = 0.0;
    let mut plan_details = Vec::new();

    for plan in plans {
        let months = months_in_year(&plan.start_date, plan.duration_months, target_year);
        if months == 0 {
            continue;
        }

        let base_in_purchase = convert(
            base_salary_for_year,
            preferred_currency,
            plan.purchase_currency,
            plan.override_rate,
            rates,
        );

        let contribution_rate = plan.contribution_percentage / 100.0;
        let growth_rate = plan.growth_percentage / 100.0;

        let contribution_in_purchase = safe(
            base_in_purchase / MONTHS_PER_YEAR * contribution_rate * f64::from(months),
        );
        let contribution = safe(convert(
            contribution_in_purchase,
            plan.purchase_currency,
            preferred_currency,
            plan.override_rate,
            rates,
        ));
        let plan_return = safe(contribution * growth_rate);

        plan_details.push(serde_json::json!({
            "name": plan.name,
            "months": months,
            "contribution": contribution,
            "return": plan_return
        }));

        contributions += contribution;
        returns += plan_return;
    }

    let contributions = safe(contributions);
    let returns = safe(returns);
    let active_plans = plan_details.len();

    let audit_step = AuditStep {
        step_number,
        rule_id: "espp_proration".to_string(),
        rule_name: "ESPP Proration".to_string(),
        input: serde_json::json!({
            "target_year": target_year,
            "base_salary": base_salary_for_year,
            "plan_count": plans.len()
        }),
        output: serde_json::json!({
            "plans": plan_details,
            "contributions": contributions,
            "returns": returns
        }),
        reasoning: if active_plans == 0 {
            format!("No ESPP plan active in {}", target_year)
        } else {
            format!(
                "{} plan(s) active in {}: {:.2} contributed, {:.2} expected return",
                active_plans, target_year, contributions, returns
            )
        },
    };

    EsppYearResult {
        contributions,
        returns,
        active_plans,
        audit_step,
    }
}
