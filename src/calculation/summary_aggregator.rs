//! Compensation summary aggregation.
//!
//! This is the top of the calculation pipeline. It normalizes the recurring
//! figures, builds the RSU schedule and raises timeline, then walks the
//! projection horizon year by year, prorating ESPP against each year's
//! raised base salary.

use tracing::debug;

use crate::models::{
    AuditStep, AuditWarning, BenefitsMode, CompensationInputs, CompensationSummary,
    CurrencyCode, DistributionItem, EsppSummary, ExchangeRateTable, TimelinePoint,
    TotalsSummary,
};

use super::{
    MONTHS_PER_YEAR, RaisesTimeline, build_rsu_schedule, calculate_espp_for_year, convert,
    convert_annual, safe,
};

/// The minimum number of projected years.
pub const MIN_PROJECTION_YEARS: u32 = 5;

/// The maximum number of projected years.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Warning code for raises or tranches beyond [`MAX_PROJECTION_YEARS`].
pub const HORIZON_CAPPED_WARNING: &str = "PROJECTION_HORIZON_CAPPED";

/// Number of years the inputs ask for, before the cap.
fn requested_horizon(max_raise_offset: Option<u32>, last_rsu_year: Option<u32>) -> u32 {
    MIN_PROJECTION_YEARS
        .max(max_raise_offset.map_or(0, |offset| offset.saturating_add(1)))
        .max(last_rsu_year.map_or(0, |year| year.saturating_add(1)))
}

/// Number of years to project.
///
/// At least [`MIN_PROJECTION_YEARS`], extended to cover the last raise and
/// the last RSU tranche, and never more than [`MAX_PROJECTION_YEARS`].
///
/// # Example
///
/// ```
/// use compensation_engine::calculation::{MAX_PROJECTION_YEARS, projection_horizon};
///
/// assert_eq!(projection_horizon(None, None), 5);
/// assert_eq!(projection_horizon(Some(6), Some(3)), 7);
/// assert_eq!(projection_horizon(Some(1), Some(8)), 9);
/// assert_eq!(projection_horizon(Some(u32::MAX), None), MAX_PROJECTION_YEARS);
/// ```
pub fn projection_horizon(max_raise_offset: Option<u32>, last_rsu_year: Option<u32>) -> u32 {
    requested_horizon(max_raise_offset, last_rsu_year).min(MAX_PROJECTION_YEARS)
}

/// Settings a projection is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionContext<'a> {
    /// Currency every output amount is expressed in.
    pub preferred_currency: CurrencyCode,
    /// Exchange rate table.
    pub rates: &'a ExchangeRateTable,
    /// Calendar year treated as relative year 0.
    pub reference_year: i32,
    /// How the benefits component is derived.
    pub benefits_mode: BenefitsMode,
}

impl<'a> ProjectionContext<'a> {
    /// Creates a context using the default benefits model.
    pub fn new(
        preferred_currency: CurrencyCode,
        rates: &'a ExchangeRateTable,
        reference_year: i32,
    ) -> Self {
        Self {
            preferred_currency,
            rates,
            reference_year,
            benefits_mode: BenefitsMode::default(),
        }
    }

    /// Sets the benefits model.
    pub fn with_benefits_mode(mut self, benefits_mode: BenefitsMode) -> Self {
        self.benefits_mode = benefits_mode;
        self
    }
}

/// A summary together with the trail that produced it.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// The computed summary.
    pub summary: CompensationSummary,
    /// Audit steps in evaluation order.
    pub audit_steps: Vec<AuditStep>,
    /// Degenerate inputs noticed along the way.
    pub warnings: Vec<AuditWarning>,
}

struct YearFigures {
    point: TimelinePoint,
    espp_contributions: f64,
    espp_returns: f64,
}

/// Projects compensation and records every step taken.
///
/// # Example
///
/// ```
/// use compensation_engine::calculation::{ProjectionContext, project_compensation};
/// use compensation_engine::models::{CompensationInputs, CurrencyCode, ExchangeRateTable};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let inputs = CompensationInputs::starter(today);
/// let rates = ExchangeRateTable::default_rates();
///
/// let ctx = ProjectionContext::new(CurrencyCode::Usd, &rates, 2026);
/// let outcome = project_compensation(&inputs, &ctx);
///
/// assert_eq!(outcome.summary.timeline.len(), 5);
/// assert_eq!(outcome.summary.totals.rsu_annual, 12_500.0);
/// assert!(outcome.warnings.is_empty());
/// ```
pub fn project_compensation(
    inputs: &CompensationInputs,
    ctx: &ProjectionContext<'_>,
) -> SummaryOutcome {
    let preferred = ctx.preferred_currency;
    let mut audit_steps = Vec::new();
    let mut step_number = 0u32;
    let mut next_step = || {
        step_number += 1;
        step_number
    };

    // Step 1: annualized recurring figures, before raises
    let base_annual_raw = safe(convert_annual(&inputs.recurring.base, preferred, ctx.rates));
    let allowance_annual = safe(convert_annual(
        &inputs.recurring.allowance,
        preferred,
        ctx.rates,
    ));
    let bonus_rate = inputs.recurring.bonus_percentage / 100.0;

    audit_steps.push(AuditStep {
        step_number: next_step(),
        rule_id: "base_normalization".to_string(),
        rule_name: "Recurring Compensation Normalization".to_string(),
        input: serde_json::json!({
            "base": inputs.recurring.base,
            "allowance": inputs.recurring.allowance,
            "preferred_currency": preferred
        }),
        output: serde_json::json!({
            "base_annual": base_annual_raw,
            "allowance_annual": allowance_annual
        }),
        reasoning: format!(
            "Monthly base and allowance annualized (x12) and converted to {}",
            preferred
        ),
    });

    // Step 2: RSU schedule and raises
    let rsu = build_rsu_schedule(
        &inputs.rsu_grants,
        preferred,
        ctx.rates,
        ctx.reference_year,
        next_step(),
    );
    let raises = RaisesTimeline::build(&inputs.raises);
    let requested = requested_horizon(raises.max_offset(), rsu.schedule.last_year());
    let horizon = projection_horizon(raises.max_offset(), rsu.schedule.last_year());
    let multipliers = raises.multipliers(horizon);

    audit_steps.push(rsu.audit_step.clone());
    audit_steps.push(raises.audit_step(horizon, next_step()));

    debug!(
        horizon,
        base_annual = base_annual_raw,
        allowance_annual,
        grants = inputs.rsu_grants.len(),
        plans = inputs.espp_plans.len(),
        "Projection horizon resolved"
    );

    // Step 3: walk the horizon
    let mut years = Vec::with_capacity(horizon as usize);
    for (year, multiplier) in (0..horizon).zip(multipliers) {
        let calendar_year = ctx.reference_year.saturating_add_unsigned(year);
        let base_year = safe(base_annual_raw * multiplier);
        let bonus_year = safe(base_year * bonus_rate);
        let rsu_year = rsu.schedule.amount_for_year(year);

        let (espp_contributions, espp_returns) = if inputs.espp_plans.is_empty() {
            (0.0, 0.0)
        } else {
            let espp = calculate_espp_for_year(
                &inputs.espp_plans,
                base_year,
                preferred,
                ctx.rates,
                calendar_year,
                next_step(),
            );
            let figures = (espp.contributions, espp.returns);
            audit_steps.push(espp.audit_step);
            figures
        };

        let base_after_espp = safe(base_year - espp_contributions);
        let espp_total = safe(espp_contributions + espp_returns);

        let (allowances_year, benefits_year, total_year) = match ctx.benefits_mode {
            BenefitsMode::AllowanceOnly => {
                let benefits = allowance_annual;
                let total =
                    safe(base_after_espp + bonus_year + benefits + rsu_year + espp_total);
                (allowance_annual, benefits, total)
            }
            BenefitsMode::PercentOfPay => {
                let allowances = safe(allowance_annual * multiplier);
                let benefits = percent_of_pay_benefits(inputs, multiplier, ctx);
                let total = safe(
                    base_after_espp + allowances + bonus_year + benefits + rsu_year + espp_total,
                );
                (allowances, benefits, total)
            }
        };

        debug!(
            year,
            calendar_year,
            multiplier,
            base = base_after_espp,
            bonus = bonus_year,
            rsu = rsu_year,
            espp = espp_total,
            total = total_year,
            "Projected year"
        );

        years.push(YearFigures {
            point: TimelinePoint {
                year,
                calendar_year,
                base: base_after_espp,
                allowances: allowances_year,
                bonus: bonus_year,
                benefits: benefits_year,
                rsu: rsu_year,
                espp: espp_total,
                total: total_year,
            },
            espp_contributions,
            espp_returns,
        });
    }

    // Step 4: year 0 is the "current" picture
    let totals = years
        .first()
        .map(|current| TotalsSummary {
            annual: current.point.total,
            monthly: safe(current.point.total / MONTHS_PER_YEAR),
            base: current.point.base,
            allowances: current.point.allowances,
            bonus: current.point.bonus,
            benefits: current.point.benefits,
            rsu_annual: current.point.rsu,
            espp: EsppSummary {
                enabled: current.espp_contributions > 0.0,
                contributions: current.espp_contributions,
                returns: current.espp_returns,
            },
        })
        .unwrap_or_default();

    let distribution = build_distribution(&totals, ctx.benefits_mode);

    audit_steps.push(AuditStep {
        step_number: next_step(),
        rule_id: "projection_totals".to_string(),
        rule_name: "Projection Totals".to_string(),
        input: serde_json::json!({
            "horizon": horizon,
            "benefits_mode": ctx.benefits_mode
        }),
        output: serde_json::json!({
            "annual": totals.annual,
            "monthly": totals.monthly,
            "distribution": distribution
        }),
        reasoning: format!(
            "Current-year total {:.2} {} ({:.2} per month) over a {}-year projection",
            totals.annual, preferred, totals.monthly, horizon
        ),
    });

    let mut warnings = rsu.warnings;
    warnings.extend(raises.warnings().iter().cloned());
    if requested > horizon {
        warnings.push(AuditWarning::new(
            HORIZON_CAPPED_WARNING,
            format!(
                "Raises or RSU tranches reach relative year {}; projection stops after {} years",
                requested - 1,
                horizon
            ),
            "medium",
        ));
    }

    SummaryOutcome {
        summary: CompensationSummary {
            preferred_currency: preferred,
            totals,
            distribution,
            timeline: years.into_iter().map(|figures| figures.point).collect(),
            rsu_breakdown: rsu.breakdown,
        },
        audit_steps,
        warnings,
    }
}

/// Builds the summary using the default benefits model.
///
/// This is the single-call form of [`project_compensation`] for callers
/// that do not need the audit trail.
///
/// # Example
///
/// ```
/// use compensation_engine::calculation::build_compensation_summary;
/// use compensation_engine::models::{
///     CompensationInputs, CurrencyCode, ExchangeRateTable, MonetaryField,
///     RecurringCompensation,
/// };
///
/// let inputs = CompensationInputs {
///     recurring: RecurringCompensation {
///         base: MonetaryField::new(5_000.0, CurrencyCode::Usd),
///         allowance: MonetaryField::zero(CurrencyCode::Usd),
///         bonus_percentage: 10.0,
///     },
///     benefits: Default::default(),
///     rsu_grants: vec![],
///     espp_plans: vec![],
///     raises: vec![],
/// };
///
/// let summary = build_compensation_summary(
///     &inputs,
///     CurrencyCode::Usd,
///     &ExchangeRateTable::default_rates(),
///     2026,
/// );
///
/// assert_eq!(summary.totals.base, 60_000.0);
/// assert_eq!(summary.totals.annual, 66_000.0);
/// ```
pub fn build_compensation_summary(
    inputs: &CompensationInputs,
    preferred_currency: CurrencyCode,
    rates: &ExchangeRateTable,
    reference_year: i32,
) -> CompensationSummary {
    let ctx = ProjectionContext::new(preferred_currency, rates, reference_year);
    project_compensation(inputs, &ctx).summary
}

/// Benefits as a percentage of raised base plus allowance.
///
/// Both fields are annualized straight into the benefits calculation currency
/// with their own override rates, raised by `multiplier`, and the result is
/// converted into the preferred currency.
fn percent_of_pay_benefits(
    inputs: &CompensationInputs,
    multiplier: f64,
    ctx: &ProjectionContext<'_>,
) -> f64 {
    let calculation_currency = inputs.benefits.calculation_currency;
    let base_in_calc = safe(convert_annual(
        &inputs.recurring.base,
        calculation_currency,
        ctx.rates,
    ));
    let allowance_in_calc = safe(convert_annual(
        &inputs.recurring.allowance,
        calculation_currency,
        ctx.rates,
    ));
    let benefits_in_calc =
        safe((base_in_calc + allowance_in_calc) * multiplier * inputs.benefits.percentage / 100.0);
    safe(convert(
        benefits_in_calc,
        calculation_currency,
        ctx.preferred_currency,
        None,
        ctx.rates,
    ))
}

fn build_distribution(
    totals: &TotalsSummary,
    benefits_mode: BenefitsMode,
) -> Vec<DistributionItem> {
    let item = |label: &str, value: f64| DistributionItem {
        label: label.to_string(),
        value,
    };
    let espp_total = safe(totals.espp.contributions + totals.espp.returns);

    match benefits_mode {
        BenefitsMode::AllowanceOnly => vec![
            item("Base Salary", totals.base),
            item("Bonus", totals.bonus),
            item("Benefits", totals.benefits),
            item("RSUs", totals.rsu_annual),
            item("ESPP", espp_total),
        ],
        BenefitsMode::PercentOfPay => vec![
            item("Base Salary", totals.base),
            item("Allowances", totals.allowances),
            item("Bonus", totals.bonus),
            item("Benefits", totals.benefits),
            item("RSUs", totals.rsu_annual),
            item("ESPP", espp_total),
        ],
    }
}
