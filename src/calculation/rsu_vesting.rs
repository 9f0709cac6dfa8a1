//! RSU vesting schedule calculation.
//!
//! Each grant's converted value is split into equal yearly tranches. The
//! first tranche lands in the grant's start year, or in the reference year
//! for grants that started in the past.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{
    AuditStep, AuditWarning, CurrencyCode, ExchangeRateTable, RsuBreakdownItem, RsuGrant,
};

use super::{MAX_PROJECTION_YEARS, convert_field, parse_calendar_date, safe};

/// Warning code for a grant whose start date could not be parsed.
pub const RSU_START_DATE_WARNING: &str = "RSU_START_DATE_UNPARSABLE";

/// Vesting amounts keyed by relative year, summed across grants.
///
/// Only years inside [`MAX_PROJECTION_YEARS`] hold amounts. The last
/// tranche year is tracked even when it falls beyond that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RsuSchedule {
    amounts: BTreeMap<u32, f64>,
    last_tranche: Option<u32>,
}

impl RsuSchedule {
    /// Adds `count` yearly tranches starting at a relative year.
    fn accumulate(&mut self, start: u32, count: u32, amount: f64) {
        if count == 0 {
            return;
        }
        let last = start.saturating_add(count - 1);
        self.last_tranche = self.last_tranche.max(Some(last));

        for year in start..=last.min(MAX_PROJECTION_YEARS.saturating_sub(1)) {
            *self.amounts.entry(year).or_insert(0.0) += amount;
        }
    }

    /// Value vesting in a relative year; `0` if nothing vests.
    pub fn amount_for_year(&self, year: u32) -> f64 {
        self.amounts.get(&year).copied().unwrap_or(0.0)
    }

    /// The last relative year with a tranche.
    pub fn last_year(&self) -> Option<u32> {
        self.last_tranche
    }

    /// Total value across the stored years.
    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }

    /// Iterates over `(relative year, amount)` in year order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.amounts.iter().map(|(y, a)| (*y, *a))
    }

    /// Returns true if no grant contributes anything.
    pub fn is_empty(&self) -> bool {
        self.last_tranche.is_none()
    }
}

/// The result of building the RSU schedule.
#[derive(Debug, Clone)]
pub struct RsuScheduleResult {
    /// Vesting per relative year.
    pub schedule: RsuSchedule,
    /// One entry per grant, in input order.
    pub breakdown: Vec<RsuBreakdownItem>,
    /// Grants that had to be treated as starting in the reference year.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Relative year of a grant's first tranche.
///
/// Returns the offset and whether the start date was understood. Past
/// grants and unparsable dates both map to offset 0.
pub fn grant_start_offset(grant: &RsuGrant, reference_year: i32) -> (u32, bool) {
    match parse_calendar_date(&grant.start_date) {
        Some(date) => {
            let offset = date.year().saturating_sub(reference_year).max(0);
            (offset as u32, true)
        }
        None => (0, false),
    }
}

/// Builds the vesting schedule for all grants.
///
/// # Arguments
///
/// * `grants` - The RSU grants
/// * `preferred_currency` - Currency for every amount in the result
/// * `rates` - Exchange rate table
/// * `reference_year` - Calendar year treated as relative year 0
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::build_rsu_schedule;
/// use compensation_engine::models::{CurrencyCode, ExchangeRateTable, MonetaryField, RsuGrant};
///
/// let grant = RsuGrant {
///     name: "Initial Grant".to_string(),
///     start_date: "2026-02-01".to_string(),
///     vesting_years: 4,
///     total_value: MonetaryField::new(50_000.0, CurrencyCode::Usd),
/// };
///
/// let result = build_rsu_schedule(
///     &[grant],
///     CurrencyCode::Usd,
///     &ExchangeRateTable::default_rates(),
///     2026,
///     1,
/// );
///
/// assert_eq!(result.schedule.amount_for_year(0), 12_500.0);
/// assert_eq!(result.schedule.amount_for_year(3), 12_500.0);
/// assert_eq!(result.schedule.amount_for_year(4), 0.0);
/// ```
pub fn build_rsu_schedule(
    grants: &[RsuGrant],
    preferred_currency: CurrencyCode,
    rates: &ExchangeRateTable,
    reference_year: i32,
    step_number: u32,
) -> RsuScheduleResult {
    let mut schedule = RsuSchedule::default();
    let mut breakdown = Vec::with_capacity(grants.len());
    let mut warnings = Vec::new();
    let mut grant_details = Vec::with_capacity(grants.len());

    for grant in grants {
        let (start_offset, parsed) = grant_start_offset(grant, reference_year);
        if !parsed {
            warnings.push(AuditWarning::new(
                RSU_START_DATE_WARNING,
                format!(
                    "Grant '{}' has an unreadable start date '{}'; vesting from {}",
                    grant.name, grant.start_date, reference_year
                ),
                "medium",
            ));
        }

        let total_converted = safe(convert_field(&grant.total_value, preferred_currency, rates));
        let annual_value = safe(total_converted / f64::from(grant.vesting_years.max(1)));

        schedule.accumulate(start_offset, grant.vesting_years, annual_value);

        grant_details.push(serde_json::json!({
            "name": grant.name,
            "start_offset": start_offset,
            "vesting_years": grant.vesting_years,
            "annual_value": annual_value,
            "total_value": total_converted
        }));

        breakdown.push(RsuBreakdownItem {
            name: grant.name.clone(),
            annual_value,
            total_value: total_converted,
        });
    }

    let per_year: BTreeMap<String, f64> = schedule
        .iter()
        .map(|(year, amount)| (year.to_string(), amount))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "rsu_vesting".to_string(),
        rule_name: "RSU Vesting Schedule".to_string(),
        input: serde_json::json!({
            "grant_count": grants.len(),
            "preferred_currency": preferred_currency,
            "reference_year": reference_year
        }),
        output: serde_json::json!({
            "grants": grant_details,
            "schedule": per_year
        }),
        reasoning: format!(
            "{} grant(s) vesting {:.2} {} in total over {} year(s)",
            grants.len(),
            schedule.total(),
            preferred_currency,
            schedule.last_year().map_or(0, |y| y.saturating_add(1))
        ),
    };

    RsuScheduleResult {
        schedule,
        breakdown,
        warnings,
        audit_step,
    }
}
