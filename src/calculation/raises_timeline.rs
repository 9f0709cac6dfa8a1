//! Raise compounding.
//!
//! Raises compound multiplicatively on the base salary only. A raise at
//! year offset `n` takes effect from year `n` onwards, including year 0.

use std::collections::BTreeMap;

use crate::models::{AuditStep, AuditWarning, Raise};

/// Warning code for more than one raise at the same year offset.
pub const DUPLICATE_RAISE_WARNING: &str = "DUPLICATE_RAISE_OFFSET";

/// Raise rates keyed by year offset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RaisesTimeline {
    rates: BTreeMap<u32, f64>,
    warnings: Vec<AuditWarning>,
}

impl RaisesTimeline {
    /// Builds the timeline from the entered raises.
    ///
    /// Percentages that target the same offset are summed into one rate and
    /// reported as a warning.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::calculation::RaisesTimeline;
    /// use compensation_engine::models::Raise;
    ///
    /// let timeline = RaisesTimeline::build(&[
    ///     Raise { year_offset: 1, percentage: 3.0 },
    ///     Raise { year_offset: 1, percentage: 2.0 },
    /// ]);
    ///
    /// assert!((timeline.rate_at(1) - 0.05).abs() < 1e-12);
    /// assert_eq!(timeline.warnings().len(), 1);
    /// ```
    pub fn build(raises: &[Raise]) -> Self {
        let mut rates: BTreeMap<u32, f64> = BTreeMap::new();
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();

        for raise in raises {
            *rates.entry(raise.year_offset).or_insert(0.0) += raise.percentage / 100.0;
            *counts.entry(raise.year_offset).or_insert(0) += 1;
        }

        let warnings = counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(offset, count)| {
                AuditWarning::new(
                    DUPLICATE_RAISE_WARNING,
                    format!(
                        "{} raises target year {}; combined into {:.2}%",
                        count,
                        offset,
                        rates.get(offset).copied().unwrap_or(0.0) * 100.0
                    ),
                    "low",
                )
            })
            .collect();

        Self { rates, warnings }
    }

    /// Raise rate at a year offset as a fraction; `0` if none.
    pub fn rate_at(&self, year: u32) -> f64 {
        self.rates.get(&year).copied().unwrap_or(0.0)
    }

    /// The largest year offset carrying a raise.
    pub fn max_offset(&self) -> Option<u32> {
        self.rates.keys().next_back().copied()
    }

    /// Warnings raised while building the timeline.
    pub fn warnings(&self) -> &[AuditWarning] {
        &self.warnings
    }

    /// Cumulative base-salary multipliers for years `0..horizon`.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::calculation::RaisesTimeline;
    /// use compensation_engine::models::Raise;
    ///
    /// let timeline = RaisesTimeline::build(&[Raise { year_offset: 0, percentage: 10.0 }]);
    /// assert_eq!(timeline.multipliers(2), vec![1.1, 1.1]);
    /// ```
    pub fn multipliers(&self, horizon: u32) -> Vec<f64> {
        let mut cumulative = 1.0;
        (0..horizon)
            .map(|year| {
                if let Some(rate) = self.rates.get(&year) {
                    cumulative *= 1.0 + rate;
                }
                cumulative
            })
            .collect()
    }

    /// Builds the audit step recording the timeline.
    pub fn audit_step(&self, horizon: u32, step_number: u32) -> AuditStep {
        let rates: BTreeMap<String, f64> = self
            .rates
            .iter()
            .map(|(offset, rate)| (offset.to_string(), *rate))
            .collect();

        AuditStep {
            step_number,
            rule_id: "raises_timeline".to_string(),
            rule_name: "Raises Timeline".to_string(),
            input: serde_json::json!({ "rates": rates }),
            output: serde_json::json!({
                "rates_by_year": (0..horizon).map(|year| self.rate_at(year)).collect::<Vec<_>>(),
                "multipliers": self.multipliers(horizon)
            }),
            reasoning: match self.max_offset() {
                Some(last) => format!(
                    "{} raise offset(s) up to year {}, compounding on base salary",
                    self.rates.len(),
                    last
                ),
                None => "No raises scheduled".to_string(),
            },
        }
    }
}
