//! Projection result models for the Compensation Projection Engine.
//!
//! This module contains the [`ProjectionResult`] envelope returned by the API
//! and the audit types that record how each figure in the summary was
//! derived.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CompensationSummary;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of the
/// projection (normalization, vesting, proration, raises, totals).
///
/// # Example
///
/// ```
/// use compensation_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "base_normalization".to_string(),
///     rule_name: "Base Normalization".to_string(),
///     input: serde_json::json!({ "amount": 20000 }),
///     output: serde_json::json!({ "annual": 65753.42 }),
///     reasoning: "20000 ILS/month annualized into USD".to_string(),
/// };
/// assert_eq!(step.rule_id, "base_normalization");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the calculation stage.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A warning about input the engine had to work around.
///
/// Warnings never stop a projection; they explain why a figure may look
/// surprising (an ignored date, a merged raise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during the projection.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a projection request.
///
/// Wraps the engine's [`CompensationSummary`] with identifying metadata and
/// the audit trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Unique identifier for this projection.
    pub projection_id: Uuid,
    /// When the projection was computed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Calendar year treated as relative year 0.
    pub reference_year: i32,
    /// The projected compensation.
    pub summary: CompensationSummary,
    /// How the summary was derived.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, TotalsSummary};

    #[test]
    fn test_warning_constructor() {
        let warning = AuditWarning::new("CODE", "message", "low");
        assert_eq!(warning.code, "CODE");
        assert_eq!(warning.message, "message");
        assert_eq!(warning.severity, "low");
    }

    #[test]
    fn test_projection_result_round_trips_through_json() {
        let result = ProjectionResult {
            projection_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            reference_year: 2026,
            summary: CompensationSummary {
                preferred_currency: CurrencyCode::Eur,
                totals: TotalsSummary::default(),
                distribution: vec![],
                timeline: vec![],
                rsu_breakdown: vec![],
            },
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![AuditWarning::new("W", "m", "low")],
                duration_us: 12,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: ProjectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
