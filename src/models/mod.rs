//! Core data models for the Compensation Projection Engine.
//!
//! This module contains all the domain models used throughout the engine:
//! the inputs it consumes, the summary it produces and the audit envelope
//! the API wraps around it.

mod compensation;
mod currency;
mod monetary_field;
mod projection_result;
mod summary;

pub use compensation::{
    BenefitsMode, BenefitsSettings, CompensationInputs, EsppPlan, Raise, RecurringCompensation,
    RsuGrant,
};
pub use currency::{CurrencyCode, ExchangeRateTable};
pub use monetary_field::MonetaryField;
pub use projection_result::{AuditStep, AuditTrace, AuditWarning, ProjectionResult};
pub use summary::{
    CompensationSummary, DistributionItem, EsppSummary, RsuBreakdownItem, TimelinePoint,
    TotalsSummary,
};
