//! Calculation logic for the Compensation Projection Engine.
//!
//! This module contains the currency conversion primitives, monetary field
//! normalization, the RSU vesting scheduler, ESPP month proration, raise
//! compounding and the aggregation that turns these into a year-by-year
//! compensation summary.
//!
//! None of the calculations fail. Degenerate inputs degrade to zero and
//! are reported as audit warnings.

mod currency_conversion;
mod dates;
mod espp_proration;
mod field_normalizer;
mod raises_timeline;
mod rsu_vesting;
mod summary_aggregator;

pub use currency_conversion::{convert, rate_of, safe};
pub use dates::parse_calendar_date;
pub use espp_proration::{EsppYearResult, calculate_espp_for_year, months_in_year};
pub use field_normalizer::{MONTHS_PER_YEAR, convert_annual, convert_field};
pub use raises_timeline::{DUPLICATE_RAISE_WARNING, RaisesTimeline};
pub use rsu_vesting::{
    RSU_START_DATE_WARNING, RsuSchedule, RsuScheduleResult, build_rsu_schedule,
    grant_start_offset,
};
pub use summary_aggregator::{
    HORIZON_CAPPED_WARNING, MAX_PROJECTION_YEARS, MIN_PROJECTION_YEARS, ProjectionContext,
    SummaryOutcome, build_compensation_summary, project_compensation, projection_horizon,
};
