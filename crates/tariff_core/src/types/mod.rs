//! Core domain types for tariff scenario costing.
//!
//! This module provides:
//! - [`PartRecord`]: One row of the baseline cost table
//! - [`TariffRate`] and [`TariffOverrideMap`]: Validated tariff percentages
//! - [`GroupKey`]: Aggregation strategies
//! - [`EngineError`]: Validation and grouping errors

pub mod error;
pub mod group;
pub mod part;
pub mod rate;

pub use error::{EngineError, Result};
pub use group::GroupKey;
pub use part::PartRecord;
pub use rate::{TariffOverrideMap, TariffRate, MAX_TARIFF_PCT};
