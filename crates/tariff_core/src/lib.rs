//! # tariff_core: Domain Foundation for Tariff Scenario Costing
//!
//! ## Layer 1 (Foundation) Role
//!
//! tariff_core is the bottom layer of the workspace, providing:
//! - Baseline part table rows: `PartRecord` (`types::part`)
//! - Validated tariff percentages and per-country overrides:
//!   `TariffRate`, `TariffOverrideMap` (`types::rate`)
//! - Closed grouping strategies: `GroupKey` (`types::group`)
//! - Error types: `EngineError` (`types::error`)
//! - The `CostDelta` view over scenario output and `BubbleSize` (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other tariff_* crates:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use tariff_core::types::{GroupKey, TariffOverrideMap, TariffRate};
//!
//! let overrides = TariffOverrideMap::new().with_rate("China", 50.0).unwrap();
//! assert_eq!(overrides.effective_rate("China", 20.0), 50.0);
//! assert_eq!(overrides.effective_rate("Mexico", 5.0), 5.0);
//!
//! let rate = TariffRate::new(25.0).unwrap();
//! assert_eq!(rate.multiplier(), 1.25);
//!
//! let key: GroupKey = "commodity".parse().unwrap();
//! assert_eq!(key, GroupKey::ByCommodity);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for records, rates and keys

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod traits;
pub mod types;
