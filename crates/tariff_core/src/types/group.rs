//! Aggregation strategies.

use std::fmt;
use std::str::FromStr;

use super::error::EngineError;

/// Primary grouping dimension for scenario aggregation.
///
/// Source country is always the secondary dimension, so the same commodity
/// sourced from two countries yields two aggregated rows.
///
/// # Examples
/// ```
/// use tariff_core::types::GroupKey;
///
/// assert_eq!("part_name".parse::<GroupKey>().unwrap(), GroupKey::ByDescription);
/// assert_eq!(GroupKey::ByPart.name(), "part_id");
/// assert!("supplier".parse::<GroupKey>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum GroupKey {
    /// One group per part identifier
    #[default]
    ByPart,
    /// Group by part description ("part name")
    ByDescription,
    /// Group by commodity
    ByCommodity,
}

impl GroupKey {
    /// All grouping strategies.
    pub const ALL: [GroupKey; 3] = [
        GroupKey::ByPart,
        GroupKey::ByDescription,
        GroupKey::ByCommodity,
    ];

    /// Canonical column name of this key.
    pub fn name(&self) -> &'static str {
        match self {
            GroupKey::ByPart => "part_id",
            GroupKey::ByDescription => "description",
            GroupKey::ByCommodity => "commodity",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "part" | "part_id" => Ok(GroupKey::ByPart),
            "description" | "part_name" => Ok(GroupKey::ByDescription),
            "commodity" => Ok(GroupKey::ByCommodity),
            _ => Err(EngineError::UnknownGroupKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for GroupKey {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GroupKey> for String {
    fn from(key: GroupKey) -> String {
        key.name().to_string()
    }
}
