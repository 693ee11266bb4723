use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::errors::{Result, SettlementError};

/// A single chip color and what one chip of it is worth in dollars.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChipDenomination {
    pub name: String,
    pub value: Decimal,
}

impl ChipDenomination {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The chip colors in use for a game.
///
/// Names are unique and lookups are case-sensitive. The values themselves
/// are not checked here; a negative value is only an error once someone
/// tries to count chips with it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ChipDenomination>", into = "Vec<ChipDenomination>")
)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipConfiguration {
    denominations: Vec<ChipDenomination>,
}

impl ChipConfiguration {
    /// Create a configuration, rejecting duplicate names.
    pub fn new(denominations: Vec<ChipDenomination>) -> Result<Self> {
        for (idx, denomination) in denominations.iter().enumerate() {
            if denominations[..idx]
                .iter()
                .any(|earlier| earlier.name == denomination.name)
            {
                return Err(SettlementError::DuplicateDenomination(
                    denomination.name.clone(),
                ));
            }
        }
        Ok(Self { denominations })
    }

    /// Look up a denomination by its exact name.
    pub fn get(&self, name: &str) -> Option<&ChipDenomination> {
        self.denominations.iter().find(|d| d.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChipDenomination> {
        self.denominations.iter()
    }
}

impl TryFrom<Vec<ChipDenomination>> for ChipConfiguration {
    type Error = SettlementError;

    fn try_from(denominations: Vec<ChipDenomination>) -> Result<Self> {
        Self::new(denominations)
    }
}

impl From<ChipConfiguration> for Vec<ChipDenomination> {
    fn from(config: ChipConfiguration) -> Self {
        config.denominations
    }
}

/// Chip counts keyed by color name.
///
/// A holding may name colors the configuration has never heard of.
/// Counts are signed so negative input can be reported.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChipHolding(BTreeMap<String, i64>);

impl ChipHolding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style helper, mostly for tests and fixtures.
    pub fn with(mut self, color: impl Into<String>, count: i64) -> Self {
        self.set(color, count);
        self
    }

    pub fn set(&mut self, color: impl Into<String>, count: i64) {
        self.0.insert(color.into(), count);
    }

    /// Number of chips of `color`, zero if the color isn't held.
    pub fn count(&self, color: &str) -> i64 {
        self.0.get(color).copied().unwrap_or(0)
    }

    /// Add every count in `other` to this holding.
    pub fn add_chips(&mut self, other: &ChipHolding) {
        for (color, count) in other.iter() {
            let entry = self.0.entry(color.to_string()).or_insert(0);
            *entry = entry.saturating_add(count);
        }
    }

    /// The first color with a negative count, if any.
    pub fn first_negative(&self) -> Option<(&str, i64)> {
        self.iter().find(|(_, count)| *count < 0)
    }

    /// Iterate in color name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(color, count)| (color.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for ChipHolding {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(color, count)| (color.into(), count))
                .collect(),
        )
    }
}
