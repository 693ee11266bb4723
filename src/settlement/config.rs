use rust_decimal::Decimal;

use crate::core::money::CENT;
use crate::core::{Result, SettlementError};

/// Note stamped on every transfer unless configured otherwise.
pub const DEFAULT_NOTE: &str = "Poker game settlement";

/// Tunables for a settlement run.
///
/// Both thresholds default to one cent and are set independently, so a
/// game can tolerate a few dollars of missing chips and still pay out to
/// the cent.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementConfig {
    /// How far the total chip value may drift from the pot before it is
    /// reported as a mismatch. Comparison is strict: a difference equal to
    /// the tolerance is a mismatch.
    pub pot_tolerance: Decimal,
    /// Payments below this are never made, and balances below this count
    /// as settled. At least one cent.
    pub dust_threshold: Decimal,
    /// Note attached to every transfer.
    pub note: String,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            pot_tolerance: CENT,
            dust_threshold: CENT,
            note: DEFAULT_NOTE.to_string(),
        }
    }
}

impl SettlementConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pot_tolerance(mut self, pot_tolerance: Decimal) -> Self {
        self.pot_tolerance = pot_tolerance;
        self
    }

    pub fn with_dust_threshold(mut self, dust_threshold: Decimal) -> Self {
        self.dust_threshold = dust_threshold;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Validate the settlement configuration
    pub fn validate(&self) -> Result<()> {
        // A zero tolerance would make every pot a mismatch.
        if self.pot_tolerance <= Decimal::ZERO {
            return Err(SettlementError::InvalidConfig(
                "pot_tolerance must be positive".to_string(),
            ));
        }

        // Nobody sends a payment for less than a cent.
        if self.dust_threshold < CENT {
            return Err(SettlementError::InvalidConfig(
                "dust_threshold must be at least one cent".to_string(),
            ));
        }

        if self.note.trim().is_empty() {
            return Err(SettlementError::InvalidConfig(
                "note must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a configuration from JSON. Missing fields take
    /// their default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SettlementError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
