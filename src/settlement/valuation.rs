use rust_decimal::Decimal;

use super::diagnostics::{Diagnostic, Diagnostics};
use super::engine::SettlementEngine;
use crate::core::money;
use crate::core::{ChipConfiguration, PlayerLedger, Result, SettlementError};

/// What a player's chips are worth and how that compares to what they
/// paid in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEarnings {
    pub name: String,
    /// Dollar value of the chips in front of the player at the end.
    pub chip_value: Decimal,
    /// `chip_value - total_buy_in`
    pub net_earnings: Decimal,
    /// Net earnings as a percentage of the buy-in, rounded to two places.
    /// Zero when the player never bought in.
    pub earnings_percentage: Decimal,
    pub total_buy_in: Decimal,
}

impl PlayerEarnings {
    /// Fails with [`SettlementError::AmountOverflow`] when the earnings or
    /// the percentage don't fit in a [`Decimal`].
    pub fn new(
        name: impl Into<String>,
        chip_value: Decimal,
        total_buy_in: Decimal,
    ) -> Result<Self> {
        let net_earnings = money::subtract(chip_value, total_buy_in)?;
        let earnings_percentage = if total_buy_in > Decimal::ZERO {
            money::percentage(net_earnings, total_buy_in)?
        } else {
            Decimal::ZERO
        };
        Ok(Self {
            name: name.into(),
            chip_value,
            net_earnings,
            earnings_percentage,
            total_buy_in,
        })
    }
}

impl SettlementEngine {
    /// Value one player's current chips and work out their earnings.
    ///
    /// Chip colors missing from `chip_config` are reported to
    /// `diagnostics` and count as zero. A negative chip count, or a chip
    /// color whose value is negative, is an error, as is a stack too big
    /// to add up.
    pub fn value_player(
        &self,
        ledger: &PlayerLedger,
        chip_config: &ChipConfiguration,
        diagnostics: &mut Diagnostics,
    ) -> Result<PlayerEarnings> {
        let chip_value = self.chip_value(ledger, chip_config, diagnostics)?;
        PlayerEarnings::new(ledger.name.clone(), chip_value, ledger.total_buy_in)
    }

    /// The dollar value of `ledger.current_chips`.
    ///
    /// Every other operation that needs a chip value goes through here so
    /// that they can never disagree.
    pub(crate) fn chip_value(
        &self,
        ledger: &PlayerLedger,
        chip_config: &ChipConfiguration,
        diagnostics: &mut Diagnostics,
    ) -> Result<Decimal> {
        let mut total = Decimal::ZERO;

        for (color, count) in ledger.current_chips.iter() {
            let Some(denomination) = chip_config.get(color) else {
                diagnostics.push(Diagnostic::UnknownDenomination {
                    player: ledger.name.clone(),
                    color: color.to_string(),
                    count,
                });
                continue;
            };

            if !money::is_valid_amount(denomination.value) {
                return Err(SettlementError::InvalidChipValue {
                    color: color.to_string(),
                    value: denomination.value,
                });
            }

            if count < 0 {
                return Err(SettlementError::NegativeChipCount {
                    player: ledger.name.clone(),
                    color: color.to_string(),
                    count,
                });
            }

            total = money::add(total, money::multiply(denomination.value, count)?)?;
        }

        Ok(total)
    }
}
