use rust_decimal::Decimal;

use super::diagnostics::{Diagnostic, Diagnostics};
use super::engine::SettlementEngine;
use crate::core::money;
use crate::core::{ChipConfiguration, PlayerLedger, Result, SettlementError};

/// How much a player walks away with and how that compares to their
/// buy-in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutResult {
    pub name: String,
    pub chip_value: Decimal,
    pub buy_in: Decimal,
    /// Always equal to `chip_value`.
    pub final_payout: Decimal,
    /// `final_payout - buy_in`
    pub net_gain: Decimal,
}

impl PayoutResult {
    pub fn new(name: impl Into<String>, chip_value: Decimal, buy_in: Decimal) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            chip_value,
            buy_in,
            final_payout: chip_value,
            net_gain: money::subtract(chip_value, buy_in)?,
        })
    }
}

impl SettlementEngine {
    /// Compute a payout for every player, in the order given.
    ///
    /// If the chips don't add up to `total_pot` a
    /// [`Diagnostic::PotMismatch`] is recorded but the payouts are still
    /// returned untouched. Deciding how to fix a short pot is up to the
    /// people at the table.
    pub fn compute_payouts(
        &self,
        ledgers: &[PlayerLedger],
        chip_config: &ChipConfiguration,
        total_pot: Decimal,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<PayoutResult>> {
        if !money::is_valid_amount(total_pot) {
            return Err(SettlementError::InvalidPot(total_pot));
        }
        if ledgers.is_empty() {
            return Err(SettlementError::NoPlayers);
        }

        let chip_values = ledgers
            .iter()
            .map(|ledger| self.chip_value(ledger, chip_config, diagnostics))
            .collect::<Result<Vec<_>>>()?;

        self.payouts_from_values(ledgers, &chip_values, total_pot, diagnostics)
    }

    /// Build payouts from chip values that have already been computed.
    pub(crate) fn payouts_from_values(
        &self,
        ledgers: &[PlayerLedger],
        chip_values: &[Decimal],
        total_pot: Decimal,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<PayoutResult>> {
        let payouts = ledgers
            .iter()
            .zip(chip_values.iter())
            .map(|(ledger, chip_value)| {
                PayoutResult::new(ledger.name.clone(), *chip_value, ledger.total_buy_in)
            })
            .collect::<Result<Vec<_>>>()?;

        let total_chip_value = money::sum(payouts.iter().map(|p| p.chip_value))?;
        if !money::equal_within_epsilon(total_chip_value, total_pot, self.config().pot_tolerance)
        {
            diagnostics.push(Diagnostic::PotMismatch {
                total_chip_value,
                pot: total_pot,
            });
        }

        Ok(payouts)
    }
}
