use rust_decimal::Decimal;

use super::diagnostics::Diagnostics;
use super::engine::SettlementEngine;
use crate::core::money;
use crate::core::{ChipConfiguration, PlayerLedger};

/// Does the value of every chip on the table match the pot?
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotValidationResult {
    pub is_valid: bool,
    pub total_chip_value: Decimal,
    pub expected_value: Decimal,
    /// `total_chip_value - expected_value`. Positive means there are more
    /// chips than money in the pot.
    pub difference: Decimal,
    pub error_message: Option<String>,
}

impl PotValidationResult {
    /// A failed validation where no total could be computed.
    fn failed(expected_value: Decimal, error_message: String) -> Self {
        Self {
            is_valid: false,
            total_chip_value: Decimal::ZERO,
            expected_value,
            difference: Decimal::ZERO,
            error_message: Some(error_message),
        }
    }
}

impl SettlementEngine {
    /// Check the chips held by `ledgers` against `expected_pot`.
    ///
    /// This never fails. Bad input, including a negative chip count that
    /// would make [`value_player`](SettlementEngine::value_player) fail,
    /// comes back as an invalid result with a message.
    pub fn validate_pot(
        &self,
        ledgers: &[PlayerLedger],
        chip_config: &ChipConfiguration,
        expected_pot: Decimal,
        diagnostics: &mut Diagnostics,
    ) -> PotValidationResult {
        if !money::is_valid_amount(expected_pot) {
            return PotValidationResult::failed(
                expected_pot,
                "Invalid expected pot amount".to_string(),
            );
        }

        let mut total_chip_value = Decimal::ZERO;
        for ledger in ledgers {
            let total = self
                .chip_value(ledger, chip_config, diagnostics)
                .and_then(|value| money::add(total_chip_value, value));
            match total {
                Ok(total) => total_chip_value = total,
                Err(e) => return PotValidationResult::failed(expected_pot, e.to_string()),
            }
        }

        self.pot_validation_from_total(total_chip_value, expected_pot)
    }

    /// Compare an already computed chip total against the pot.
    pub(crate) fn pot_validation_from_total(
        &self,
        total_chip_value: Decimal,
        expected_pot: Decimal,
    ) -> PotValidationResult {
        if !money::is_valid_amount(expected_pot) {
            return PotValidationResult::failed(
                expected_pot,
                "Invalid expected pot amount".to_string(),
            );
        }

        let difference = match money::subtract(total_chip_value, expected_pot) {
            Ok(difference) => difference,
            Err(e) => return PotValidationResult::failed(expected_pot, e.to_string()),
        };
        let is_valid = money::equal_within_epsilon(
            total_chip_value,
            expected_pot,
            self.config().pot_tolerance,
        );

        PotValidationResult {
            is_valid,
            total_chip_value,
            expected_value: expected_pot,
            difference,
            error_message: if is_valid {
                None
            } else {
                Some(format!(
                    "Chip total ({total_chip_value}) does not match pot ({expected_pot})"
                ))
            },
        }
    }
}
