use rust_decimal::Decimal;
use tracing::{event, instrument};

use super::diagnostics::{Diagnostic, Diagnostics};
use super::engine::SettlementEngine;
use super::payout::PayoutResult;
use super::pot::PotValidationResult;
use super::transfers::SettlementTransfer;
use super::valuation::PlayerEarnings;
use crate::core::money;
use crate::core::{Result, SettlementError};
use crate::game::GameRecord;

/// Everything computed when a game ends.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResults {
    pub player_earnings: Vec<PlayerEarnings>,
    pub payouts: Vec<PayoutResult>,
    /// Who pays whom to settle up.
    pub venmo_payments: Vec<SettlementTransfer>,
    pub validation_result: PotValidationResult,
    /// Warnings gathered along the way, in the order they happened.
    pub diagnostics: Vec<Diagnostic>,
}

/// Where a player finished, for recording against the player.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalRanking {
    pub name: String,
    /// 1 is the biggest stack at the end.
    pub position: usize,
    pub payout: Decimal,
    pub profit: Decimal,
}

impl GameResults {
    /// Rank the players by the value of their chips, biggest first.
    ///
    /// Players with identical stacks keep the order they joined the game.
    pub fn final_rankings(&self) -> Vec<FinalRanking> {
        let mut ordered: Vec<&PayoutResult> = self.payouts.iter().collect();
        ordered.sort_by(|a, b| b.final_payout.cmp(&a.final_payout));

        ordered
            .into_iter()
            .enumerate()
            .map(|(idx, payout)| FinalRanking {
                name: payout.name.clone(),
                position: idx + 1,
                payout: payout.final_payout,
                profit: payout.net_gain,
            })
            .collect()
    }

    /// Total dollars changing hands.
    pub fn total_transferred(&self) -> Result<Decimal> {
        money::sum(self.venmo_payments.iter().map(|t| t.amount))
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl SettlementEngine {
    /// Run every calculation for a finished game.
    ///
    /// Each player's chips are valued exactly once and the same values
    /// feed the earnings, the payouts, and the pot check.
    #[instrument(level = "trace", skip_all, fields(players = game.players.len()))]
    pub fn compute_game_results(&self, game: &GameRecord) -> Result<GameResults> {
        if game.chip_config.is_empty() {
            return Err(SettlementError::EmptyChipConfiguration);
        }
        if game.players.is_empty() {
            return Err(SettlementError::NoPlayers);
        }
        if !money::is_valid_amount(game.total_pot) {
            return Err(SettlementError::InvalidPot(game.total_pot));
        }

        let mut diagnostics = Diagnostics::new();

        let chip_values = game
            .players
            .iter()
            .map(|ledger| self.chip_value(ledger, &game.chip_config, &mut diagnostics))
            .collect::<Result<Vec<_>>>()?;

        let player_earnings = game
            .players
            .iter()
            .zip(chip_values.iter())
            .map(|(ledger, chip_value)| {
                PlayerEarnings::new(ledger.name.clone(), *chip_value, ledger.total_buy_in)
            })
            .collect::<Result<Vec<_>>>()?;

        let payouts = self.payouts_from_values(
            &game.players,
            &chip_values,
            game.total_pot,
            &mut diagnostics,
        )?;
        let venmo_payments = self.settle(&payouts, &mut diagnostics);
        let total_chip_value = money::sum(chip_values.iter().copied())?;
        let validation_result = self.pot_validation_from_total(total_chip_value, game.total_pot);

        event!(
            tracing::Level::DEBUG,
            payments = venmo_payments.len(),
            pot_valid = validation_result.is_valid,
            diagnostics = diagnostics.len(),
            "Computed game results"
        );

        Ok(GameResults {
            player_earnings,
            payouts,
            venmo_payments,
            validation_result,
            diagnostics: diagnostics.into_vec(),
        })
    }
}
