//! The life of a single home game, from seating players through rebuys
//! to the final settlement.
//!
//! A [`GameRecord`] keeps the money side honest: every buy-in and rebuy
//! grows the pot by exactly what the player paid, so by the time the game
//! is finished the pot is the amount the chips on the table should be
//! worth.
mod code;

pub use code::{DEFAULT_MAX_ATTEMPTS, GROUP_CODE_ALPHABET, GROUP_CODE_LEN, GroupCode};

use rust_decimal::Decimal;
use tracing::event;

use crate::core::money;
use crate::core::{ChipConfiguration, ChipHolding, PlayerLedger, Rebuy, Result, SettlementError};
use crate::settlement::{GameResults, SettlementEngine};

/// Where a game is in its lifecycle. Games only ever move forward.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Players are still sitting down.
    #[default]
    Setup,
    /// Cards are in the air. Rebuys are allowed.
    Active,
    /// Settled. Nothing may change.
    Completed,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub group_code: GroupCode,
    pub status: GameStatus,
    pub chip_config: ChipConfiguration,
    /// What every player pays to sit down.
    pub initial_buy_in: Decimal,
    /// All money paid in so far, buy-ins and rebuys.
    pub total_pot: Decimal,
    pub rebuys: Vec<Rebuy>,
    /// In the order they joined.
    pub players: Vec<PlayerLedger>,
}

impl GameRecord {
    pub fn new(
        group_code: GroupCode,
        chip_config: ChipConfiguration,
        initial_buy_in: Decimal,
    ) -> Self {
        Self {
            group_code,
            status: GameStatus::Setup,
            chip_config,
            initial_buy_in,
            total_pot: Decimal::ZERO,
            rebuys: vec![],
            players: vec![],
        }
    }

    pub fn player(&self, name: &str) -> Option<&PlayerLedger> {
        self.players.iter().find(|p| p.name == name)
    }

    fn player_mut(&mut self, name: &str) -> Result<&mut PlayerLedger> {
        self.players
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| SettlementError::UnknownPlayer(name.to_string()))
    }

    /// Seat a player. They pay the game's initial buy-in for `chips`.
    pub fn add_player(&mut self, name: impl Into<String>, chips: ChipHolding) -> Result<()> {
        let name = name.into();
        if self.status == GameStatus::Completed {
            return Err(SettlementError::GameCompleted);
        }
        if self.player(&name).is_some() {
            return Err(SettlementError::DuplicatePlayer(name));
        }
        check_holding(&name, &chips)?;

        self.total_pot = money::add(self.total_pot, self.initial_buy_in)?;
        event!(
            tracing::Level::DEBUG,
            player = %name,
            buy_in = %self.initial_buy_in,
            total_pot = %self.total_pot,
            "Player joined"
        );
        self.players.push(PlayerLedger::new(name, self.initial_buy_in, chips));
        Ok(())
    }

    /// Move from setup to play.
    pub fn start(&mut self) -> Result<()> {
        match self.status {
            GameStatus::Setup => {}
            GameStatus::Active => return Err(SettlementError::GameAlreadyStarted),
            GameStatus::Completed => return Err(SettlementError::GameCompleted),
        }
        if self.players.is_empty() {
            return Err(SettlementError::NoPlayers);
        }
        self.status = GameStatus::Active;
        Ok(())
    }

    /// Record a player buying more chips mid game.
    pub fn record_rebuy(&mut self, rebuy: Rebuy) -> Result<()> {
        if self.status != GameStatus::Active {
            return Err(SettlementError::GameNotActive);
        }
        if !money::is_valid_amount(rebuy.amount) || rebuy.amount.is_zero() {
            return Err(SettlementError::InvalidRebuyAmount(rebuy.amount));
        }
        check_holding(&rebuy.player_name, &rebuy.chips)?;

        let total_pot = money::add(self.total_pot, rebuy.amount)?;
        let player = self.player_mut(&rebuy.player_name)?;
        player.total_buy_in = money::add(player.total_buy_in, rebuy.amount)?;
        player.current_chips.add_chips(&rebuy.chips);

        self.total_pot = total_pot;
        event!(
            tracing::Level::DEBUG,
            player = %rebuy.player_name,
            amount = %rebuy.amount,
            total_pot = %self.total_pot,
            "Rebuy recorded"
        );
        self.rebuys.push(rebuy);
        Ok(())
    }

    /// Replace what a player is holding, usually with the final count.
    pub fn update_chips(&mut self, name: &str, chips: ChipHolding) -> Result<()> {
        if self.status == GameStatus::Completed {
            return Err(SettlementError::GameCompleted);
        }
        check_holding(name, &chips)?;
        self.player_mut(name)?.current_chips = chips;
        Ok(())
    }

    /// Settle the game and close it.
    ///
    /// If the results can't be computed the game stays open so the chip
    /// counts can be corrected.
    pub fn finish(&mut self, engine: &SettlementEngine) -> Result<GameResults> {
        if self.status == GameStatus::Completed {
            return Err(SettlementError::GameCompleted);
        }
        let results = engine.compute_game_results(self)?;
        self.status = GameStatus::Completed;
        Ok(results)
    }
}

fn check_holding(player: &str, chips: &ChipHolding) -> Result<()> {
    match chips.first_negative() {
        Some((color, count)) => Err(SettlementError::NegativeChipCount {
            player: player.to_string(),
            color: color.to_string(),
            count,
        }),
        None => Ok(()),
    }
}
