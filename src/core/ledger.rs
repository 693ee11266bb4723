use rust_decimal::Decimal;

use super::chips::ChipHolding;

/// Everything the settlement needs to know about one player.
///
/// `total_buy_in` is the original buy-in plus every rebuy. The settlement
/// engine only ever reads a ledger.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLedger {
    pub name: String,
    pub initial_chips: ChipHolding,
    pub current_chips: ChipHolding,
    pub total_buy_in: Decimal,
}

impl PlayerLedger {
    /// A freshly seated player holding exactly what they bought in with.
    pub fn new(name: impl Into<String>, buy_in: Decimal, chips: ChipHolding) -> Self {
        Self {
            name: name.into(),
            initial_chips: chips.clone(),
            current_chips: chips,
            total_buy_in: buy_in,
        }
    }

    /// Replace the current holding, keeping everything else.
    pub fn with_current_chips(mut self, chips: ChipHolding) -> Self {
        self.current_chips = chips;
        self
    }
}

/// An extra buy-in made during the game.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuy {
    pub player_name: String,
    pub amount: Decimal,
    pub chips: ChipHolding,
}

impl Rebuy {
    pub fn new(player_name: impl Into<String>, amount: Decimal, chips: ChipHolding) -> Self {
        Self {
            player_name: player_name.into(),
            amount,
            chips,
        }
    }
}
