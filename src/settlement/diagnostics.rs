use std::fmt;

use rust_decimal::Decimal;
use tracing::event;

/// Something odd about the input that did not stop the calculation.
///
/// These cover operator slop: a chip color typed wrong, a pot that's a
/// few cents off. The result is still usable, but someone should look.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// A holding named a chip color the configuration doesn't have. Those
    /// chips were counted as worth nothing.
    UnknownDenomination {
        player: String,
        color: String,
        count: i64,
    },
    /// The chips on the table don't add up to the pot.
    PotMismatch {
        total_chip_value: Decimal,
        pot: Decimal,
    },
    /// Winners and losers didn't cancel out, so some balance was left
    /// after every possible payment was made.
    SettlementImbalance {
        remaining_winnings: Decimal,
        remaining_debts: Decimal,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownDenomination { color, .. } => {
                write!(f, "Chip color \"{color}\" not found in configuration")
            }
            Diagnostic::PotMismatch {
                total_chip_value,
                pot,
            } => write!(
                f,
                "Chip value mismatch: Total chips = {total_chip_value}, Pot = {pot}"
            ),
            Diagnostic::SettlementImbalance {
                remaining_winnings,
                remaining_debts,
            } => write!(
                f,
                "Payment imbalance: Winners need {remaining_winnings}, Losers owe {remaining_debts}"
            ),
        }
    }
}

/// Collects [`Diagnostic`]s for the caller.
///
/// Every diagnostic pushed is also emitted as a `tracing` warning so that
/// it shows up in logs even if the caller ignores the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownDenomination {
                player,
                color,
                count,
            } => event!(
                tracing::Level::WARN,
                %player,
                %color,
                count,
                "Chip color not found in configuration"
            ),
            Diagnostic::PotMismatch {
                total_chip_value,
                pot,
            } => event!(
                tracing::Level::WARN,
                %total_chip_value,
                %pot,
                "Chip value mismatch"
            ),
            Diagnostic::SettlementImbalance {
                remaining_winnings,
                remaining_debts,
            } => event!(
                tracing::Level::WARN,
                %remaining_winnings,
                %remaining_debts,
                "Payment imbalance"
            ),
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
