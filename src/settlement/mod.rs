//! Everything that happens once the chips stop moving: valuing stacks,
//! computing payouts, checking the pot, and working out who pays whom.
//!
//! All of it hangs off [`SettlementEngine`]. The calculations are pure;
//! problems that should not stop a settlement (an unknown chip color, a
//! pot that doesn't add up) are pushed into a [`Diagnostics`] sink and
//! logged, while bad input comes back as a
//! [`SettlementError`](crate::core::SettlementError).
mod config;
mod diagnostics;
mod engine;
mod payout;
mod pot;
mod results;
mod transfers;
mod valuation;

pub use config::{DEFAULT_NOTE, SettlementConfig};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use engine::SettlementEngine;
pub use payout::PayoutResult;
pub use pot::PotValidationResult;
pub use results::{FinalRanking, GameResults};
pub use transfers::{NetPosition, SettlementTransfer};
pub use valuation::PlayerEarnings;
