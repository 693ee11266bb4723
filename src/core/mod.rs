//! Plain data types shared by the whole crate: money, chips, player
//! ledgers, and the error type.
mod chips;
mod errors;
mod ledger;
pub mod money;

pub use chips::{ChipConfiguration, ChipDenomination, ChipHolding};
pub use errors::{Result, SettlementError};
pub use ledger::{PlayerLedger, Rebuy};
