//! Settle up a home poker game.
//!
//! Players buy in for chips, rebuy when they bust, and at the end of the
//! night count what they have left. This crate turns those counts into
//! money: what every stack is worth, who is up and who is down, whether
//! the chips on the table match the cash that went in, and a short list
//! of payments that squares everybody.
//!
//! Money is [`rust_decimal::Decimal`] throughout and every amount is
//! rounded to the cent half away from zero, so a dollar never turns into
//! 0.9999999.
//!
//! ```
//! use chip_settle::core::{ChipConfiguration, ChipDenomination, ChipHolding};
//! use chip_settle::game::{GameRecord, GroupCode};
//! use chip_settle::settlement::SettlementEngine;
//! use rust_decimal_macros::dec;
//!
//! let chips = ChipConfiguration::new(vec![
//!     ChipDenomination::new("Red", dec!(5)),
//!     ChipDenomination::new("Green", dec!(25)),
//! ])
//! .unwrap();
//!
//! let mut game = GameRecord::new(GroupCode::parse("ABC123").unwrap(), chips, dec!(50));
//! game.add_player("Alice", ChipHolding::new().with("Green", 2)).unwrap();
//! game.add_player("Bob", ChipHolding::new().with("Green", 2)).unwrap();
//! game.start().unwrap();
//!
//! game.update_chips("Alice", ChipHolding::new().with("Green", 3).with("Red", 5)).unwrap();
//! game.update_chips("Bob", ChipHolding::new()).unwrap();
//!
//! let results = game.finish(&SettlementEngine::default()).unwrap();
//! assert!(results.validation_result.is_valid);
//! assert_eq!(results.venmo_payments.len(), 1);
//! assert_eq!(results.venmo_payments[0].from, "Bob");
//! assert_eq!(results.venmo_payments[0].to, "Alice");
//! assert_eq!(results.venmo_payments[0].amount, dec!(50));
//! ```

/// Money, chips, ledgers and errors.
pub mod core;
/// Seating players, rebuys and finishing a game.
pub mod game;
/// Turning chip counts into payouts and payments.
pub mod settlement;

pub use crate::core::{Result, SettlementError};
