#![no_main]

extern crate arbitrary;
extern crate chip_settle;
extern crate libfuzzer_sys;
extern crate rust_decimal;

use chip_settle::core::{ChipConfiguration, ChipDenomination, ChipHolding, PlayerLedger, money};
use chip_settle::game::{GameRecord, GroupCode};
use chip_settle::settlement::SettlementEngine;
use rust_decimal::Decimal;

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct PlayerInput {
    pub buy_in_cents: u16,
    /// `(color index, count)`. Indexes past the configuration are colors
    /// the game doesn't know about.
    pub chips: Vec<(u8, i16)>,
}

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub chip_values_cents: Vec<i32>,
    pub players: Vec<PlayerInput>,
}

fuzz_target!(|input: Input| {
    if input.players.len() > 64 || input.chip_values_cents.len() > 16 {
        return;
    }

    let denominations = input
        .chip_values_cents
        .iter()
        .enumerate()
        .map(|(idx, cents)| {
            ChipDenomination::new(format!("c{idx}"), Decimal::new(i64::from(*cents), 2))
        })
        .collect();
    let chip_config = ChipConfiguration::new(denominations).unwrap();

    let mut game = GameRecord::new(GroupCode::parse("FUZZ12").unwrap(), chip_config, Decimal::ZERO);
    for (idx, player) in input.players.iter().enumerate() {
        let chips: ChipHolding = player
            .chips
            .iter()
            .map(|(color, count)| (format!("c{color}"), i64::from(*count)))
            .collect();
        let buy_in = Decimal::new(i64::from(player.buy_in_cents), 2);
        game.total_pot += buy_in;
        let ledger = PlayerLedger::new(format!("p{idx}"), buy_in, ChipHolding::new())
            .with_current_chips(chips);
        game.players.push(ledger);
    }

    // Errors are fine, panics are not.
    let Ok(results) = SettlementEngine::default().compute_game_results(&game) else {
        return;
    };

    assert_eq!(results.payouts.len(), game.players.len());
    assert_eq!(results.player_earnings.len(), game.players.len());

    let total = money::sum(results.payouts.iter().map(|p| p.chip_value)).unwrap();
    assert_eq!(total, results.validation_result.total_chip_value);

    for transfer in &results.venmo_payments {
        assert!(transfer.amount > money::CENT);
    }
});
