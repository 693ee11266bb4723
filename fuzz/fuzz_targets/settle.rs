#![no_main]

extern crate arbitrary;
extern crate chip_settle;
extern crate libfuzzer_sys;
extern crate rust_decimal;

use std::collections::HashSet;

use chip_settle::core::money;
use chip_settle::settlement::{Diagnostics, SettlementEngine};
use rust_decimal::Decimal;

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    /// Net results in cents. The last player absorbs whatever is needed
    /// to make the game zero sum.
    pub net_cents: Vec<i32>,
}

fuzz_target!(|input: Input| {
    if input.net_cents.is_empty() || input.net_cents.len() > 256 {
        return;
    }

    let mut positions: Vec<(String, Decimal)> = input
        .net_cents
        .iter()
        .enumerate()
        .map(|(idx, cents)| (format!("p{idx}"), Decimal::new(i64::from(*cents), 2)))
        .collect();
    let balance = money::sum(positions.iter().map(|(_, net)| *net)).unwrap();
    positions.push(("balance".to_string(), -balance));

    let engine = SettlementEngine::default();
    let mut diagnostics = Diagnostics::new();
    let transfers = engine.settle(&positions, &mut diagnostics);

    // A zero sum game always settles completely.
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let winners = positions.iter().filter(|(_, net)| *net > Decimal::ZERO).count();
    let losers = positions.iter().filter(|(_, net)| *net < Decimal::ZERO).count();
    assert!(transfers.len() <= (winners + losers).saturating_sub(1));

    let payers: HashSet<&str> = transfers.iter().map(|t| t.from.as_str()).collect();
    let payees: HashSet<&str> = transfers.iter().map(|t| t.to.as_str()).collect();
    assert!(payers.is_disjoint(&payees));

    for transfer in &transfers {
        assert!(transfer.amount > money::CENT);
        assert_eq!(transfer.amount, money::round(transfer.amount));
    }

    // A skipped one cent match leaves each side a cent short, and nobody
    // is in more matches than there are players.
    let slack = money::CENT * Decimal::from(positions.len());
    for (name, net) in &positions {
        let paid = transfers.iter().filter(|t| &t.from == name).map(|t| t.amount);
        let received = transfers.iter().filter(|t| &t.to == name).map(|t| t.amount);
        let left = *net + money::sum(paid).unwrap() - money::sum(received).unwrap();
        assert!(left.abs() <= slack, "{name} left with {left}");
    }
});
