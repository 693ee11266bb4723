//! Turning net gains and losses into a list of who pays whom.
//!
//! The matching is greedy. Winners and losers are each sorted from the
//! biggest amount down, then the biggest loser pays the biggest winner as
//! much as possible, and whichever of the two is settled steps aside for
//! the next one in line. It does not always find the fewest possible
//! payments (that is a subset-sum search), but:
//!
//! - It never needs more than `winners + losers - 1` payments.
//! - Nobody both pays and gets paid, so money never goes in a circle.
//! - It is deterministic. The sorts are stable, so ties keep the order
//!   the players were given in and the same input always produces the
//!   same payments.
use rust_decimal::Decimal;
use tracing::event;

use super::diagnostics::{Diagnostic, Diagnostics};
use super::engine::SettlementEngine;
use super::payout::PayoutResult;
use super::valuation::PlayerEarnings;
use crate::core::money;

/// A single payment from a loser to a winner.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettlementTransfer {
    pub from: String,
    pub to: String,
    /// Rounded to the cent, always above the dust threshold.
    pub amount: Decimal,
    pub note: String,
}

/// Anything with a name and a net result can be settled.
pub trait NetPosition {
    fn name(&self) -> &str;
    /// Positive for winners, negative for losers.
    fn net_gain(&self) -> Decimal;
}

impl NetPosition for PayoutResult {
    fn name(&self) -> &str {
        &self.name
    }

    fn net_gain(&self) -> Decimal {
        self.net_gain
    }
}

impl NetPosition for PlayerEarnings {
    fn name(&self) -> &str {
        &self.name
    }

    fn net_gain(&self) -> Decimal {
        self.net_earnings
    }
}

impl<S: AsRef<str>> NetPosition for (S, Decimal) {
    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn net_gain(&self) -> Decimal {
        self.1
    }
}

impl<T: NetPosition + ?Sized> NetPosition for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn net_gain(&self) -> Decimal {
        (**self).net_gain()
    }
}

/// One side of the ledger while matching is in progress.
#[derive(Debug)]
struct Balance<'a> {
    name: &'a str,
    remaining: Decimal,
}

/// Stable sort, largest first.
fn sorted_descending(mut balances: Vec<Balance<'_>>) -> Vec<Balance<'_>> {
    balances.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    balances
}

impl SettlementEngine {
    /// Produce the payments that settle every position.
    ///
    /// If the positions don't net out to zero the leftover is reported as
    /// a [`Diagnostic::SettlementImbalance`]. That always points at a
    /// problem further upstream, usually a pot that didn't validate.
    pub fn settle<P: NetPosition>(
        &self,
        positions: &[P],
        diagnostics: &mut Diagnostics,
    ) -> Vec<SettlementTransfer> {
        let dust = self.config().dust_threshold;

        let mut winners = sorted_descending(
            positions
                .iter()
                .filter(|p| p.net_gain() > Decimal::ZERO)
                .map(|p| Balance {
                    name: p.name(),
                    remaining: p.net_gain(),
                })
                .collect(),
        );
        let mut losers = sorted_descending(
            positions
                .iter()
                .filter(|p| p.net_gain() < Decimal::ZERO)
                .map(|p| Balance {
                    name: p.name(),
                    remaining: p.net_gain().abs(),
                })
                .collect(),
        );

        event!(
            tracing::Level::DEBUG,
            winners = winners.len(),
            losers = losers.len(),
            "Settling balances"
        );

        let mut transfers = Vec::new();
        let mut winner_idx = 0;
        let mut loser_idx = 0;

        while winner_idx < winners.len() && loser_idx < losers.len() {
            let winner = &mut winners[winner_idx];
            let loser = &mut losers[loser_idx];

            let payment = winner.remaining.min(loser.remaining);
            let amount = money::round(payment);

            if amount > dust {
                event!(
                    tracing::Level::TRACE,
                    from = loser.name,
                    to = winner.name,
                    %payment,
                    "Matched payment"
                );
                transfers.push(SettlementTransfer {
                    from: loser.name.to_string(),
                    to: winner.name.to_string(),
                    amount,
                    note: self.config().note.clone(),
                });
            }

            // Deducted even when too small to pay. `payment` never exceeds
            // either balance so this can't overflow.
            winner.remaining = money::round(winner.remaining - payment);
            loser.remaining = money::round(loser.remaining - payment);

            // Both can be settled by the same payment.
            if winner.remaining < dust {
                winner_idx += 1;
            }
            if loser.remaining < dust {
                loser_idx += 1;
            }
        }

        // A total too big to represent is certainly not settled.
        let remaining_winnings =
            money::sum(winners.iter().map(|w| w.remaining)).unwrap_or(Decimal::MAX);
        let remaining_debts =
            money::sum(losers.iter().map(|l| l.remaining)).unwrap_or(Decimal::MAX);
        if remaining_winnings >= dust || remaining_debts >= dust {
            diagnostics.push(Diagnostic::SettlementImbalance {
                remaining_winnings,
                remaining_debts,
            });
        }

        event!(
            tracing::Level::DEBUG,
            transfers = transfers.len(),
            "Settlement complete"
        );

        transfers
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::settlement::SettlementConfig;

    fn payout(name: &str, buy_in: Decimal, chip_value: Decimal) -> PayoutResult {
        PayoutResult::new(name, chip_value, buy_in).unwrap()
    }

    fn settle<P: NetPosition>(positions: &[P]) -> Vec<SettlementTransfer> {
        SettlementEngine::default().settle(positions, &mut Diagnostics::new())
    }

    fn total_paid(transfers: &[SettlementTransfer]) -> Decimal {
        transfers.iter().map(|t| t.amount).sum()
    }

    fn assert_no_cycles(transfers: &[SettlementTransfer]) {
        let senders: HashSet<&str> = transfers.iter().map(|t| t.from.as_str()).collect();
        let receivers: HashSet<&str> = transfers.iter().map(|t| t.to.as_str()).collect();
        assert!(
            senders.is_disjoint(&receivers),
            "Someone both pays and gets paid: {:?}",
            transfers
        );
    }

    #[test]
    fn test_two_players_single_transfer() {
        let payouts = vec![
            payout("Alice", dec!(100), dec!(150)),
            payout("Bob", dec!(100), dec!(50)),
        ];

        let transfers = settle(&payouts);

        assert_eq!(
            transfers,
            vec![SettlementTransfer {
                from: "Bob".into(),
                to: "Alice".into(),
                amount: dec!(50),
                note: "Poker game settlement".into(),
            }]
        );
    }

    #[test]
    fn test_one_winner_two_losers() {
        let payouts = vec![
            ("Winner", dec!(200)),
            ("Loser1", dec!(-50)),
            ("Loser2", dec!(-150)),
        ];

        let transfers = settle(&payouts);

        assert_eq!(transfers.len(), 2);
        assert!(transfers.iter().all(|t| t.to == "Winner"));
        // Biggest loser pays first.
        assert_eq!(transfers[0].from, "Loser2");
        assert_eq!(transfers[0].amount, dec!(150));
    }

    #[test]
    fn test_two_winners_one_loser_pays_biggest_first() {
        let payouts = vec![
            ("Winner1", dec!(50)),
            ("Winner2", dec!(100)),
            ("Loser", dec!(-150)),
        ];

        let transfers = settle(&payouts);

        assert_eq!(transfers.len(), 2);
        assert!(transfers.iter().all(|t| t.from == "Loser"));
        assert_eq!(transfers[0].to, "Winner2");
        assert_eq!(transfers[0].amount, dec!(100));
        assert_eq!(transfers[1].to, "Winner1");
        assert_eq!(transfers[1].amount, dec!(50));
    }

    #[test]
    fn test_four_players_pair_off() {
        let payouts = vec![
            ("A", dec!(100)),
            ("B", dec!(50)),
            ("C", dec!(-50)),
            ("D", dec!(-100)),
        ];

        let transfers = settle(&payouts);

        assert_eq!(transfers.len(), 2);
        assert_eq!(
            (transfers[0].from.as_str(), transfers[0].to.as_str()),
            ("D", "A")
        );
        assert_eq!(transfers[0].amount, dec!(100));
        assert_eq!(
            (transfers[1].from.as_str(), transfers[1].to.as_str()),
            ("C", "B")
        );
        assert_eq!(transfers[1].amount, dec!(50));
    }

    #[test]
    fn test_one_big_winner_many_equal_losers() {
        let mut payouts = vec![payout("BigWinner", dec!(100), dec!(600))];
        for i in 1..=5 {
            payouts.push(payout(&format!("L{i}"), dec!(100), Decimal::ZERO));
        }

        let transfers = settle(&payouts);

        assert_eq!(transfers.len(), 5);
        assert!(transfers.iter().all(|t| t.to == "BigWinner"));
        assert!(transfers.iter().all(|t| t.amount == dec!(100)));
        // Equal losers pay in the order they were given.
        let order: Vec<&str> = transfers.iter().map(|t| t.from.as_str()).collect();
        assert_eq!(order, vec!["L1", "L2", "L3", "L4", "L5"]);
    }

    #[test]
    fn test_asymmetric_multi_winner_multi_loser() {
        let payouts = vec![
            ("BigWinner", dec!(300)),
            ("MedWinner", dec!(50)),
            ("SmallWinner", dec!(20)),
            ("SmallLoser", dec!(-30)),
            ("MedLoser", dec!(-80)),
            ("BigLoser", dec!(-260)),
        ];

        let transfers = settle(&payouts);

        assert_eq!(total_paid(&transfers), dec!(370));
        let big_loser: Vec<_> = transfers.iter().filter(|t| t.from == "BigLoser").collect();
        assert_eq!(big_loser[0].to, "BigWinner");
        assert!(transfers.len() <= 5);
        assert_no_cycles(&transfers);
    }

    #[test]
    fn test_many_small_winners_few_big_losers() {
        let payouts = vec![
            ("W1", dec!(10)),
            ("W2", dec!(15)),
            ("W3", dec!(20)),
            ("W4", dec!(25)),
            ("W5", dec!(30)),
            ("L1", dec!(-50)),
            ("L2", dec!(-50)),
        ];

        let transfers = settle(&payouts);

        assert!(transfers.len() <= 6);
        assert!(transfers.iter().filter(|t| t.from == "L1").count() > 1);
        assert!(transfers.iter().filter(|t| t.from == "L2").count() > 1);
        assert_eq!(total_paid(&transfers), dec!(100));
    }

    #[test]
    fn test_all_break_even() {
        let payouts: Vec<_> = (1..=4)
            .map(|i| payout(&format!("P{i}"), dec!(100), dec!(100)))
            .collect();
        assert!(settle(&payouts).is_empty());

        let solo = vec![payout("SoloPlayer", dec!(100), dec!(100))];
        assert!(settle(&solo).is_empty());
    }

    #[test]
    fn test_micro_stakes_round_to_cents() {
        let payouts = vec![
            ("A", dec!(0.67)),
            ("B", dec!(0.33)),
            ("C", dec!(-0.50)),
            ("D", dec!(-0.50)),
        ];

        let transfers = settle(&payouts);

        assert!(transfers.len() >= 2 && transfers.len() <= 4);
        for t in &transfers {
            assert_eq!(t.amount, money::round(t.amount));
        }
        assert_eq!(total_paid(&transfers), dec!(1.00));
    }

    #[test_log::test]
    fn test_dust_is_never_paid() {
        let payouts = vec![
            ("A", dec!(0.008)),
            ("B", dec!(0.002)),
            ("C", dec!(-0.005)),
            ("D", dec!(-0.005)),
        ];
        let mut diagnostics = Diagnostics::new();

        let transfers = SettlementEngine::default().settle(&payouts, &mut diagnostics);

        assert!(transfers.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_one_cent_is_dust() {
        let payouts = vec![("A", dec!(0.01)), ("B", dec!(-0.01))];
        let mut diagnostics = Diagnostics::new();

        let transfers = SettlementEngine::default().settle(&payouts, &mut diagnostics);

        assert!(transfers.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_two_cents_is_paid() {
        let payouts = vec![("A", dec!(0.02)), ("B", dec!(-0.02))];
        let transfers = settle(&payouts);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, dec!(0.02));
    }

    #[test]
    fn test_amount_rounding_to_one_cent_is_dust() {
        let payouts = vec![("A", dec!(0.014)), ("B", dec!(-0.014))];
        let mut diagnostics = Diagnostics::new();

        let transfers = SettlementEngine::default().settle(&payouts, &mut diagnostics);

        assert!(transfers.is_empty());
        assert!(diagnostics.is_empty());
    }

    /// Skipped cents still count against both balances, so nothing is
    /// left over to report.
    #[test]
    fn test_skipped_cents_still_settle() {
        let payouts = vec![
            ("W", dec!(10.03)),
            ("L1", dec!(-10)),
            ("L2", dec!(-0.01)),
            ("L3", dec!(-0.01)),
            ("L4", dec!(-0.01)),
        ];
        let mut diagnostics = Diagnostics::new();

        let transfers = SettlementEngine::default().settle(&payouts, &mut diagnostics);

        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from, "L1");
        assert_eq!(transfers[0].amount, dec!(10));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_custom_dust_threshold_and_note() {
        let engine = SettlementEngine::new(
            SettlementConfig::default()
                .with_dust_threshold(dec!(1))
                .with_note("Friday night"),
        )
        .unwrap();
        let payouts = vec![
            ("A", dec!(20.50)),
            ("B", dec!(0.50)),
            ("C", dec!(-21)),
        ];

        let transfers = engine.settle(&payouts, &mut Diagnostics::new());

        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, dec!(20.50));
        assert_eq!(transfers[0].note, "Friday night");
    }

    /// Net gains that don't cancel out leave a balance behind.
    #[test_log::test]
    fn test_imbalance_is_reported() {
        let payouts = vec![("A", dec!(100)), ("B", dec!(-60))];
        let mut diagnostics = Diagnostics::new();

        let transfers = SettlementEngine::default().settle(&payouts, &mut diagnostics);

        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, dec!(60));
        assert_eq!(
            diagnostics.as_slice(),
            &[Diagnostic::SettlementImbalance {
                remaining_winnings: dec!(40),
                remaining_debts: Decimal::ZERO,
            }]
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let payouts = vec![
            ("A", dec!(100)),
            ("B", dec!(50)),
            ("C", dec!(-50)),
            ("D", dec!(-100)),
            ("E", dec!(50)),
            ("F", dec!(-50)),
        ];

        let first = settle(&payouts);
        for _ in 0..10 {
            assert_eq!(settle(&payouts), first);
        }
    }

    #[test]
    fn test_accepts_earnings_and_references() {
        let earnings = vec![
            PlayerEarnings::new("A", dec!(150), dec!(100)).unwrap(),
            PlayerEarnings::new("B", dec!(50), dec!(100)).unwrap(),
        ];
        let refs: Vec<&PlayerEarnings> = earnings.iter().collect();

        assert_eq!(settle(&earnings), settle(&refs));
        assert_eq!(settle(&earnings)[0].amount, dec!(50));
    }

    #[test]
    fn test_extreme_imbalance_one_winner_ninety_nine_losers() {
        let mut payouts = vec![("MegaWinner".to_string(), dec!(9900))];
        for i in 1..100 {
            payouts.push((format!("Loser{i}"), dec!(-100)));
        }

        let transfers = settle(&payouts);

        assert_eq!(transfers.len(), 99);
        assert!(transfers.iter().all(|t| t.to == "MegaWinner"));
        assert!(transfers.iter().all(|t| t.amount == dec!(100)));
    }

    /// Random zero-sum games. Every one of them should be fully settled,
    /// with money only flowing from losers to winners.
    #[test]
    fn test_random_games_conserve_money() {
        let mut rng = StdRng::seed_from_u64(420);

        for _ in 0..200 {
            let num_players = rng.random_range(2..20);
            let mut payouts = Vec::with_capacity(num_players);
            let mut total_cents: i64 = 0;
            for i in 0..num_players - 1 {
                let cents: i64 = rng.random_range(-20_000..20_000);
                total_cents += cents;
                payouts.push((format!("P{i}"), Decimal::new(cents, 2)));
            }
            payouts.push((
                format!("P{}", num_players - 1),
                Decimal::new(-total_cents, 2),
            ));

            let mut diagnostics = Diagnostics::new();
            let transfers = SettlementEngine::default().settle(&payouts, &mut diagnostics);

            let winnings: Decimal = payouts
                .iter()
                .map(|(_, gain)| *gain)
                .filter(|gain| *gain > Decimal::ZERO)
                .sum();

            let winners = payouts.iter().filter(|(_, g)| *g > Decimal::ZERO).count();
            let losers = payouts.iter().filter(|(_, g)| *g < Decimal::ZERO).count();

            // Only one cent matches go unpaid, at most one per match.
            let unpaid = winnings - total_paid(&transfers);
            assert!(unpaid >= Decimal::ZERO);
            assert!(unpaid <= dec!(0.01) * Decimal::from(winners + losers));

            assert!(diagnostics.is_empty(), "{:?}", diagnostics);
            assert_no_cycles(&transfers);
            assert!(transfers.len() <= (winners + losers).saturating_sub(1));
            for t in &transfers {
                assert!(t.amount > dec!(0.01));
                assert_eq!(t.amount, money::round(t.amount));
            }
        }
    }
}
