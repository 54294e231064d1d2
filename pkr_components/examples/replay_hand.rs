//! Hand Replay Example
//!
//! Rebuilds a four-handed hand from its recorded actions and prints the
//! derived values a hand-history tool would show at each decision.

use pkr_components::{
    Action, BlindLevel, Card, Combo, HandEvaluation, SeatNumber, Table, TablePlayer,
    TableSettings,
};

fn high_card(hole: Combo, _board: &[Card]) -> HandEvaluation {
    HandEvaluation {
        hand_score: 15 - u32::from(hole.high().rank.value()),
        rank_class: 9,
        class_str: "High Card".to_string(),
    }
}

fn show_decision(table: &Table, seat: SeatNumber) {
    let to_call = table.to_call(seat).unwrap_or_default();
    let odds = table.pot_odds(seat).unwrap_or_default();
    let equity = table.req_equity(seat).unwrap_or_default();
    println!(
        "  seat {seat}: {to_call} to call into {}, pot odds {odds:.2}, needs {:.1}% equity",
        table.pot(),
        equity * 100.0
    );
}

fn main() {
    println!("=== Hand Replay Example ===\n");

    let mut table = Table::with_settings(TableSettings {
        name: "Replay".to_string(),
        seed: Some(42),
        ..Default::default()
    })
    .expect("default settings are valid");
    table.set_level(BlindLevel::new(1, 100).with_ante(0));

    for (seat, name, stack) in [
        (1, "toto", 2000),
        (2, "tata", 2500),
        (4, "tete", 12_000),
        (6, "titi", 25_000),
    ] {
        table
            .sit(TablePlayer::new(seat, name, stack))
            .expect("seat is free");
    }

    table.new_hand().expect("pots are empty");
    table.post_pregame().expect("two or more players");
    println!(
        "Button on seat {:?}, acting order {:?}\n",
        table.button(),
        table.playing_order()
    );

    for (seat, hole) in [(1, "KsQs"), (2, "AcJd"), (4, "7c2d"), (6, "9h9d")] {
        let combo: Combo = hole.parse().expect("valid combo");
        table
            .deal_hole_cards(seat, Some(combo))
            .expect("cards still in the deck");
    }

    let streets: [(&str, &[(SeatNumber, Action)]); 4] = [
        (
            "",
            &[
                (2, Action::Call),
                (4, Action::Fold),
                (6, Action::Call),
                (1, Action::Check),
            ],
        ),
        (
            "Th8c3s",
            &[(6, Action::Check), (1, Action::Bet(200)), (2, Action::Call), (6, Action::Fold)],
        ),
        ("", &[(1, Action::Check), (2, Action::Check)]),
        ("", &[(1, Action::Check), (2, Action::Check)]),
    ];

    for (i, (cards, actions)) in streets.iter().enumerate() {
        let cards = Card::parse(cards).expect("valid cards");
        match i {
            1 => table.draw_flop(&cards).map(drop),
            2 => table.draw_turn(&cards).map(drop),
            3 => table.draw_river(&cards).map(drop),
            _ => Ok(()),
        }
        .expect("street follows the previous one");

        let texture = table.board().texture();
        println!("{} {} {:?}", table.street(), table.board(), texture);
        for (seat, action) in actions.iter() {
            show_decision(&table, *seat);
            table.apply(*seat, *action).expect("legal action");
            println!("  seat {seat} {action}");
        }
    }

    table.go_to_showdown().expect("river was dealt");
    let payouts = table.showdown_with(&high_card).expect("someone is eligible");
    println!("\nShowdown payouts: {payouts:?}");
    for player in table.players().values() {
        println!("{player}");
    }
}
