//! Flop texture classifiers against hand-checked boards.
//!
//! Every row pins the full set of predicates and the rank differences, so a
//! change to any classifier shows up here.

use pkr_components::{Board, BoardError, BoardSlot, BoardTexture, Card};

struct Row {
    cards: &'static [&'static str],
    texture: BoardTexture,
    differences: (u8, u8, u8),
}

fn rows() -> Vec<Row> {
    vec![
        Row {
            cards: &["As", "Ad", "Tc", "Td", "Ah"],
            texture: BoardTexture {
                rainbow: true,
                monotone: false,
                triplet: false,
                pair: true,
                straightdraw: false,
                gutshot: true,
                flushdraw: false,
            },
            differences: (0, 4, 4),
        },
        Row {
            cards: &["Qd", "Ad", "Jc", "Td", "Ah"],
            texture: BoardTexture {
                rainbow: false,
                monotone: false,
                triplet: false,
                pair: false,
                straightdraw: true,
                gutshot: true,
                flushdraw: true,
            },
            differences: (2, 1, 3),
        },
        Row {
            cards: &["Qd", "5d", "Td", "Tc", "Ah"],
            texture: BoardTexture {
                rainbow: false,
                monotone: true,
                triplet: false,
                pair: false,
                straightdraw: true,
                gutshot: true,
                flushdraw: true,
            },
            differences: (7, 2, 5),
        },
        Row {
            cards: &["As", "Ad", "Ah"],
            texture: BoardTexture {
                rainbow: true,
                monotone: false,
                triplet: true,
                pair: true,
                straightdraw: false,
                gutshot: false,
                flushdraw: false,
            },
            differences: (0, 0, 0),
        },
        Row {
            cards: &["Ks", "Qs", "Js"],
            texture: BoardTexture {
                rainbow: false,
                monotone: true,
                triplet: false,
                pair: false,
                straightdraw: true,
                gutshot: true,
                flushdraw: true,
            },
            differences: (1, 2, 1),
        },
    ]
}

#[test]
fn test_texture_truth_table() {
    for row in rows() {
        let board = Board::from_identifiers(row.cards).unwrap();
        assert_eq!(board.texture(), row.texture, "texture of {board}");
        assert_eq!(board.is_rainbow(), row.texture.rainbow, "{board}");
        assert_eq!(board.is_monotone(), row.texture.monotone, "{board}");
        assert_eq!(board.is_triplet(), row.texture.triplet, "{board}");
        assert_eq!(board.has_pair(), row.texture.pair, "{board}");
        assert_eq!(board.has_straightdraw(), row.texture.straightdraw, "{board}");
        assert_eq!(board.has_gutshot(), row.texture.gutshot, "{board}");
        assert_eq!(board.has_flushdraw(), row.texture.flushdraw, "{board}");
    }
}

#[test]
fn test_differences_table() {
    for row in rows() {
        let board = Board::from_identifiers(row.cards).unwrap();
        assert_eq!(board.differences().unwrap(), row.differences, "{board}");
    }
}

#[test]
fn test_board_positions_match_input() {
    for row in rows() {
        let board = Board::from_identifiers(row.cards).unwrap();
        assert_eq!(board.len(), row.cards.len());
        for (i, id) in row.cards.iter().enumerate() {
            assert_eq!(board.card_at(i).unwrap(), id.parse::<Card>().unwrap());
            assert_eq!(board.card(BoardSlot::ALL[i]).unwrap().to_string(), *id);
        }
    }
}

#[test]
fn test_invalid_boards() {
    assert_eq!(
        Board::from_identifiers(&["As", "As", "Tc"]),
        Err(BoardError::DuplicateCard("As".parse().unwrap()))
    );
    assert_eq!(
        Board::from_identifiers(&["2c", "3c", "4c", "5c", "6c", "7c"]),
        Err(BoardError::Full)
    );

    let mut board = Board::from_identifiers(&["As", "Ad", "Tc"]).unwrap();
    assert_eq!(
        board.add("Ad".parse().unwrap()),
        Err(BoardError::DuplicateCard("Ad".parse().unwrap()))
    );
    assert_eq!(board.len(), 3);
}

#[test]
fn test_flop_combinations_follow_difference_order() {
    let board = Board::from_identifiers(&["Qd", "5d", "Td"]).unwrap();
    let combos = board.flop_combinations().unwrap();
    let gaps: Vec<u8> = combos
        .iter()
        .map(|combo| combo.high().rank_gap(&combo.low()))
        .collect();
    assert_eq!(gaps, vec![7, 2, 5]);
}
