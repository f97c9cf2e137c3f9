use std::cmp::Ordering;

use holdem_engine::cards::{full_deck, Card, Rank};
use holdem_engine::hand::{best_hand, compare_hands, evaluate_five, evaluate_hand, Hand, HandRank};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn cards(notation: &[&str]) -> Vec<Card> {
    notation.iter().map(|s| s.parse().unwrap()).collect()
}

fn seven(notation: [&str; 7]) -> [Card; 7] {
    notation.map(|s| s.parse().unwrap())
}

fn five(notation: [&str; 5]) -> [Card; 5] {
    notation.map(|s| s.parse().unwrap())
}

#[test]
fn royal_flush_from_hole_and_board() {
    let h = evaluate_hand(&seven(["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]));
    assert_eq!(h.rank, HandRank::RoyalFlush);
}

#[test]
fn four_of_a_kind_with_king_kicker() {
    let h = evaluate_hand(&seven(["7c", "7d", "7h", "7s", "2c", "9d", "Ks"]));
    assert_eq!(h.rank, HandRank::FourOfAKind);
    assert_eq!(h.tiebreakers, vec![Rank::Seven, Rank::King]);
}

#[test]
fn every_category_is_recognised() {
    let cases = [
        (["Ks", "Qs", "Js", "Ts", "9s"], HandRank::StraightFlush),
        (["3c", "3d", "3h", "Kc", "Kd"], HandRank::FullHouse),
        (["2d", "7d", "9d", "Jd", "Ad"], HandRank::Flush),
        (["9c", "Td", "Jh", "Qs", "Kc"], HandRank::Straight),
        (["5c", "5d", "5h", "Kc", "2d"], HandRank::ThreeOfAKind),
        (["5c", "5d", "9h", "9c", "2d"], HandRank::TwoPair),
        (["5c", "5d", "9h", "Jc", "2d"], HandRank::OnePair),
        (["5c", "7d", "9h", "Jc", "2d"], HandRank::HighCard),
    ];
    for (notation, expected) in cases {
        assert_eq!(evaluate_five(&five(notation)).rank, expected, "{notation:?}");
    }
}

#[test]
fn wheel_plays_five_high() {
    let wheel = evaluate_five(&five(["Ac", "2d", "3h", "4s", "5c"]));
    assert_eq!(wheel.rank, HandRank::Straight);
    assert_eq!(wheel.tiebreakers, vec![Rank::Five]);

    let six_high = evaluate_five(&five(["2d", "3h", "4s", "5c", "6d"]));
    assert!(six_high > wheel);
}

#[test]
fn best_hand_picks_the_strongest_subset() {
    // the board pair is beaten by the flush in hearts
    let h = best_hand(&cards(&["Ah", "9h", "2h", "5h", "Kh", "Kc", "Kd"])).unwrap();
    assert_eq!(h.rank, HandRank::Flush);
    assert_eq!(
        h.tiebreakers,
        vec![Rank::Ace, Rank::King, Rank::Nine, Rank::Five, Rank::Two]
    );
}

#[test]
fn best_hand_accepts_five_and_six_cards() {
    assert_eq!(
        best_hand(&cards(&["9c", "9d", "4h", "4s", "2c"])).unwrap().rank,
        HandRank::TwoPair
    );
    assert_eq!(
        best_hand(&cards(&["9c", "9d", "4h", "4s", "2c", "9h"]))
            .unwrap()
            .rank,
        HandRank::FullHouse
    );
    assert!(best_hand(&cards(&["9c", "9d", "4h"])).is_none());
}

#[test]
fn kickers_break_ties_and_equal_hands_tie() {
    let a = evaluate_five(&five(["Ac", "Ad", "Kh", "7s", "2c"]));
    let b = evaluate_five(&five(["As", "Ah", "Qh", "7d", "2d"]));
    assert_eq!(compare_hands(&a, &b), Ordering::Greater);

    let c = evaluate_five(&five(["Ah", "As", "Kd", "7c", "2s"]));
    assert_eq!(compare_hands(&a, &c), Ordering::Equal);
}

#[test]
fn evaluation_ignores_input_order() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let mut deck = full_deck();
    for _ in 0..200 {
        deck.shuffle(&mut rng);
        let mut hand: [Card; 7] = deck[..7].try_into().unwrap();
        let expected = evaluate_hand(&hand);
        for _ in 0..5 {
            hand.shuffle(&mut rng);
            assert_eq!(evaluate_hand(&hand), expected);
        }

        let mut subset: [Card; 5] = deck[..5].try_into().unwrap();
        let expected = evaluate_five(&subset);
        subset.reverse();
        assert_eq!(evaluate_five(&subset), expected);
    }
}

#[test]
fn comparison_is_a_total_order() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut deck = full_deck();
    let hands: Vec<Hand> = (0..40)
        .map(|_| {
            deck.shuffle(&mut rng);
            let seven: [Card; 7] = deck[..7].try_into().unwrap();
            evaluate_hand(&seven)
        })
        .collect();

    for a in &hands {
        for b in &hands {
            // antisymmetry
            assert_eq!(compare_hands(a, b), compare_hands(b, a).reverse());
            for c in &hands {
                if a <= b && b <= c {
                    assert!(a <= c, "{a} <= {b} <= {c} must imply {a} <= {c}");
                }
            }
        }
    }
}

#[test]
fn hands_display_category_and_ranks() {
    let h = evaluate_five(&five(["7c", "7d", "7h", "7s", "Kc"]));
    assert_eq!(h.to_string(), "Four Of A Kind (7 K)");
    let royal = evaluate_five(&five(["Ts", "Js", "Qs", "Ks", "As"]));
    assert_eq!(royal.to_string(), "Royal Flush");
}
