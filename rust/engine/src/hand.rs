use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// The ten hand categories, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandRank {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three Of A Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four Of A Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };
        f.write_str(name)
    }
}

/// A classified five-card hand.
///
/// Hands order by category first, then by `tiebreakers` compared element by
/// element (most significant first). Two hands of the same category always
/// carry tiebreakers of the same length, so equal hands are genuine ties.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hand {
    pub rank: HandRank,
    pub tiebreakers: Vec<Rank>,
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.tiebreakers.cmp(&other.tiebreakers))
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        if !self.tiebreakers.is_empty() {
            let ranks: Vec<&str> = self.tiebreakers.iter().map(|r| r.symbol()).collect();
            write!(f, " ({})", ranks.join(" "))?;
        }
        Ok(())
    }
}

pub fn compare_hands(a: &Hand, b: &Hand) -> Ordering {
    a.cmp(b)
}

type Classifier = fn(&[Card; 5]) -> Option<Hand>;

// Strongest first; the first classifier that matches decides the hand.
const CLASSIFIERS: [Classifier; 9] = [
    royal_flush,
    straight_flush,
    four_of_a_kind,
    full_house,
    flush,
    straight,
    three_of_a_kind,
    two_pair,
    one_pair,
];

/// Classifies exactly five cards. The result does not depend on input order.
pub fn evaluate_five(cards: &[Card; 5]) -> Hand {
    CLASSIFIERS
        .iter()
        .find_map(|classify| classify(cards))
        .unwrap_or_else(|| high_card(cards))
}

/// Best five-card hand out of two hole cards and five community cards.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::Card;
/// use holdem_engine::hand::{evaluate_hand, HandRank};
///
/// let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let cards: [Card; 7] = cards.try_into().unwrap();
/// assert_eq!(evaluate_hand(&cards).rank, HandRank::RoyalFlush);
/// ```
pub fn evaluate_hand(cards: &[Card; 7]) -> Hand {
    best_of(cards)
}

/// Best hand over every five-card subset of `cards`; `None` with fewer than
/// five cards.
pub fn best_hand(cards: &[Card]) -> Option<Hand> {
    if cards.len() < 5 {
        return None;
    }
    Some(best_of(cards))
}

fn best_of(cards: &[Card]) -> Hand {
    let mut combos = Combinations::new(cards);
    // at least one subset exists for five or more cards
    let mut best = combos
        .next()
        .map(|five| evaluate_five(&five))
        .unwrap_or_else(|| Hand {
            rank: HandRank::HighCard,
            tiebreakers: Vec::new(),
        });
    for five in combos {
        let hand = evaluate_five(&five);
        if hand > best {
            best = hand;
        }
    }
    best
}

/// Iterates the C(n, 5) five-card subsets of a card slice in lexicographic
/// index order.
pub struct Combinations<'a> {
    cards: &'a [Card],
    indices: [usize; 5],
    done: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(cards: &'a [Card]) -> Self {
        Self {
            cards,
            indices: [0, 1, 2, 3, 4],
            done: cards.len() < 5,
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = [Card; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.indices.map(|i| self.cards[i]);

        let n = self.cards.len();
        match (0..5).rev().find(|&i| self.indices[i] < n - 5 + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(out)
    }
}

fn ranks_desc(cards: &[Card; 5]) -> Vec<Rank> {
    let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks
}

/// (count, rank) groups ordered by count, then rank, both descending.
fn rank_groups(cards: &[Card; 5]) -> Vec<(u8, Rank)> {
    let mut groups: Vec<(u8, Rank)> = Vec::with_capacity(5);
    for rank in ranks_desc(cards) {
        match groups.iter_mut().find(|(_, r)| *r == rank) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, rank)),
        }
    }
    groups.sort_by(|a, b| b.cmp(a));
    groups
}

fn grouped(rank: HandRank, groups: &[(u8, Rank)]) -> Hand {
    Hand {
        rank,
        tiebreakers: groups.iter().map(|&(_, r)| r).collect(),
    }
}

fn is_flush(cards: &[Card; 5]) -> bool {
    cards.iter().all(|c| c.suit == cards[0].suit)
}

/// High card of a five-card run; the wheel (A-2-3-4-5) plays as Five high.
fn straight_high(cards: &[Card; 5]) -> Option<Rank> {
    let ranks = ranks_desc(cards);
    if ranks == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
        return Some(Rank::Five);
    }
    let consecutive = ranks
        .windows(2)
        .all(|w| w[0].value() == w[1].value() + 1);
    consecutive.then_some(ranks[0])
}

fn royal_flush(cards: &[Card; 5]) -> Option<Hand> {
    straight_flush(cards)
        .filter(|h| h.tiebreakers.first() == Some(&Rank::Ace))
        .map(|_| Hand {
            rank: HandRank::RoyalFlush,
            tiebreakers: Vec::new(),
        })
}

fn straight_flush(cards: &[Card; 5]) -> Option<Hand> {
    if !is_flush(cards) {
        return None;
    }
    straight_high(cards).map(|high| Hand {
        rank: HandRank::StraightFlush,
        tiebreakers: vec![high],
    })
}

fn four_of_a_kind(cards: &[Card; 5]) -> Option<Hand> {
    let groups = rank_groups(cards);
    (groups[0].0 == 4).then(|| grouped(HandRank::FourOfAKind, &groups))
}

fn full_house(cards: &[Card; 5]) -> Option<Hand> {
    let groups = rank_groups(cards);
    (groups.len() == 2 && groups[0].0 == 3).then(|| grouped(HandRank::FullHouse, &groups))
}

fn flush(cards: &[Card; 5]) -> Option<Hand> {
    is_flush(cards).then(|| Hand {
        rank: HandRank::Flush,
        tiebreakers: ranks_desc(cards),
    })
}

fn straight(cards: &[Card; 5]) -> Option<Hand> {
    straight_high(cards).map(|high| Hand {
        rank: HandRank::Straight,
        tiebreakers: vec![high],
    })
}

fn three_of_a_kind(cards: &[Card; 5]) -> Option<Hand> {
    let groups = rank_groups(cards);
    (groups[0].0 == 3).then(|| grouped(HandRank::ThreeOfAKind, &groups))
}

fn two_pair(cards: &[Card; 5]) -> Option<Hand> {
    let groups = rank_groups(cards);
    (groups[0].0 == 2 && groups[1].0 == 2).then(|| grouped(HandRank::TwoPair, &groups))
}

fn one_pair(cards: &[Card; 5]) -> Option<Hand> {
    let groups = rank_groups(cards);
    (groups[0].0 == 2).then(|| grouped(HandRank::OnePair, &groups))
}

fn high_card(cards: &[Card; 5]) -> Hand {
    Hand {
        rank: HandRank::HighCard,
        tiebreakers: ranks_desc(cards),
    }
}
