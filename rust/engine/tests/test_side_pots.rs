use std::collections::{HashMap, HashSet};

use holdem_engine::cards::Rank;
use holdem_engine::hand::{Hand, HandRank};
use holdem_engine::player::PlayerId;
use holdem_engine::pot::Pot;

fn id(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn pot_of(bets: &[(&str, u32)]) -> Pot {
    let mut pot = Pot::new();
    for &(p, amount) in bets {
        pot.add(&id(p), amount);
    }
    pot
}

fn set(ids: &[&str]) -> HashSet<PlayerId> {
    ids.iter().map(|s| id(s)).collect()
}

fn pair_of(rank: Rank) -> Hand {
    Hand {
        rank: HandRank::OnePair,
        tiebreakers: vec![rank, Rank::Nine, Rank::Five, Rank::Two],
    }
}

#[test]
fn all_in_player_creates_main_and_side_pot() {
    let pot = pot_of(&[("p1", 100), ("p2", 100), ("p3", 50)]);
    let pots = pot.side_pots(&set(&["p1", "p2", "p3"]));

    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].total, 150);
    assert_eq!(pots[0].eligible, vec![id("p1"), id("p2"), id("p3")]);
    assert_eq!(pots[1].total, 100);
    assert_eq!(pots[1].eligible, vec![id("p1"), id("p2")]);
    assert_eq!(pots.iter().map(|p| p.total).sum::<u32>(), 250);
}

#[test]
fn folded_chips_stay_in_the_pot_but_cannot_win() {
    let pot = pot_of(&[("p1", 100), ("p2", 100), ("p3", 40)]);
    // p3 folded after putting in 40
    let pots = pot.side_pots(&set(&["p1", "p2"]));

    assert_eq!(pots.iter().map(|p| p.total).sum::<u32>(), 240);
    for p in &pots {
        assert!(!p.eligible.contains(&id("p3")));
    }
}

#[test]
fn layer_without_contenders_merges_down() {
    // p1 folded after raising above everyone still in
    let pot = pot_of(&[("p1", 200), ("p2", 80), ("p3", 80)]);
    let pots = pot.side_pots(&set(&["p2", "p3"]));

    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].total, 360);
    assert_eq!(pots[0].eligible, vec![id("p2"), id("p3")]);
}

#[test]
fn short_all_in_wins_only_the_main_pot() {
    let pot = pot_of(&[("p1", 100), ("p2", 100), ("p3", 50)]);
    let hands = HashMap::from([
        (id("p1"), pair_of(Rank::Four)),
        (id("p2"), pair_of(Rank::King)),
        (id("p3"), pair_of(Rank::Ace)),
    ]);
    let stacks = HashMap::from([(id("p1"), 0), (id("p2"), 0), (id("p3"), 0)]);

    let settlement = pot.settle(&set(&["p1", "p2", "p3"]), &hands, &stacks);
    assert_eq!(settlement.payouts.get(&id("p3")), Some(&150));
    assert_eq!(settlement.payouts.get(&id("p2")), Some(&100));
    assert_eq!(settlement.payouts.get(&id("p1")), None);
    assert_eq!(settlement.awards.len(), 2);
    assert_eq!(settlement.payouts.values().sum::<u32>(), pot.total());
}

#[test]
fn odd_chip_goes_to_the_shorter_stack() {
    let pot = pot_of(&[("p1", 50), ("p2", 50), ("p3", 1)]);
    let tie = pair_of(Rank::Queen);
    let hands = HashMap::from([(id("p1"), tie.clone()), (id("p2"), tie)]);
    let stacks = HashMap::from([(id("p1"), 300), (id("p2"), 20), (id("p3"), 0)]);

    // p3 folded; its chip sits in the layer p1 and p2 contest
    let settlement = pot.settle(&set(&["p1", "p2"]), &hands, &stacks);
    assert_eq!(settlement.payouts.get(&id("p2")), Some(&51));
    assert_eq!(settlement.payouts.get(&id("p1")), Some(&50));

    let award = &settlement.awards[0];
    assert_eq!(award.winners.len(), 2);
    assert_eq!(award.pot.total, 3);
    assert_eq!(award.shares[0], (id("p2"), 2));
}

#[test]
fn equal_stacks_break_odd_chip_ties_by_id() {
    let pot = pot_of(&[("b", 2), ("a", 2), ("c", 1)]);
    let tie = pair_of(Rank::Two);
    let hands = HashMap::from([(id("a"), tie.clone()), (id("b"), tie)]);
    let stacks = HashMap::from([(id("a"), 10), (id("b"), 10)]);

    let settlement = pot.settle(&set(&["a", "b"]), &hands, &stacks);
    assert_eq!(settlement.payouts.get(&id("a")), Some(&3));
    assert_eq!(settlement.payouts.get(&id("b")), Some(&2));
}

#[test]
fn lone_contender_takes_everything_without_a_hand() {
    let pot = pot_of(&[("p1", 15), ("p2", 10)]);
    let settlement = pot.settle(&set(&["p1"]), &HashMap::new(), &HashMap::new());
    assert_eq!(settlement.payouts.get(&id("p1")), Some(&25));
    assert_eq!(settlement.payouts.len(), 1);
}
