use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::hand::Hand;
use crate::player::PlayerId;

/// Chips committed by each player over every betting round of one hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pot {
    bets: HashMap<PlayerId, u32>,
}

/// One layer of the pot that only some players can win.
///
/// Derived at settlement from the commitments, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    /// Non-folded players who committed at least `cap`, by id
    pub eligible: Vec<PlayerId>,
    /// Commitment level that bounds this layer
    pub cap: u32,
    pub total: u32,
}

/// Result of distributing one side pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub pot: SidePot,
    pub winners: Vec<PlayerId>,
    /// Chips each winner takes from this pot, odd chips included
    pub shares: Vec<(PlayerId, u32)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub awards: Vec<PotAward>,
    /// Total won per player across all pots
    pub payouts: BTreeMap<PlayerId, u32>,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &PlayerId, amount: u32) {
        let bet = self.bets.entry(id.clone()).or_insert(0);
        *bet = bet.saturating_add(amount);
    }

    /// Saturates at `u32::MAX`; a [`crate::game::Game`] never seats more
    /// chips than that, so its pots are always exact.
    pub fn total(&self) -> u32 {
        self.bets.values().fold(0, |acc, &b| acc.saturating_add(b))
    }

    pub fn contribution(&self, id: &PlayerId) -> u32 {
        self.bets.get(id).copied().unwrap_or(0)
    }

    pub fn bets(&self) -> &HashMap<PlayerId, u32> {
        &self.bets
    }

    /// Splits the pot into layers at every distinct commitment level.
    ///
    /// Each layer holds `(level - previous level)` from every player who
    /// committed at least `level`, folded or not; only `contenders` (players
    /// still in the hand) are eligible to win it. A layer nobody can win is
    /// folded into the layer below it. The layer totals always sum to
    /// [`Pot::total`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use holdem_engine::player::PlayerId;
    /// use holdem_engine::pot::Pot;
    ///
    /// let (p1, p2, p3) = (PlayerId::from("p1"), PlayerId::from("p2"), PlayerId::from("p3"));
    /// let mut pot = Pot::new();
    /// pot.add(&p1, 100);
    /// pot.add(&p2, 100);
    /// pot.add(&p3, 50);
    ///
    /// let contenders: HashSet<PlayerId> = [p1.clone(), p2.clone(), p3.clone()].into();
    /// let pots = pot.side_pots(&contenders);
    /// assert_eq!(pots[0].total, 150);
    /// assert_eq!(pots[0].eligible, vec![p1.clone(), p2.clone(), p3]);
    /// assert_eq!(pots[1].total, 100);
    /// assert_eq!(pots[1].eligible, vec![p1, p2]);
    /// ```
    pub fn side_pots(&self, contenders: &HashSet<PlayerId>) -> Vec<SidePot> {
        let mut entries: Vec<(u32, &PlayerId)> = self
            .bets
            .iter()
            .filter(|&(_, &amount)| amount > 0)
            .map(|(id, &amount)| (amount, id))
            .collect();
        entries.sort();

        let mut pots: Vec<SidePot> = Vec::new();
        let mut previous = 0u32;
        let mut orphaned = 0u32;
        for (i, &(level, _)) in entries.iter().enumerate() {
            if level == previous {
                continue;
            }
            let contributors = &entries[i..];
            let total = (level - previous).saturating_mul(contributors.len() as u32);
            let mut eligible: Vec<PlayerId> = contributors
                .iter()
                .filter(|&&(_, id)| contenders.contains(id))
                .map(|&(_, id)| id.clone())
                .collect();
            eligible.sort();
            previous = level;

            if eligible.is_empty() {
                match pots.last_mut() {
                    Some(below) => below.total = below.total.saturating_add(total),
                    None => orphaned = orphaned.saturating_add(total),
                }
                continue;
            }
            pots.push(SidePot {
                eligible,
                cap: level,
                total: total.saturating_add(std::mem::take(&mut orphaned)),
            });
        }

        if orphaned > 0 {
            let mut eligible: Vec<PlayerId> = contenders.iter().cloned().collect();
            eligible.sort();
            pots.push(SidePot {
                eligible,
                cap: previous,
                total: orphaned,
            });
        }
        pots
    }

    /// Distributes every side pot to the best hand(s) among its eligible
    /// players.
    ///
    /// `hands` holds the evaluated hand of each contender; a pot with a
    /// single eligible player needs no hand. Tied winners split a pot
    /// evenly and the indivisible remainder goes one chip at a time to the
    /// tied winners in ascending order of their current stack (`stacks`,
    /// updated as earlier pots are paid), then by id.
    pub fn settle(
        &self,
        contenders: &HashSet<PlayerId>,
        hands: &HashMap<PlayerId, Hand>,
        stacks: &HashMap<PlayerId, u32>,
    ) -> Settlement {
        let mut running: HashMap<PlayerId, u32> = stacks.clone();
        let mut settlement = Settlement::default();

        for pot in self.side_pots(contenders) {
            let winners = pot_winners(&pot, hands);
            let shares = split(&pot, &winners, &running);
            for (id, share) in &shares {
                let stack = running.entry(id.clone()).or_insert(0);
                *stack = stack.saturating_add(*share);
                let won = settlement.payouts.entry(id.clone()).or_insert(0);
                *won = won.saturating_add(*share);
            }
            settlement.awards.push(PotAward {
                pot,
                winners,
                shares,
            });
        }
        settlement
    }
}

fn pot_winners(pot: &SidePot, hands: &HashMap<PlayerId, Hand>) -> Vec<PlayerId> {
    if pot.eligible.len() == 1 {
        return pot.eligible.clone();
    }
    let best = pot.eligible.iter().filter_map(|id| hands.get(id)).max();
    match best {
        Some(best) => pot
            .eligible
            .iter()
            .filter(|id| hands.get(*id) == Some(best))
            .cloned()
            .collect(),
        None => pot.eligible.clone(),
    }
}

fn split(
    pot: &SidePot,
    winners: &[PlayerId],
    stacks: &HashMap<PlayerId, u32>,
) -> Vec<(PlayerId, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let mut ordered: Vec<&PlayerId> = winners.iter().collect();
    ordered.sort_by_key(|id| (stacks.get(*id).copied().unwrap_or(0), *id));

    let n = winners.len() as u32;
    let share = pot.total / n;
    let mut remainder = pot.total % n;
    ordered
        .into_iter()
        .map(|id| {
            let odd = u32::from(remainder > 0);
            remainder -= odd;
            (id.clone(), share + odd)
        })
        .collect()
}
