use std::collections::HashMap;

use serde::Serialize;

use crate::errors::GameError;
use crate::player::{ActionKind, Player, PlayerId};
use crate::pot::Pot;
use crate::seats::{SeatIndex, SeatRing};

/// Numbers a client needs to render a raise control for the acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RaiseBounds {
    /// Current bet every player has to match
    pub call_amount: u32,
    /// Chips the player still owes to call
    pub to_call: u32,
    /// Smallest legal raise target (capped at the player's all-in)
    pub min_raise: u32,
    /// Largest raise target, i.e. all-in
    pub max_raise: u32,
}

/// State of one betting round (preflop, flop, turn or river).
///
/// Every action validates all of its preconditions before touching the
/// round, the player or the pot, so a rejected action leaves all three
/// unchanged. Whose turn it is and when the round is over are decided by
/// the caller walking the seat ring; the round only remembers who raised
/// last.
#[derive(Debug, Clone)]
pub struct BettingRound {
    bets: HashMap<PlayerId, u32>,
    call_amount: u32,
    raiser: PlayerId,
    raise_by: u32,
}

impl BettingRound {
    /// Opens a round with every seated player at zero. The player at
    /// `start` becomes the initial last raiser: the round closes when the
    /// action returns to them unopposed.
    pub fn new(
        seats: &SeatRing,
        start: SeatIndex,
        call_amount: u32,
        min_raise: u32,
    ) -> Result<Self, GameError> {
        let bets = seats
            .occupied()
            .map(|(_, p)| (p.id().clone(), 0))
            .collect();

        let opener = seats
            .get(start)
            .ok_or(GameError::InvalidSeat { seat: start })?;
        if opener.has_folded() {
            return Err(GameError::BettingRoundStartedByFoldedPlayer {
                player: opener.id().clone(),
            });
        }

        Ok(Self {
            bets,
            call_amount,
            raiser: opener.id().clone(),
            raise_by: min_raise,
        })
    }

    pub fn call_amount(&self) -> u32 {
        self.call_amount
    }

    /// Minimum increment over the call amount for a full raise.
    pub fn min_raise_delta(&self) -> u32 {
        self.raise_by
    }

    pub fn raiser(&self) -> &PlayerId {
        &self.raiser
    }

    pub fn committed(&self, id: &PlayerId) -> u32 {
        self.bets.get(id).copied().unwrap_or(0)
    }

    pub fn bets(&self) -> &HashMap<PlayerId, u32> {
        &self.bets
    }

    /// Chips put in during this round by everyone.
    pub fn total(&self) -> u32 {
        self.bets.values().fold(0, |acc, &b| acc.saturating_add(b))
    }

    /// Smallest total a full raise has to reach.
    fn min_raise_to(&self) -> u32 {
        self.call_amount.saturating_add(self.raise_by)
    }

    fn owed(&self, player: &Player) -> u32 {
        self.call_amount.saturating_sub(self.committed(player.id()))
    }

    pub fn can_fold(&self, player: &Player) -> bool {
        player.can_act() && self.owed(player) > 0
    }

    pub fn can_check(&self, player: &Player) -> bool {
        player.can_act() && self.owed(player) == 0
    }

    pub fn can_call(&self, player: &Player) -> bool {
        player.can_act() && self.owed(player) > 0
    }

    /// A raise has to lift the bet above the call amount, so the player
    /// needs more chips than they owe.
    pub fn can_raise(&self, player: &Player) -> bool {
        player.can_act() && player.chips() > self.owed(player)
    }

    pub fn legal_actions(&self, player: &Player) -> Vec<ActionKind> {
        let mut actions = Vec::with_capacity(3);
        if self.can_fold(player) {
            actions.push(ActionKind::Fold);
        }
        if self.can_check(player) {
            actions.push(ActionKind::Check);
        }
        if self.can_call(player) {
            actions.push(ActionKind::Call);
        }
        if self.can_raise(player) {
            actions.push(ActionKind::Raise);
        }
        actions
    }

    pub fn raise_bounds(&self, player: &Player) -> RaiseBounds {
        let committed = self.committed(player.id());
        let all_in = committed.saturating_add(player.chips());
        RaiseBounds {
            call_amount: self.call_amount,
            to_call: self.owed(player).min(player.chips()),
            min_raise: self.min_raise_to().min(all_in),
            max_raise: all_in,
        }
    }

    fn ensure_can_play(player: &Player) -> Result<(), GameError> {
        if !player.is_active() {
            return Err(GameError::NotInHand {
                player: player.id().clone(),
            });
        }
        if player.chips() == 0 {
            return Err(GameError::NoChips {
                player: player.id().clone(),
            });
        }
        if player.has_folded() {
            return Err(GameError::AlreadyFolded {
                player: player.id().clone(),
            });
        }
        Ok(())
    }

    pub fn fold(&mut self, player: &mut Player) -> Result<(), GameError> {
        Self::ensure_can_play(player)?;
        if self.owed(player) == 0 {
            return Err(GameError::NothingToCall {
                player: player.id().clone(),
            });
        }
        player.set_folded(true);
        Ok(())
    }

    pub fn check(&self, player: &Player) -> Result<(), GameError> {
        Self::ensure_can_play(player)?;
        if self.owed(player) > 0 {
            return Err(GameError::MustCall {
                player: player.id().clone(),
            });
        }
        Ok(())
    }

    /// Matches the call amount, or commits the whole stack when it is
    /// shorter. Returns the chips committed.
    pub fn call(&mut self, player: &mut Player, pot: &mut Pot) -> Result<u32, GameError> {
        Self::ensure_can_play(player)?;
        let owed = self.owed(player);
        if owed == 0 {
            return Err(GameError::NothingToCall {
                player: player.id().clone(),
            });
        }
        let amount = owed.min(player.chips());
        self.commit(player, pot, amount)?;
        Ok(amount)
    }

    /// Raises the bet to a total of `amount` for this round. Returns the
    /// chips committed.
    ///
    /// Below `call_amount + min_raise_delta` the raise is accepted only
    /// from a player whose stack is no larger than the chips still needed
    /// to reach that minimum; anyone holding more is rejected. Such a raise
    /// need not put the player all-in and leaves the increment unchanged.
    pub fn raise(
        &mut self,
        player: &mut Player,
        pot: &mut Pot,
        amount: u32,
    ) -> Result<u32, GameError> {
        Self::ensure_can_play(player)?;

        let committed = self.committed(player.id());
        let min_raise_to = self.min_raise_to();
        if amount <= self.call_amount {
            return Err(GameError::AmountTooLow {
                amount,
                minimum: min_raise_to.min(committed.saturating_add(player.chips())),
            });
        }

        let needed = amount - committed;
        if needed > player.chips() {
            return Err(GameError::InsufficientChips {
                needed,
                available: player.chips(),
            });
        }
        if amount < min_raise_to && min_raise_to - committed < player.chips() {
            return Err(GameError::AmountTooLow {
                amount,
                minimum: min_raise_to,
            });
        }

        self.commit(player, pot, needed)?;
        if amount >= min_raise_to {
            self.raise_by = amount - self.call_amount;
        }
        self.call_amount = amount;
        self.raiser = player.id().clone();
        Ok(needed)
    }

    /// Forced bet at the start of preflop; the caller checks the stack.
    pub(crate) fn post_blind(
        &mut self,
        player: &mut Player,
        pot: &mut Pot,
        amount: u32,
    ) -> Result<(), GameError> {
        self.commit(player, pot, amount)
    }

    fn commit(&mut self, player: &mut Player, pot: &mut Pot, amount: u32) -> Result<(), GameError> {
        player.take_chips(amount)?;
        let bet = self.bets.entry(player.id().clone()).or_insert(0);
        *bet = bet.saturating_add(amount);
        pot.add(player.id(), amount);
        Ok(())
    }
}
