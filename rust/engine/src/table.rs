use serde::{Deserialize, Serialize};

use crate::betting::BettingRound;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::Player;
use crate::pot::Pot;
use crate::seats::{SeatIndex, SeatRing};

/// Dealer and blind seats for one hand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions {
    pub dealer: SeatIndex,
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
}

/// Seats, button, pot and community cards of the hand in progress.
#[derive(Debug, Clone)]
pub struct Table {
    pub seats: SeatRing,
    pub dealer: SeatIndex,
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
    /// Small blind size; the big blind is twice this
    pub min_bet: u32,
    pub pot: Pot,
    pub flop: Option<[Card; 3]>,
    pub turn: Option<Card>,
    pub river: Option<Card>,
}

impl Table {
    pub fn new(capacity: usize, min_bet: u32) -> Self {
        // the first rotation lands on the first active seat from 0
        let last = capacity.saturating_sub(1);
        Self {
            seats: SeatRing::new(capacity),
            dealer: last,
            small_blind: last,
            big_blind: last,
            min_bet,
            pot: Pot::new(),
            flop: None,
            turn: None,
            river: None,
        }
    }

    pub fn small_blind_amount(&self) -> u32 {
        self.min_bet
    }

    pub fn big_blind_amount(&self) -> u32 {
        self.min_bet * 2
    }

    /// Where the button and blinds go for the next hand: the button moves
    /// to the next active player, each blind to the next active player
    /// after it. `None` with fewer than two active players.
    pub fn next_positions(&self) -> Option<Positions> {
        if self.seats.active_from(0).len() < 2 {
            return None;
        }
        let dealer = self.seats.next_where(self.dealer, Player::is_active)?;
        let small_blind = self.seats.next_where(dealer, Player::is_active)?;
        let big_blind = self.seats.next_where(small_blind, Player::is_active)?;
        Some(Positions {
            dealer,
            small_blind,
            big_blind,
        })
    }

    pub fn rotate_to(&mut self, positions: Positions) {
        self.dealer = positions.dealer;
        self.small_blind = positions.small_blind;
        self.big_blind = positions.big_blind;
    }

    /// Clears the pot, board and every player's per-hand state.
    pub fn reset_for_hand(&mut self) {
        self.pot = Pot::new();
        self.flop = None;
        self.turn = None;
        self.river = None;
        for p in self.seats.players_mut() {
            p.reset_for_hand();
        }
    }

    /// Two hole cards to every active player, one per pass, starting left
    /// of the dealer.
    pub fn deal_hands(&mut self, deck: &mut Deck) -> Result<(), GameError> {
        let order = self.seats.active_from(self.seats.next(self.dealer));
        if deck.remaining() < order.len() * 2 {
            return Err(GameError::DeckExhausted);
        }
        for _ in 0..2 {
            for &seat in &order {
                let card = deck.draw()?;
                if let Some(p) = self.seats.get_mut(seat) {
                    p.give_card(card)?;
                }
            }
        }
        Ok(())
    }

    fn take_blind(
        &mut self,
        seat: SeatIndex,
        amount: u32,
        round: &mut BettingRound,
    ) -> Result<(), GameError> {
        let p = self
            .seats
            .get_mut(seat)
            .ok_or(GameError::InvalidSeat { seat })?;
        if p.chips() < amount {
            return Err(GameError::InsufficientChips {
                needed: amount,
                available: p.chips(),
            });
        }
        round.post_blind(p, &mut self.pot, amount)
    }

    pub fn take_small_blind(&mut self, round: &mut BettingRound) -> Result<(), GameError> {
        self.take_blind(self.small_blind, self.small_blind_amount(), round)
    }

    pub fn take_big_blind(&mut self, round: &mut BettingRound) -> Result<(), GameError> {
        self.take_blind(self.big_blind, self.big_blind_amount(), round)
    }

    /// Checks both blind payers can cover their blind at `positions`.
    pub fn check_blinds(&self, positions: Positions) -> Result<(), GameError> {
        let blinds = [
            (positions.small_blind, self.small_blind_amount()),
            (positions.big_blind, self.big_blind_amount()),
        ];
        for (seat, amount) in blinds {
            let p = self.seats.get(seat).ok_or(GameError::InvalidSeat { seat })?;
            if p.chips() < amount {
                return Err(GameError::InsufficientChips {
                    needed: amount,
                    available: p.chips(),
                });
            }
        }
        Ok(())
    }

    pub fn deal_flop(&mut self, deck: &mut Deck) -> Result<(), GameError> {
        self.flop = Some(deck.draw_n::<3>()?);
        Ok(())
    }

    pub fn deal_turn(&mut self, deck: &mut Deck) -> Result<(), GameError> {
        self.turn = Some(deck.draw()?);
        Ok(())
    }

    pub fn deal_river(&mut self, deck: &mut Deck) -> Result<(), GameError> {
        self.river = Some(deck.draw()?);
        Ok(())
    }

    /// Community cards dealt so far, in dealing order.
    pub fn board(&self) -> Vec<Card> {
        let mut board: Vec<Card> = self.flop.map(Vec::from).unwrap_or_default();
        board.extend(self.turn);
        board.extend(self.river);
        board
    }
}
