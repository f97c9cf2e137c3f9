use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use chrono::Utc;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::betting::{BettingRound, RaiseBounds};
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{best_hand, Hand};
use crate::logger::{format_hand_id, ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{ActionKind, Player, PlayerAction, PlayerId, PlayerStatus};
use crate::pot::Settlement;
use crate::seats::SeatIndex;
use crate::table::Table;

pub const MIN_PLAYERS: usize = 2;

/// Stages of one hand, in the only order they can occur.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Stage {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// Players may act strictly between Waiting and Showdown.
    pub fn is_player_stage(self) -> bool {
        Stage::Waiting < self && self < Stage::Showdown
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Waiting => "Waiting",
            Stage::Preflop => "Preflop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
        })
    }
}

/// How a finished hand was decided and paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownResult {
    pub hand_id: String,
    pub board: Vec<crate::cards::Card>,
    /// Best hand of every contender; empty when everyone else folded
    pub hands: BTreeMap<PlayerId, Hand>,
    pub settlement: Settlement,
    /// True when the pot was won without a showdown
    pub uncontested: bool,
}

/// What happened after an accepted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub player: PlayerId,
    pub action: PlayerAction,
    /// Chips moved from the player's stack into the pot
    pub committed: u32,
    /// Stage after the action and any stage changes it triggered
    pub stage: Stage,
    /// Who acts next, if the hand is still being bet
    pub next_to_act: Option<PlayerId>,
    /// Set when the action finished the hand
    pub showdown: Option<ShowdownResult>,
}

/// One table's authoritative game state.
///
/// The engine assumes a single writer: the host serializes every mutating
/// call per table. Each operation validates completely before mutating, so
/// a rejected call leaves the game exactly as it was.
///
/// # Examples
///
/// ```
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::game::{Game, Stage};
/// use holdem_engine::player::PlayerAction;
///
/// let mut game = Game::new(TableConfig { seed: Some(7), ..TableConfig::default() });
/// game.sit(0, "alice", "Alice", true).unwrap();
/// game.sit(1, "bob", "Bob", true).unwrap();
/// game.start_hand().unwrap();
/// assert_eq!(game.stage(), Stage::Preflop);
///
/// let actor = game.current_player().unwrap().id().clone();
/// game.act(&actor, PlayerAction::Call).unwrap();
/// assert_eq!(game.stage(), Stage::Flop);
/// ```
#[derive(Debug)]
pub struct Game {
    config: TableConfig,
    stage: Stage,
    deck: Deck,
    current_seat: SeatIndex,
    table: Table,
    betting_round: Option<BettingRound>,
    players: HashMap<PlayerId, SeatIndex>,
    rng: ChaCha20Rng,
    date: String,
    hand_seq: u32,
    record: Option<HandRecord>,
    last_record: Option<HandRecord>,
    last_showdown: Option<ShowdownResult>,
}

impl Game {
    pub fn new(config: TableConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        };
        let deck = Deck::new_with_seed(rng.next_u64());
        let table = Table::new(config.seats, config.min_bet);
        Self {
            config,
            stage: Stage::Waiting,
            deck,
            current_seat: 0,
            table,
            betting_round: None,
            players: HashMap::new(),
            rng,
            date: Utc::now().format("%Y%m%d").to_string(),
            hand_seq: 0,
            record: None,
            last_record: None,
            last_showdown: None,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn current_seat(&self) -> SeatIndex {
        self.current_seat
    }
    pub fn betting_round(&self) -> Option<&BettingRound> {
        self.betting_round.as_ref()
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Result of the most recently finished hand.
    pub fn last_showdown(&self) -> Option<&ShowdownResult> {
        self.last_showdown.as_ref()
    }

    /// History of the most recently finished hand.
    pub fn last_hand_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id).and_then(|&seat| self.table.seats.get(seat))
    }

    pub fn seat_of(&self, id: &PlayerId) -> Option<SeatIndex> {
        self.players.get(id).copied()
    }

    /// The player whose turn it is, during a betting stage.
    pub fn current_player(&self) -> Option<&Player> {
        if !self.stage.is_player_stage() {
            return None;
        }
        self.table.seats.get(self.current_seat)
    }

    pub fn is_player_turn(&self, id: &PlayerId) -> bool {
        self.stage.is_player_stage() && self.current_player().is_some_and(|p| p.id() == id)
    }

    /// Seats a new player with the configured starting stack.
    pub fn sit(
        &mut self,
        seat: SeatIndex,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        is_human: bool,
    ) -> Result<(), GameError> {
        let chips = self.config.starting_chips;
        self.sit_with_chips(seat, id, name, chips, is_human)
    }

    /// Seats a new player. Someone who sits down during a hand waits for
    /// the next deal.
    pub fn sit_with_chips(
        &mut self,
        seat: SeatIndex,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        chips: u32,
        is_human: bool,
    ) -> Result<(), GameError> {
        let id = id.into();
        if self.players.contains_key(&id) {
            return Err(GameError::DuplicatePlayer { player: id });
        }
        self.check_chip_limit(chips)?;
        let mut player = Player::new(id.clone(), name, chips).with_human(is_human);
        if self.stage != Stage::Waiting {
            player.set_folded(true);
        }
        self.table.seats.sit(seat, player)?;
        info!(player = %id, seat, chips, "player seated");
        self.players.insert(id, seat);
        Ok(())
    }

    /// Every chip at the table, stacks and pot together, has to fit in a
    /// `u32` so commitments and pot totals never overflow.
    fn check_chip_limit(&self, chips: u32) -> Result<(), GameError> {
        let stacks: u64 = self
            .table
            .seats
            .occupied()
            .map(|(_, p)| u64::from(p.chips()))
            .sum();
        let in_pot = if self.stage.is_player_stage() {
            u64::from(self.table.pot.total())
        } else {
            0
        };
        if stacks + in_pot + u64::from(chips) > u64::from(u32::MAX) {
            return Err(GameError::ChipLimitExceeded {
                chips,
                limit: u32::MAX,
            });
        }
        Ok(())
    }

    /// Frees the player's seat and hands back the departing player.
    pub fn stand(&mut self, id: &PlayerId) -> Result<Player, GameError> {
        self.ensure_waiting()?;
        let seat = self.seat_lookup(id)?;
        let mut player = self
            .table
            .seats
            .vacate(seat)
            .ok_or_else(|| GameError::UnknownPlayer { player: id.clone() })?;
        player.set_status(PlayerStatus::Vacated);
        self.players.remove(id);
        info!(player = %id, seat, "player left the table");
        Ok(player)
    }

    pub fn sit_out(&mut self, id: &PlayerId) -> Result<(), GameError> {
        self.set_status(id, PlayerStatus::SittingOut)
    }

    pub fn sit_in(&mut self, id: &PlayerId) -> Result<(), GameError> {
        self.set_status(id, PlayerStatus::Active)
    }

    fn set_status(&mut self, id: &PlayerId, status: PlayerStatus) -> Result<(), GameError> {
        self.ensure_waiting()?;
        let seat = self.seat_lookup(id)?;
        if let Some(p) = self.table.seats.get_mut(seat) {
            p.set_status(status);
        }
        debug!(player = %id, %status, "player status changed");
        Ok(())
    }

    fn ensure_waiting(&self) -> Result<(), GameError> {
        if self.stage != Stage::Waiting {
            return Err(GameError::WrongStage { stage: self.stage });
        }
        Ok(())
    }

    fn seat_lookup(&self, id: &PlayerId) -> Result<SeatIndex, GameError> {
        self.players
            .get(id)
            .copied()
            .ok_or_else(|| GameError::UnknownPlayer { player: id.clone() })
    }

    /// Waiting → Preflop: rotates the button, deals hole cards, posts the
    /// blinds and opens the preflop betting round.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.ensure_waiting()?;

        let funded = self
            .table
            .seats
            .occupied()
            .filter(|(_, p)| p.is_active() && p.chips() > 0)
            .count();
        if funded < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                required: MIN_PLAYERS,
                found: funded,
            });
        }

        // broke players sit out before the button moves
        let mut table = self.table.clone();
        for p in table.seats.players_mut() {
            if p.is_active() && p.chips() == 0 {
                p.set_status(PlayerStatus::SittingOut);
            }
        }
        let positions = table.next_positions().ok_or(GameError::NotEnoughPlayers {
            required: MIN_PLAYERS,
            found: funded,
        })?;
        table.check_blinds(positions)?;

        let seed = self.rng.next_u64();
        let mut deck = Deck::new_with_seed(seed);
        table.reset_for_hand();
        table.rotate_to(positions);
        table.deal_hands(&mut deck)?;

        let big_blind = table.big_blind_amount();
        let mut round = BettingRound::new(&table.seats, positions.big_blind, big_blind, big_blind)?;
        table.take_small_blind(&mut round)?;
        table.take_big_blind(&mut round)?;

        self.hand_seq += 1;
        let hand_id = format_hand_id(&self.date, self.hand_seq);
        info!(
            hand_id = %hand_id,
            dealer = positions.dealer,
            small_blind = positions.small_blind,
            big_blind = positions.big_blind,
            "hand started"
        );

        self.table = table;
        self.deck = deck;
        self.betting_round = Some(round);
        self.stage = Stage::Preflop;
        self.current_seat = positions.big_blind;
        self.record = Some(HandRecord::new(hand_id, Some(seed)));
        self.last_showdown = None;

        self.progress(positions.big_blind)
    }

    /// Applies a betting action for `id`.
    ///
    /// The action is rejected without any state change unless the game is
    /// in a betting stage, it is `id`'s turn and the betting round accepts
    /// it. Accepted actions move the turn on and, when the round closes,
    /// advance the stage; a finished hand is settled before returning.
    pub fn act(&mut self, id: &PlayerId, action: PlayerAction) -> Result<ActionOutcome, GameError> {
        let result = self.apply(id, action);
        match &result {
            Ok(committed) => {
                debug!(player = %id, ?action, committed, stage = %self.stage, "action accepted");
            }
            Err(err) => {
                warn!(player = %id, ?action, error = %err, "action rejected");
            }
        }
        let committed = result?;

        let street = self.stage;
        if let Some(record) = self.record.as_mut() {
            record.actions.push(ActionRecord {
                player_id: id.clone(),
                street,
                action,
            });
        }

        let seat = self.current_seat;
        self.progress(seat)?;

        Ok(ActionOutcome {
            player: id.clone(),
            action,
            committed,
            stage: self.stage,
            next_to_act: self.current_player().map(|p| p.id().clone()),
            showdown: if self.stage == Stage::Waiting {
                self.last_showdown.clone()
            } else {
                None
            },
        })
    }

    fn apply(&mut self, id: &PlayerId, action: PlayerAction) -> Result<u32, GameError> {
        if !self.stage.is_player_stage() {
            return Err(GameError::WrongStage { stage: self.stage });
        }
        let seat = self.seat_lookup(id)?;
        if seat != self.current_seat {
            return Err(GameError::NotPlayersTurn { player: id.clone() });
        }
        let round = self
            .betting_round
            .as_mut()
            .ok_or(GameError::WrongStage { stage: self.stage })?;
        let player = self
            .table
            .seats
            .get_mut(seat)
            .ok_or_else(|| GameError::UnknownPlayer { player: id.clone() })?;
        let pot = &mut self.table.pot;

        match action {
            PlayerAction::Fold => round.fold(player).map(|_| 0),
            PlayerAction::Check => round.check(player).map(|_| 0),
            PlayerAction::Call => round.call(player, pot),
            PlayerAction::Raise(amount) => round.raise(player, pot, amount),
        }
    }

    /// Actions the current player may take.
    pub fn legal_actions(&self) -> Vec<ActionKind> {
        match (self.current_player(), self.betting_round.as_ref()) {
            (Some(p), Some(round)) => round.legal_actions(p),
            _ => Vec::new(),
        }
    }

    /// Raise-control bounds for the current player, when raising is legal.
    pub fn raise_bounds(&self) -> Option<RaiseBounds> {
        let player = self.current_player()?;
        let round = self.betting_round.as_ref()?;
        round
            .can_raise(player)
            .then(|| round.raise_bounds(player))
    }

    fn contenders(&self) -> Vec<SeatIndex> {
        self.table
            .seats
            .occupied()
            .filter(|(_, p)| p.in_hand())
            .map(|(seat, _)| seat)
            .collect()
    }

    /// Walks the ring after `from`. Reaching the last raiser's seat closes
    /// the round; otherwise the first player who can still bet acts next.
    fn next_actor(&self, from: SeatIndex) -> Option<SeatIndex> {
        let round = self.betting_round.as_ref()?;
        let seats = &self.table.seats;
        for seat in seats.iter_from(seats.next(from)) {
            let Some(p) = seats.get(seat) else { continue };
            if p.id() == round.raiser() {
                return None;
            }
            if p.can_act() {
                return Some(seat);
            }
        }
        None
    }

    /// Moves the turn on after the player at `from`, closing rounds and
    /// advancing stages until someone has to act or the hand is over.
    fn progress(&mut self, from: SeatIndex) -> Result<(), GameError> {
        if self.contenders().len() < 2 {
            return self.showdown(true);
        }
        if let Some(seat) = self.next_actor(from) {
            self.current_seat = seat;
            return Ok(());
        }

        loop {
            match self.stage {
                Stage::Preflop => {
                    self.table.deal_flop(&mut self.deck)?;
                    self.stage = Stage::Flop;
                }
                Stage::Flop => {
                    self.table.deal_turn(&mut self.deck)?;
                    self.stage = Stage::Turn;
                }
                Stage::Turn => {
                    self.table.deal_river(&mut self.deck)?;
                    self.stage = Stage::River;
                }
                _ => return self.showdown(false),
            }
            info!(stage = %self.stage, board = ?self.table.board(), "stage advanced");

            if let Some(opener) = self.open_street()? {
                self.current_seat = opener;
                return Ok(());
            }
        }
    }

    /// Opens a fresh round for the street just dealt. Returns the first
    /// player to act, or `None` when fewer than two players can still bet.
    fn open_street(&mut self) -> Result<Option<SeatIndex>, GameError> {
        let seats = &self.table.seats;
        let dealer = self.table.dealer;
        let opener = seats
            .next_where(dealer, Player::can_act)
            .or_else(|| seats.next_where(dealer, Player::in_hand))
            .ok_or(GameError::NotEnoughPlayers {
                required: MIN_PLAYERS,
                found: 0,
            })?;
        let round = BettingRound::new(seats, opener, 0, self.table.min_bet)?;
        self.betting_round = Some(round);

        let can_bet = seats.occupied().filter(|(_, p)| p.can_act()).count();
        Ok((can_bet >= 2).then_some(opener))
    }

    /// Showdown → Waiting: evaluates the contenders, settles every pot and
    /// pays the winners.
    fn showdown(&mut self, uncontested: bool) -> Result<(), GameError> {
        self.stage = Stage::Showdown;
        let board = self.table.board();

        let contenders: HashSet<PlayerId> = self
            .table
            .seats
            .occupied()
            .filter(|(_, p)| p.in_hand())
            .map(|(_, p)| p.id().clone())
            .collect();

        let mut hands: HashMap<PlayerId, Hand> = HashMap::new();
        if !uncontested {
            for (_, p) in self.table.seats.occupied().filter(|(_, p)| p.in_hand()) {
                let Some(hole) = p.dealt_cards() else { continue };
                let mut cards = hole.to_vec();
                cards.extend(board.iter().copied());
                if let Some(hand) = best_hand(&cards) {
                    hands.insert(p.id().clone(), hand);
                }
            }
        }

        let stacks: HashMap<PlayerId, u32> = self
            .table
            .seats
            .occupied()
            .map(|(_, p)| (p.id().clone(), p.chips()))
            .collect();
        let settlement = self.table.pot.settle(&contenders, &hands, &stacks);
        for (id, won) in &settlement.payouts {
            if let Some(p) = self.table.seats.player_mut(id) {
                p.add_chips(*won);
            }
        }

        let hand_id = self
            .record
            .as_ref()
            .map(|r| r.hand_id.clone())
            .unwrap_or_default();
        info!(
            hand_id = %hand_id,
            pot = self.table.pot.total(),
            pots = settlement.awards.len(),
            uncontested,
            "hand settled"
        );

        let result = ShowdownResult {
            hand_id,
            board: board.clone(),
            hands: hands.into_iter().collect(),
            settlement,
            uncontested,
        };
        if let Some(mut record) = self.record.take() {
            record.board = board;
            record.showdown = Some(ShowdownInfo::from_result(&result));
            record.result = Some(describe(&result));
            self.last_record = Some(record);
        }
        self.last_showdown = Some(result);
        self.betting_round = None;
        self.stage = Stage::Waiting;
        Ok(())
    }
}

fn describe(result: &ShowdownResult) -> String {
    let winners: Vec<String> = result
        .settlement
        .payouts
        .iter()
        .map(|(id, won)| format!("{id} wins {won}"))
        .collect();
    winners.join(", ")
}
