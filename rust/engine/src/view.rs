//! Read-only snapshots of a [`Game`] for the host to fan out to observers.
//!
//! Hole cards only appear when the caller asks for them: the viewer's own
//! cards, or everyone's when `reveal_all` is set (e.g. after a showdown).

use serde::Serialize;

use crate::betting::RaiseBounds;
use crate::cards::Card;
use crate::game::{Game, ShowdownResult, Stage};
use crate::player::{ActionKind, Player, PlayerId, PlayerStatus};
use crate::seats::SeatIndex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub chips: u32,
    pub folded: bool,
    pub status: PlayerStatus,
    pub is_human: bool,
    /// Chips committed in the current betting round
    pub committed: u32,
    pub hole_cards: Option<[Card; 2]>,
}

impl PlayerView {
    pub fn new(player: &Player, committed: u32, reveal: bool) -> Self {
        Self {
            id: player.id().clone(),
            name: player.name().to_string(),
            chips: player.chips(),
            folded: player.has_folded(),
            status: player.status(),
            is_human: player.is_human(),
            committed,
            hole_cards: if reveal { player.dealt_cards() } else { None },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub player: Option<PlayerView>,
    pub is_dealer: bool,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub stage: Stage,
    pub flop: Option<[Card; 3]>,
    pub turn: Option<Card>,
    pub river: Option<Card>,
    pub pot: u32,
    pub min_bet: u32,
    pub dealer: SeatIndex,
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
    pub call_amount: u32,
}

/// Everything one observer is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub table: TableView,
    pub seats: Vec<SeatView>,
    pub current_player: Option<PlayerId>,
    /// Only filled in for the player whose turn it is
    pub legal_actions: Vec<ActionKind>,
    pub raise_bounds: Option<RaiseBounds>,
    pub last_showdown: Option<ShowdownResult>,
}

impl Game {
    pub fn seat_views(&self, viewer: Option<&PlayerId>, reveal_all: bool) -> Vec<SeatView> {
        let seats = &self.table().seats;
        let round = self.betting_round();
        let current = self.current_player().map(|p| p.id());
        (0..seats.capacity())
            .map(|seat| {
                let player = seats.get(seat).map(|p| {
                    let reveal = reveal_all || viewer == Some(p.id());
                    let committed = round.map(|r| r.committed(p.id())).unwrap_or(0);
                    PlayerView::new(p, committed, reveal)
                });
                SeatView {
                    seat,
                    is_dealer: seat == self.table().dealer,
                    is_current: player.as_ref().map(|p| &p.id) == current && current.is_some(),
                    player,
                }
            })
            .collect()
    }

    pub fn table_view(&self) -> TableView {
        let table = self.table();
        TableView {
            stage: self.stage(),
            flop: table.flop,
            turn: table.turn,
            river: table.river,
            pot: table.pot.total(),
            min_bet: table.min_bet,
            dealer: table.dealer,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            call_amount: self.betting_round().map(|r| r.call_amount()).unwrap_or(0),
        }
    }

    /// Snapshot for `viewer`. Action controls are included only when it is
    /// the viewer's turn.
    pub fn snapshot(&self, viewer: Option<&PlayerId>) -> GameSnapshot {
        let current_player = self.current_player().map(|p| p.id().clone());
        let viewer_to_act = viewer.is_some() && viewer == current_player.as_ref();
        GameSnapshot {
            table: self.table_view(),
            seats: self.seat_views(viewer, false),
            current_player,
            legal_actions: if viewer_to_act {
                self.legal_actions()
            } else {
                Vec::new()
            },
            raise_bounds: if viewer_to_act {
                self.raise_bounds()
            } else {
                None
            },
            last_showdown: self.last_showdown().cloned(),
        }
    }
}
