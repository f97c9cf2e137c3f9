use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Stable, opaque player identity assigned by the host before the player is
/// seated. The engine only compares ids; it never generates or parses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Whether a seated player takes part in the next hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerStatus {
    /// Left the table; the seat is about to be freed
    Vacated,
    /// Seated but skipping hands
    SittingOut,
    /// Dealt into hands
    Active,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerStatus::Vacated => "vacated",
            PlayerStatus::SittingOut => "sitting-out",
            PlayerStatus::Active => "active",
        })
    }
}

/// A betting action requested by the player whose turn it is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "lowercase")]
pub enum PlayerAction {
    /// Give up the hand
    Fold,
    /// Pass without betting, only when nothing is owed
    Check,
    /// Match the current bet, or go all-in trying
    Call,
    /// Raise the round's bet to the given total commitment
    Raise(u32),
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
        }
    }
}

/// Action names without parameters, as listed in the legal-action set.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
        })
    }
}

/// A seated player: stack, hole cards and per-hand folded flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    chips: u32,
    folded: bool,
    hole: [Option<Card>; 2],
    status: PlayerStatus,
    is_human: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            chips,
            folded: false,
            hole: [None, None],
            status: PlayerStatus::Active,
            is_human: true,
        }
    }

    pub fn with_human(mut self, is_human: bool) -> Self {
        self.is_human = is_human;
        self
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn has_folded(&self) -> bool {
        self.folded
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn is_human(&self) -> bool {
        self.is_human
    }
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Still contesting the pot: active and not folded.
    pub fn in_hand(&self) -> bool {
        self.is_active() && !self.folded
    }

    /// In the hand with chips left to bet.
    pub fn can_act(&self) -> bool {
        self.in_hand() && self.chips > 0
    }

    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }

    /// Both hole cards, once dealt.
    pub fn dealt_cards(&self) -> Option<[Card; 2]> {
        match self.hole {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), GameError> {
        match self.hole.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(c);
                Ok(())
            }
            None => Err(GameError::HoleCardsFull {
                player: self.id.clone(),
            }),
        }
    }

    pub(crate) fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    pub(crate) fn set_folded(&mut self, folded: bool) {
        self.folded = folded;
    }

    /// Clears per-hand state before a new deal.
    pub(crate) fn reset_for_hand(&mut self) {
        self.folded = false;
        self.hole = [None, None];
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Removes chips from the stack; callers validate the amount first.
    pub(crate) fn take_chips(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.chips {
            return Err(GameError::InsufficientChips {
                needed: amount,
                available: self.chips,
            });
        }
        self.chips -= amount;
        Ok(())
    }
}
