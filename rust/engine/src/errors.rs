use thiserror::Error;

use crate::game::Stage;
use crate::player::PlayerId;

/// Every way an engine operation can be rejected.
///
/// A rejected operation never mutates game state, so all of these are safe
/// to report back to the offending caller and carry on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("{player} is not in the hand")]
    NotInHand { player: PlayerId },
    #[error("{player} can't play with no chips")]
    NoChips { player: PlayerId },
    #[error("{player} has already folded")]
    AlreadyFolded { player: PlayerId },
    #[error("Amount {amount} is less than the minimum {minimum}")]
    AmountTooLow { amount: u32, minimum: u32 },
    #[error("Insufficient chips: {needed} needed, {available} available")]
    InsufficientChips { needed: u32, available: u32 },
    #[error("It's not {player}'s turn")]
    NotPlayersTurn { player: PlayerId },
    #[error("Players cannot act during the {stage} stage")]
    WrongStage { stage: Stage },
    #[error("{player} can't check when someone has bet")]
    MustCall { player: PlayerId },
    #[error("{player} has matched or exceeded the current bet")]
    NothingToCall { player: PlayerId },

    #[error("Unknown player {player}")]
    UnknownPlayer { player: PlayerId },
    #[error("Player {player} is already seated")]
    DuplicatePlayer { player: PlayerId },
    #[error("Seat {seat} does not exist")]
    InvalidSeat { seat: usize },
    #[error("Seat {seat} is already occupied")]
    SeatOccupied { seat: usize },
    #[error("At least {required} active players are needed, found {found}")]
    NotEnoughPlayers { required: usize, found: usize },
    #[error("Seating {chips} more chips would put over {limit} at the table")]
    ChipLimitExceeded { chips: u32, limit: u32 },

    #[error("No more cards left in deck")]
    DeckExhausted,
    #[error("{player} cannot start the round if they have already folded")]
    BettingRoundStartedByFoldedPlayer { player: PlayerId },
    #[error("{player} already holds two hole cards")]
    HoleCardsFull { player: PlayerId },
}

impl GameError {
    /// Structural errors mean the caller sequenced the engine incorrectly
    /// (dealt out of order, opened a round from the wrong seat). They do not
    /// occur when the game is driven through [`crate::game::Game`].
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            GameError::DeckExhausted
                | GameError::BettingRoundStartedByFoldedPlayer { .. }
                | GameError::HoleCardsFull { .. }
        )
    }
}
