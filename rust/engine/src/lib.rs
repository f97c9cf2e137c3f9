//! # holdem-engine: Texas Hold'em Rules Engine
//!
//! An authoritative No-Limit Texas Hold'em table for 2 to 10 seats. The
//! engine owns the seat ring, the deck, the betting rounds and the pot; a
//! host (websocket server, bot harness, test) feeds it player actions one
//! at a time and reads back snapshots. Every mutating call either fully
//! applies or returns a [`errors::GameError`] and leaves the table as it was.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Shuffled 52-card deck, seedable with ChaCha20
//! - [`hand`] - Best-of-seven hand evaluation and comparison
//! - [`player`] - Player identity, status, hole cards and actions
//! - [`seats`] - Fixed-capacity seat ring
//! - [`betting`] - Per-street betting round and action validation
//! - [`pot`] - Commitments, side pots and settlement
//! - [`table`] - Button rotation, blinds and community cards
//! - [`game`] - Stage machine tying a hand together
//! - [`view`] - Serializable per-viewer snapshots
//! - [`logger`] - Hand history records and JSONL writer
//! - [`config`] - Table configuration (TOML file and environment)
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::game::{Game, Stage};
//! use holdem_engine::player::PlayerAction;
//!
//! let mut game = Game::new(TableConfig {
//!     min_bet: 5,
//!     seed: Some(42),
//!     ..TableConfig::default()
//! });
//! game.sit(0, "p1", "Alice", true).unwrap();
//! game.sit(1, "p2", "Bob", false).unwrap();
//! game.start_hand().unwrap();
//!
//! // blinds are in: 5 + 10
//! assert_eq!(game.table().pot.total(), 15);
//!
//! let to_act = game.current_player().unwrap().id().clone();
//! let outcome = game.act(&to_act, PlayerAction::Fold).unwrap();
//! assert_eq!(outcome.stage, Stage::Waiting);
//! assert!(game.last_showdown().unwrap().uncontested);
//! ```
//!
//! ## Hand Evaluation
//!
//! ```rust
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::{best_hand, HandRank};
//!
//! let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! assert_eq!(best_hand(&cards).unwrap().rank, HandRank::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! A table created with `seed: Some(..)` deals the same cards every run:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut d1 = Deck::new_with_seed(42);
//! let mut d2 = Deck::new_with_seed(42);
//! assert_eq!(d1.draw().unwrap(), d2.draw().unwrap());
//! ```

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod seats;
pub mod table;
pub mod view;
