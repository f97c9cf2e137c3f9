use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{ShowdownResult, Stage};
use crate::player::{PlayerAction, PlayerId};

/// Records a single player action during a hand.
/// Associates the action with the player and the street when it occurred.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Acting player
    pub player_id: PlayerId,
    /// The betting stage when this action occurred
    pub street: Stage,
    /// The action taken by the player
    pub action: PlayerAction,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed of the hand's deck shuffle (enables deterministic replay)
    pub seed: Option<u64>,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    /// Hand result summary (winners and amounts)
    pub result: Option<String>,
    /// Timestamp when the hand was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Showdown information once the hand is settled
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    pub fn new(hand_id: String, seed: Option<u64>) -> Self {
        Self {
            hand_id,
            seed,
            actions: Vec::new(),
            board: Vec::new(),
            result: None,
            ts: None,
            showdown: None,
        }
    }
}

/// Who won and how the hand ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Players who took chips from any pot
    pub winners: Vec<PlayerId>,
    /// e.g. "uncontested", "split pot", or the winning hand
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShowdownInfo {
    pub fn from_result(result: &ShowdownResult) -> Self {
        let winners: Vec<PlayerId> = result.settlement.payouts.keys().cloned().collect();
        let notes = if result.uncontested {
            Some("uncontested".to_string())
        } else if result
            .settlement
            .awards
            .iter()
            .any(|award| award.winners.len() > 1)
        {
            Some("split pot".to_string())
        } else {
            winners
                .first()
                .and_then(|id| result.hands.get(id))
                .map(|hand| hand.to_string())
        };
        Self { winners, notes }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends hand records to a writer as JSON lines. The engine never writes
/// history on its own; the host owns the writer.
pub struct HandLogger<W: Write> {
    writer: W,
}

impl HandLogger<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

impl<W: Write> HandLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
