use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{HandState, Round};
use crate::player::Chips;
use crate::pot::HandResult;

/// What a seat did, with the chips it moved.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RecordedAction {
    SmallBlind(Chips),
    BigBlind(Chips),
    Fold,
    Check,
    /// Chips added to call
    Call(Chips),
    /// New table bet
    Raise(Chips),
    /// Chips pushed in
    AllIn(Chips),
}

/// Records a single action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    /// The betting round when this action occurred
    pub round: Round,
    pub action: RecordedAction,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed used for deck shuffling (enables deterministic replay)
    pub seed: Option<u64>,
    pub players: Vec<String>,
    pub dealer: usize,
    /// Chronological list of all actions, blinds included
    pub actions: Vec<ActionRecord>,
    /// Community cards dealt before settlement
    pub board: Vec<Card>,
    pub result: Option<HandResult>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl HandRecord {
    pub fn from_state(hand_id: String, seed: Option<u64>, state: &HandState) -> Self {
        Self {
            hand_id,
            seed,
            players: state
                .seats()
                .iter()
                .map(|s| s.player_id().to_string())
                .collect(),
            dealer: state.dealer_index(),
            actions: state.history().to_vec(),
            board: state
                .result()
                .map(|r| r.board.clone())
                .unwrap_or_else(|| state.community_cards().to_vec()),
            result: state.result().cloned(),
            ts: None,
            meta: None,
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that only issues ids and discards records.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
