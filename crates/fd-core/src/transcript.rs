//! Match transcript of every revealed draw.
//!
//! Written out after a match so either party can recheck every
//! commitment later.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::fair::RevealRecord;

/// One revealed draw and how it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Which step of the match the draw belongs to.
    pub label: String,
    /// Commitment, key and value of the draw.
    #[serde(flatten)]
    pub reveal: RevealRecord,
    /// What the human entered after seeing the commitment.
    pub user_input: u32,
    /// What the step produced: 1 or 0 for whether the first-move guess
    /// matched, or the face value for a throw.
    pub result: i64,
}

/// All revealed draws of one match, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// The recorded entries.
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a transcript from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Verify every entry, returning the label and verdict of each.
    pub fn verify_all(&self) -> CoreResult<Vec<(&str, bool)>> {
        self.entries
            .iter()
            .map(|e| Ok((e.label.as_str(), e.reveal.verify()?)))
            .collect()
    }
}
