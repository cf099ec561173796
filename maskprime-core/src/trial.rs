use crate::screen::ScreenKind;
use crate::stimulus::Stimulus;
use serde::{Deserialize, Serialize};

/// Keys a `WaitKey` step accepts. An empty set accepts nothing, so the wait
/// never resolves; the terminal screen relies on this.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeySet {
    pub keys: Vec<char>,
}

impl KeySet {
    pub fn of(keys: &[char]) -> Self {
        Self {
            keys: keys.to_vec(),
        }
    }

    pub fn never() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn accepts(&self, key: char) -> bool {
        self.keys.contains(&key)
    }
}

/// Session-state mutations a trial may schedule. Each is applied from
/// exactly one logical place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    /// Break trials bump the block counter before rendering their notice.
    AdvanceBlock,
    /// Correct practice responses bump the practice score.
    IncrementCorrect,
    /// The send screen flushes the result sink, once, best effort.
    FlushResults,
}

/// One timed presentation or suspension step within a trial.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialStep {
    Show(Stimulus),
    /// Suspend this trial for a fixed number of milliseconds.
    WaitTimer(u64),
    Remove(&'static str),
    /// Block until a key in the set is pressed. Unbounded in both phases.
    WaitKey { accepted: KeySet, log: bool },
    RunCallback(Callback),
}

/// Values copied verbatim into the trial's result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFields {
    pub match_label: String,
    pub sentence: String,
    pub probe: String,
    pub condition: String,
    pub jitter_ms: u64,
}

/// Expected answer for a trial's key wait, and whether feedback follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseSpec {
    pub expected: char,
    /// Practice only; test trials log the key with no correctness branch.
    pub feedback: bool,
}

/// An ordered, immutable step list for one entry of the experiment sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialPlan {
    pub screen: ScreenKind,
    pub steps: Vec<TrialStep>,
    /// Present on practice and test trials only.
    pub fields: Option<ResultFields>,
    pub response: Option<ResponseSpec>,
}

impl TrialPlan {
    pub fn screen_only(screen: ScreenKind, steps: Vec<TrialStep>) -> Self {
        Self {
            screen,
            steps,
            fields: None,
            response: None,
        }
    }
}

/// One recorded row, pushed to the result sink as a trial completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub screen: String,
    #[serde(rename = "Match")]
    pub match_label: String,
    #[serde(rename = "Sentence")]
    pub sentence: String,
    #[serde(rename = "Probe")]
    pub probe: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Jitter")]
    pub jitter_ms: u64,
    pub key: char,
    pub reaction_ms: u64,
}
