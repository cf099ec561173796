use serde::{Deserialize, Serialize};

/// One row of stimulus material, loaded read-only from a trial pool.
///
/// Field names match the columns of the source row files; identity is the
/// row's index in its pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialItem {
    /// Prime text.
    #[serde(rename = "Sentence")]
    pub sentence: String,
    /// Target text.
    #[serde(rename = "Probe")]
    pub probe: String,
    #[serde(rename = "Match")]
    pub match_label: String,
    #[serde(rename = "Condition")]
    pub condition: String,
}

impl TrialItem {
    /// Prime and target are the same stimulus, compared exactly and
    /// case-sensitively.
    pub fn is_same(&self) -> bool {
        self.sentence == self.probe
    }
}
