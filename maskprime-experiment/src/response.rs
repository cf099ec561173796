use crate::config::{KeyBindings, TimingProfile};
use maskprime_core::{Callback, Stimulus, StimulusContent, TextStyle, TrialStep};

/// The answer a trial expects: `same` iff prime and target are identical
/// strings, mapped through the fixed key bindings.
pub fn expected_key(prime_text: &str, target_text: &str, keys: &KeyBindings) -> char {
    if prime_text == target_text {
        keys.same
    } else {
        keys.different
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Match,
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Waiting,
    Matched,
    Mismatched,
    Done,
}

/// Classifies an observed key against the expected one and drives the
/// practice feedback sub-sequence. Explicit state machine rather than
/// registered handlers; the runner owns the transitions.
#[derive(Debug, Clone)]
pub struct ResponseEvaluator {
    expected: char,
    state: ResponseState,
}

impl ResponseEvaluator {
    pub fn new(expected: char) -> Self {
        Self {
            expected,
            state: ResponseState::Waiting,
        }
    }

    pub fn expected(&self) -> char {
        self.expected
    }

    pub fn state(&self) -> ResponseState {
        self.state
    }

    /// Waiting -> Matched | Mismatched. Exact equality, nothing fuzzier.
    pub fn observe(&mut self, key: char) -> ResponseOutcome {
        debug_assert_eq!(self.state, ResponseState::Waiting);
        if key == self.expected {
            self.state = ResponseState::Matched;
            ResponseOutcome::Match
        } else {
            self.state = ResponseState::Mismatched;
            ResponseOutcome::Mismatch
        }
    }

    /// Feedback steps for practice trials. A correct response shows
    /// "Correct" and schedules the score callback; a wrong one shows
    /// "Wrong". Both hold for the feedback duration. Test trials never call
    /// this; they log the key with no correctness branch.
    pub fn feedback_steps(&self, timing: &TimingProfile) -> Vec<TrialStep> {
        match self.state {
            ResponseState::Matched => vec![
                TrialStep::Show(Stimulus::new(
                    "feedback",
                    StimulusContent::Text("Correct".to_string()),
                    TextStyle::prompt(),
                )),
                TrialStep::RunCallback(Callback::IncrementCorrect),
                TrialStep::WaitTimer(timing.feedback),
                TrialStep::Remove("feedback"),
            ],
            ResponseState::Mismatched => vec![
                TrialStep::Show(Stimulus::new(
                    "feedback",
                    StimulusContent::Text("Wrong".to_string()),
                    TextStyle::prompt(),
                )),
                TrialStep::WaitTimer(timing.feedback),
                TrialStep::Remove("feedback"),
            ],
            ResponseState::Waiting | ResponseState::Done => Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.state = ResponseState::Done;
    }
}
