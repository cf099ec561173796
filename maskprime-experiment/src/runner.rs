use crate::config::ExperimentConfig;
use crate::error::SequenceError;
use crate::response::ResponseEvaluator;
use crate::session::SessionState;
use maskprime_core::{
    Callback, KeySet, ResultRecord, ScreenKind, Stimulus, StimulusContent, TrialPlan, TrialStep,
};
use std::collections::VecDeque;

/// A key press observed by the presentation layer, with its latency measured
/// from the moment the wait opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: char,
    pub reaction_ms: u64,
}

/// The external presentation layer the engine drives. Every call is
/// synchronous from the engine's perspective; `wait_ms` and `wait_key` are
/// the only suspension points. A `wait_key` on an empty set never returns.
pub trait Present {
    fn show(&mut self, stimulus: &Stimulus, text: &str);
    fn remove(&mut self, id: &str);
    fn wait_ms(&mut self, ms: u64);
    fn wait_key(&mut self, accepted: &KeySet) -> KeyEvent;
    /// Text capture for the participant-ID screen.
    fn capture_text(&mut self, prompt: &str) -> String;
}

/// Receives one record per logged trial and flushes once, best effort, at
/// the send step. No partial-result recovery.
pub trait ResultSink {
    fn record(&mut self, record: ResultRecord);
    fn set_participant(&mut self, id: String);
    fn flush(&mut self) -> Result<(), SequenceError>;
}

/// Executes trial plans strictly in order against a presenter and a sink.
/// Single-threaded and cooperative: no step starts before the previous
/// step's wait resolves, and no two trials ever interleave.
pub struct SessionRunner<P, S> {
    config: ExperimentConfig,
    presenter: P,
    sink: S,
    session: SessionState,
}

impl<P: Present, S: ResultSink> SessionRunner<P, S> {
    pub fn new(config: ExperimentConfig, presenter: P, sink: S) -> Self {
        Self {
            config,
            presenter,
            sink,
            session: SessionState::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn into_parts(self) -> (P, S, SessionState) {
        (self.presenter, self.sink, self.session)
    }

    pub fn run(&mut self, plans: &[TrialPlan]) -> Result<(), SequenceError> {
        for plan in plans {
            self.run_plan(plan)?;
        }
        Ok(())
    }

    fn run_plan(&mut self, plan: &TrialPlan) -> Result<(), SequenceError> {
        log::debug!("entering {}", plan.screen.label());
        // Only plans that give feedback get a correctness branch; test
        // trials log the key without evaluating it.
        let mut evaluator = plan
            .response
            .filter(|spec| spec.feedback)
            .map(|spec| ResponseEvaluator::new(spec.expected));
        let mut observed: Option<KeyEvent> = None;

        // Feedback steps are decided by the key press, so the step list is
        // consumed through a queue the evaluator may prepend to.
        let mut queue: VecDeque<TrialStep> = plan.steps.iter().cloned().collect();
        while let Some(step) = queue.pop_front() {
            match step {
                TrialStep::Show(stimulus) => {
                    let text = self.resolve(&stimulus);
                    self.presenter.show(&stimulus, &text);
                }
                TrialStep::WaitTimer(ms) => self.presenter.wait_ms(ms),
                TrialStep::Remove(id) => self.presenter.remove(id),
                TrialStep::WaitKey { accepted, log } => {
                    let event = self.presenter.wait_key(&accepted);
                    if log {
                        observed = Some(event);
                    }
                    if let Some(eval) = evaluator.as_mut() {
                        eval.observe(event.key);
                        for s in eval.feedback_steps(&self.config.timings).into_iter().rev() {
                            queue.push_front(s);
                        }
                        eval.finish();
                    }
                }
                TrialStep::RunCallback(callback) => self.run_callback(callback)?,
            }
        }

        if plan.screen == ScreenKind::ProlificId {
            // the prompt is the plan's own notice text, defined once by the
            // sequencer
            let prompt = plan
                .steps
                .iter()
                .find_map(|s| match s {
                    TrialStep::Show(stim) => match &stim.content {
                        StimulusContent::Notice(t) => Some(t.as_str()),
                        _ => None,
                    },
                    _ => None,
                })
                .unwrap_or_default();
            let id = self.presenter.capture_text(prompt);
            self.sink.set_participant(id);
        }

        if let (Some(fields), Some(event)) = (&plan.fields, observed) {
            self.sink.record(ResultRecord {
                screen: plan.screen.label().to_string(),
                match_label: fields.match_label.clone(),
                sentence: fields.sentence.clone(),
                probe: fields.probe.clone(),
                condition: fields.condition.clone(),
                jitter_ms: fields.jitter_ms,
                key: event.key,
                reaction_ms: event.reaction_ms,
            });
        }
        Ok(())
    }

    fn run_callback(&mut self, callback: Callback) -> Result<(), SequenceError> {
        match callback {
            Callback::AdvanceBlock => {
                let n = self.session.advance_block();
                log::info!("completed block {n} of {}", self.config.total_blocks);
            }
            Callback::IncrementCorrect => self.session.increment_correct(),
            Callback::FlushResults => self.sink.flush()?,
        }
        Ok(())
    }

    fn resolve(&self, stimulus: &Stimulus) -> String {
        match &stimulus.content {
            StimulusContent::Mask => "+".to_string(),
            StimulusContent::Blank => " ".to_string(),
            StimulusContent::Text(t) | StimulusContent::Notice(t) => t.clone(),
            StimulusContent::BlockCompleted => {
                self.session.block_notice(self.config.total_blocks)
            }
        }
    }
}
