use crate::config::ExperimentConfig;
use crate::error::SequenceError;
use crate::interleave::interleave;
use crate::jitter::JitterTable;
use crate::response::expected_key;
use crate::timeline;
use maskprime_core::{
    Callback, KeySet, ResponseSpec, ResultFields, ScreenKind, Stimulus, StimulusContent, TextStyle,
    TrialItem, TrialPlan, TrialStep,
};
use rand::Rng;
use rand::seq::SliceRandom;

const CONSENT_TEXT: &str = "Before taking part in this study, please read the consent form. \
Press SPACE to confirm that you consent to take part.";

const PROLIFIC_TEXT: &str = "Please enter your Prolific ID.";

const WELCOME_TEXT: &str = "Welcome! In this experiment you will see pairs of items presented \
rapidly. Press SPACE to continue.";

const INSTRUCTIONS_TEXT: &str = "You will see pairs of items presented rapidly. \
Press '2' with your LEFT INDEX FINGER if they are the SAME. \
Press '1' with your LEFT MIDDLE FINGER if they are DIFFERENT. \
When you are ready, press SPACE to continue.";

const BEGIN_TEXT: &str = "The practice session is over. The main experiment starts now. \
Press SPACE to begin.";

const FINAL_TEXT: &str = "The experiment is now over! Thank you for your participation. \
Please return to Prolific to confirm your submission.";

const BREAK_CONTINUE_TEXT: &str = "When you are ready, press SPACE to continue.";

/// Builds the complete ordered trial list for one session: fixed screens, a
/// randomized practice block, the randomized main block interleaved with
/// rest breaks, and the closing screens.
pub struct Sequencer {
    config: ExperimentConfig,
    jitter: JitterTable,
}

impl Sequencer {
    /// Validates the configuration and materializes the jitter table.
    /// Fails before any trial is presented if the definition is un-runnable.
    pub fn new(config: ExperimentConfig) -> Result<Self, SequenceError> {
        config.validate()?;
        let jitter = JitterTable::build(config.jitter)?;
        Ok(Self { config, jitter })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn jitter_table(&self) -> &JitterTable {
        &self.jitter
    }

    /// The full session, in its fixed total order:
    /// consent, prolific-id, welcome, instructions, randomized practice,
    /// begin, interleave(break, randomized test, trials_per_block), send,
    /// final. Empty pools simply contribute no trials.
    pub fn build_session<R: Rng>(
        &self,
        practice: &[TrialItem],
        test: &[TrialItem],
        rng: &mut R,
    ) -> Result<Vec<TrialPlan>, SequenceError> {
        let mut plans = vec![
            self.continue_screen(ScreenKind::Consent, CONSENT_TEXT),
            TrialPlan::screen_only(
                ScreenKind::ProlificId,
                vec![TrialStep::Show(Stimulus::new(
                    "screen",
                    StimulusContent::Notice(PROLIFIC_TEXT.to_string()),
                    TextStyle::prompt(),
                ))],
            ),
            self.continue_screen(ScreenKind::Welcome, WELCOME_TEXT),
            self.continue_screen(ScreenKind::Instructions, INSTRUCTIONS_TEXT),
        ];

        let mut practice_items = practice.to_vec();
        practice_items.shuffle(rng);
        for item in &practice_items {
            plans.push(self.trial_plan(ScreenKind::Practice, item, rng));
        }

        plans.push(self.continue_screen(ScreenKind::Begin, BEGIN_TEXT));

        let mut test_items = test.to_vec();
        test_items.shuffle(rng);
        let test_plans: Vec<TrialPlan> = test_items
            .iter()
            .map(|item| self.trial_plan(ScreenKind::Test, item, rng))
            .collect();
        let separator = [self.break_plan()];
        plans.extend(interleave(
            &separator,
            test_plans,
            self.config.trials_per_block,
        )?);

        plans.push(TrialPlan::screen_only(
            ScreenKind::Send,
            vec![TrialStep::RunCallback(Callback::FlushResults)],
        ));

        log::info!(
            "sequenced {} practice and {} test trials into {} entries",
            practice_items.len(),
            test_items.len(),
            plans.len() + 1
        );

        plans.push(self.final_screen());
        Ok(plans)
    }

    /// One masked-priming trial: optional practice banner, the 13-step
    /// stimulus timeline, the trailing blank left for the next trial to
    /// clear, the unbounded logged key wait, and the sampled jitter delay.
    fn trial_plan<R: Rng>(&self, screen: ScreenKind, item: &TrialItem, rng: &mut R) -> TrialPlan {
        let keys = &self.config.keys;
        let jitter_ms = self.jitter.sample(rng);

        let mut steps = Vec::new();
        if screen.is_practice() {
            steps.push(TrialStep::Show(Stimulus::new(
                "banner",
                StimulusContent::Text("PRACTICE".to_string()),
                TextStyle::banner(),
            )));
        }
        steps.extend(timeline::build(
            &item.sentence,
            &item.probe,
            &self.config.timings,
        ));
        steps.push(TrialStep::Show(Stimulus::new(
            "mask4",
            StimulusContent::Blank,
            TextStyle::stimulus(),
        )));
        steps.push(TrialStep::WaitKey {
            accepted: KeySet::of(&[keys.different, keys.same]),
            log: true,
        });
        steps.push(TrialStep::Show(Stimulus::new(
            "jitter",
            StimulusContent::Blank,
            TextStyle::stimulus(),
        )));
        steps.push(TrialStep::WaitTimer(jitter_ms));
        steps.push(TrialStep::Remove("jitter"));

        TrialPlan {
            screen,
            steps,
            fields: Some(ResultFields {
                match_label: item.match_label.clone(),
                sentence: item.sentence.clone(),
                probe: item.probe.clone(),
                condition: item.condition.clone(),
                jitter_ms,
            }),
            response: Some(ResponseSpec {
                expected: expected_key(&item.sentence, &item.probe, keys),
                feedback: screen.is_practice(),
            }),
        }
    }

    /// A rest break: bump the block counter, render the templated notice,
    /// wait for the continue key.
    fn break_plan(&self) -> TrialPlan {
        TrialPlan::screen_only(
            ScreenKind::Break,
            vec![
                TrialStep::RunCallback(Callback::AdvanceBlock),
                TrialStep::Show(Stimulus::new(
                    "prompt",
                    StimulusContent::BlockCompleted,
                    TextStyle::prompt(),
                )),
                TrialStep::Show(Stimulus::new(
                    "continue",
                    StimulusContent::Notice(BREAK_CONTINUE_TEXT.to_string()),
                    TextStyle::prompt(),
                )),
                TrialStep::WaitKey {
                    accepted: KeySet::of(&[self.config.keys.cont]),
                    log: false,
                },
            ],
        )
    }

    fn continue_screen(&self, screen: ScreenKind, text: &str) -> TrialPlan {
        TrialPlan::screen_only(
            screen,
            vec![
                TrialStep::Show(Stimulus::new(
                    "screen",
                    StimulusContent::Notice(text.to_string()),
                    TextStyle::prompt(),
                )),
                TrialStep::WaitKey {
                    accepted: KeySet::of(&[self.config.keys.cont]),
                    log: false,
                },
            ],
        )
    }

    /// The terminal screen blocks forever; the session ends out of band.
    fn final_screen(&self) -> TrialPlan {
        TrialPlan::screen_only(
            ScreenKind::Final,
            vec![
                TrialStep::Show(Stimulus::new(
                    "screen",
                    StimulusContent::Notice(FINAL_TEXT.to_string()),
                    TextStyle::prompt(),
                )),
                TrialStep::WaitKey {
                    accepted: KeySet::never(),
                    log: false,
                },
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item(sentence: &str, probe: &str) -> TrialItem {
        TrialItem {
            sentence: sentence.to_string(),
            probe: probe.to_string(),
            match_label: (if sentence == probe { "match" } else { "mismatch" }).to_string(),
            condition: "related".to_string(),
        }
    }

    fn items(n: usize) -> Vec<TrialItem> {
        (0..n).map(|i| item(&format!("w{i}"), "probe")).collect()
    }

    fn sequencer() -> Sequencer {
        Sequencer::new(ExperimentConfig::default()).unwrap()
    }

    fn labels(plans: &[TrialPlan]) -> Vec<&'static str> {
        plans.iter().map(|p| p.screen.label()).collect()
    }

    #[test]
    fn invalid_config_fails_before_sequencing() {
        let mut config = ExperimentConfig::default();
        config.jitter.max = 0;
        assert!(Sequencer::new(config).is_err());
    }

    #[test]
    fn fixed_total_order_with_empty_pools() {
        let seq = sequencer();
        let mut rng = StdRng::seed_from_u64(1);
        let plans = seq.build_session(&[], &[], &mut rng).unwrap();
        assert_eq!(
            labels(&plans),
            vec![
                "consent",
                "prolificid",
                "welcome",
                "instructions",
                "begin",
                "send",
                "final"
            ]
        );
    }

    #[test]
    fn twenty_seven_test_trials_with_blocks_of_twenty_five_yield_two_breaks() {
        let seq = sequencer();
        let mut rng = StdRng::seed_from_u64(1);
        let plans = seq.build_session(&items(2), &items(27), &mut rng).unwrap();

        let breaks = plans.iter().filter(|p| p.screen.is_break()).count();
        assert_eq!(breaks, 2);
        // 4 opening screens + 2 practice + begin + 27 test + 2 breaks + send + final
        assert_eq!(plans.len(), 4 + 2 + 1 + 27 + 2 + 1 + 1);

        let test_labels: Vec<_> = plans
            .iter()
            .filter(|p| p.screen.is_test() || p.screen.is_break())
            .map(|p| p.screen.label())
            .collect();
        assert_eq!(test_labels[25], "break");
        assert_eq!(test_labels[28], "break");
    }

    #[test]
    fn single_test_trial_never_gets_a_break() {
        let seq = sequencer();
        let mut rng = StdRng::seed_from_u64(1);
        let plans = seq.build_session(&[], &items(1), &mut rng).unwrap();
        assert_eq!(plans.iter().filter(|p| p.screen.is_break()).count(), 0);
        assert_eq!(plans.iter().filter(|p| p.screen.is_test()).count(), 1);
    }

    #[test]
    fn shuffle_is_deterministic_under_a_seed() {
        let seq = sequencer();
        let pool = items(10);
        let a = seq
            .build_session(&[], &pool, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = seq
            .build_session(&[], &pool, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn practice_plan_carries_banner_feedback_and_logged_fields() {
        let seq = sequencer();
        let mut rng = StdRng::seed_from_u64(3);
        let plans = seq
            .build_session(&[item("cat", "cat")], &[], &mut rng)
            .unwrap();
        let practice = plans.iter().find(|p| p.screen.is_practice()).unwrap();

        assert!(matches!(
            &practice.steps[0],
            TrialStep::Show(s) if s.id == "banner"
        ));
        // banner + 13 timeline steps + trailing blank + key wait + 3 jitter steps
        assert_eq!(practice.steps.len(), 1 + 13 + 1 + 1 + 3);

        let spec = practice.response.unwrap();
        assert_eq!(spec.expected, '2');
        assert!(spec.feedback);

        let fields = practice.fields.as_ref().unwrap();
        assert_eq!(fields.sentence, "cat");
        assert_eq!(fields.probe, "cat");
        assert!(seq.jitter_table().values().contains(&fields.jitter_ms));
    }

    #[test]
    fn test_plan_has_no_banner_and_no_feedback() {
        let seq = sequencer();
        let mut rng = StdRng::seed_from_u64(3);
        let plans = seq
            .build_session(&[], &[item("cat", "dog")], &mut rng)
            .unwrap();
        let test = plans.iter().find(|p| p.screen.is_test()).unwrap();

        assert!(matches!(
            &test.steps[0],
            TrialStep::Show(s) if s.id == "mask"
        ));
        assert_eq!(test.steps.len(), 13 + 1 + 1 + 3);

        let spec = test.response.unwrap();
        assert_eq!(spec.expected, '1');
        assert!(!spec.feedback);
    }

    #[test]
    fn key_wait_is_unbounded_and_accepts_both_response_keys() {
        let seq = sequencer();
        let mut rng = StdRng::seed_from_u64(3);
        let plans = seq
            .build_session(&[], &[item("a", "b")], &mut rng)
            .unwrap();
        let test = plans.iter().find(|p| p.screen.is_test()).unwrap();
        let wait = test
            .steps
            .iter()
            .find_map(|s| match s {
                TrialStep::WaitKey { accepted, log } => Some((accepted.clone(), *log)),
                _ => None,
            })
            .unwrap();
        assert!(wait.0.accepts('1'));
        assert!(wait.0.accepts('2'));
        assert!(!wait.0.accepts(' '));
        assert!(wait.1);
    }

    #[test]
    fn final_screen_wait_never_resolves() {
        let seq = sequencer();
        let mut rng = StdRng::seed_from_u64(1);
        let plans = seq.build_session(&[], &[], &mut rng).unwrap();
        let last = plans.last().unwrap();
        assert_eq!(last.screen, ScreenKind::Final);
        let accepted = last
            .steps
            .iter()
            .find_map(|s| match s {
                TrialStep::WaitKey { accepted, .. } => Some(accepted.clone()),
                _ => None,
            })
            .unwrap();
        assert!(accepted.keys.is_empty());
    }
}
