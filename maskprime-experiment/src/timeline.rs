use crate::config::TimingProfile;
use maskprime_core::{Stimulus, StimulusContent, TextStyle, TrialStep};

/// Builds the fixed mask/prime/mask/target presentation chain for one trial.
///
/// The three meaningful stimuli each follow show, wait, remove; the two blank
/// placeholders between them are shown for their duration and left without an
/// explicit removal. Prime and target are marked for logging so the presented
/// text is recorded verbatim. Durations are exact; the post-response jitter
/// is a separate step appended by the sequencer.
pub fn build(prime_text: &str, target_text: &str, timing: &TimingProfile) -> Vec<TrialStep> {
    vec![
        TrialStep::Show(Stimulus::new(
            "mask",
            StimulusContent::Mask,
            TextStyle::stimulus(),
        )),
        TrialStep::WaitTimer(timing.mask),
        TrialStep::Remove("mask"),
        TrialStep::Show(Stimulus::new(
            "mask2",
            StimulusContent::Blank,
            TextStyle::stimulus(),
        )),
        TrialStep::WaitTimer(timing.mask2),
        TrialStep::Show(Stimulus::logged(
            "prime",
            StimulusContent::Text(prime_text.to_string()),
            TextStyle::stimulus(),
        )),
        TrialStep::WaitTimer(timing.prime),
        TrialStep::Remove("prime"),
        TrialStep::Show(Stimulus::new(
            "mask3",
            StimulusContent::Blank,
            TextStyle::stimulus(),
        )),
        TrialStep::WaitTimer(timing.mask3),
        TrialStep::Show(Stimulus::logged(
            "target",
            StimulusContent::Text(target_text.to_string()),
            TextStyle::stimulus(),
        )),
        TrialStep::WaitTimer(timing.target),
        TrialStep::Remove("target"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> TimingProfile {
        TimingProfile {
            mask: 200,
            mask2: 210,
            prime: 300,
            mask3: 500,
            target: 310,
            feedback: 500,
        }
    }

    #[test]
    fn timeline_has_exactly_thirteen_steps() {
        assert_eq!(build("A", "B", &timing()).len(), 13);
    }

    #[test]
    fn phases_appear_in_fixed_order_with_exact_durations() {
        let steps = build("A", "B", &timing());

        let expect_show = |step: &TrialStep, id: &str, content: &StimulusContent| match step {
            TrialStep::Show(s) => {
                assert_eq!(s.id, id);
                assert_eq!(&s.content, content);
            }
            other => panic!("expected Show({id}), got {other:?}"),
        };

        expect_show(&steps[0], "mask", &StimulusContent::Mask);
        assert_eq!(steps[1], TrialStep::WaitTimer(200));
        assert_eq!(steps[2], TrialStep::Remove("mask"));
        expect_show(&steps[3], "mask2", &StimulusContent::Blank);
        assert_eq!(steps[4], TrialStep::WaitTimer(210));
        expect_show(&steps[5], "prime", &StimulusContent::Text("A".into()));
        assert_eq!(steps[6], TrialStep::WaitTimer(300));
        assert_eq!(steps[7], TrialStep::Remove("prime"));
        expect_show(&steps[8], "mask3", &StimulusContent::Blank);
        assert_eq!(steps[9], TrialStep::WaitTimer(500));
        expect_show(&steps[10], "target", &StimulusContent::Text("B".into()));
        assert_eq!(steps[11], TrialStep::WaitTimer(310));
        assert_eq!(steps[12], TrialStep::Remove("target"));
    }

    #[test]
    fn only_prime_and_target_are_logged() {
        let steps = build("A", "B", &timing());
        let logged: Vec<&str> = steps
            .iter()
            .filter_map(|s| match s {
                TrialStep::Show(stim) if stim.log => Some(stim.id),
                _ => None,
            })
            .collect();
        assert_eq!(logged, vec!["prime", "target"]);
    }

    #[test]
    fn blanks_have_no_explicit_removal() {
        let steps = build("A", "B", &timing());
        let removed: Vec<&str> = steps
            .iter()
            .filter_map(|s| match s {
                TrialStep::Remove(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(removed, vec!["mask", "prime", "target"]);
    }
}
