/// Process-wide mutable counters, each written from exactly one callback.
/// Lives for the whole run and is never reset mid-session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Correct practice responses. Test trials never touch this.
    pub correct_count: usize,
    /// Monotonically incremented by each break trial.
    pub block_number: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applied by the break trial's callback; returns the new block number.
    pub fn advance_block(&mut self) -> usize {
        self.block_number += 1;
        self.block_number
    }

    /// Applied by the practice feedback callback on a correct response.
    pub fn increment_correct(&mut self) {
        self.correct_count += 1;
    }

    /// The templated rest-break notice.
    pub fn block_notice(&self, total_blocks: usize) -> String {
        format!(
            "You have now completed block {} of {}.",
            self.block_number, total_blocks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_counter_is_monotonic() {
        let mut session = SessionState::new();
        assert_eq!(session.advance_block(), 1);
        assert_eq!(session.advance_block(), 2);
        assert_eq!(session.block_number, 2);
    }

    #[test]
    fn notice_is_templated_from_the_counter() {
        let mut session = SessionState::new();
        session.advance_block();
        assert_eq!(
            session.block_notice(8),
            "You have now completed block 1 of 8."
        );
    }
}
