/// Labels for every entry in the experiment sequence, screens and trials alike.
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum ScreenKind {
    Consent,
    ProlificId,
    Welcome,
    Instructions,
    Practice,
    Begin,
    Break,
    Test,
    Send,
    Final,
}

impl ScreenKind {
    /// Practice trials give correctness feedback; test trials do not.
    pub fn is_practice(&self) -> bool {
        matches!(self, ScreenKind::Practice)
    }

    pub fn is_test(&self) -> bool {
        matches!(self, ScreenKind::Test)
    }

    pub fn is_break(&self) -> bool {
        matches!(self, ScreenKind::Break)
    }

    /// Name used for the screen label column of result rows.
    pub fn label(&self) -> &'static str {
        match self {
            ScreenKind::Consent => "consent",
            ScreenKind::ProlificId => "prolificid",
            ScreenKind::Welcome => "welcome",
            ScreenKind::Instructions => "instructions",
            ScreenKind::Practice => "practice",
            ScreenKind::Begin => "begin",
            ScreenKind::Break => "break",
            ScreenKind::Test => "text_test",
            ScreenKind::Send => "send",
            ScreenKind::Final => "final",
        }
    }
}
