/// What a single presented element contains.
#[derive(Debug, Clone, PartialEq)]
pub enum StimulusContent {
    /// The fixation mask, rendered as "+".
    Mask,
    /// An empty placeholder between meaningful stimuli.
    Blank,
    /// Literal stimulus or feedback text.
    Text(String),
    /// Static screen copy (instructions, consent prompts, and the like).
    Notice(String),
    /// Resolved at run time from the session's block counter.
    BlockCompleted,
}

/// Minimal text styling the presentation layer is asked to honor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub monospace: bool,
    pub color: [u8; 4],
}

impl TextStyle {
    /// Courier-style centered stimulus text, as the stimuli are shown.
    pub fn stimulus() -> Self {
        Self {
            size: 24.0,
            bold: false,
            monospace: true,
            color: [255, 255, 255, 255],
        }
    }

    /// Feedback and break-prompt text.
    pub fn prompt() -> Self {
        Self {
            size: 20.0,
            bold: false,
            monospace: false,
            color: [255, 255, 255, 255],
        }
    }

    /// The bold banner above practice trials.
    pub fn banner() -> Self {
        Self {
            size: 26.0,
            bold: true,
            monospace: false,
            color: [255, 255, 255, 255],
        }
    }
}

/// One element handed to the presentation layer by a `Show` step.
#[derive(Debug, Clone, PartialEq)]
pub struct Stimulus {
    /// Identity used by the matching `Remove` step.
    pub id: &'static str,
    pub content: StimulusContent,
    pub style: TextStyle,
    /// Logged stimuli have their text recorded verbatim in the result row.
    pub log: bool,
}

impl Stimulus {
    pub fn new(id: &'static str, content: StimulusContent, style: TextStyle) -> Self {
        Self {
            id,
            content,
            style,
            log: false,
        }
    }

    pub fn logged(id: &'static str, content: StimulusContent, style: TextStyle) -> Self {
        Self {
            id,
            content,
            style,
            log: true,
        }
    }
}
