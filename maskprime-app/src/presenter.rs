use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute};
use maskprime_core::{KeySet, Stimulus};
use maskprime_experiment::{KeyEvent, Present};
use maskprime_timing::{PrecisionTimer, Timer};
use std::io::{BufRead, Write, stdout};
use std::time::Duration;

/// Terminal presentation layer: stimuli are printed centered-ish on a
/// cleared screen, key waits use raw-mode events, and durations go through
/// the precision timer.
pub struct ConsolePresenter {
    timer: PrecisionTimer,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            timer: PrecisionTimer::new(),
        }
    }

    fn clear(&self) {
        let _ = execute!(stdout(), Clear(ClearType::All), cursor::MoveTo(0, 2));
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Present for ConsolePresenter {
    fn show(&mut self, _stimulus: &Stimulus, text: &str) {
        self.clear();
        let mut out = stdout();
        let _ = writeln!(out, "\n    {text}\n");
        let _ = out.flush();
    }

    fn remove(&mut self, _id: &str) {
        self.clear();
    }

    fn wait_ms(&mut self, ms: u64) {
        self.timer.sleep(Duration::from_millis(ms));
    }

    fn wait_key(&mut self, accepted: &KeySet) -> KeyEvent {
        let _ = terminal::enable_raw_mode();
        let start = self.timer.now();
        let pressed = loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let KeyCode::Char(c) = key.code {
                        if accepted.accepts(c) {
                            break c;
                        }
                    }
                }
                // ignore everything else; the wait either resolves or stalls
                _ => {}
            }
        };
        let reaction_ms = self.timer.elapsed(start).as_millis() as u64;
        let _ = terminal::disable_raw_mode();
        KeyEvent {
            key: pressed,
            reaction_ms,
        }
    }

    fn capture_text(&mut self, prompt: &str) -> String {
        let _ = terminal::disable_raw_mode();
        let mut out = stdout();
        let _ = writeln!(out, "\n    {prompt}");
        let _ = out.flush();
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
        line.trim().to_string()
    }
}
