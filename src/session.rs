use serde::{Deserialize, Serialize};

use crate::stats;
use crate::word_generator::TextProvider;

/// Words requested for a timed session. Large enough that the countdown
/// normally expires before the text runs out; a typist who exhausts it
/// anyway ends the session early via the full-length rule.
pub const TIMED_SESSION_WORDS: usize = 100;

/// Durations selectable for time-limited sessions, in seconds.
pub const TIME_LIMITS: [u64; 4] = [15, 30, 60, 120];

/// Word counts selectable for word-limited sessions.
pub const WORD_COUNTS: [usize; 4] = [10, 25, 50, 100];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Mode {
    #[strum(serialize = "time")]
    #[serde(rename = "time")]
    TimeLimited,
    #[strum(serialize = "words")]
    #[serde(rename = "words")]
    WordLimited,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::TimeLimited => Mode::WordLimited,
            Mode::WordLimited => Mode::TimeLimited,
        }
    }
}

/// Configuration a session is created with. Values outside the fixed
/// selectable sets are constrained at the config/CLI boundary, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
    pub seconds: u64,
    pub words: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::TimeLimited,
            seconds: 60,
            words: 25,
        }
    }
}

/// Read-only copy of the engine state for consumers outside the app loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub status: Status,
    pub mode: Mode,
    pub reference: String,
    pub typed: String,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub total_keystrokes: u32,
    pub correct_chars: usize,
    pub error_chars: usize,
}

/// The typing-session engine: one practice attempt from idle through
/// finished.
///
/// All mutation goes through `configure`, `reset`, `apply_input` and
/// `tick`; everything else is read-only. Input arrives as whole snapshots
/// of the text field and correctness is recomputed from scratch on every
/// accepted event, so the counters depend only on the current input
/// against the reference, never on edit history.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    status: Status,
    reference: String,
    typed: String,
    elapsed_secs: u64,
    remaining_secs: u64,
    total_keystrokes: u32,
    correct_chars: usize,
    error_chars: usize,
    wpm_series: Vec<(f64, f64)>,
}

impl Session {
    pub fn new(config: SessionConfig, provider: &dyn TextProvider) -> Self {
        let mut session = Self {
            config,
            status: Status::Idle,
            reference: String::new(),
            typed: String::new(),
            elapsed_secs: 0,
            remaining_secs: 0,
            total_keystrokes: 0,
            correct_chars: 0,
            error_chars: 0,
            wpm_series: Vec::new(),
        };
        session.reset(provider);
        session
    }

    /// Replace the configuration and start over with fresh text.
    pub fn configure(&mut self, config: SessionConfig, provider: &dyn TextProvider) {
        self.config = config;
        self.reset(provider);
    }

    /// Discard all progress and generate a new reference text for the
    /// current configuration.
    pub fn reset(&mut self, provider: &dyn TextProvider) {
        let word_count = match self.config.mode {
            Mode::WordLimited => self.config.words,
            Mode::TimeLimited => TIMED_SESSION_WORDS,
        };
        self.reference = provider.generate(word_count);
        self.typed.clear();
        self.status = Status::Idle;
        self.elapsed_secs = 0;
        self.remaining_secs = match self.config.mode {
            Mode::TimeLimited => self.config.seconds,
            Mode::WordLimited => 0,
        };
        self.total_keystrokes = 0;
        self.correct_chars = 0;
        self.error_chars = 0;
        self.wpm_series.clear();
    }

    /// Apply a new snapshot of the user's input.
    ///
    /// Ignored once finished. Input longer than the reference is rejected
    /// without touching any state (the guard runs before the implicit
    /// start, so a rejected first event leaves the session untouched).
    /// The first non-empty input starts the session; matching the full
    /// reference length finishes it in either mode.
    pub fn apply_input(&mut self, new_input: &str) {
        if self.status == Status::Finished {
            return;
        }

        let reference_len = self.reference.chars().count();
        let input_len = new_input.chars().count();
        if input_len > reference_len {
            return;
        }

        if self.status == Status::Idle && input_len > 0 {
            self.status = Status::Running;
        }

        let mut correct = 0;
        let mut errors = 0;
        for (typed, expected) in new_input.chars().zip(self.reference.chars()) {
            if typed == expected {
                correct += 1;
            } else {
                errors += 1;
            }
        }

        self.typed.clear();
        self.typed.push_str(new_input);
        self.correct_chars = correct;
        self.error_chars = errors;
        // One edit event per accepted call, regardless of how many
        // characters changed.
        self.total_keystrokes += 1;

        if input_len == reference_len {
            self.status = Status::Finished;
        }
    }

    /// Consume a progress report from the time source.
    ///
    /// Ignored once finished. A zero remaining value finishes a
    /// time-limited session; in word-limited mode the clock only counts
    /// up and never finishes anything.
    pub fn tick(&mut self, remaining_secs: u64, elapsed_secs: u64) {
        if self.status == Status::Finished {
            return;
        }

        match self.config.mode {
            Mode::TimeLimited => {
                self.remaining_secs = remaining_secs;
                self.elapsed_secs = elapsed_secs;
            }
            Mode::WordLimited => {
                // Stopwatch display: both fields carry the count-up value.
                self.remaining_secs = elapsed_secs;
                self.elapsed_secs = elapsed_secs;
            }
        }

        if self.status == Status::Running && elapsed_secs > 0 {
            let secs = elapsed_secs as f64;
            // One sample per whole second is plenty for the results chart.
            if self.wpm_series.last().map_or(true, |&(s, _)| s < secs) {
                self.wpm_series
                    .push((secs, f64::from(stats::wpm(self.correct_chars, elapsed_secs))));
            }
        }

        if self.config.mode == Mode::TimeLimited && remaining_secs == 0 {
            self.status = Status::Finished;
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Caret position, in characters typed so far.
    pub fn cursor_pos(&self) -> usize {
        self.typed.chars().count()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_keystrokes(&self) -> u32 {
        self.total_keystrokes
    }

    pub fn correct_chars(&self) -> usize {
        self.correct_chars
    }

    pub fn error_chars(&self) -> usize {
        self.error_chars
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Live words per minute.
    pub fn wpm(&self) -> u32 {
        stats::wpm(self.correct_chars, self.elapsed_secs)
    }

    /// Live accuracy percentage.
    pub fn accuracy(&self) -> u32 {
        stats::accuracy(self.correct_chars, self.total_keystrokes)
    }

    /// Spread of the live-WPM samples collected this session.
    pub fn consistency(&self) -> f64 {
        let samples: Vec<f64> = self.wpm_series.iter().map(|&(_, wpm)| wpm).collect();
        stats::consistency(&samples)
    }

    /// Live WPM sampled once per elapsed second, for the results chart.
    pub fn wpm_series(&self) -> &[(f64, f64)] {
        &self.wpm_series
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            mode: self.config.mode,
            reference: self.reference.clone(),
            typed: self.typed.clone(),
            elapsed_secs: self.elapsed_secs,
            remaining_secs: self.remaining_secs,
            total_keystrokes: self.total_keystrokes,
            correct_chars: self.correct_chars,
            error_chars: self.error_chars,
        }
    }
}
