use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use neotype::{
    config::{Config, ConfigStore, FileConfigStore},
    language::Language,
    runtime::{AppEvent, EventChannel},
    session::{Mode, Session, Status, TIME_LIMITS, WORD_COUNTS},
    timer::{Timer, TimerEvent},
    ui,
    word_generator::WordGenerator,
};

/// fast terminal typing trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A fast terminal typing trainer with timed and word-count sessions, live wpm and accuracy, and a results chart."
)]
struct Cli {
    /// word count for a word-limited session (10/25/50/100)
    #[clap(short = 'w', long, conflicts_with = "seconds")]
    words: Option<usize>,

    /// run a time-limited session of this many seconds (15/30/60/120)
    #[clap(short = 's', long)]
    seconds: Option<u64>,

    /// word list to draw practice text from
    #[clap(short = 'l', long, value_enum)]
    word_list: Option<WordList>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
enum WordList {
    Common,
    Cyber,
    Mixed,
}

impl Cli {
    /// Persisted config overridden by whatever was given on the command
    /// line, snapped onto the fixed selectable sets.
    fn into_config(self, mut config: Config) -> Config {
        if let Some(seconds) = self.seconds {
            config.mode = Mode::TimeLimited;
            config.seconds = seconds;
        }
        if let Some(words) = self.words {
            config.mode = Mode::WordLimited;
            config.words = words;
        }
        if let Some(word_list) = self.word_list {
            config.word_list = word_list.to_string();
        }
        config.sanitized()
    }
}

struct App {
    session: Session,
    generator: WordGenerator,
    timer: Timer,
    /// Generation of the timer run driving the current session; timer
    /// events stamped with anything else are stale and dropped.
    timer_generation: u64,
    config: Config,
    store: FileConfigStore,
}

impl App {
    fn new(config: Config, store: FileConfigStore, timer: Timer) -> Self {
        let generator = WordGenerator::new(Language::for_list(&config.word_list));
        let session = Session::new(config.session_config(), &generator);
        Self {
            session,
            generator,
            timer,
            timer_generation: 0,
            config,
            store,
        }
    }

    /// Fresh text, same settings. The timer is reset before the session
    /// so no tick from the old run can land on the new one.
    fn restart(&mut self) {
        self.timer.reset();
        self.timer_generation = 0;
        self.session.reset(&self.generator);
    }

    /// Push changed settings into a fresh session and persist them.
    fn apply_config(&mut self) {
        self.timer.reset();
        self.timer_generation = 0;
        self.session
            .configure(self.config.session_config(), &self.generator);
        let _ = self.store.save(&self.config);
    }

    fn toggle_mode(&mut self) {
        self.config.mode = self.config.mode.toggled();
        self.apply_config();
    }

    /// Step through the fixed duration or word-count set.
    fn cycle_length(&mut self, step: isize) {
        match self.config.mode {
            Mode::TimeLimited => {
                self.config.seconds = cycled(&TIME_LIMITS, self.config.seconds, step);
            }
            Mode::WordLimited => {
                self.config.words = cycled(&WORD_COUNTS, self.config.words, step);
            }
        }
        self.apply_config();
    }

    fn type_char(&mut self, c: char) {
        if self.session.has_finished() {
            return;
        }
        let was_idle = self.session.status() == Status::Idle;

        let mut candidate = self.session.typed().to_string();
        candidate.push(c);
        self.session.apply_input(&candidate);

        if was_idle && self.session.status() != Status::Idle {
            let duration = match self.session.mode() {
                Mode::TimeLimited => Some(self.config.seconds),
                Mode::WordLimited => None,
            };
            self.timer_generation = self.timer.start(duration);
        }
        if self.session.has_finished() {
            self.timer.stop();
        }
    }

    fn backspace(&mut self) {
        if self.session.has_finished() {
            return;
        }
        // Mirrors an input widget: no change event when there is nothing
        // to delete.
        let mut candidate = self.session.typed().to_string();
        if candidate.pop().is_some() {
            self.session.apply_input(&candidate);
        }
    }

    fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick {
                generation,
                remaining_secs,
                elapsed_secs,
            } => {
                if generation != self.timer_generation {
                    return;
                }
                self.session.tick(remaining_secs, elapsed_secs);
                if self.session.has_finished() {
                    self.timer.stop();
                }
            }
            TimerEvent::Done { generation } => {
                // The zero-remaining tick preceding Done already finished
                // the session; just forget the run.
                if generation == self.timer_generation {
                    self.timer_generation = 0;
                }
            }
        }
    }
}

fn cycled<T: Copy + PartialEq>(set: &[T], current: T, step: isize) -> T {
    let len = set.len() as isize;
    let idx = set
        .iter()
        .position(|&value| value == current)
        .unwrap_or(0) as isize;
    set[(idx + step).rem_euclid(len) as usize]
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.into_config(store.load().sanitized());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventChannel::new();
    events.spawn_terminal_reader();
    let timer = Timer::spawn(events.sender());

    let mut app = App::new(config, store, timer);
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventChannel,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, &app.session))?;

        match events.recv()? {
            AppEvent::Resize => {}
            AppEvent::Timer(event) => app.on_timer(event),
            AppEvent::Key(key) => {
                if is_quit(&key) {
                    break;
                }
                match key.code {
                    KeyCode::Tab => app.restart(),
                    KeyCode::Up | KeyCode::Down => app.toggle_mode(),
                    KeyCode::Left => app.cycle_length(-1),
                    KeyCode::Right => app.cycle_length(1),
                    KeyCode::Backspace => app.backspace(),
                    KeyCode::Char(c) => app.type_char(c),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
