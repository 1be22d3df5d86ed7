use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Cadence at which the timer thread reports progress.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Events emitted by the timer thread, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick {
        generation: u64,
        remaining_secs: u64,
        elapsed_secs: u64,
    },
    /// A countdown reached zero; always preceded by its final
    /// zero-remaining tick.
    Done { generation: u64 },
}

enum Command {
    Start {
        duration_secs: Option<u64>,
        generation: u64,
    },
    Stop { ack: Sender<()> },
    Reset { ack: Sender<()> },
}

/// Handle to the background timing thread.
///
/// The clock runs on its own thread so heavy rendering cannot starve it;
/// events are marshalled into the app's channel rather than mutating
/// session state directly. Two guarantees back the session's stale-tick
/// contract: `stop`/`reset` return only after the thread has processed
/// the command (nothing further is emitted), and every event carries the
/// generation of the `start` that produced it, so a consumer can drop
/// events already queued from a previous run.
pub struct Timer {
    commands: Sender<Command>,
    generation: u64,
}

impl Timer {
    /// Spawn the timer thread, delivering events into `sink`.
    pub fn spawn<T>(sink: Sender<T>) -> Self
    where
        T: From<TimerEvent> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || run(rx, sink));
        Self {
            commands: tx,
            generation: 0,
        }
    }

    /// Begin a countdown (`Some(secs)`) or an unbounded stopwatch
    /// (`None`). Returns the generation stamped on this run's events.
    pub fn start(&mut self, duration_secs: Option<u64>) -> u64 {
        self.generation += 1;
        let _ = self.commands.send(Command::Start {
            duration_secs,
            generation: self.generation,
        });
        self.generation
    }

    /// Halt the clock. Blocks until the timer thread has acknowledged;
    /// no event is emitted after this returns.
    pub fn stop(&self) {
        self.signal(|ack| Command::Stop { ack });
    }

    /// Halt the clock and discard the run, ready for a fresh `start`.
    pub fn reset(&self) {
        self.signal(|ack| Command::Reset { ack });
    }

    fn signal(&self, command: impl FnOnce(Sender<()>) -> Command) {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.commands.send(command(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

struct ActiveRun {
    started: Instant,
    duration_secs: Option<u64>,
    generation: u64,
}

fn run<T>(commands: Receiver<Command>, sink: Sender<T>)
where
    T: From<TimerEvent> + Send + 'static,
{
    let mut active: Option<ActiveRun> = None;

    loop {
        let command = if active.is_some() {
            match commands.recv_timeout(TICK_INTERVAL) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            // Nothing to tick; park until the next command.
            match commands.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            }
        };

        match command {
            Some(Command::Start {
                duration_secs,
                generation,
            }) => {
                active = Some(ActiveRun {
                    started: Instant::now(),
                    duration_secs,
                    generation,
                });
            }
            // Stop and Reset both halt the clock; a new Start rebuilds
            // the run from scratch.
            Some(Command::Stop { ack }) | Some(Command::Reset { ack }) => {
                active = None;
                let _ = ack.send(());
            }
            None => {
                let Some(run) = active.as_ref() else {
                    continue;
                };
                let elapsed_secs = run.started.elapsed().as_secs();
                let remaining_secs = run
                    .duration_secs
                    .map_or(0, |duration| duration.saturating_sub(elapsed_secs));
                let generation = run.generation;

                let tick = TimerEvent::Tick {
                    generation,
                    remaining_secs,
                    elapsed_secs,
                };
                if sink.send(tick.into()).is_err() {
                    break;
                }

                if run.duration_secs.is_some() && remaining_secs == 0 {
                    active = None;
                    if sink.send(TimerEvent::Done { generation }.into()).is_err() {
                        break;
                    }
                }
            }
        }
    }
}
