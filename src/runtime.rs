use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::timer::TimerEvent;

/// Unified event type consumed by the app loop.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Timer(TimerEvent),
}

impl From<TimerEvent> for AppEvent {
    fn from(event: TimerEvent) -> Self {
        AppEvent::Timer(event)
    }
}

/// Single merged event channel.
///
/// The keyboard reader and the timer thread both feed it; only the app
/// thread drains it, which keeps the session engine behind a single
/// writer.
pub struct EventChannel {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl EventChannel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A sender for event producers (the timer thread, tests).
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }

    /// Spawn the thread that translates terminal events onto the channel.
    pub fn spawn_terminal_reader(&self) {
        let tx = self.tx.clone();
        thread::spawn(move || loop {
            let event = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break;
            }
        });
    }

    /// Block for the next event.
    pub fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}
