//! Input events and the poll thread that produces them.

use crossterm::event::{self, KeyEvent};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// How long to block on the terminal before emitting a tick.
const TICK_RATE: Duration = Duration::from_millis(60);

/// Everything the main loop reacts to. Timers feed back into the same
/// queue as keyboard input so all state changes happen on one thread.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Input(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Nothing happened within the tick rate.
    Tick,
    /// A status-bar message of this generation has outlived its welcome.
    StatusExpired(u64),
}

/// Owns the receiving end of the event queue and the thread polling the
/// terminal.
///
pub struct Handler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
}

impl Handler {
    pub fn new() -> Handler {
        let (sender, receiver) = mpsc::channel();
        let poll_sender = sender.clone();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);
                let outcome = if event::poll(timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(event::Event::Key(key)) => poll_sender.send(Event::Input(key)),
                        Ok(event::Event::Resize(columns, rows)) => {
                            poll_sender.send(Event::Resize(columns, rows))
                        }
                        _ => Ok(()),
                    }
                } else {
                    Ok(())
                };
                // Receiver dropped means the application is shutting down.
                if outcome.is_err() {
                    break;
                }
                if last_tick.elapsed() >= TICK_RATE {
                    if poll_sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });
        Handler { sender, receiver }
    }

    /// A handle for feeding events into the queue from timers.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.sender.clone()
    }

    /// Block until the next event.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for Handler {
    fn default() -> Handler {
        Handler::new()
    }
}
