use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

use crate::error::{DingError, Result};

/// Unified event type consumed by the game loop
#[derive(Clone, Debug)]
pub enum DingEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait DingEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> std::result::Result<DingEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<DingEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => DingEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => DingEvent::Mouse(mouse),
                Ok(CtEvent::Resize(_, _)) => DingEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };

            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DingEventSource for CrosstermEventSource {
    fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> std::result::Result<DingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for tests and headless drivers
pub struct TestEventSource {
    rx: Receiver<DingEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DingEvent>) -> Self {
        Self { rx }
    }
}

impl DingEventSource for TestEventSource {
    fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> std::result::Result<DingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the game one event/tick at a time.
///
/// Ticks are scheduled against a deadline, so a steady stream of mouse
/// events cannot starve the countdown.
pub struct Runner<E: DingEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Cell<Instant>,
}

impl<E: DingEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Cell::new(Instant::now() + ticker.interval());
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Blocks until the next tick is due and returns the next event, or Tick
    /// once the deadline passes. Fails once the event source is gone.
    pub fn step(&self) -> Result<DingEvent> {
        let now = Instant::now();
        let deadline = self.next_tick.get();

        if now >= deadline {
            self.schedule_after(deadline, now);
            return Ok(DingEvent::Tick);
        }

        match self.event_source.recv_timeout(deadline - now) {
            Ok(ev) => Ok(ev),
            Err(RecvTimeoutError::Timeout) => {
                self.schedule_after(deadline, Instant::now());
                Ok(DingEvent::Tick)
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("event source disconnected");
                Err(DingError::EventSourceClosed)
            }
        }
    }

    /// Start the tick schedule over: the next tick is a full interval from now
    pub fn restart_ticks(&self) {
        self.next_tick.set(Instant::now() + self.ticker.interval());
    }

    fn schedule_after(&self, deadline: Instant, now: Instant) {
        let next = deadline + self.ticker.interval();
        // fell more than a whole tick behind, so skip ahead rather than burst
        self.next_tick.set(if next <= now {
            now + self.ticker.interval()
        } else {
            next
        });
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }
}
