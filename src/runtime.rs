use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

pub const CLOCK_TICK: Duration = Duration::from_secs(1);
pub const REFRESH_TICK: Duration = Duration::from_secs(3);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum FocusEvent {
    Key(KeyEvent),
    Resize,
    /// advance the session clock by one second
    ClockTick,
    /// recompute the focus score label
    RefreshTick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait FocusEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<FocusEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<FocusEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(FocusEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(FocusEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "terminal event reader stopped");
                    break;
                }
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

impl FocusEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<FocusEvent, RecvTimeoutError> {
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

/// A repeating task that reschedules itself one interval after it fires.
/// Late firings push the schedule back rather than catching up.
#[derive(Debug)]
pub struct Periodic<T: Ticker> {
    ticker: T,
    next_due: Instant,
}

impl<T: Ticker> Periodic<T> {
    pub fn new(ticker: T, now: Instant) -> Self {
        let next_due = now + ticker.interval();
        Self { ticker, next_due }
    }

    /// Fire and reschedule if the deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due = now + self.ticker.interval();
            true
        } else {
            false
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<FocusEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<FocusEvent>) -> Self {
        Self { rx }
    }
}

impl FocusEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<FocusEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that multiplexes input events with the clock and refresh tasks,
/// handing them to the caller one at a time
pub struct Runner<E: FocusEventSource, T: Ticker> {
    event_source: E,
    clock: Periodic<T>,
    refresh: Periodic<T>,
    cancelled: bool,
}

impl<E: FocusEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, clock_ticker: T, refresh_ticker: T) -> Self {
        let now = Instant::now();
        Self {
            event_source,
            clock: Periodic::new(clock_ticker, now),
            refresh: Periodic::new(refresh_ticker, now),
            cancelled: false,
        }
    }

    /// Blocks until a task is due or an event arrives. None once cancelled.
    pub fn step(&mut self) -> Option<FocusEvent> {
        loop {
            if self.cancelled {
                return None;
            }

            let now = Instant::now();
            if self.clock.fire_if_due(now) {
                return Some(FocusEvent::ClockTick);
            }
            if self.refresh.fire_if_due(now) {
                return Some(FocusEvent::RefreshTick);
            }

            let wait = self.clock.remaining(now).min(self.refresh.remaining(now));
            match self.event_source.recv_timeout(wait) {
                Ok(ev) => return Some(ev),
                Err(RecvTimeoutError::Timeout) => {}
                // no more input, keep ticking
                Err(RecvTimeoutError::Disconnected) => std::thread::sleep(wait),
            }
        }
    }

    /// Stop both repeating tasks
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn runner(
        rx: Receiver<FocusEvent>,
        clock_ms: u64,
        refresh_ms: u64,
    ) -> Runner<TestEventSource, FixedTicker> {
        Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(clock_ms)),
            FixedTicker::new(Duration::from_millis(refresh_ms)),
        )
    }

    #[test]
    fn step_returns_clock_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let mut runner = runner(rx, 1, 1000);

        // With no events available, step should yield a clock tick
        match runner.step() {
            Some(FocusEvent::ClockTick) => {}
            other => panic!("expected ClockTick, got {other:?}"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(FocusEvent::Resize).unwrap();
        let mut runner = runner(rx, 1000, 3000);

        match runner.step() {
            Some(FocusEvent::Resize) => {}
            other => panic!("expected Resize event, got {other:?}"),
        }
    }

    #[test]
    fn both_tasks_fire_at_their_own_rate() {
        let (_tx, rx) = mpsc::channel();
        let mut runner = runner(rx, 5, 15);

        let mut clock_ticks = 0;
        let mut refresh_ticks = 0;
        while refresh_ticks < 2 {
            match runner.step() {
                Some(FocusEvent::ClockTick) => clock_ticks += 1,
                Some(FocusEvent::RefreshTick) => refresh_ticks += 1,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(clock_ticks >= 2, "clock ticked {clock_ticks} times");
    }

    #[test]
    fn disconnected_source_keeps_ticking() {
        let (tx, rx) = mpsc::channel::<FocusEvent>();
        drop(tx);
        let mut runner = runner(rx, 2, 1000);

        assert!(matches!(runner.step(), Some(FocusEvent::ClockTick)));
        assert!(matches!(runner.step(), Some(FocusEvent::ClockTick)));
    }

    #[test]
    fn cancel_stops_the_runner() {
        let (tx, rx) = mpsc::channel();
        tx.send(FocusEvent::Resize).unwrap();
        let mut runner = runner(rx, 1, 1);
        runner.cancel();
        assert!(runner.is_cancelled());
        assert!(runner.step().is_none());
    }

    #[test]
    fn periodic_reschedules_from_fire_time() {
        let start = Instant::now();
        let mut task = Periodic::new(FixedTicker::new(Duration::from_secs(1)), start);

        assert!(!task.fire_if_due(start));
        assert_eq!(task.remaining(start), Duration::from_secs(1));

        // fired late: the next deadline is measured from the late firing
        let late = start + Duration::from_millis(1500);
        assert!(task.fire_if_due(late));
        assert!(!task.fire_if_due(late));
        assert_eq!(task.remaining(late), Duration::from_secs(1));
    }
}
