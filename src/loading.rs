//! Deferred loading
//!
//! Menus and restaurant listings become available after a fixed delay. The
//! delay is modelled as a small state machine driven by caller-supplied
//! instants, so nothing here sleeps or spawns timers.

use std::{
    fmt,
    time::{Duration, Instant},
};

use tracing::debug;

/// Delay before the popular-items menu is shown.
pub const MENU_LOAD_DELAY: Duration = Duration::from_millis(1000);

/// Delay before the nearby restaurant listing is shown.
pub const RESTAURANTS_LOAD_DELAY: Duration = Duration::from_millis(1500);

/// Something that can produce data on demand.
pub trait DataSource {
    /// Loaded value
    type Output;

    /// Load failure
    type Error;

    /// Load the data.
    ///
    /// # Errors
    ///
    /// Returns the source's error type if the data cannot be produced.
    fn load(&self) -> Result<Self::Output, Self::Error>;
}

/// Observable state of a [`DelayedLoad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Waiting for the delay to elapse.
    Pending,

    /// Data has been loaded.
    Ready,

    /// Torn down before the data arrived; it never will.
    Cancelled,
}

enum State<T> {
    Pending,
    Ready(T),
    Cancelled,
}

/// Load from a [`DataSource`] once a delay has elapsed.
pub struct DelayedLoad<S: DataSource> {
    source: S,
    delay: Duration,
    started_at: Instant,
    state: State<S::Output>,
}

impl<S: DataSource> DelayedLoad<S> {
    /// Start a delayed load at `started_at`.
    pub fn new(source: S, delay: Duration, started_at: Instant) -> Self {
        Self {
            source,
            delay,
            started_at,
            state: State::Pending,
        }
    }

    /// Advance the load to `now`.
    ///
    /// Loads from the source exactly once, on the first poll at or after the
    /// deadline, and returns the loaded data from then on. Returns `None`
    /// while pending and after [`cancel`](Self::cancel).
    ///
    /// # Errors
    ///
    /// Returns the source's error if loading fails. The load stays pending and
    /// is retried on the next poll.
    pub fn poll(&mut self, now: Instant) -> Result<Option<&S::Output>, S::Error> {
        if matches!(self.state, State::Pending) && self.remaining(now).is_none() {
            let output = self.source.load()?;

            debug!(delay_ms = self.delay.as_millis(), "deferred load ready");

            self.state = State::Ready(output);
        }

        Ok(self.output())
    }

    /// Time left before the deadline, or `None` once it has passed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.started_at);

        self.delay
            .checked_sub(elapsed)
            .filter(|remaining| !remaining.is_zero())
    }

    /// Cancel the load. A pending load will never fire; loaded data is dropped.
    pub fn cancel(&mut self) {
        if matches!(self.state, State::Pending) {
            debug!("deferred load cancelled before completion");
        }

        self.state = State::Cancelled;
    }

    /// Current status.
    pub fn status(&self) -> LoadStatus {
        match self.state {
            State::Pending => LoadStatus::Pending,
            State::Ready(_) => LoadStatus::Ready,
            State::Cancelled => LoadStatus::Cancelled,
        }
    }

    /// Whether the data is still being waited on.
    pub fn is_loading(&self) -> bool {
        self.status() == LoadStatus::Pending
    }

    /// Loaded data, if ready.
    pub fn output(&self) -> Option<&S::Output> {
        match &self.state {
            State::Ready(output) => Some(output),
            State::Pending | State::Cancelled => None,
        }
    }

    /// Take the loaded data, if ready.
    pub fn into_output(self) -> Option<S::Output> {
        match self.state {
            State::Ready(output) => Some(output),
            State::Pending | State::Cancelled => None,
        }
    }
}

impl<S: DataSource> fmt::Debug for DelayedLoad<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedLoad")
            .field("delay", &self.delay)
            .field("started_at", &self.started_at)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Default)]
    struct CountingSource {
        loads: Cell<usize>,
        fail: bool,
    }

    impl DataSource for CountingSource {
        type Output = Vec<&'static str>;
        type Error = &'static str;

        fn load(&self) -> Result<Self::Output, Self::Error> {
            self.loads.set(self.loads.get() + 1);

            if self.fail {
                Err("unavailable")
            } else {
                Ok(vec!["m1", "m2"])
            }
        }
    }

    #[test]
    fn pending_until_delay_elapses() -> TestResult {
        let start = Instant::now();
        let mut load = DelayedLoad::new(CountingSource::default(), MENU_LOAD_DELAY, start);

        assert!(load.poll(start)?.is_none());
        assert!(load.poll(start + Duration::from_millis(999))?.is_none());
        assert_eq!(load.status(), LoadStatus::Pending);
        assert_eq!(load.source.loads.get(), 0);

        Ok(())
    }

    #[test]
    fn ready_at_deadline_and_loads_once() -> TestResult {
        let start = Instant::now();
        let mut load = DelayedLoad::new(CountingSource::default(), MENU_LOAD_DELAY, start);

        assert_eq!(
            load.poll(start + MENU_LOAD_DELAY)?,
            Some(&vec!["m1", "m2"])
        );
        assert!(load.poll(start + Duration::from_secs(5))?.is_some());
        assert_eq!(load.source.loads.get(), 1);
        assert_eq!(load.status(), LoadStatus::Ready);
        assert!(!load.is_loading());

        Ok(())
    }

    #[test]
    fn cancel_before_deadline_prevents_load() -> TestResult {
        let start = Instant::now();
        let mut load = DelayedLoad::new(CountingSource::default(), RESTAURANTS_LOAD_DELAY, start);

        load.cancel();

        assert!(load.poll(start + Duration::from_secs(10))?.is_none());
        assert_eq!(load.status(), LoadStatus::Cancelled);
        assert_eq!(load.source.loads.get(), 0);

        Ok(())
    }

    #[test]
    fn failed_load_stays_pending_and_retries() {
        let start = Instant::now();
        let source = CountingSource {
            fail: true,
            ..CountingSource::default()
        };
        let mut load = DelayedLoad::new(source, Duration::ZERO, start);

        assert_eq!(load.poll(start), Err("unavailable"));
        assert_eq!(load.poll(start), Err("unavailable"));
        assert_eq!(load.status(), LoadStatus::Pending);
        assert_eq!(load.source.loads.get(), 2);
    }

    #[test]
    fn remaining_counts_down() {
        let start = Instant::now();
        let load = DelayedLoad::new(CountingSource::default(), MENU_LOAD_DELAY, start);

        assert_eq!(load.remaining(start), Some(MENU_LOAD_DELAY));
        assert_eq!(
            load.remaining(start + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
        assert_eq!(load.remaining(start + MENU_LOAD_DELAY), None);
    }

    #[test]
    fn into_output_after_ready() -> TestResult {
        let start = Instant::now();
        let mut load = DelayedLoad::new(CountingSource::default(), Duration::ZERO, start);

        load.poll(start)?;

        assert_eq!(load.into_output(), Some(vec!["m1", "m2"]));

        Ok(())
    }
}
