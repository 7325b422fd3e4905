use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Time source shared by the timer and the scheduler.
pub trait Clock {
    /// Monotonic time since the clock was created.
    fn elapsed(&self) -> Duration;

    /// Local wall-clock time, used for history timestamps and popups.
    fn now(&self) -> DateTime<Local>;
}

#[derive(Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Clone)]
pub struct ManualClock {
    offset: std::rc::Rc<std::cell::Cell<Duration>>,
    base: DateTime<Local>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        use chrono::TimeZone;

        Self {
            offset: Default::default(),
            base: Local
                .with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
                .earliest()
                .unwrap_or_else(Local::now),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.offset.get()
    }

    fn now(&self) -> DateTime<Local> {
        let offset = chrono::Duration::from_std(self.offset.get())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.base + offset
    }
}
