use crate::clock::Clock;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

struct Interval {
    period: Duration,
    due: Duration,
}

/// Repeating timers driven by an injected clock. Nothing fires on its own:
/// the owner asks for due handles with `take_due`.
pub struct IntervalTimer<C: Clock> {
    clock: C,
    intervals: BTreeMap<TimerHandle, Interval>,
    next_id: u64,
}

impl<C: Clock> IntervalTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            intervals: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// First fire is one full period from now.
    pub fn arm(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.intervals.insert(
            handle,
            Interval {
                period,
                due: self.clock.elapsed() + period,
            },
        );
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.intervals.remove(&handle).is_some()
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.intervals.contains_key(&handle)
    }

    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.intervals.len()
    }

    pub fn period(&self, handle: TimerHandle) -> Option<Duration> {
        self.intervals.get(&handle).map(|i| i.period)
    }

    /// Time left until the earliest timer is due, zero if one is overdue.
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.elapsed();
        self.intervals
            .values()
            .map(|i| i.due.saturating_sub(now))
            .min()
    }

    /// Each due timer is reported once and rescheduled to its next period
    /// boundary; periods missed while nobody polled are skipped, not replayed.
    pub fn take_due(&mut self) -> Vec<TimerHandle> {
        let now = self.clock.elapsed();
        let mut fired = Vec::new();

        for (handle, interval) in self.intervals.iter_mut() {
            if interval.due > now {
                continue;
            }
            fired.push(*handle);

            if interval.period.is_zero() {
                interval.due = now;
                continue;
            }
            while interval.due <= now {
                interval.due += interval.period;
            }
        }

        fired
    }
}
