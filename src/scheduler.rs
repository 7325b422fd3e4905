use crate::clock::Clock;
use crate::config::Features;
use crate::dispatcher::{Delivery, DisplaySurface, Dispatcher};
use crate::error::{RemError, Result};
use crate::history::{HistoryEntry, HistoryLog};
use crate::messages::{MessagePool, RESET_SENTINEL};
use crate::mode::NotificationMode;
use crate::timer::{IntervalTimer, TimerHandle};
use log::{debug, info, warn};
use serde::Serialize;
use std::num::NonZeroU32;
use std::time::Duration;

pub const TEST_MESSAGE: &str = "🧪 This is a test reminder!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderConfig {
    /// Zero until the first `start`.
    pub interval_minutes: u32,
    pub mode: NotificationMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub active: bool,
    pub timer_exists: bool,
}

/// Pushed back to the command surface; drained with `drain_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    HistoryUpdated(Vec<HistoryEntry>),
    /// A tick fired; carries the period until the next one.
    Tick(Duration),
}

pub struct Scheduler<C: Clock + Clone> {
    clock: C,
    timer: IntervalTimer<C>,
    handle: Option<TimerHandle>,
    config: ReminderConfig,
    pool: MessagePool,
    dispatcher: Dispatcher,
    history: HistoryLog,
    features: Features,
    events: Vec<SchedulerEvent>,
}

impl<C: Clock + Clone> Scheduler<C> {
    pub fn create(clock: C, pool: MessagePool, dispatcher: Dispatcher, features: Features) -> Self {
        Self {
            timer: IntervalTimer::new(clock.clone()),
            clock,
            handle: None,
            config: ReminderConfig::default(),
            pool,
            dispatcher,
            history: HistoryLog::new(),
            features,
            events: Vec::new(),
        }
    }

    /// Stop everything and hand back the display surface, if one was attached.
    pub fn dispose(mut self) -> Option<Box<dyn DisplaySurface>> {
        self.stop();
        self.dispatcher.detach()
    }

    pub fn attach_surface(&mut self, surface: Box<dyn DisplaySurface>) {
        self.dispatcher.attach(surface);
    }

    pub fn start(&mut self, interval_minutes: NonZeroU32, mode: NotificationMode) -> String {
        if let Some(old) = self.handle.take() {
            self.timer.cancel(old);
            debug!("cancelled previous reminder timer");
        }

        let minutes = interval_minutes.get();
        self.config = ReminderConfig {
            interval_minutes: minutes,
            mode,
        };

        let period = Duration::from_secs(u64::from(minutes) * 60);
        self.handle = Some(self.timer.arm(period));
        info!("reminder armed every {} minute(s) using {}", minutes, mode);

        format!(
            "Reminding you to drink water every {} minute{} ({})",
            minutes,
            if minutes == 1 { "" } else { "s" },
            mode.label()
        )
    }

    pub fn stop(&mut self) -> String {
        if let Some(handle) = self.handle.take() {
            self.timer.cancel(handle);
            info!("reminder stopped");
        }
        self.dispatcher.close_all();

        "Water reminders stopped".to_string()
    }

    /// Deliver once right now, whatever the scheduler state.
    pub fn test(&mut self, mode: Option<NotificationMode>) -> Result<String> {
        if !self.dispatcher.has_surface() {
            return Err(RemError::SurfaceUnavailable);
        }

        let mode = mode.unwrap_or(self.config.mode);
        let message = self
            .pool
            .custom()
            .map(str::to_string)
            .unwrap_or_else(|| TEST_MESSAGE.to_string());

        match self.deliver(message, mode)? {
            Delivery::Unsupported => Ok(format!("Test reminder skipped, {} is unavailable", mode.label())),
            _ => Ok(format!("Test reminder sent ({})", mode.label())),
        }
    }

    pub fn status(&self) -> Status {
        Status {
            active: self.handle.is_some(),
            timer_exists: self.handle.is_some_and(|h| self.timer.is_live(h)),
        }
    }

    pub fn interval(&self) -> u32 {
        self.config.interval_minutes
    }

    pub fn mode(&self) -> NotificationMode {
        self.config.mode
    }

    pub fn set_custom_message(&mut self, text: &str) -> Result<String> {
        if !self.features.custom_message {
            return Err(RemError::FeatureDisabled("custom message"));
        }

        // an empty override would send blank reminders
        if text == RESET_SENTINEL || text.trim().is_empty() {
            self.pool.set_custom(None);
            return Ok("Reverted to the default reminder messages".to_string());
        }

        self.pool.set_custom(Some(text.to_string()));
        Ok(format!("Custom reminder message set: {}", text))
    }

    pub fn custom_message(&self) -> Option<&str> {
        self.pool.custom()
    }

    pub fn messages(&self) -> &[String] {
        self.pool.messages()
    }

    pub fn history(&self) -> Result<&[HistoryEntry]> {
        if !self.features.history {
            return Err(RemError::FeatureDisabled("history"));
        }
        Ok(self.history.list())
    }

    pub fn close_all(&mut self) {
        self.dispatcher.close_all();
    }

    /// Time left until the next tick while active.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.handle.and(self.timer.time_until_next())
    }

    /// Run the tick handler for every timer that has come due.
    pub fn poll(&mut self) -> usize {
        let due = self.timer.take_due();
        let count = due.len();
        for handle in due {
            self.on_tick(handle);
        }
        count
    }

    pub fn drain_events(&mut self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.events)
    }

    fn on_tick(&mut self, handle: TimerHandle) {
        if self.handle != Some(handle) {
            debug!("ignoring tick from stale timer {:?}", handle);
            return;
        }
        debug!("reminder tick");

        let message = self.pool.pick();
        match self.deliver(message, self.config.mode) {
            Ok(_) => {}
            Err(RemError::SurfaceUnavailable) => {
                warn!("no display surface attached, skipping this reminder")
            }
            Err(e) => warn!("error while delivering reminder: {}", e),
        }

        let period = self.timer.period(handle).unwrap_or_default();
        self.events.push(SchedulerEvent::Tick(period));
    }

    fn deliver(&mut self, message: String, mode: NotificationMode) -> Result<Delivery> {
        let now = self.clock.now();
        let delivery = self.dispatcher.dispatch(&message, mode, now)?;

        if delivery.delivered() && self.features.history {
            self.history.record(message, now);
            self.events
                .push(SchedulerEvent::HistoryUpdated(self.history.list().to_vec()));
        }

        Ok(delivery)
    }
}
