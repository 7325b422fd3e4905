use crate::clock::Clock;
use crate::error::RemError;
use crate::mode::NotificationMode;
use crate::scheduler::{Scheduler, SchedulerEvent};
use crate::utils::{minutes_left, parse_interval_minutes};
use clap::{Parser, Subcommand};
use log::debug;
use std::io::Write;
use std::num::NonZeroU32;
use std::time::Duration;

/// One line typed into the running reminder.
#[derive(Parser, Debug, PartialEq)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Remind every INTERVAL (e.g. 30, 45m, 1h 30m), optionally followed by a mode
    Start {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        words: Vec<String>,
    },
    Stop,
    /// Send one reminder right now
    Test {
        mode: Option<NotificationMode>,
    },
    Status {
        #[arg(long)]
        json: bool,
    },
    History {
        #[arg(long)]
        json: bool,
    },
    Mode,
    Interval,
    /// Set the reminder text, or `message reset` for the defaults
    Message {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    CurrentMessage,
    /// Close the reminder popup
    Close,
    Messages,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Console front end: turns lines into scheduler calls and prints what the
/// scheduler pushes back.
pub struct Console<C: Clock, W: Write> {
    clock: C,
    out: W,
    /// Clock-relative instant of the next reminder, for the countdown.
    next_due: Option<Duration>,
}

impl<C: Clock + Clone, W: Write> Console<C, W> {
    pub fn new(clock: C, out: W) -> Self {
        Self {
            clock,
            out,
            next_due: None,
        }
    }

    pub fn execute(&mut self, scheduler: &mut Scheduler<C>, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }

        if let Some(text) = message_text(line) {
            let reply = self.set_message(scheduler, text);
            self.say(&reply);
            return Flow::Continue;
        }

        let parsed = match Line::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.say(e.to_string().trim_end());
                return Flow::Continue;
            }
        };

        if parsed.command == Command::Quit {
            return Flow::Quit;
        }

        let reply = self.run(scheduler, parsed.command);
        self.say(&reply);
        Flow::Continue
    }

    fn run(&mut self, scheduler: &mut Scheduler<C>, command: Command) -> String {
        match command {
            Command::Start { words } => {
                let (interval, mode) = split_mode(&words);
                let minutes = match parse_interval_minutes(&interval) {
                    Ok(minutes) => minutes,
                    Err(e) => return e.to_string(),
                };
                let mode = mode.unwrap_or(scheduler.mode());
                self.arm(scheduler, minutes, mode)
            }
            Command::Stop => {
                self.next_due = None;
                scheduler.stop()
            }
            Command::Test { mode } => match scheduler.test(mode) {
                Ok(reply) => reply,
                Err(e) => format!("Unable to send test reminder: {}", e),
            },
            Command::Status { json } => {
                let status = scheduler.status();
                if json {
                    return to_json(&status);
                }

                let mut reply = if status.active {
                    "Status: running".to_string()
                } else {
                    "Status: paused".to_string()
                };
                if let Some(minutes) = self.countdown() {
                    reply.push_str(&format!("\nNext reminder in {} minute(s)", minutes));
                }
                reply
            }
            Command::History { json } => match scheduler.history() {
                Ok(history) if json => to_json(&history),
                Ok([]) => "No reminders yet".to_string(),
                Ok(history) => history
                    .iter()
                    .map(|e| format!("{}  {}", e.display_time(), e.message()))
                    .collect::<Vec<_>>()
                    .join("\n"),
                Err(e) => e.to_string(),
            },
            Command::Mode => scheduler.mode().to_string(),
            Command::Interval => scheduler.interval().to_string(),
            Command::Message { text } => self.set_message(scheduler, &text.join(" ")),
            Command::CurrentMessage => scheduler
                .custom_message()
                .map(str::to_string)
                .unwrap_or_else(|| "(default messages)".to_string()),
            Command::Close => {
                scheduler.close_all();
                "Reminder popups closed".to_string()
            }
            Command::Messages => scheduler
                .messages()
                .iter()
                .enumerate()
                .map(|(i, m)| format!("{}. {}", i, m))
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Quit => String::new(),
        }
    }

    fn set_message(&mut self, scheduler: &mut Scheduler<C>, text: &str) -> String {
        match scheduler.set_custom_message(text) {
            Ok(reply) => reply,
            Err(e) => e.to_string(),
        }
    }

    /// Start the scheduler and begin counting down to the first reminder.
    pub fn arm(
        &mut self,
        scheduler: &mut Scheduler<C>,
        minutes: NonZeroU32,
        mode: NotificationMode,
    ) -> String {
        let reply = scheduler.start(minutes, mode);
        self.next_due =
            Some(self.clock.elapsed() + Duration::from_secs(u64::from(minutes.get()) * 60));
        reply
    }

    /// Forward whatever the scheduler pushed since the last call.
    pub fn relay_events(&mut self, scheduler: &mut Scheduler<C>) {
        for event in scheduler.drain_events() {
            match event {
                SchedulerEvent::HistoryUpdated(history) => {
                    if let Some(latest) = history.first() {
                        let line = format!("[{}] {}", latest.display_time(), latest.message());
                        self.say(&line);
                    }
                }
                SchedulerEvent::Tick(period) => {
                    debug!("tick, next one in {:?}", period);
                    self.next_due = Some(self.clock.elapsed() + period);
                }
            }
        }
    }

    fn countdown(&self) -> Option<u128> {
        let remaining = self.next_due?.checked_sub(self.clock.elapsed())?;
        minutes_left(remaining.as_millis())
    }

    pub fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            debug!("error while writing to console: {}", e);
        }
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .map_err(RemError::from)
        .unwrap_or_else(|e| e.to_string())
}

/// The text after `message`, exactly as typed. One pair of surrounding
/// quotes is dropped. Bare `message` and help flags go through clap.
fn message_text(line: &str) -> Option<&str> {
    let (keyword, rest) = line.split_once(char::is_whitespace)?;
    if keyword != "message" {
        return None;
    }

    let rest = rest.trim();
    if rest.is_empty() || rest == "-h" || rest == "--help" {
        return None;
    }

    for quote in ['"', '\''] {
        if let Some(inner) = rest
            .strip_prefix(quote)
            .and_then(|r| r.strip_suffix(quote))
        {
            return Some(inner);
        }
    }
    Some(rest)
}

/// `start 1h 30m system` -> ("1h 30m", Some(System)).
fn split_mode(words: &[String]) -> (String, Option<NotificationMode>) {
    if let [interval @ .., last] = words {
        if !interval.is_empty() {
            if let Ok(mode) = last.parse() {
                return (interval.join(" "), Some(mode));
            }
        }
    }
    (words.join(" "), None)
}
