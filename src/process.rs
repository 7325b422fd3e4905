use crate::clock::Clock;
use crate::command::{Console, Flow};
use crate::mode::NotificationMode;
use crate::scheduler::Scheduler;
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};
use std::num::NonZeroU32;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Upper bound on how long the loop sleeps with nothing scheduled.
const IDLE_WAIT: Duration = Duration::from_secs(1);

pub enum Input {
    Line(String),
    Eof,
}

/// Owns the scheduler and runs every command and tick on one thread, one at
/// a time.
pub struct Process<C: Clock + Clone, W: Write> {
    scheduler: Scheduler<C>,
    console: Console<C, W>,
}

impl<C: Clock + Clone, W: Write> Process<C, W> {
    pub fn new(scheduler: Scheduler<C>, console: Console<C, W>) -> Self {
        Self { scheduler, console }
    }

    /// Arm the timer before any input arrives.
    pub fn autostart(&mut self, minutes: NonZeroU32, mode: NotificationMode) {
        let reply = self.console.arm(&mut self.scheduler, minutes, mode);
        self.console.say(&reply);
    }

    pub fn run(mut self, input: mpsc::Receiver<Input>) {
        info!("reminder loop started");

        loop {
            let wait = self
                .scheduler
                .time_until_next()
                .map_or(IDLE_WAIT, |next| next.min(IDLE_WAIT));

            match input.recv_timeout(wait) {
                Ok(Input::Line(line)) => {
                    if self.console.execute(&mut self.scheduler, &line) == Flow::Quit {
                        break;
                    }
                }
                Ok(Input::Eof) => {
                    debug!("input closed");
                    break;
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }

            self.scheduler.poll();
            self.console.relay_events(&mut self.scheduler);
        }

        self.scheduler.dispose();
        info!("reminder loop terminated");
    }
}

/// Feed stdin lines to the loop from a background thread.
pub fn spawn_stdin_reader(tx: mpsc::Sender<Input>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        debug!("stdin reader thread started");
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Input::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("error while reading input: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(Input::Eof);
        debug!("stdin reader thread terminated");
    })
}
