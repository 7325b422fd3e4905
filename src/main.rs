mod clock;
mod command;
mod config;
mod dispatcher;
mod error;
mod history;
mod messages;
mod mode;
mod process;
mod scheduler;
mod surface;
mod timer;
mod utils;

use clap::{Parser, Subcommand};
use clock::{Clock, SystemClock};
use command::Console;
use config::{generate_config, Config};
use crate::error::RemError;
use dispatcher::Dispatcher;
use log::{error, info};
use messages::MessagePool;
use mode::NotificationMode;
use process::{spawn_stdin_reader, Process};
use scheduler::Scheduler;
use std::io;
use std::sync::mpsc;

const APP_NAME: &str = "hydrate";

#[derive(Parser)]
#[command(version, about = "Reminds you to drink water", long_about = None)]
struct Args {
    #[arg(short = 'c', long = "config", default_value_t = ("~/.config/hydrate.json").to_string())]
    config: String,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Show reminders in the terminal even when desktop notifications are available
    #[arg(long = "terminal")]
    terminal: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reminder and read commands from stdin
    Run {
        /// Start right away with this interval (e.g. 30, 45m, 1h 30m)
        #[arg(short = 'i', long = "interval")]
        interval: Option<String>,

        #[arg(short = 'm', long = "mode")]
        mode: Option<NotificationMode>,
    },
    /// Send a single test reminder and exit
    Test {
        #[arg(short = 'm', long = "mode")]
        mode: Option<NotificationMode>,
    },
    /// List the reminder messages in use
    Messages,
    /// Write an example config file
    InitConfig,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn build_scheduler<C: Clock + Clone>(config: &Config, clock: C) -> Scheduler<C> {
    Scheduler::create(
        clock,
        MessagePool::new(config.message_pool()),
        Dispatcher::new(config.title.clone(), config.features.native_notifications),
        config.features,
    )
}

fn run(
    config: &Config,
    interval: Option<&str>,
    mode: Option<NotificationMode>,
    terminal: bool,
) -> Result<(), RemError> {
    let clock = SystemClock::new();
    let mut scheduler = build_scheduler(config, clock.clone());
    scheduler.attach_surface(surface::default_surface(APP_NAME, terminal));

    let mut process = Process::new(scheduler, Console::new(clock, io::stdout()));

    if interval.is_some() || mode.is_some() || config.autostart {
        let minutes = match interval {
            Some(interval) => utils::parse_interval_minutes(interval)?,
            None => config.interval()?,
        };
        process.autostart(minutes, mode.unwrap_or(config.mode));
    }

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx);
    process.run(rx);

    Ok(())
}

fn test(config: &Config, mode: Option<NotificationMode>, terminal: bool) {
    let mut scheduler = build_scheduler(config, SystemClock::new());
    scheduler.attach_surface(surface::default_surface(APP_NAME, terminal));

    // not disposed: the popup stays up after we exit
    match scheduler.test(Some(mode.unwrap_or(config.mode))) {
        Ok(reply) => println!("{}", reply),
        Err(e) => eprintln!("Unable to send test reminder: {}", e),
    }
}

fn list(config: &Config) {
    let pool = MessagePool::new(config.message_pool());
    for (i, message) in pool.messages().iter().enumerate() {
        println!("{}. {}", i, message);
    }
}

fn main() -> Result<(), RemError> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config_path = utils::expand_path(&args.config);

    if let Commands::InitConfig = args.command {
        if generate_config(&config_path)? {
            println!("config written to {}", config_path.display());
        } else {
            println!("config already exists at {}", config_path.display());
        }
        return Ok(());
    }

    let config = &Config::load(&config_path).inspect_err(|e| {
        error!("error while loading config: {}", e);
    })?;

    match &args.command {
        Commands::Run { interval, mode } => run(config, interval.as_deref(), *mode, args.terminal)?,
        Commands::Test { mode } => test(config, *mode, args.terminal),
        Commands::Messages => list(config),
        Commands::InitConfig => {}
    }

    info!("bye");
    Ok(())
}
