//! session — drives the timekeeping crates from a console.
//!
//! ```text
//! session [settings.json] [state.json]
//! ```
//!
//! Reads commands from stdin, one per line (see [`command`]).  The elapsed
//! counter is persisted to the state file (default `session-state.json`);
//! on first run it is seeded from the settings' `totalElapsedMinutes`.
//! Logging goes to stderr; set `RUST_LOG=debug` for per-change detail.

mod command;
mod host;

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;

use et_announce::AutoTellTime;
use et_daylight::DaylightCycle;
use et_keeper::{CounterStore, Role, TOTAL_ELAPSED_MINUTES_KEY, TimeKeeper, TimeKeeperBuilder, TimeUpdate};
use et_settings::{WorldSettings, load_settings};

use command::{Command, parse_command};
use host::{ConsoleScene, JsonFileStore, StdoutChat};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_STATE_PATH: &str = "session-state.json";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => load_settings(Path::new(&path))?,
        None => WorldSettings::default(),
    };
    let state_path = args.next().unwrap_or_else(|| DEFAULT_STATE_PATH.to_string());

    // 1. Store, seeded on first run.
    let mut store = JsonFileStore::open(&state_path)?;
    if !store.contains(TOTAL_ELAPSED_MINUTES_KEY) {
        if let Some(start) = settings.total_elapsed_minutes {
            store.set(TOTAL_ELAPSED_MINUTES_KEY, start)?;
        }
    }

    // 2. Observers.
    let daylight = Arc::new(Mutex::new(DaylightCycle::new(
        settings.daylight.clone(),
        settings.keeper.minutes_per_tick,
        ConsoleScene::new(settings.daylight.night_darkness),
    )?));
    let teller = Arc::new(Mutex::new(AutoTellTime::new(
        settings.auto_tell.clone(),
        settings.calendar.display,
        StdoutChat,
    )));

    // 3. Keeper.
    let mut keeper = TimeKeeperBuilder::new(store, Role::Gamemaster)
        .config(settings.keeper.clone())
        .calendar(settings.calendar.clone())
        .chat(StdoutChat)
        .observer(daylight.clone())
        .observer(teller.clone())
        .build()?;

    log::info!("session started at {}", keeper.get_time()?);
    keeper.initialise()?;
    print_now(&keeper)?;

    // 4. Command loop.
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        let update = match cmd {
            Command::Increment(delta) => keeper.increment(delta)?,
            Command::Set(time) => keeper.set(time)?,
            Command::Step => keeper.increment_default()?,
            Command::Small { forward } => keeper.step_small(forward)?,
            Command::Large { forward } => keeper.step_large(forward)?,
            Command::Tell => {
                keeper.tell_time()?;
                continue;
            }
            Command::Now => {
                print_now(&keeper)?;
                continue;
            }
            Command::Quit => break,
        };
        report(&update);
    }

    // 5. Surface anything the observers swallowed.
    if let Some(e) = daylight.lock().take_error() {
        eprintln!("daylight error: {e}");
    }
    if let Some(e) = teller.lock().take_error() {
        eprintln!("announce error: {e}");
    }
    log::info!("session ended at {}", keeper.get_time()?);
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_now<S: CounterStore>(keeper: &TimeKeeper<S, Role>) -> Result<()> {
    let cal = keeper.calendar_time()?;
    println!(
        "{}  ({} {}, {}, {} {})",
        keeper.to_time_string(true)?,
        keeper.calendar().week_name,
        cal.week + 1,
        cal.weekday_name,
        cal.shift_name,
        cal.time.time_of_day(),
    );
    Ok(())
}

fn report(update: &TimeUpdate) {
    match update {
        TimeUpdate::Changed(ev) => {
            println!("{} -> {} ({:+} min)", ev.old_time, ev.new_time, ev.delta_minutes());
            if ev.crossed_day() {
                println!("a new day begins");
            }
        }
        TimeUpdate::Unchanged => println!("no change"),
        TimeUpdate::Denied => println!("not permitted"),
    }
}
