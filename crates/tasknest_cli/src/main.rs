//! TaskNest terminal front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the backing database.
//! - Hand control to the interactive shell.

mod commands;
mod config;
mod shell;

use clap::Parser;
use config::CliConfig;
use log::{error, info};
use std::io;
use tasknest_core::db::{open_db, open_db_in_memory};
use tasknest_core::{init_logging, LoadOutcome, SqliteKeyValueStore, Store, UuidIdSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse().resolve()?;
    std::fs::create_dir_all(&config.data_dir)?;

    let log_dir = config.log_dir();
    if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
        // Logging is best effort; the task list still works without it.
        eprintln!("warning: {err}");
    }

    let conn = if config.in_memory {
        open_db_in_memory()?
    } else {
        open_db(config.db_path())?
    };

    let store = Store::load(SqliteKeyValueStore::new(&conn), UuidIdSource);
    let report = store.load_report();
    for (key, outcome) in [("projects", &report.projects), ("todos", &report.todos)] {
        if let LoadOutcome::Corrupt(err) = outcome {
            eprintln!("warning: stored {key} were unreadable ({err}); starting fresh");
        }
    }

    info!(
        "event=cli_start module=cli status=ok in_memory={}",
        config.in_memory
    );
    let mut shell = shell::Shell::new(store);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = shell.run(stdin.lock(), &mut stdout);

    if shell.store().persist_failures() > 0 {
        eprintln!(
            "warning: {} change(s) could not be saved",
            shell.store().persist_failures()
        );
    }

    if let Err(err) = &result {
        error!("event=cli_exit module=cli status=error error={err}");
    }
    result?;
    Ok(())
}
