//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `eventconnect_core` linkage and storage bootstrap.
//! - Print the projected event list of the configured database.

use eventconnect_core::{project, CoreConfig, ProjectionQuery};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("eventconnect_core ping={}", eventconnect_core::ping());
    println!("eventconnect_core version={}", eventconnect_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    config.init_logging()?;

    let store = config.open_store().map_err(|err| err.to_string())?;
    let events = store.get_all().map_err(|err| err.to_string())?;
    let query = ProjectionQuery {
        radius_km: config.default_radius_km,
        ..ProjectionQuery::default()
    };

    let shown = project(&events, &query);
    println!("events total={} shown={}", events.len(), shown.len());
    for event in shown {
        let marker = if event.is_participating { "*" } else { " " };
        println!(
            "{marker} #{:<4} {}  [{}]  {}",
            event.id, event.date, event.category, event.title
        );
    }
    Ok(())
}
