//! Main application entry point.

use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: lockbox <session.json> [scene.json]";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Lockbox");

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(session) = args.next() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };
    let config = args.next();

    match lockbox_app::run(config.as_deref(), &session) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to write summary: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
