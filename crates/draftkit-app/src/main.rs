//! Command-line entry point: `draftkit <script.json> [config.json]`.

use draftkit_app::{ReplayResult, Script, replay};
use draftkit_core::CanvasConfig;
use std::process::ExitCode;

fn run(script_path: &str, config_path: Option<&str>) -> ReplayResult<String> {
    let config = match config_path {
        Some(path) => CanvasConfig::load(path)?,
        None => CanvasConfig::default(),
    };
    let script = Script::load(script_path)?;
    let report = replay(config, &script)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Draftkit");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(script_path) = args.first() else {
        eprintln!("usage: draftkit <script.json> [config.json]");
        return ExitCode::from(2);
    };

    match run(script_path, args.get(1).map(String::as_str)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("draftkit: {err}");
            ExitCode::FAILURE
        }
    }
}
