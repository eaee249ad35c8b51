mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use clap::Parser;
use cli_modes::{
    CliModeResult, edit_mode, folders_mode, read_mode, suggest_mode, task_mode, use_color,
    write_mode,
};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tdo_core::Tdo;
use tracing_subscriber::EnvFilter;

use cli::Cli;

type Mode = fn(&Cli, &Renderer, &Tdo) -> Result<CliModeResult>;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tdo: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `TDO_LOG` (eg. `TDO_LOG=tdo_core=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TDO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let tdo = Tdo::new()?;

    let renderer = Renderer::new(Some(RenderOptions {
        date_format: tdo.config.date_format.to_string(),
        use_color: use_color(&cli),
        short_mode: cli.short,
    }));

    if cli.path {
        renderer.print_info(&format!("{}", tdo.config.tasks_dir.display()));
        return Ok(());
    }

    let modes: [Mode; 6] = [
        folders_mode,
        suggest_mode,
        task_mode,
        edit_mode,
        read_mode,
        write_mode,
    ];
    for mode in modes {
        if let CliModeResult::Finish = mode(&cli, &renderer, &tdo)? {
            return Ok(());
        }
    }

    Ok(())
}
