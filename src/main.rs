use std::process::ExitCode;

use clap::Parser;
use crossterm::terminal;

use term_desk::config::{Cli, DeskConfig};
use term_desk::desktop::Desktop;
use term_desk::drivers::OutputDriver;
use term_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_desk::error::DeskResult;
use term_desk::runner::run_desktop;
use term_desk::tracing_sub;
use term_desk::window::Size;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("term-desk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> DeskResult<()> {
    let config = DeskConfig::try_from(cli)?;
    tracing_sub::init(&config.log_target, config.log_level)?;

    let (width, height) = terminal::size()?;
    let mut desktop = Desktop::from_config(Size::new(width, height), &config);
    tracing::info!(width, height, open = config.open.len(), "starting desktop");

    let mut output = ConsoleOutputDriver::new()?;
    let result = run_desktop(
        &mut desktop,
        ConsoleInputDriver::new(),
        &mut output,
        config.poll_interval,
    );
    // restore the terminal before reporting any loop error
    let restored = output.exit();
    result?;
    restored?;
    Ok(())
}
