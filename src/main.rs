use clap::Parser;
use colored::Colorize;
use pidash::cli::Cli;
use pidash::tui::MIN_COLS;

fn main() {
    // The dashboard layout needs a wide terminal; bail out before any
    // argument parsing or remote connection is attempted.
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols >= MIN_COLS => {}
        Ok((cols, _)) => {
            eprintln!("Terminal must be at least {MIN_COLS} columns wide (current: {cols})");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Could not determine terminal size: {err}");
            std::process::exit(1);
        }
    }

    let cli = Cli::parse();
    if let Err(err) = cli.run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
