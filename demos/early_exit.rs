//! Early-exit example.
//!
//! Shows how `Flow::Exit` surfaces as `ParseOutcome::EarlyExit` instead
//! of an error: the built-in `--help` and a custom `--version` both stop
//! the parse, and the host decides what to print.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p optline-demos --example early_exit -- --version
//! cargo run -p optline-demos --example early_exit -- -h
//! ```

use std::cell::Cell;
use std::process::ExitCode;

use optline_core::{Action, OptionSet, ParseOutcome, usage};

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();

    let wants_version = Cell::new(false);

    let mut opts = OptionSet::new("early_exit");
    opts.register(
        "version|V",
        Action::exit_flag(|| wants_version.set(true)),
        "Print the version and exit.",
    )
    .expect("option names are static and unique");

    match opts.parse_argv(&argv) {
        Ok(ParseOutcome::EarlyExit) if wants_version.get() => {
            println!("early_exit {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Ok(ParseOutcome::EarlyExit) => {
            print!("{}", usage::render(&opts));
            ExitCode::SUCCESS
        }
        Ok(ParseOutcome::Completed(rest)) => {
            println!("nothing requested an exit; leftover: {rest:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("early_exit: {err}");
            ExitCode::from(2)
        }
    }
}
