//! Demo front end for the optline parser.
//!
//! Registers a handful of rounding options over the real process
//! arguments, prints whatever the parser leaves over, and honors the
//! built-in `--help` by rendering usage and exiting cleanly. Parse
//! failures go to stderr with exit code 2.

use std::error::Error;
use std::process::ExitCode;

use optline_core::{Action, InvalidValue, OptionSet, ParseOutcome, usage};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let prog = argv
        .first()
        .map(String::as_str)
        .unwrap_or("optline")
        .to_string();

    match run(&prog, &argv) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{prog}: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(prog: &str, argv: &[String]) -> Result<ExitCode, Box<dyn Error>> {
    let mut rounded_up = 0i64;
    let mut rounded_down = 0i64;
    let mut scale = 1.0f64;
    let mut file = String::new();
    let mut pings = 0u32;

    let leftovers;
    {
        let mut opts = OptionSet::new(prog);
        opts.register(
            "up",
            Action::try_param(|value| {
                let d: f64 = value.parse().map_err(InvalidValue::new)?;
                rounded_up = d.ceil() as i64;
                Ok(())
            }),
            "Round the given number up.",
        )?;
        opts.register(
            "down|d",
            Action::try_param(|value| {
                let d: f64 = value.parse().map_err(InvalidValue::new)?;
                rounded_down = d.floor() as i64;
                Ok(())
            }),
            "Round the given number down.",
        )?;
        opts.register("dub", Action::store(&mut scale), "Scale factor.")?;
        opts.register("b|p|q", Action::flag(|| pings += 1), "Ping once per use.")?;
        opts.register("file|in|f", Action::store(&mut file), "Input file.")?;

        match opts.parse_argv(argv)? {
            ParseOutcome::EarlyExit => {
                print!("{}", usage::render(&opts));
                return Ok(ExitCode::SUCCESS);
            }
            ParseOutcome::Completed(rest) => leftovers = rest,
        }
    }

    debug!(leftovers = leftovers.len(), pings, "parse complete");
    println!("leftover: {leftovers:?}");
    println!("up = {rounded_up} ; down = {rounded_down} ; dub = {scale}");
    println!("pings = {pings}");
    println!("file = {file}");
    Ok(ExitCode::SUCCESS)
}
