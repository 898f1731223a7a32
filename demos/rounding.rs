//! Rounding example.
//!
//! Registers callback options that round numeric parameters, a typed
//! store, and a bundled alias group, then parses the real process
//! arguments.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p optline-demos --example rounding -- --up 2.3 -d7.9 --dub=3.5 -bpq rest
//! ```

use std::cell::Cell;
use std::process::ExitCode;

use optline_core::{Action, InvalidValue, OptionSet, ParseOutcome, usage};

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();

    let rounded_up = Cell::new(0i64);
    let rounded_down = Cell::new(0i64);
    let pings = Cell::new(0u32);
    let mut scale = 1.0f64;
    let mut file = String::new();

    let leftovers;
    {
        let mut opts = OptionSet::new("rounding");
        opts.register(
            "up",
            Action::try_param(|v| {
                let d: f64 = v.parse().map_err(InvalidValue::new)?;
                rounded_up.set(d.ceil() as i64);
                Ok(())
            }),
            "Round the given number up.",
        )
        .expect("option names are static and unique");
        opts.register(
            "down|d",
            Action::try_param(|v| {
                let d: f64 = v.parse().map_err(InvalidValue::new)?;
                rounded_down.set(d.floor() as i64);
                Ok(())
            }),
            "Round the given number down.",
        )
        .expect("option names are static and unique");
        opts.register("dub", Action::store(&mut scale), "Scale factor.")
            .expect("option names are static and unique");
        opts.register("b|p|q", Action::flag(|| pings.set(pings.get() + 1)), "Ping.")
            .expect("option names are static and unique");
        opts.register("file|in|f", Action::store(&mut file), "Input file.")
            .expect("option names are static and unique");

        match opts.parse_argv(&argv) {
            Ok(ParseOutcome::EarlyExit) => {
                print!("{}", usage::render(&opts));
                return ExitCode::SUCCESS;
            }
            Ok(ParseOutcome::Completed(rest)) => leftovers = rest,
            Err(err) => {
                eprintln!("rounding: {err}");
                return ExitCode::from(2);
            }
        }
    }

    println!("leftover: {leftovers:?}");
    println!(
        "up = {} ; down = {} ; dub = {scale}",
        rounded_up.get(),
        rounded_down.get()
    );
    println!("pings = {}", pings.get());
    println!("file = {file}");
    ExitCode::SUCCESS
}
