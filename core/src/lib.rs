//! Callback-dispatching command-line option parser.
//!
//! This crate classifies a stream of raw command-line tokens against a
//! registered set of named options and fires a callback for every match:
//!
//! - [`OptionSet`] — owns the registered options and their spellings;
//!   rejects duplicate or empty names at registration time.
//! - [`Action`] — the two callback shapes an option can carry: a
//!   zero-argument handler or a one-string-argument handler, including
//!   the [`Action::store`] adapter for typed destinations.
//! - [`OptionSet::parse`] — the single left-to-right pass that splits
//!   short-option bundles, separates long options from inline `=`
//!   values, feeds deferred parameters from the next token, and returns
//!   everything else as positional arguments.
//! - [`usage`] — renders a help block from the set's public
//!   introspection.
//!
//! Positional arguments are passed back untouched; type coercion and
//! anything process-level (reading real argv, exit codes) belong to the
//! host. An action can return [`Flow::Exit`] to stop parsing with
//! success semantics, surfaced as [`ParseOutcome::EarlyExit`] — the
//! built-in `--help` option does exactly that.
//!
//! # Example
//!
//! ```
//! use optline_core::{Action, OptionSet, ParseOutcome};
//!
//! let mut verbose = 0u32;
//! let mut output = String::new();
//! let leftovers = {
//!     let mut opts = OptionSet::new("mytool");
//!     opts.register("verbose|v", Action::flag(|| verbose += 1), "Chatty output.")?;
//!     opts.register("output|out|o", Action::store(&mut output), "Output path.")?;
//!     match opts.parse(["-v", "--out=result.txt", "input.txt"])? {
//!         ParseOutcome::Completed(rest) => rest,
//!         ParseOutcome::EarlyExit => return Ok(()), // --help was given
//!     }
//! };
//! assert_eq!(verbose, 1);
//! assert_eq!(output, "result.txt");
//! assert_eq!(leftovers, ["input.txt"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod action;
mod parse;
mod registry;
pub mod usage;

pub use action::{Action, Flow, InvalidValue};
pub use parse::{OPTION_LEAD, ParseError, ParseOutcome, TERMINATOR, VALUE_DELIMITER};
pub use registry::{NAME_DIVIDER, OptionInfo, OptionSet, RegistrationError};
